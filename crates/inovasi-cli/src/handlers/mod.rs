//! Command handlers that drive the record controller.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &mut CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call controller handlers, signing in when a mutation asks for it
//!   3. Format output for the terminal
//!
//! Handlers should NOT:
//! - Call the record store directly
//! - Filter, sort or paginate records themselves

pub mod add;
pub mod delete;
pub mod delete_many;
pub mod edit;
pub mod export;
pub mod list;
pub mod options;
pub mod privilege;
pub mod show;
