//! Options command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::presentation::print_filter_options;

/// Execute the options command.
///
/// Lists the distinct values of each categorical field in the working set,
/// the same values the filter selectors and editor dropdowns offer.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let options = ctx.controller().filter_options();
    print_filter_options(&options);
    Ok(())
}
