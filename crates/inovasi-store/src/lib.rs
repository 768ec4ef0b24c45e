#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// RestClient is generic over the crate-private HttpBackend; callers use the
// PostgrestRecordStore alias through the RecordStore trait.
#![allow(private_interfaces, private_bounds)]

mod client;
mod config;
mod error;
mod http;
mod memory;
mod parsing;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Clients
pub use client::{PostgrestRecordStore, RestClient};
pub use memory::{MemoryRecordStore, StoreCall};

// Configuration
pub use config::{DEFAULT_TABLE, StoreConfig, StoreConfigError};
