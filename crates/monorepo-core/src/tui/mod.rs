//! Interactive prompt flow (cliclack-based)
//!
//! Only available when the `tui` feature is enabled; without it the crate
//! exposes the scaffold operations for custom front-ends.

#[cfg(feature = "tui")]
mod prompts;

#[cfg(feature = "tui")]
pub use prompts::{run, CreateArgs};
