//! External process execution and prerequisite probing
//!
//! This module provides:
//! - Async command execution with captured output
//! - Probing for required external binaries (composer, django-admin)

pub mod prereq;
pub mod process;

pub use prereq::BinaryPrereq;
pub use process::{run, run_shell, ProcessFailure, ProcessOutput};
