//! Monorepo Core - Library for scaffolding npm workspace monorepos
//!
//! This library drives the creation of a multi-package monorepo: a root
//! manifest with workspace globs, an optional design-tokens helper package,
//! an optional backend and frontend sub-package (each delegated to its own
//! framework generator), config files fetched from a remote template store,
//! and a composed README.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Process running, manifest editing,
//!   template fetching, README composition
//! - **Layer 2: Workflow Orchestration** - The scaffold pipeline in
//!   [`scaffold`], sequencing the core operations per user [`Selection`]
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt flow
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use monorepo_core::{scaffold, Selection, WorkspaceLayout};
//!
//! let layout = WorkspaceLayout::default();
//! let selection = Selection::default();
//! scaffold::create_root_manifest(&layout).await?;
//! ```

pub mod manifest;
pub mod readme;
pub mod runtime;
pub mod scaffold;
pub mod selection;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use manifest::{ManifestEditor, ScriptEntry};
pub use readme::{compose, Section};
pub use runtime::{BinaryPrereq, ProcessFailure, ProcessOutput};
pub use selection::{BackendKind, FrontendKind, Selection, WorkspaceLayout};
pub use templates::{FetchError, TemplateFetcher, CONFIG_GIST_ID};

#[cfg(feature = "tui")]
pub use tui::{run, CreateArgs};
