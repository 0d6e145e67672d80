//! Config-file templates fetched from the remote template store
//!
//! The store is a GitHub gist holding static dotfiles (ignore rules,
//! formatter and linter config, git-hook config). Fetching is best-effort:
//! the files are cosmetic, so the orchestrator logs failures instead of
//! aborting.

pub mod fetcher;

pub use fetcher::{FetchError, GistFile, TemplateFetcher, CONFIG_GIST_ID};
