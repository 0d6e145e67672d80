//! Template fetching from the GitHub gist API

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;
use tokio::fs;
use url::Url;

/// Gist holding the shared config-file templates
pub const CONFIG_GIST_ID: &str = "a00a9e453c5aafa219829ad5d2eeaa74";

const GIST_API_BASE: &str = "https://api.github.com/gists/";

/// Errors from the remote template store.
///
/// Callers decide whether these are fatal; the scaffold pipeline discards
/// them with a logged warning.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid template store URL for set '{0}'")]
    Url(String),

    #[error("failed to reach the template store: {0}")]
    Http(#[from] reqwest::Error),

    #[error("template store returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to write {file}: {source}")]
    Write {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

/// A single file in the fetched template set
#[derive(Debug, Clone, Deserialize)]
pub struct GistFile {
    pub filename: String,
    pub content: String,
    #[serde(default)]
    pub truncated: bool,
}

/// Response shape of the gist API: a map from filename to file object
#[derive(Debug, Deserialize)]
struct GistResponse {
    files: HashMap<String, GistFile>,
}

/// Fetcher for named config files from a template set
pub struct TemplateFetcher {
    gist_id: String,
    client: reqwest::Client,
}

impl TemplateFetcher {
    /// Create a fetcher for the given template-set id.
    ///
    /// The GitHub API rejects requests without a user agent, so the client
    /// always identifies itself.
    pub fn new(gist_id: &str) -> Self {
        Self {
            gist_id: gist_id.to_string(),
            client: reqwest::Client::builder()
                .user_agent("create-monorepo")
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Fetch the template set and write each requested file into the current
    /// working directory. Requested names absent from the set are skipped.
    pub async fn fetch(&self, file_names: &[&str]) -> Result<(), FetchError> {
        let response = self.fetch_set().await?;

        for file in select_requested(&response.files, file_names) {
            fs::write(&file.filename, &file.content)
                .await
                .map_err(|source| FetchError::Write {
                    file: file.filename.clone(),
                    source,
                })?;
        }

        Ok(())
    }

    async fn fetch_set(&self) -> Result<GistResponse, FetchError> {
        let url = Url::parse(GIST_API_BASE)
            .and_then(|base| base.join(&self.gist_id))
            .map_err(|_| FetchError::Url(self.gist_id.clone()))?;

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        Ok(response.json().await?)
    }
}

/// Pick the files to write: requested names present in the fetched set, in
/// request order. Missing names are silently dropped.
fn select_requested<'a>(
    files: &'a HashMap<String, GistFile>,
    file_names: &[&str],
) -> Vec<&'a GistFile> {
    file_names
        .iter()
        .filter_map(|name| files.get(*name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_files() -> HashMap<String, GistFile> {
        let json = r#"{
            "files": {
                ".gitignore": {
                    "filename": ".gitignore",
                    "type": "text/plain",
                    "raw_url": "https://gist.github.com/raw/.gitignore",
                    "size": 12,
                    "content": "node_modules"
                },
                ".editorconfig": {
                    "filename": ".editorconfig",
                    "type": "text/plain",
                    "raw_url": "https://gist.github.com/raw/.editorconfig",
                    "size": 10,
                    "truncated": false,
                    "content": "root = true"
                }
            }
        }"#;
        let response: GistResponse = serde_json::from_str(json).unwrap();
        response.files
    }

    #[test]
    fn test_response_deserializes_with_extra_api_fields() {
        let files = sample_files();
        assert_eq!(files.len(), 2);
        assert_eq!(files[".gitignore"].content, "node_modules");
        assert!(!files[".editorconfig"].truncated);
    }

    #[test]
    fn test_select_requested_keeps_request_order() {
        let files = sample_files();
        let selected = select_requested(&files, &[".editorconfig", ".gitignore"]);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].filename, ".editorconfig");
        assert_eq!(selected[1].filename, ".gitignore");
    }

    #[test]
    fn test_select_requested_skips_missing_names() {
        let files = sample_files();
        let selected = select_requested(&files, &[".gitignore", "lefthook.yml"]);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].filename, ".gitignore");
    }

    #[test]
    fn test_select_requested_empty_for_unknown_set() {
        let files = sample_files();
        assert!(select_requested(&files, &["nope", "also-nope"]).is_empty());
    }
}
