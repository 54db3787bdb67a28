//! Reading input files from either a URL or the local filesystem

use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    Path(PathBuf),
}

impl Source {
    /// `http://` and `https://` are fetched, anything else is a path
    pub fn from_arg(arg: &str) -> Self {
        let lower = arg.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(arg.to_string())
        } else {
            Source::Path(PathBuf::from(arg))
        }
    }

    pub async fn fetch_text(&self, client: &reqwest::Client) -> Result<String> {
        match self {
            Source::Url(url) => {
                let response = client
                    .get(url)
                    .send()
                    .await
                    .with_context(|| format!("Request failed: {}", url))?;
                let status = response.status();
                if !status.is_success() {
                    return Err(anyhow::anyhow!("Failed to fetch ({}): {}", status, url));
                }
                response
                    .text()
                    .await
                    .with_context(|| format!("Failed to read response body: {}", url))
            }
            Source::Path(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display())),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => f.write_str(url),
            Source::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(60))
        .build()
        .context("Failed to build HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_arg() {
        assert_eq!(
            Source::from_arg("https://unicode.org/Public/emoji/16.0/emoji-test.txt"),
            Source::Url("https://unicode.org/Public/emoji/16.0/emoji-test.txt".into())
        );
        assert_eq!(Source::from_arg("HTTP://x"), Source::Url("HTTP://x".into()));
        assert_eq!(Source::from_arg("data/emoji-test.txt"), Source::Path("data/emoji-test.txt".into()));
    }

    #[tokio::test]
    async fn test_fetch_local_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("in.txt");
        std::fs::write(&path, "hello").unwrap();
        let client = http_client().unwrap();
        let text = Source::Path(path).fetch_text(&client).await.unwrap();
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn test_fetch_missing_file_fails() {
        let client = http_client().unwrap();
        let err = Source::Path("/nonexistent/emoji-test.txt".into())
            .fetch_text(&client)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
