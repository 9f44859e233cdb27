//! Source fetching for the CLI: local files or http(s) URLs.

use anyhow::Context;
use chm_data::loader::Fetch;

#[derive(Debug, Clone, Default)]
pub struct SourceFetch {
    client: reqwest::Client,
}

impl SourceFetch {
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

impl Fetch for SourceFetch {
    async fn fetch_text(&self, location: &str) -> anyhow::Result<String> {
        if is_remote(location) {
            log::info!("Fetching {}", location);
            let text = self
                .client
                .get(location)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;
            Ok(text)
        } else {
            tokio::fs::read_to_string(location)
                .await
                .with_context(|| format!("cannot read {}", location))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_detection() {
        assert!(is_remote("https://example.org/data/USA.topojson"));
        assert!(is_remote("http://localhost:8080/a.csv"));
        assert!(!is_remote("data/gdpPerCapReal.csv"));
        assert!(!is_remote("/tmp/https-cache.csv"));
    }

    #[tokio::test]
    async fn reads_local_files() {
        let text = SourceFetch::new()
            .fetch_text("../fixtures/gdpPerCapReal.csv")
            .await
            .unwrap();
        assert!(text.starts_with("name,2010"));
        assert!(SourceFetch::new().fetch_text("../fixtures/nope.csv").await.is_err());
    }
}
