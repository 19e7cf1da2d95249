//! Stamp search against the catalog server

use crate::config::Config;
use crate::error::{CatalogError, Result};
use axe_catalog_common::search::SEARCH_PATH;
use axe_catalog_common::{group_results, CombineMode, MatchMode, SearchQuery, SearchResponse, StampResult};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use std::fmt::Write;
use std::time::Duration;

#[derive(Clone)]
pub struct SearchClient {
    base_url: String,
    client: reqwest::Client,
}

impl SearchClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(session) = &config.session_id {
            let cookie = HeaderValue::from_str(&format!("sessionid={}", session))
                .map_err(|e| CatalogError::Config(format!("invalid session id: {}", e)))?;
            headers.insert(COOKIE, cookie);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: config.base_url(),
            client,
        })
    }

    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<StampResult>> {
        let url = self.search_url();
        tracing::debug!(%url, pairs = ?query.to_query_pairs(), "searching stamps");

        let response = self
            .client
            .get(&url)
            .query(&query.to_query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Server(format!("HTTP {} from {}", status, url)));
        }

        let body: SearchResponse = response.json().await?;
        tracing::debug!(count = body.results.len(), "search finished");
        Ok(body.results)
    }
}

pub fn build_query(
    text: Option<String>,
    manufacturer: Option<String>,
    stamp_type: Option<String>,
    exact: bool,
    or: bool,
    symbols: &[u32],
) -> SearchQuery {
    SearchQuery {
        text: text.unwrap_or_default(),
        manufacturer: manufacturer.unwrap_or_default(),
        stamp_type: stamp_type.unwrap_or_default(),
        match_mode: if exact { MatchMode::Exact } else { MatchMode::Partial },
        combine_mode: if or { CombineMode::Or } else { CombineMode::And },
        symbol_ids: symbols.iter().map(|id| id.to_string()).collect(),
    }
}

/// Summary line plus one block per non-empty bucket
pub fn render_results(query: &SearchQuery, results: &[StampResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", query.summary(results.len()));

    for group in group_results(results, query) {
        let _ = writeln!(out, "\n{} ({})", group.bucket.label(), group.items.len());
        for stamp in group.items {
            let _ = writeln!(
                out,
                "  [{}] {} - {} • {} [{}]",
                stamp.id, stamp.name, stamp.manufacturer, stamp.stamp_type, stamp.status
            );
            if let Some(transcription) = stamp.transcription.as_deref().filter(|t| !t.is_empty()) {
                let _ = writeln!(out, "       \"{}\"", transcription);
            }
            if !stamp.symbols.is_empty() {
                let _ = writeln!(out, "       symboler: {}", stamp.symbols.join(", "));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp(id: u32, name: &str, match_types: &[&str]) -> StampResult {
        StampResult {
            id,
            name: name.to_string(),
            manufacturer: "Hults Bruk".to_string(),
            stamp_type: "Text".to_string(),
            status: "Känd".to_string(),
            match_types: match_types.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_query_modes() {
        let query = build_query(Some("hults".into()), None, None, true, true, &[4, 8]);
        assert_eq!(query.match_mode, MatchMode::Exact);
        assert_eq!(query.combine_mode, CombineMode::Or);
        assert_eq!(query.symbol_ids, vec!["4", "8"]);
    }

    #[test]
    fn test_empty_query() {
        assert!(build_query(None, None, Some(" ".into()), false, false, &[]).is_empty());
    }

    #[test]
    fn test_render_groups() {
        let query = build_query(Some("hults".into()), None, None, false, false, &[]);
        let results = vec![stamp(1, "Hults Bruk krona", &["name", "manufacturer"]), stamp(2, "Okänd", &[])];
        let text = render_results(&query, &results);
        assert!(text.starts_with("Hittade 2 stämplar"));
        assert!(text.contains("[1] Hults Bruk krona"));
        assert_eq!(text.matches("[1]").count(), 2);
        assert!(text.contains("[2] Okänd"));
    }

    #[test]
    fn test_search_url() {
        let config = Config {
            base_url: "https://yxor.example/".into(),
            ..Config::default()
        };
        std::env::remove_var(crate::config::BASE_URL_ENV);
        let client = SearchClient::new(&config).unwrap();
        assert_eq!(client.search_url(), "https://yxor.example/stamplar/sok/");
    }
}
