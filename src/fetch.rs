//! News API fetcher: one query per window, parsed and filtered.
//!
//! Each window turns into a single GET against the configured `everything`
//! endpoint (the page loop is capped at [`MAX_PAGES`], which is 1). A
//! rejected request, meaning any non-2xx status, is reported with its status
//! code and body and absorbed into an empty batch, so one bad window never
//! takes the run down. Transport failures and unparsable bodies do surface
//! as [`FetchError`] values; the run loop decides what to do with those.

use crate::config::{MAX_PAGES, RunConfig};
use crate::filter;
use crate::models::{Article, EverythingResponse};
use crate::windows::DateRange;
use itertools::Itertools;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, error, info, instrument};
use url::Url;

/// A window-level failure the fetcher could not absorb on its own.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[source] reqwest::Error),
    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full request URL, apiKey parameter
        // included; strip it before the error can reach a log line.
        Self::Http(e.without_url())
    }
}

/// Issues the per-window queries. Holds one reqwest client for the whole run
/// so connections are reused across windows; no timeout beyond the client's
/// default is configured.
pub struct Fetcher<'a> {
    http: Client,
    config: &'a RunConfig,
}

impl<'a> Fetcher<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Fetch, parse, and filter one window's articles.
    ///
    /// Issues up to [`MAX_PAGES`] requests for the window and runs the
    /// relevance re-check over everything that comes back.
    ///
    /// # Arguments
    ///
    /// * `window` - The inclusive date range sent as the `from`/`to` bounds
    ///
    /// # Returns
    ///
    /// The filtered batch, empty when the API rejected the request.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if:
    /// - The request never completed (connection or transport failure)
    /// - The body was not the JSON shape the API documents
    #[instrument(level = "info", skip_all, fields(from = %window.start, to = %window.end))]
    pub async fn fetch_window(&self, window: DateRange) -> Result<Vec<Article>, FetchError> {
        let mut collected = Vec::new();

        for page in 1..=MAX_PAGES {
            let url = self.request_url(window, page);
            let response = self.http.get(url).send().await?;
            let status = response.status();
            let body = response.text().await?;

            if !status.is_success() {
                // A rejection ends this window's paging.
                error!(
                    status = %status,
                    body = %truncate_for_log(&body, 300),
                    "News API rejected the request; keeping this window empty"
                );
                break;
            }

            let parsed: EverythingResponse = serde_json::from_str(&body)?;
            debug!(
                total_results = ?parsed.total_results,
                returned = parsed.articles.len(),
                page,
                "Parsed response page"
            );

            let relevant = filter::retain_relevant(&self.config.terms, parsed.articles);
            info!(count = relevant.len(), page, "Fetched relevant articles");
            collected.extend(relevant);
        }

        Ok(collected)
    }

    /// Build the request URL for one page of one window. The `q` parameter
    /// OR-combines every configured term, double-quoted so the API treats
    /// each as an exact phrase. These are the same phrases the local filter
    /// re-checks.
    fn request_url(&self, window: DateRange, page: u32) -> Url {
        let query = self
            .config
            .terms
            .iter()
            .map(|term| format!("\"{term}\""))
            .join(" OR ");

        let mut url = self.config.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", &query)
            .append_pair("from", &window.start.to_string())
            .append_pair("to", &window.end.to_string())
            .append_pair("sources", &self.config.sources.join(","))
            .append_pair("language", &self.config.language)
            .append_pair("pageSize", &self.config.page_size.to_string())
            .append_pair("page", &page.to_string())
            .append_pair("apiKey", &self.config.api_key);
        url
    }
}

/// Shorten a response body for the error log, keeping a byte-count hint.
fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn config_for(endpoint: Url) -> RunConfig {
        RunConfig {
            api_key: "test-key".to_string(),
            endpoint,
            terms: vec!["Donald Trump".to_string(), "President Trump".to_string()],
            sources: vec!["cnn".to_string(), "fox-news".to_string()],
            language: "en".to_string(),
            page_size: 100,
            days: 1,
            output: PathBuf::from("unused.json"),
            delay: Duration::ZERO,
        }
    }

    fn window() -> DateRange {
        DateRange::single_day(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Serve exactly one canned HTTP response, then close the connection.
    async fn stub_once(status_line: &'static str, body: String) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/v2/everything")).unwrap()
    }

    #[test]
    fn test_request_url_carries_every_query_parameter() {
        let config = config_for(Url::parse("https://newsapi.org/v2/everything").unwrap());
        let fetcher = Fetcher::new(&config);

        let url = fetcher.request_url(window(), 1);
        let params: HashMap<String, String> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(params["q"], "\"Donald Trump\" OR \"President Trump\"");
        assert_eq!(params["from"], "2025-03-10");
        assert_eq!(params["to"], "2025-03-10");
        assert_eq!(params["sources"], "cnn,fox-news");
        assert_eq!(params["language"], "en");
        assert_eq!(params["pageSize"], "100");
        assert_eq!(params["page"], "1");
        assert_eq!(params["apiKey"], "test-key");
    }

    #[tokio::test]
    async fn test_fetch_window_keeps_only_relevant_articles() {
        let body = json!({
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "title": "Donald Trump holds press conference",
                    "description": "Remarks from the briefing room",
                    "url": "https://example.com/press"
                },
                {
                    "title": "Local sports roundup",
                    "description": "High school scores",
                    "url": "https://example.com/sports"
                }
            ]
        })
        .to_string();
        let config = config_for(stub_once("200 OK", body).await);

        let articles = Fetcher::new(&config).fetch_window(window()).await.unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(
            articles[0].title.as_deref(),
            Some("Donald Trump holds press conference")
        );
        // passthrough fields survive the trip
        assert_eq!(
            articles[0].extra["url"],
            serde_json::Value::String("https://example.com/press".to_string())
        );
    }

    #[tokio::test]
    async fn test_fetch_window_absorbs_a_rate_limited_response() {
        let config = config_for(
            stub_once(
                "429 Too Many Requests",
                r#"{"message":"rate limited"}"#.to_string(),
            )
            .await,
        );

        let articles = Fetcher::new(&config).fetch_window(window()).await.unwrap();
        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_window_reports_a_malformed_body() {
        let config = config_for(stub_once("200 OK", "not json at all".to_string()).await);

        let err = Fetcher::new(&config).fetch_window(window()).await.unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_fetch_window_reports_a_transport_failure() {
        // Bind then drop to get a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = config_for(Url::parse(&format!("http://{addr}/v2/everything")).unwrap());
        let err = Fetcher::new(&config).fetch_window(window()).await.unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
    }

    #[test]
    fn test_truncate_for_log_shortens_long_bodies() {
        assert_eq!(truncate_for_log("short", 300), "short");

        let long = "a".repeat(400);
        let shortened = truncate_for_log(&long, 300);
        assert!(shortened.starts_with(&"a".repeat(300)));
        assert!(shortened.ends_with("…(+100 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        // Each 'é' is two bytes; cutting at an odd byte must not panic.
        let accented = "é".repeat(10);
        let shortened = truncate_for_log(&accented, 5);
        assert!(shortened.starts_with("éé"));
    }
}
