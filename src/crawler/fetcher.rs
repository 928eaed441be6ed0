//! HTTP fetcher implementation
//!
//! Thin boundary between the network and the analysis core: every request,
//! successful or not, becomes a [`PageResponse`] so the core never has to
//! reason about transport errors. Network failures surface as status 0 with
//! the error message attached; the analysis layer treats them like any other
//! non-200 response.

use crate::analysis::PageResponse;
use crate::config::CrawlerConfig;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration carrying the user agent
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page, turning every outcome into a `PageResponse`
///
/// Redirects are followed by the client; the response's `url` field carries
/// the final URL. A body that cannot be read after a successful status is
/// reported with the status intact and `error` set, which downstream
/// analysis treats as an empty page.
pub async fn fetch_page(client: &Client, url: &Url) -> PageResponse {
    match client.get(url.clone()).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            let final_url = response.url().to_string();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);

            match response.bytes().await {
                Ok(bytes) => PageResponse {
                    url: final_url,
                    status,
                    error: None,
                    body: Some(bytes.to_vec()),
                    content_type,
                },
                Err(e) => PageResponse {
                    url: final_url,
                    status,
                    error: Some(format!("body read failed: {}", e)),
                    body: None,
                    content_type,
                },
            }
        }
        Err(e) => PageResponse {
            url: url.to_string(),
            status: 0,
            error: Some(e.to_string()),
            body: None,
            content_type: None,
        },
    }
}
