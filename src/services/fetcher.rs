use reqwest::{header, Client, Url};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while fetching a page to audit
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported URL scheme: {0} (only http and https are fetched)")]
    UnsupportedScheme(String),

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Page returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Page is not HTML (content-type: {0})")]
    NotHtml(String),

    #[error("Page body exceeds {0} bytes")]
    TooLarge(usize),
}

impl FetchError {
    /// True when the caller supplied a bad address rather than the remote failing
    pub fn is_client_error(&self) -> bool {
        matches!(self, FetchError::InvalidUrl(_) | FetchError::UnsupportedScheme(_))
    }
}

/// A fetched HTML document
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: String,
    pub html: String,
}

/// HTTP client for pulling remote pages into the heading checker
///
/// One GET per call, bounded by a timeout and a body size limit. No retries.
pub struct PageFetcher {
    client: Client,
    max_body_bytes: usize,
}

impl PageFetcher {
    /// Create a new page fetcher
    pub fn new(timeout: Duration, max_body_bytes: usize, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            max_body_bytes,
        })
    }

    /// Validate and normalise a user-supplied URL
    pub fn parse_url(raw: &str) -> Result<Url, FetchError> {
        let url = Url::parse(raw.trim()).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", raw, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(FetchError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Fetch a page's HTML
    pub async fn fetch(&self, raw_url: &str) -> Result<FetchedPage, FetchError> {
        let url = Self::parse_url(raw_url)?;

        tracing::debug!("Fetching page: {}", url);

        let mut response = self
            .client
            .get(url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        if let Some(content_type) = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !content_type.to_ascii_lowercase().contains("html") {
                return Err(FetchError::NotHtml(content_type.to_string()));
            }
        }

        if let Some(len) = response.content_length() {
            if len as usize > self.max_body_bytes {
                return Err(FetchError::TooLarge(self.max_body_bytes));
            }
        }

        let final_url = response.url().to_string();

        // Content-Length can be absent or wrong, so the limit is enforced while reading
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(FetchError::TooLarge(self.max_body_bytes));
            }
            body.extend_from_slice(&chunk);
        }

        tracing::debug!("Fetched {} bytes from {}", body.len(), final_url);

        Ok(FetchedPage {
            url: final_url,
            html: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}
