//! QuickShare HTTP Client implementation

use std::time::Duration;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{redirect, Client};
use tracing::{debug, instrument};
use url::Url;

use crate::error::{Result, ShareClientError};

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Start of every file link on the index page
const LINK_PREFIX: &str = "<a href=\"/download/";

/// QuickShare HTTP client
///
/// Redirects are not followed, so a successful upload is observed as the
/// server's `303 See Other` rather than the index page it points to.
#[derive(Debug, Clone)]
pub struct ShareClient {
    client: Client,
    base_url: Url,
}

impl ShareClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the server (e.g., "http://192.168.1.20:8000")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new client with custom timeouts
    pub fn with_config(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .redirect(redirect::Policy::none())
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a reference to the underlying HTTP client.
    ///
    /// Useful for hand-built requests (raw paths, odd multipart bodies).
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Check server health
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<String> {
        let url = self.base_url.join("/health")?;
        let response = self.client.get(url).send().await?;

        if response.status().is_success() {
            Ok(response.text().await?)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Fetch the raw HTML of the index page
    #[instrument(skip(self))]
    pub async fn index_page(&self) -> Result<String> {
        let url = self.base_url.join("/")?;
        let response = self.client.get(url).send().await?;

        if response.status().is_success() {
            Ok(response.text().await?)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Names of the files linked from the index page, in page order
    pub async fn list_files(&self) -> Result<Vec<String>> {
        let html = self.index_page().await?;
        Ok(parse_file_links(&html))
    }

    /// Upload one file under `file_name`
    ///
    /// The name is sent verbatim, the way browsers send it.
    #[instrument(skip(self, contents), fields(size = contents.len()))]
    pub async fn upload(&self, file_name: &str, contents: Vec<u8>) -> Result<()> {
        let part = Part::bytes(contents).file_name(file_name.to_string());
        let form = Form::new().percent_encode_noop().part("file", part);
        self.upload_form(form).await
    }

    /// Post an arbitrary multipart form to the upload endpoint.
    ///
    /// Succeeds when the server answers with a redirect.
    pub async fn upload_form(&self, form: Form) -> Result<()> {
        let url = self.base_url.join("/upload")?;
        debug!("Uploading to {}", url);

        let response = self.client.post(url).multipart(form).send().await?;

        if response.status().is_redirection() {
            Ok(())
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Download a file by name
    #[instrument(skip(self))]
    pub async fn download(&self, file_name: &str) -> Result<Bytes> {
        let url = self.download_url(file_name)?;
        debug!("Downloading {}", url);

        let response = self.client.get(url).send().await?;

        if response.status().is_success() {
            Ok(response.bytes().await?)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// URL of the download route for `file_name`, encoded as one path segment
    pub fn download_url(&self, file_name: &str) -> Result<Url> {
        let mut url = self.base_url.join("/download/")?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(file_name);
        Ok(url)
    }

    async fn extract_error(&self, response: reqwest::Response) -> ShareClientError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
        ShareClientError::server_error(status, message)
    }
}

/// Extract the link texts of all download links in an index page
fn parse_file_links(html: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = html;

    while let Some(start) = rest.find(LINK_PREFIX) {
        rest = &rest[start + LINK_PREFIX.len()..];
        let Some(text_start) = rest.find("\">") else {
            break;
        };
        rest = &rest[text_start + 2..];
        let Some(text_end) = rest.find("</a>") else {
            break;
        };
        names.push(unescape_html(&rest[..text_end]));
        rest = &rest[text_end..];
    }

    names
}

fn unescape_html(escaped: &str) -> String {
    escaped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
