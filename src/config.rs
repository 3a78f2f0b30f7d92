use reqwest::{Client, Url};

use crate::error::{Error, ErrorKind};
use crate::util::pagination::Pager;

/// Credentials for one of the two documented authentication handshakes.
///
/// Immutable for the lifetime of a [`Config`]; the crate never persists
/// them. Reading them from a secrets file or the environment is the
/// caller's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// An opaque API key, sent in the `X-API-Key` request header.
    ApiKey(String),
    /// A username/password pair, sent via standard HTTP Basic encoding.
    Basic { username: String, password: String },
}

/// Explicit client object: base URL, credentials and transport settings,
/// passed to every call. There is no ambient global session.
#[derive(Debug)]
pub struct Config {
    pub base_url: Url,
    pub credentials: Credentials,
    pub user_agent: String,
    /// Default page size hint for paginated endpoints.
    pub page_size: u32,
    /// Safety bound on pagination: a list call that fetches this many pages
    /// without reaching a terminal page fails with
    /// `ErrorKind::PaginationLimitExceeded`. `None` removes the bound.
    pub max_pages: Option<u32>,
    /// Per-deployment pagination parameter convention.
    pub pager: Pager,
    pub(crate) http: Client,
}

impl Config {
    /// Builds a config from a base URL and credentials.
    ///
    /// The base URL path is normalized to end in `/` so that endpoint paths
    /// join below it instead of replacing its last segment.
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self, Error> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ErrorKind::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .build()
            .map_err(|e| ErrorKind::Config(format!("could not build HTTP client: {}", e)))?;

        Ok(Config {
            base_url,
            credentials,
            user_agent: "mgmtkit-rs".to_string(),
            page_size: 25,
            max_pages: Some(1_000),
            pager: Pager::default(),
            http,
        })
    }

    pub fn with_api_key(base_url: &str, api_key: &str) -> Result<Self, Error> {
        Config::new(base_url, Credentials::ApiKey(api_key.to_string()))
    }

    pub fn with_basic_auth(base_url: &str, username: &str, password: &str) -> Result<Self, Error> {
        Config::new(
            base_url,
            Credentials::Basic {
                username: username.to_string(),
                password: password.to_string(),
            },
        )
    }
}
