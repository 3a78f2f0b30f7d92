use log::debug;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{Config, Credentials};
use crate::error::{Error, ErrorKind};

/// Returns a 'reqwest' request-builder for a given method and path,
/// with authentication headers attached according to the configuration.
///
/// The path must be non-empty; it is joined below the configured base URL
/// (a leading `/` is stripped so it cannot escape the base path).
pub(crate) fn request_builder(
    cfg: &Config,
    method: Method,
    path: &str,
    params: &[(String, String)],
) -> Result<RequestBuilder, Error> {
    if path.is_empty() {
        return Err(ErrorKind::Config("request path must not be empty".to_string()).into());
    }

    let url = cfg
        .base_url
        .join(path.trim_start_matches('/'))
        .map_err(|e| ErrorKind::Config(format!("invalid request path '{}': {}", path, e)))?;

    let mut builder = cfg
        .http
        .request(method, url)
        .header(ACCEPT, "application/json")
        .header(USER_AGENT, cfg.user_agent.as_str());

    builder = match &cfg.credentials {
        Credentials::ApiKey(key) => builder.header("X-API-Key", key.as_str()),
        Credentials::Basic { username, password } => builder.basic_auth(username, Some(password)),
    };

    if !params.is_empty() {
        builder = builder.query(params);
    }

    Ok(builder)
}

/// Dispatches a built request and maps the outcome onto the error taxonomy:
/// transport failures become `Network`, 401/403 become `Authentication`,
/// any other non-2xx becomes `Request` carrying status and body.
pub(crate) fn execute(cfg: &Config, builder: RequestBuilder) -> Result<Response, Error> {
    let request = builder
        .build()
        .map_err(|e| ErrorKind::Config(format!("could not construct request: {}", e)))?;

    debug!("{} {}", request.method(), request.url());

    let mut response = cfg
        .http
        .execute(request)
        .map_err(|e| ErrorKind::Network(e.to_string()))?;

    let status = response.status();
    debug!("HTTP {}", status);

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ErrorKind::Authentication {
            status: status.as_u16(),
        }
        .into());
    }

    let body = response
        .text()
        .map_err(|e| ErrorKind::Network(e.to_string()))?;

    Err(ErrorKind::Request {
        status: status.as_u16(),
        body,
    }
    .into())
}

pub(crate) fn parse_json<T: DeserializeOwned>(response: &mut Response) -> Result<T, Error> {
    let body = response
        .text()
        .map_err(|e| ErrorKind::Network(e.to_string()))?;
    debug!("response body: {} bytes", body.len());
    decode(&body)
}

/// Deserializes a response body; any schema mismatch is a
/// `MalformedResponse`, never a panic at a missing field.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    let value = serde_json::from_str(body).map_err(|e| ErrorKind::MalformedResponse(e.to_string()))?;
    Ok(value)
}

/// Issues an authenticated request and parses the JSON response.
pub fn send<T: DeserializeOwned>(
    cfg: &Config,
    method: Method,
    path: &str,
    params: &[(String, String)],
) -> Result<T, Error> {
    let builder = request_builder(cfg, method, path, params)?;
    let mut response = execute(cfg, builder)?;
    parse_json(&mut response)
}

/// Like [`send`], with a JSON request body.
pub fn send_with_body<T: DeserializeOwned>(
    cfg: &Config,
    method: Method,
    path: &str,
    params: &[(String, String)],
    body: &Value,
) -> Result<T, Error> {
    let builder = request_builder(cfg, method, path, params)?.json(body);
    let mut response = execute(cfg, builder)?;
    parse_json(&mut response)
}

/// Issues an authenticated request whose success responses carry no body
/// (204-style endpoints). Any 2xx is accepted.
pub fn send_no_content(
    cfg: &Config,
    method: Method,
    path: &str,
    params: &[(String, String)],
) -> Result<(), Error> {
    let builder = request_builder(cfg, method, path, params)?;
    execute(cfg, builder).map(|_| ())
}
