use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Error;
use crate::util;
use crate::util::pagination::NoProgress;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organisation {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// A short-lived admin API key minted for one organisation. The server
/// decides the validity window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    #[serde(rename = "apiKey")]
    pub key: String,
    #[serde(rename = "validUntil")]
    pub valid_until: Option<String>,
}

/// get /management/v2.0/organisations
pub fn list(cfg: &Config) -> Result<Vec<Organisation>, Error> {
    util::paginate(
        cfg,
        Method::GET,
        "management/v2.0/organisations",
        &[],
        cfg.page_size,
        &mut NoProgress,
    )
}

/// post /management/v2.0/organisations/{organisationId}/apikeys
///
/// Creates a temporary ApiKey with admin permissions for the organisation.
/// The server must have the super-API-key feature enabled for this call to
/// succeed.
pub fn create_temporary_api_key(cfg: &Config, organisation_id: &str) -> Result<ApiKey, Error> {
    util::send(
        cfg,
        Method::POST,
        &format!("management/v2.0/organisations/{}/apikeys", organisation_id),
        &[],
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::request::decode;

    #[test]
    fn test_organisation_decodes_vendor_shape() {
        let body = r#"{"_id": "6e2b", "name": "Acme"}"#;
        let organisation: Organisation = decode(body).unwrap();
        assert_eq!(organisation.id, "6e2b");
        assert_eq!(organisation.name, "Acme");
    }

    #[test]
    fn test_api_key_decodes_with_and_without_expiry() {
        let with: ApiKey =
            decode(r#"{"apiKey": "k-temp", "validUntil": "2024-05-01T10:00:00Z"}"#).unwrap();
        assert_eq!(with.key, "k-temp");
        assert_eq!(with.valid_until.as_deref(), Some("2024-05-01T10:00:00Z"));

        let without: ApiKey = decode(r#"{"apiKey": "k-temp"}"#).unwrap();
        assert!(without.valid_until.is_none());
    }
}
