use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Error;
use crate::util;
use crate::util::pagination::NoProgress;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub timestamp: String,
}

/// get /management/v2.0/auditevents
///
/// Retrieves all audit events matching the given filters. Filter parameters
/// are forwarded verbatim as query parameters; which filters exist is the
/// server's contract.
pub fn events(cfg: &Config, params: &[(String, String)]) -> Result<Vec<AuditEvent>, Error> {
    util::paginate(
        cfg,
        Method::GET,
        "management/v2.0/auditevents",
        params,
        cfg.page_size,
        &mut NoProgress,
    )
}
