use reqwest::Method;

use crate::config::Config;
use crate::error::Error;
use crate::util;

/// delete /management/v2.0/projects/{projectId}
///
/// Deletes a project. Success carries no response body.
pub fn delete(cfg: &Config, project_id: &str) -> Result<(), Error> {
    util::send_no_content(
        cfg,
        Method::DELETE,
        &format!("management/v2.0/projects/{}", project_id),
        &[],
    )
}
