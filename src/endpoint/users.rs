use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Error;
use crate::util;
use crate::util::pagination::NoProgress;

const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// get /management/v2.0/users
///
/// Retrieves all users, following pagination until the server reports the
/// last page.
pub fn list(cfg: &Config) -> Result<Vec<User>, Error> {
    util::paginate(
        cfg,
        Method::GET,
        "management/v2.0/users",
        &[],
        cfg.page_size,
        &mut NoProgress,
    )
}

/// get /management/v2.0/users/{userId}
pub fn get(cfg: &Config, user_id: &str) -> Result<User, Error> {
    util::send(
        cfg,
        Method::GET,
        &format!("management/v2.0/users/{}", user_id),
        &[],
    )
}

/// Ids of every user holding the admin role, across all organisations.
///
/// Lists all users, fetches each user's detail record and keeps the ids of
/// those whose roles include `admin`. One detail request per user.
pub fn admin_user_ids(cfg: &Config) -> Result<Vec<String>, Error> {
    let mut admin_ids = Vec::new();
    for user in list(cfg)? {
        let details = get(cfg, &user.id)?;
        if is_admin(&details) {
            admin_ids.push(details.id);
        }
    }
    Ok(admin_ids)
}

/// post /management/v2.0/users/{userId}/deprecatePassword
///
/// Forces the user to set a new password on next login. Success carries no
/// response body.
pub fn deprecate_password(cfg: &Config, user_id: &str) -> Result<(), Error> {
    util::send_no_content(
        cfg,
        Method::POST,
        &format!("management/v2.0/users/{}/deprecatePassword", user_id),
        &[],
    )
}

fn is_admin(user: &User) -> bool {
    user.roles.iter().any(|role| role == ADMIN_ROLE)
}
