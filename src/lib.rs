//! Mgmtkit
//!
//! Client library for the vendor's HTTP management API: authenticated
//! requests (API key or HTTP Basic), typed endpoint wrappers and pagination
//! of multi-page list responses into a single collection.
//!
//! ## Usage
//! ```
//! fn main() {
//!     let cfg = mgmtkit::Config::with_api_key("https://api.example.com/openapi", "secret_api_key");
//! }
//! ```
//!
//! The documented endpoints live under [`endpoint`]; [`send`] and
//! [`paginate`] are public so callers can wrap endpoints this crate does
//! not cover yet.

mod config;
mod error;
pub mod endpoint;
pub(crate) mod util;

pub use config::{Config, Credentials};
pub use error::{Error, ErrorKind};
pub use reqwest::Method;
pub use util::pagination::{paginate, NoProgress, Page, Pager, Progress};
pub use util::request::{send, send_no_content, send_with_body};
