pub mod pagination;
pub mod request;

pub use pagination::paginate;
pub use request::{send, send_no_content, send_with_body};
