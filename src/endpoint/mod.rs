pub mod audit;
pub mod organisations;
pub mod projects;
pub mod users;
