pub mod auth;
pub mod events;
pub mod models;

pub use events::{EventSource, GithubEventsClient};
pub use models::*;
