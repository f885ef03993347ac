pub mod client;
pub mod models;

pub use client::BlogClient;
pub use models::{BlogPost, BlogSummary, plain_text};
