pub mod card;
pub mod client;
pub mod models;
pub mod normalize;

pub use card::{ActivityCard, CardIcon, card_for};
pub use client::{FeedClient, FeedError};
pub use models::*;
pub use normalize::{normalize, parse_events};
