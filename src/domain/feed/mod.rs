pub mod entity;

pub use entity::{FeedEntry, FeedEntryKind, FeedQuery, MediaSource};
