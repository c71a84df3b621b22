pub mod entity;

pub use entity::{Channel, ChannelDirectory, USER_UPLOADS_CHANNEL};
