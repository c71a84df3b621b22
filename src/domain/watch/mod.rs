pub mod entity;

pub use entity::{Download, DownloadEntry, HistoryEntry, WatchProgress};
