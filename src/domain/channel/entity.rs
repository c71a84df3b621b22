use serde::{Deserialize, Serialize};

use crate::domain::video::EphemeralVideo;

/// Name of the synthetic channel whose membership is derived from catalog
/// rows (everything any user uploaded). It has no static roster.
pub const USER_UPLOADS_CHANNEL: &str = "UserUploads";

/// A static channel: a name, a logo reference and an ordered roster of
/// video titles. Channels are process-wide seed data, never persisted and
/// never user-editable; only the subscription relation refers to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub logo: String,
    /// Ordered roster of display titles; playable through a stock source
    pub roster: Vec<String>,
}

impl Channel {
    pub fn new(name: &str, logo: &str, roster: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            logo: logo.to_string(),
            roster: roster.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The full static channel line-up plus the ephemeral shorts roster.
///
/// Enumeration order is declaration order and is part of the feed
/// contract: assembled feeds list channels in this exact order.
#[derive(Debug, Clone)]
pub struct ChannelDirectory {
    channels: Vec<Channel>,
    shorts: Vec<EphemeralVideo>,
}

const STOCK_SOURCE: &str =
    "https://sample-videos.com/video123/mp4/720/big_buck_bunny_720p_1mb.mp4";

impl ChannelDirectory {
    /// The built-in line-up shipped with the application
    pub fn builtin() -> Self {
        Self {
            channels: vec![
                Channel::new(
                    "TechReviews",
                    "https://via.placeholder.com/100x100?text=Tech",
                    &[
                        "Tech Review",
                        "New Gadgets Unboxing",
                        "Smartphone Comparison",
                    ],
                ),
                Channel::new(
                    "NatureChannel",
                    "https://via.placeholder.com/100x100?text=Nature",
                    &[
                        "Nature Documentary",
                        "Wildlife Adventures",
                        "Ocean Exploration",
                    ],
                ),
            ],
            shorts: vec![
                EphemeralVideo::new("Funny Clip", "Entertainment", STOCK_SOURCE),
                EphemeralVideo::new("Cooking Hack", "Food", STOCK_SOURCE),
                EphemeralVideo::new("Quick DIY", "DIY", STOCK_SOURCE),
            ],
        }
    }

    /// Static channels in declaration order; UserUploads is not listed
    /// here because its membership is derived, not a roster.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn get(&self, name: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.name == name)
    }

    /// A channel name is valid if it has a static roster or is the
    /// synthetic UserUploads channel.
    pub fn is_known(&self, name: &str) -> bool {
        name == USER_UPLOADS_CHANNEL || self.get(name).is_some()
    }

    /// Ephemeral shorts roster; ids are synthetic and stable for the
    /// life of this directory instance.
    pub fn shorts(&self) -> &[EphemeralVideo] {
        &self.shorts
    }

    /// Stock playable source used for roster titles
    pub fn stock_source(&self) -> &'static str {
        STOCK_SOURCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lineup_order_is_stable() {
        let dir = ChannelDirectory::builtin();
        let names: Vec<&str> = dir.channels().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["TechReviews", "NatureChannel"]);
    }

    #[test]
    fn test_user_uploads_is_known_but_has_no_roster() {
        let dir = ChannelDirectory::builtin();
        assert!(dir.is_known(USER_UPLOADS_CHANNEL));
        assert!(dir.get(USER_UPLOADS_CHANNEL).is_none());
    }

    #[test]
    fn test_shorts_have_distinct_synthetic_ids() {
        let dir = ChannelDirectory::builtin();
        let a = dir.shorts()[0].id;
        let b = dir.shorts()[1].id;
        assert_ne!(a, b);
    }
}
