// src/services/notification_service.rs
//
// Notification Service - in-memory activity feed
//
// Collects facts from the event bus into a bounded, process-lifetime
// list. Nothing here is persisted; a restart starts from the welcome
// entry again.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::events::{EventBus, SubscriptionChanged, VideoUploaded};

const MAX_ENTRIES: usize = 50;

pub struct NotificationService {
    entries: Arc<RwLock<VecDeque<String>>>,
}

impl NotificationService {
    pub fn new() -> Self {
        let mut entries = VecDeque::new();
        entries.push_front("Welcome to StreamHub!".to_string());

        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Subscribe this feed to the facts it renders. Call once at wiring
    /// time; handlers stay registered for the life of the bus.
    pub fn attach(&self, event_bus: &EventBus) {
        let entries = Arc::clone(&self.entries);
        event_bus.subscribe::<VideoUploaded, _>(move |event| {
            Self::push(&entries, format!("New video uploaded: {}", event.title));
        });

        let entries = Arc::clone(&self.entries);
        event_bus.subscribe::<SubscriptionChanged, _>(move |event| {
            let message = if event.subscribed {
                format!("Subscribed to {}", event.channel_name)
            } else {
                format!("Unsubscribed from {}", event.channel_name)
            };
            Self::push(&entries, message);
        });
    }

    fn push(entries: &RwLock<VecDeque<String>>, message: String) {
        let mut guard = entries.write().unwrap();
        guard.push_front(message);
        guard.truncate(MAX_ENTRIES);
    }

    /// Newest first
    pub fn notifications(&self) -> Vec<String> {
        self.entries.read().unwrap().iter().cloned().collect()
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}
