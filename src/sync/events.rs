// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Edge-triggered add/delete notifications.

use kube::api::DynamicObject;
use std::sync::Mutex;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// A store change delivered to subscribers. Updates are delivered as `Added`.
#[derive(Debug, Clone)]
pub enum ResourceEvent {
    Added(DynamicObject),
    Deleted(DynamicObject),
}

impl ResourceEvent {
    pub fn object(&self) -> &DynamicObject {
        match self {
            ResourceEvent::Added(obj) | ResourceEvent::Deleted(obj) => obj,
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, ResourceEvent::Deleted(_))
    }
}

/// Subscriber channels of one store
#[derive(Debug, Default)]
pub struct Subscribers {
    senders: Mutex<Vec<UnboundedSender<ResourceEvent>>>,
}

impl Subscribers {
    pub fn subscribe(&self) -> UnboundedReceiver<ResourceEvent> {
        let (tx, rx) = unbounded_channel();
        self.senders
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(tx);
        rx
    }

    /// Deliver to every live subscriber, dropping closed ones
    pub fn notify(&self, event: &ResourceEvent) {
        self.senders
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn len(&self) -> usize {
        self.senders.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
