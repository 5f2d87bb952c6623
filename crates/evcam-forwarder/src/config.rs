//! Forwarder configuration and runtime feature toggles.
//!
//! [`ForwarderConfig`] is read once at construction; the two feature
//! toggles it seeds live on in [`ForwarderOptions`], which the publisher
//! threads poll every cycle so an operator layer can flip them while the
//! forwarder runs.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// Construction-time configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForwarderConfig {
    /// Frame identifier stamped into every published message header.
    pub frame_id: String,

    /// Initial state of the raw-events feature toggle.
    pub raw_events_enabled: bool,

    /// Initial state of the polarity-image feature toggle.
    pub polarity_image_enabled: bool,
}

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self {
            frame_id: "evcam".to_string(),
            raw_events_enabled: true,
            polarity_image_enabled: true,
        }
    }
}

impl ForwarderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frame identifier.
    pub fn with_frame_id(mut self, frame_id: impl Into<String>) -> Self {
        self.frame_id = frame_id.into();
        self
    }

    /// Set the initial raw-events toggle.
    pub fn with_raw_events(mut self, enabled: bool) -> Self {
        self.raw_events_enabled = enabled;
        self
    }

    /// Set the initial polarity-image toggle.
    pub fn with_polarity_image(mut self, enabled: bool) -> Self {
        self.polarity_image_enabled = enabled;
        self
    }
}

/// Runtime feature toggles, polled by the publisher threads once per cycle.
#[derive(Debug)]
pub struct ForwarderOptions {
    raw_events: AtomicBool,
    polarity_image: AtomicBool,
}

impl ForwarderOptions {
    pub fn from_config(config: &ForwarderConfig) -> Self {
        Self {
            raw_events: AtomicBool::new(config.raw_events_enabled),
            polarity_image: AtomicBool::new(config.polarity_image_enabled),
        }
    }

    pub fn raw_events_enabled(&self) -> bool {
        self.raw_events.load(Ordering::Relaxed)
    }

    pub fn set_raw_events_enabled(&self, enabled: bool) {
        self.raw_events.store(enabled, Ordering::Relaxed);
    }

    pub fn polarity_image_enabled(&self) -> bool {
        self.polarity_image.load(Ordering::Relaxed)
    }

    pub fn set_polarity_image_enabled(&self, enabled: bool) {
        self.polarity_image.store(enabled, Ordering::Relaxed);
    }
}
