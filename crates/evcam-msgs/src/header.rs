// Copyright 2026 Evcam Project Developers
// SPDX-License-Identifier: Apache-2.0

//! Common message header.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Capture/build timestamp in nanoseconds since the Unix epoch.
pub fn stamp_now_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Header carried by every published message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Per-channel sequence number; only the rich IMU channel numbers its
    /// messages, all other channels leave this at zero.
    pub seq: u64,
    /// Timestamp in nanoseconds since the Unix epoch, taken when the
    /// message was built.
    pub stamp_ns: u64,
    /// Identifier of the producing camera frame (configuration-supplied).
    pub frame_id: String,
}

impl Header {
    /// A header stamped now with the given frame id.
    pub fn stamped(frame_id: impl Into<String>) -> Self {
        Self {
            seq: 0,
            stamp_ns: stamp_now_ns(),
            frame_id: frame_id.into(),
        }
    }

    /// Set the sequence number.
    pub fn with_seq(mut self, seq: u64) -> Self {
        self.seq = seq;
        self
    }
}
