// Copyright 2026 Evcam Project Developers
// SPDX-License-Identifier: Apache-2.0

//! Event message shapes.
//!
//! The rich [`EventVectorMessage`] preserves every sensor-specific field
//! (brightness, signed polarity, both timestamp flavors); the generic
//! [`EventArrayMessage`] reduces each event to position, capture stamp and a
//! boolean polarity for consumers that speak the common event-camera
//! vocabulary.

use crate::header::Header;
use serde::{Deserialize, Serialize};

/// One event in the rich vector.
///
/// `x` carries the sensor row and `y` the column. Which optional fields are
/// populated depends on the sensor mode at publish time; `off_pixel_timestamp`
/// is always set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMessage {
    pub x: u16,
    pub y: u16,
    /// 255 in timestamp modes, raw ADC in intensity mode.
    pub brightness: u16,
    /// Signed polarity; populated in intensity mode only.
    pub polarity: i8,
    pub off_pixel_timestamp: u32,
    /// Populated in in-pixel-timestamp mode only.
    pub in_pixel_timestamp: u32,
}

/// Rich event-vector message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventVectorMessage {
    pub header: Header,
    pub height: u32,
    pub width: u32,
    pub vector_length: u32,
    pub events: Vec<EventMessage>,
}

impl EventVectorMessage {
    /// A message with header/geometry filled and capacity reserved for
    /// `length` events.
    pub fn with_capacity(header: Header, height: u32, width: u32, length: usize) -> Self {
        Self {
            header,
            height,
            width,
            vector_length: length as u32,
            events: Vec::with_capacity(length),
        }
    }
}

/// One event in the generic array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolarityEvent {
    pub x: u16,
    pub y: u16,
    /// Capture stamp, nanoseconds since the Unix epoch.
    pub stamp_ns: u64,
    /// Brightness-increase flag. Only intensity-mode events set this; in
    /// other modes it stays at the default `false`.
    pub polarity: bool,
}

/// Generic event-array message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventArrayMessage {
    pub header: Header,
    pub height: u32,
    pub width: u32,
    pub events: Vec<PolarityEvent>,
}

impl EventArrayMessage {
    /// A message with header/geometry filled and capacity reserved for
    /// `length` events.
    pub fn with_capacity(header: Header, height: u32, width: u32, length: usize) -> Self {
        Self {
            header,
            height,
            width,
            events: Vec::with_capacity(length),
        }
    }
}
