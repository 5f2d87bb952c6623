// Copyright 2026 Evcam Project Developers
// SPDX-License-Identifier: Apache-2.0

//! # evcam-msgs
//!
//! Message schemas published by the evcam forwarder. Two independently
//! shaped representations exist for both events and IMU data: a *rich*
//! message carrying every sensor-specific field, and a *generic* message in
//! the vocabulary downstream visualization and fusion stacks expect. The
//! polarity raster is published as a plain row-major RGB8 image message.
//!
//! All types are serde-derived; wire serialization is the transport's
//! concern, not this crate's.

pub mod event_msgs;
pub mod header;
pub mod image_msg;
pub mod imu_msgs;

pub use event_msgs::{EventArrayMessage, EventMessage, EventVectorMessage, PolarityEvent};
pub use header::{stamp_now_ns, Header};
pub use image_msg::ImageMessage;
pub use imu_msgs::{ImuBatchMessage, ImuMessage, InertialMessage};
