// Copyright 2026 Evcam Project Developers
// SPDX-License-Identifier: Apache-2.0

//! # evcam-sensor
//!
//! Sensor-facing surface for the evcam forwarder. The device driver itself
//! (mode switching, register access, raw frame acquisition) lives outside
//! this workspace; this crate defines the narrow interface it presents:
//!
//! - [`SensorMode`] - the operating modes of the sensor, plus the loop-mode
//!   slot scheme used when the sensor cycles through sub-modes
//! - [`RawEvent`] / [`ImuSample`] - the bulk data the driver produces
//! - [`SensorQuery`] - the read-only query/pull trait the forwarder consumes
//! - [`FrameListener`] / [`FrameDataServer`] - the frame-update notification
//!   registry the driver owns and the forwarder registers with
//!
//! All queries are safe to call concurrently from multiple threads.

pub mod error;
pub mod events;
pub mod listener;
pub mod modes;
pub mod query;

pub use error::{SensorError, SensorResult};
pub use events::{ImuSample, RawEvent};
pub use listener::{FrameDataServer, FrameListener, ListenerId};
pub use modes::{SensorMode, LOOP_SLOT_INTENSITY, SENSOR_COLS, SENSOR_ROWS};
pub use query::SensorQuery;
