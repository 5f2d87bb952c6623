// Copyright 2026 Evcam Project Developers
// SPDX-License-Identifier: Apache-2.0

//! Error types for the sensor surface.

use thiserror::Error;

/// Result type alias for sensor operations.
pub type SensorResult<T> = Result<T, SensorError>;

/// Errors surfaced by the driver query/pull interface.
#[derive(Debug, Error)]
pub enum SensorError {
    /// The event readout failed mid-pull; the vector contents are unusable.
    #[error("event readout failed: {0}")]
    EventReadFailed(String),

    /// The driver is not (or no longer) connected to a physical device.
    #[error("sensor device unavailable: {0}")]
    DeviceUnavailable(String),
}
