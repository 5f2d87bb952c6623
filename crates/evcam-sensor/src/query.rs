// Copyright 2026 Evcam Project Developers
// SPDX-License-Identifier: Apache-2.0

//! The read-only query/pull surface a sensor driver presents.

use crate::error::SensorResult;
use crate::events::{ImuSample, RawEvent};
use crate::modes::SensorMode;

/// Read-only queries against the sensor driver.
///
/// Implementations must be safe to call concurrently from multiple threads;
/// the forwarder queries modes from its dispatcher and publisher threads at
/// the same time, and pulls IMU data from a thread of its own.
pub trait SensorQuery: Send + Sync {
    /// The mode the sensor is fixed to (meaningless while loop mode cycles).
    fn fixed_mode(&self) -> SensorMode;

    /// Whether the sensor is cycling through sub-modes on a schedule.
    fn loop_mode_enabled(&self) -> bool;

    /// The sub-mode assigned to a loop slot.
    fn loop_mode(&self, slot: u8) -> SensorMode;

    /// Pull the current event vector out of the driver.
    ///
    /// `out` is cleared and overwritten. An error means the readout failed
    /// and `out` must not be used; the next frame update is the natural
    /// retry point.
    fn event_data(&self, out: &mut Vec<RawEvent>) -> SensorResult<()>;

    /// Whether the inertial measurement module is powered and sampling.
    fn imu_module_enabled(&self) -> bool;

    /// Pull the current batch of inertial samples. `out` is cleared and
    /// overwritten; an empty result is normal between IMU readouts.
    fn imu_data(&self, out: &mut Vec<ImuSample>);
}
