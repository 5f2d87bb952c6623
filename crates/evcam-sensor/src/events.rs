// Copyright 2026 Evcam Project Developers
// SPDX-License-Identifier: Apache-2.0

//! Bulk data records produced by the sensor driver.

use serde::{Deserialize, Serialize};

/// A single pixel event as read out of the sensor.
///
/// Events arrive in readout order and are immutable once pulled. Which
/// fields carry meaningful data depends on the mode the sensor was in when
/// the event was captured: `adc` and `polarity` are only populated in
/// intensity mode, `t_in_pixel` only in in-pixel-timestamp mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Sensor row of the firing pixel.
    pub row: u16,
    /// Sensor column of the firing pixel.
    pub col: u16,
    /// Signed brightness-change direction: -1, 0 or +1.
    pub polarity: i8,
    /// Raw intensity readout (intensity mode only).
    pub adc: u16,
    /// Off-pixel timestamp, monotonically increasing within a readout.
    pub t_off_pixel: u32,
    /// In-pixel timestamp (in-pixel-timestamp mode only).
    pub t_in_pixel: u32,
}

/// One inertial measurement: gyroscope, accelerometer and magnetometer
/// triples, in driver-native units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImuSample {
    pub gyro: [f64; 3],
    pub acc: [f64; 3],
    pub mag: [f64; 3],
}
