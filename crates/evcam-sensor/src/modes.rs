// Copyright 2026 Evcam Project Developers
// SPDX-License-Identifier: Apache-2.0

//! Sensor operating modes and geometry.

use serde::{Deserialize, Serialize};

/// Sensor matrix height in pixels.
pub const SENSOR_ROWS: u32 = 800;

/// Sensor matrix width in pixels.
pub const SENSOR_COLS: u32 = 1280;

/// Loop-mode slot that carries the intensity sub-mode when the sensor
/// cycles through sub-modes on a schedule.
pub const LOOP_SLOT_INTENSITY: u8 = 2;

/// Operating modes of the sensor.
///
/// Event modes stream sparse pixel events; frame modes produce full rasters
/// inside the driver and bypass the event path entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorMode {
    /// Sparse events stamped with the off-pixel timestamp only.
    EventOffPixelTimestamp,
    /// Sparse events carrying the in-pixel timestamp as well.
    EventInPixelTimestamp,
    /// Sparse events carrying true intensity (ADC) and signed polarity.
    EventIntensity,
    /// Full-frame grayscale capture; no events are produced.
    FullPicture,
    /// Dense optical-flow capture; no events are produced.
    OpticalFlow,
    /// Multi-read optical-flow capture variant.
    MultiReadOpticalFlow,
}

impl SensorMode {
    /// Whether this mode produces sparse pixel events at all.
    pub fn produces_events(self) -> bool {
        !matches!(self, SensorMode::FullPicture | SensorMode::OpticalFlow)
    }
}

/// Whether event data should be pulled from the driver this cycle.
///
/// Outside loop mode only event-producing fixed modes are eligible; with
/// loop mode active the driver multiplexes sub-modes itself, so every cycle
/// is eligible.
pub fn should_fetch_events(mode: SensorMode, loop_mode_enabled: bool) -> bool {
    (mode.produces_events() && !loop_mode_enabled) || loop_mode_enabled
}
