// Copyright 2026 Evcam Project Developers
// SPDX-License-Identifier: Apache-2.0

//! IMU message shapes.

use crate::header::Header;
use serde::{Deserialize, Serialize};

/// Rich per-sample IMU message: full nine-axis readout, individually
/// sequence-numbered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImuMessage {
    pub header: Header,
    pub gyro: [f64; 3],
    pub acc: [f64; 3],
    pub mag: [f64; 3],
}

/// Batch of rich IMU messages published once per IMU wakeup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImuBatchMessage {
    pub header: Header,
    pub vector_length: u32,
    pub imus: Vec<ImuMessage>,
}

impl ImuBatchMessage {
    pub fn with_capacity(header: Header, length: usize) -> Self {
        Self {
            header,
            vector_length: length as u32,
            imus: Vec::with_capacity(length),
        }
    }
}

/// Generic inertial message: angular velocity and linear acceleration only,
/// no magnetometer field. Published once per sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InertialMessage {
    pub header: Header,
    pub angular_velocity: [f64; 3],
    pub linear_acceleration: [f64; 3],
}
