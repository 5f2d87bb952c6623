// Copyright 2026 Evcam Project Developers
// SPDX-License-Identifier: Apache-2.0

//! Raster image message.

use crate::header::Header;
use serde::{Deserialize, Serialize};

/// Row-major raster image with an encoding tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMessage {
    pub header: Header,
    pub height: u32,
    pub width: u32,
    /// Pixel encoding tag, e.g. `"rgb8"`.
    pub encoding: String,
    /// Bytes per row.
    pub step: u32,
    pub data: Vec<u8>,
}

impl ImageMessage {
    /// Wrap a row-major RGB8 buffer. `data.len()` must equal
    /// `height * width * 3`.
    pub fn rgb8(header: Header, height: u32, width: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (height * width * 3) as usize);
        Self {
            header,
            height,
            width,
            encoding: "rgb8".to_string(),
            step: width * 3,
            data,
        }
    }

    /// The RGB bytes of the pixel at (row, col).
    pub fn pixel(&self, row: u32, col: u32) -> &[u8] {
        let offset = (row * self.step + col * 3) as usize;
        &self.data[offset..offset + 3]
    }
}
