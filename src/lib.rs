//! # Evcam - Event-Camera Data Forwarder
//!
//! Evcam bridges an event-camera (dynamic vision sensor) device driver and a
//! publish/subscribe middleware. One frame-update callback from the driver is
//! fanned out, without ever blocking the driver's acquisition path, to three
//! independently-paced publisher threads: raw events, polarity imagery, and
//! inertial samples.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! evcam = "0.1"  # Default: full forwarder stack
//! ```
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use evcam::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let driver: Arc<dyn SensorQuery> = unimplemented!();
//! # let data_server: Arc<FrameDataServer> = unimplemented!();
//! let config = ForwarderConfig::new().with_frame_id("camera");
//! let local = LocalChannels::new();
//!
//! // Drain the generic event channel from anywhere in the process
//! let events_rx = local.events.subscribe();
//!
//! let forwarder = DataForwarder::start(driver, data_server, config, local.as_publications())?;
//! for batch in events_rx.iter() {
//!     println!("{} events", batch.events.len());
//! }
//! # drop(forwarder);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - **`forwarder`** (default): the full fan-out core (implies the rest)
//! - **`sensor`**: just the sensor-facing types and traits
//! - **`msgs`**: just the published message schemas
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Sensor surface: evcam-sensor                           │
//! │  (SensorMode, RawEvent, SensorQuery, FrameDataServer)   │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Fan-out core: evcam-forwarder                          │
//! │  (UpdateDispatcher, staging buffers, publisher threads) │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Messages: evcam-msgs                                   │
//! │  (event vectors, IMU batches, polarity raster)          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export sensor surface
#[cfg(feature = "sensor")]
pub use evcam_sensor as sensor;

// Re-export message schemas
#[cfg(feature = "msgs")]
pub use evcam_msgs as msgs;

// Re-export the fan-out core
#[cfg(feature = "forwarder")]
pub use evcam_forwarder as forwarder;

/// Prelude - commonly used types and traits
pub mod prelude {
    #[cfg(feature = "sensor")]
    pub use crate::sensor::{
        FrameDataServer, FrameListener, ImuSample, RawEvent, SensorMode, SensorQuery,
    };

    #[cfg(feature = "msgs")]
    pub use crate::msgs::{EventArrayMessage, EventVectorMessage, Header, ImageMessage};

    #[cfg(feature = "forwarder")]
    pub use crate::forwarder::{
        DataForwarder, ForwarderChannels, ForwarderConfig, ForwarderOptions, LocalChannels,
        Publication,
    };
}
