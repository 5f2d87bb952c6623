//! # evcam-forwarder
//!
//! The event-driven fan-out core: one synchronous frame-update callback from
//! the sensor driver is distributed, without ever blocking the driver's
//! acquisition path, to three independently-paced publisher threads.
//!
//! ## Architecture
//!
//! ```text
//! driver thread ──► UpdateDispatcher ──try_stage──► [raw buffer]      ──► raw-events thread
//!                        │            ──try_stage──► [polarity buffer] ──► polarity-img thread
//!                        └────────────────notify───► [imu signal]      ──► imu thread
//! ```
//!
//! The dispatcher stages with a non-blocking `try_lock` and skips a buffer
//! whose consumer is mid-read; buffers hold only the newest generation, so
//! slow consumers lose generations instead of building a backlog. Each
//! consumer publishes through the [`Publication`] seam; wire transports live
//! outside this workspace, [`LocalChannel`] serves in-process consumers.
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use evcam_forwarder::{DataForwarder, ForwarderConfig, LocalChannels};
//! use evcam_sensor::{FrameDataServer, SensorQuery};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let driver: Arc<dyn SensorQuery> = unimplemented!();
//! let data_server = Arc::new(FrameDataServer::new());
//! let local = LocalChannels::new();
//! let events_rx = local.events.subscribe();
//!
//! let forwarder = DataForwarder::start(
//!     driver,
//!     Arc::clone(&data_server),
//!     ForwarderConfig::new().with_frame_id("camera0"),
//!     local.as_publications(),
//! )?;
//!
//! // The driver calls data_server.notify_frame_data() once per frame;
//! // published messages arrive on the subscribed receivers.
//! for batch in events_rx.iter() {
//!     println!("{} events", batch.events.len());
//! }
//! # drop(forwarder);
//! # Ok(())
//! # }
//! ```

pub mod channels;
pub mod config;
pub mod dispatcher;
pub mod encode;
pub mod error;
pub mod forwarder;
pub mod raster;
pub mod staging;

mod workers;

pub use channels::{ForwarderChannels, LocalChannel, LocalChannels, Publication, Subscription};
pub use config::{ForwarderConfig, ForwarderOptions};
pub use dispatcher::UpdateDispatcher;
pub use error::{ForwardError, ForwardResult};
pub use forwarder::DataForwarder;
pub use staging::{StagedEvents, UpdateSignal};
