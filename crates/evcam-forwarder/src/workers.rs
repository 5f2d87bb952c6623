//! The three publisher threads.
//!
//! Each thread parks in its buffer's (or signal's) condition wait between
//! wakeups and holds no lock otherwise. One bad iteration is contained by a
//! catch_unwind boundary so a panicking cycle cannot kill the thread.

use crate::channels::ForwarderChannels;
use crate::config::ForwarderOptions;
use crate::encode::{build_event_array, build_event_vector, build_imu_pair};
use crate::raster::rasterize_polarity;
use crate::staging::{StagedEvents, UpdateSignal};
use evcam_msgs::{Header, ImageMessage, ImuBatchMessage};
use evcam_sensor::{
    ImuSample, RawEvent, SensorMode, SensorQuery, LOOP_SLOT_INTENSITY, SENSOR_COLS, SENSOR_ROWS,
};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{error, warn};

/// Shared state handed to each publisher thread.
#[derive(Clone)]
pub(crate) struct WorkerContext {
    pub sensor: Arc<dyn SensorQuery>,
    pub options: Arc<ForwarderOptions>,
    pub channels: ForwarderChannels,
    pub frame_id: String,
    pub running: Arc<AtomicBool>,
    /// Sequence numbering for rich IMU messages; monotonic for the lifetime
    /// of the forwarder instance, never reset.
    pub imu_seq: Arc<AtomicU64>,
}

fn guarded<F: FnOnce()>(thread_name: &str, body: F) {
    if panic::catch_unwind(AssertUnwindSafe(body)).is_err() {
        error!("{thread_name}: publisher iteration panicked, thread continues");
    }
}

pub(crate) fn spawn_raw_events(
    ctx: WorkerContext,
    staged: Arc<StagedEvents>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("evcam-raw-events".to_string())
        .spawn(move || {
            while ctx.running.load(Ordering::Relaxed) {
                let Some(slot) = staged.wait_for_generation(&ctx.running) else {
                    break;
                };
                guarded("evcam-raw-events", || raw_events_cycle(&ctx, &slot.events));
            }
        })
}

pub(crate) fn spawn_polarity_image(
    ctx: WorkerContext,
    staged: Arc<StagedEvents>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("evcam-polarity-img".to_string())
        .spawn(move || {
            while ctx.running.load(Ordering::Relaxed) {
                let Some(slot) = staged.wait_for_generation(&ctx.running) else {
                    break;
                };
                guarded("evcam-polarity-img", || {
                    polarity_image_cycle(&ctx, &slot.events)
                });
            }
        })
}

pub(crate) fn spawn_imu(
    ctx: WorkerContext,
    signal: Arc<UpdateSignal>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("evcam-imu".to_string())
        .spawn(move || {
            let mut scratch: Vec<ImuSample> = Vec::new();
            while ctx.running.load(Ordering::Relaxed) {
                if !signal.wait(&ctx.running) {
                    break;
                }
                guarded("evcam-imu", || imu_cycle(&ctx, &mut scratch));
            }
        })
}

/// One raw-events publish cycle over a staged generation.
///
/// The generic array is always published; the rich vector is built and
/// published only when someone subscribes to it.
fn raw_events_cycle(ctx: &WorkerContext, events: &[RawEvent]) {
    if !ctx.options.raw_events_enabled() || events.is_empty() {
        return;
    }

    // The mode may have changed since this generation was staged.
    let mode = ctx.sensor.fixed_mode();

    let array = build_event_array(events, mode, Header::stamped(ctx.frame_id.as_str()));
    if let Err(e) = ctx.channels.events.publish(array) {
        warn!("event-array publish failed: {e}");
    }

    if ctx.channels.event_vector.has_subscribers() {
        let vector = build_event_vector(events, mode, Header::stamped(ctx.frame_id.as_str()));
        if let Err(e) = ctx.channels.event_vector.publish(vector) {
            warn!("event-vector publish failed: {e}");
        }
    }
}

/// One polarity-image publish cycle over a staged generation.
fn polarity_image_cycle(ctx: &WorkerContext, events: &[RawEvent]) {
    if !ctx.channels.polarity_image.has_subscribers() {
        return;
    }
    if !ctx.options.polarity_image_enabled() || events.is_empty() {
        return;
    }

    // Only intensity captures rasterize; under loop mode the intensity
    // sub-mode lives in its designated slot.
    let intensity_capture = if ctx.sensor.loop_mode_enabled() {
        ctx.sensor.loop_mode(LOOP_SLOT_INTENSITY) == SensorMode::EventIntensity
    } else {
        ctx.sensor.fixed_mode() == SensorMode::EventIntensity
    };
    if !intensity_capture {
        return;
    }

    let raster = rasterize_polarity(events);
    let msg = ImageMessage::rgb8(
        Header::stamped(ctx.frame_id.as_str()),
        SENSOR_ROWS,
        SENSOR_COLS,
        raster.into_raw(),
    );
    if let Err(e) = ctx.channels.polarity_image.publish(msg) {
        warn!("polarity-image publish failed: {e}");
    }
}

/// One IMU publish cycle: live pull, per-sample generic publishes, one
/// trailing rich batch.
fn imu_cycle(ctx: &WorkerContext, scratch: &mut Vec<ImuSample>) {
    if !ctx.sensor.imu_module_enabled() {
        return;
    }
    ctx.sensor.imu_data(scratch);

    let mut batch = ImuBatchMessage::with_capacity(Header::stamped(ctx.frame_id.as_str()), scratch.len());
    for sample in scratch.iter() {
        let seq = ctx.imu_seq.fetch_add(1, Ordering::Relaxed);
        let (rich, generic) = build_imu_pair(sample, seq, &ctx.frame_id);
        batch.imus.push(rich);
        if let Err(e) = ctx.channels.imu.publish(generic) {
            warn!("inertial publish failed: {e}");
        }
    }
    if let Err(e) = ctx.channels.imu_batch.publish(batch) {
        warn!("imu-batch publish failed: {e}");
    }
}
