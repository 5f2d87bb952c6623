//! End-to-end tests: scripted driver -> data server -> forwarder -> local
//! channels.

mod common;

use common::{diagonal_events, ScriptedSensor};
use evcam_forwarder::{DataForwarder, ForwarderConfig, LocalChannels};
use evcam_sensor::{FrameDataServer, ImuSample, SensorMode, SensorQuery, SENSOR_ROWS};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

const RECV: Duration = Duration::from_secs(2);
const SILENCE: Duration = Duration::from_millis(200);

struct Rig {
    sensor: Arc<ScriptedSensor>,
    data_server: Arc<FrameDataServer>,
    local: LocalChannels,
    forwarder: DataForwarder,
}

fn rig(mode: SensorMode) -> Rig {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let sensor = Arc::new(ScriptedSensor::new(mode));
    let data_server = Arc::new(FrameDataServer::new());
    let local = LocalChannels::new();

    let driver: Arc<dyn SensorQuery> = sensor.clone();
    let forwarder = DataForwarder::start(
        driver,
        Arc::clone(&data_server),
        ForwarderConfig::new().with_frame_id("itest"),
        local.as_publications(),
    )
    .expect("forwarder should start");

    Rig {
        sensor,
        data_server,
        local,
        forwarder,
    }
}

#[test]
fn events_flow_end_to_end() {
    let rig = rig(SensorMode::EventIntensity);
    let array_rx = rig.local.events.subscribe();
    let rich_rx = rig.local.event_vector.subscribe();

    let events = diagonal_events(5);
    rig.sensor.set_events(events.clone());
    rig.data_server.notify_frame_data();

    let array = array_rx.recv_timeout(RECV).expect("generic event array");
    assert_eq!(array.events.len(), events.len());
    for (src, out) in events.iter().zip(&array.events) {
        assert_eq!(out.x, src.row);
        assert_eq!(out.y, src.col);
    }
    assert_eq!(array.header.frame_id, "itest");

    let rich = rich_rx.recv_timeout(RECV).expect("rich event vector");
    assert_eq!(rich.vector_length as usize, events.len());
    assert_eq!(rich.events[0].brightness, events[0].adc);
}

#[test]
fn read_failure_silences_event_channels_but_not_imu() {
    let rig = rig(SensorMode::EventIntensity);
    let array_rx = rig.local.events.subscribe();
    let batch_rx = rig.local.imu_batch.subscribe();

    rig.sensor.set_events(diagonal_events(3));
    rig.sensor.fail_reads.store(true, Ordering::Relaxed);
    rig.sensor.set_imu(vec![ImuSample::default()]);

    rig.data_server.notify_frame_data();

    assert!(batch_rx.recv_timeout(RECV).is_ok(), "imu must still flow");
    assert!(array_rx.recv_timeout(SILENCE).is_err());

    // The next healthy cycle recovers without restart.
    rig.sensor.fail_reads.store(false, Ordering::Relaxed);
    rig.data_server.notify_frame_data();
    assert!(array_rx.recv_timeout(RECV).is_ok());
}

#[test]
fn disabled_toggles_silence_their_channels() {
    let rig = rig(SensorMode::EventIntensity);
    let array_rx = rig.local.events.subscribe();
    let img_rx = rig.local.polarity_image.subscribe();

    let options = rig.forwarder.options();
    options.set_raw_events_enabled(false);
    options.set_polarity_image_enabled(false);

    rig.sensor.set_events(diagonal_events(4));
    rig.data_server.notify_frame_data();

    assert!(array_rx.recv_timeout(SILENCE).is_err());
    assert!(img_rx.recv_timeout(SILENCE).is_err());

    options.set_raw_events_enabled(true);
    rig.data_server.notify_frame_data();
    assert!(array_rx.recv_timeout(RECV).is_ok());
}

#[test]
fn polarity_image_paints_flipped_pixels() {
    let rig = rig(SensorMode::EventIntensity);
    let img_rx = rig.local.polarity_image.subscribe();

    rig.sensor.set_events(diagonal_events(2));
    rig.data_server.notify_frame_data();

    let img = img_rx.recv_timeout(RECV).expect("polarity image");
    // Event 0: polarity +1 at (0, 0) -> red at flipped row.
    assert_eq!(img.pixel(SENSOR_ROWS - 1, 0), &[255, 0, 0]);
    // Event 1: polarity -1 at (1, 1) -> blue.
    assert_eq!(img.pixel(SENSOR_ROWS - 2, 1), &[0, 0, 255]);
    // Background stays white.
    assert_eq!(img.pixel(0, 0), &[255, 255, 255]);
}

#[test]
fn polarity_image_skipped_outside_intensity_mode() {
    let rig = rig(SensorMode::EventOffPixelTimestamp);
    let img_rx = rig.local.polarity_image.subscribe();
    let array_rx = rig.local.events.subscribe();

    rig.sensor.set_events(diagonal_events(2));
    rig.data_server.notify_frame_data();

    // Events still flow, only the raster is gated on the capture mode.
    assert!(array_rx.recv_timeout(RECV).is_ok());
    assert!(img_rx.recv_timeout(SILENCE).is_err());
}

#[test]
fn imu_sequences_are_strictly_increasing_across_wakeups() {
    let rig = rig(SensorMode::EventIntensity);
    let batch_rx = rig.local.imu_batch.subscribe();
    let imu_rx = rig.local.imu.subscribe();

    rig.sensor.set_imu(vec![ImuSample::default(); 2]);

    rig.data_server.notify_frame_data();
    let first = batch_rx.recv_timeout(RECV).expect("first batch");
    rig.data_server.notify_frame_data();
    let second = batch_rx.recv_timeout(RECV).expect("second batch");

    let seqs: Vec<u64> = first
        .imus
        .iter()
        .chain(second.imus.iter())
        .map(|m| m.header.seq)
        .collect();
    assert_eq!(seqs.len(), 4);
    assert!(seqs.windows(2).all(|w| w[0] < w[1]));

    // One generic message per sample per wakeup.
    assert_eq!(imu_rx.try_iter().count(), 4);
}

#[test]
fn stop_joins_even_without_a_pending_broadcast() {
    let mut rig = rig(SensorMode::EventIntensity);
    // No notify at all: every thread is parked in its wait.
    rig.forwarder.stop();
    assert!(!rig.forwarder.is_running());
    assert_eq!(rig.data_server.listener_count(), 0);

    // Idempotent.
    rig.forwarder.stop();
}

#[test]
fn drop_stops_the_forwarder() {
    let rig = rig(SensorMode::EventIntensity);
    let data_server = Arc::clone(&rig.data_server);
    rig.sensor.set_events(diagonal_events(1));
    rig.data_server.notify_frame_data();

    drop(rig);
    assert_eq!(data_server.listener_count(), 0);
}
