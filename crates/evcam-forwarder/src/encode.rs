//! Re-encoding of buffered sensor data into the published message shapes.
//!
//! Pulled out of the thread loops so the mode-dependent field mapping can be
//! exercised without spinning up threads.

use evcam_msgs::{
    EventArrayMessage, EventMessage, EventVectorMessage, Header, ImuMessage, InertialMessage,
    PolarityEvent,
};
use evcam_sensor::{ImuSample, RawEvent, SensorMode, SENSOR_COLS, SENSOR_ROWS};

/// Build the rich event-vector message.
///
/// The field mapping is a three-way branch on the capture mode; no other
/// modes populate brightness or polarity. The off-pixel timestamp is carried
/// in every mode.
pub fn build_event_vector(
    events: &[RawEvent],
    mode: SensorMode,
    header: Header,
) -> EventVectorMessage {
    let mut msg =
        EventVectorMessage::with_capacity(header, SENSOR_ROWS, SENSOR_COLS, events.len());

    for ev in events {
        let mut out = EventMessage {
            x: ev.row,
            y: ev.col,
            ..EventMessage::default()
        };
        match mode {
            SensorMode::EventOffPixelTimestamp => {
                out.brightness = 255;
            }
            SensorMode::EventInPixelTimestamp => {
                out.brightness = 255;
                out.in_pixel_timestamp = ev.t_in_pixel;
            }
            SensorMode::EventIntensity => {
                out.brightness = ev.adc;
                out.polarity = ev.polarity;
            }
            _ => {}
        }
        out.off_pixel_timestamp = ev.t_off_pixel;
        msg.events.push(out);
    }
    msg
}

/// Build the generic event-array message.
///
/// Each event carries its own capture stamp. The boolean polarity is derived
/// from the signed polarity only in intensity mode (negative maps to
/// `false`, zero and positive to `true`); other modes leave the default.
pub fn build_event_array(
    events: &[RawEvent],
    mode: SensorMode,
    header: Header,
) -> EventArrayMessage {
    let mut msg = EventArrayMessage::with_capacity(header, SENSOR_ROWS, SENSOR_COLS, events.len());

    for ev in events {
        let mut out = PolarityEvent {
            x: ev.row,
            y: ev.col,
            stamp_ns: evcam_msgs::stamp_now_ns(),
            polarity: false,
        };
        if mode == SensorMode::EventIntensity {
            out.polarity = ev.polarity != -1;
        }
        msg.events.push(out);
    }
    msg
}

/// Build the rich and generic messages for one inertial sample.
pub fn build_imu_pair(
    sample: &ImuSample,
    seq: u64,
    frame_id: &str,
) -> (ImuMessage, InertialMessage) {
    let rich = ImuMessage {
        header: Header::stamped(frame_id).with_seq(seq),
        gyro: sample.gyro,
        acc: sample.acc,
        mag: sample.mag,
    };
    let generic = InertialMessage {
        header: Header::stamped(frame_id),
        angular_velocity: sample.gyro,
        linear_acceleration: sample.acc,
    };
    (rich, generic)
}
