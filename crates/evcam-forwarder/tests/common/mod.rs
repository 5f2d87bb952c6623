//! Shared test double for the sensor driver.

use evcam_sensor::{ImuSample, RawEvent, SensorError, SensorMode, SensorQuery, SensorResult};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// A driver whose every answer is scripted from the test body.
pub struct ScriptedSensor {
    pub mode: Mutex<SensorMode>,
    pub loop_enabled: AtomicBool,
    pub loop_slot_mode: Mutex<SensorMode>,
    pub fail_reads: AtomicBool,
    pub events: Mutex<Vec<RawEvent>>,
    pub imu_enabled: AtomicBool,
    pub imu_samples: Mutex<Vec<ImuSample>>,
}

impl ScriptedSensor {
    pub fn new(mode: SensorMode) -> Self {
        Self {
            mode: Mutex::new(mode),
            loop_enabled: AtomicBool::new(false),
            loop_slot_mode: Mutex::new(mode),
            fail_reads: AtomicBool::new(false),
            events: Mutex::new(Vec::new()),
            imu_enabled: AtomicBool::new(false),
            imu_samples: Mutex::new(Vec::new()),
        }
    }

    pub fn set_events(&self, events: Vec<RawEvent>) {
        *self.events.lock() = events;
    }

    pub fn set_imu(&self, samples: Vec<ImuSample>) {
        self.imu_enabled.store(true, Ordering::Relaxed);
        *self.imu_samples.lock() = samples;
    }
}

impl SensorQuery for ScriptedSensor {
    fn fixed_mode(&self) -> SensorMode {
        *self.mode.lock()
    }

    fn loop_mode_enabled(&self) -> bool {
        self.loop_enabled.load(Ordering::Relaxed)
    }

    fn loop_mode(&self, _slot: u8) -> SensorMode {
        *self.loop_slot_mode.lock()
    }

    fn event_data(&self, out: &mut Vec<RawEvent>) -> SensorResult<()> {
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(SensorError::EventReadFailed("scripted failure".into()));
        }
        out.clear();
        out.extend_from_slice(&self.events.lock());
        Ok(())
    }

    fn imu_module_enabled(&self) -> bool {
        self.imu_enabled.load(Ordering::Relaxed)
    }

    fn imu_data(&self, out: &mut Vec<ImuSample>) {
        out.clear();
        out.extend_from_slice(&self.imu_samples.lock());
    }
}

/// A handful of intensity-mode events on a diagonal.
pub fn diagonal_events(n: u16) -> Vec<RawEvent> {
    (0..n)
        .map(|i| RawEvent {
            row: i,
            col: i,
            polarity: if i % 2 == 0 { 1 } else { -1 },
            adc: 100 + i,
            t_off_pixel: u32::from(i),
            t_in_pixel: 0,
        })
        .collect()
}
