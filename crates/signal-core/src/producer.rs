use crate::actuator::ActuatorState;
use crate::queue::SignalQueue;
use crate::reading::Reading;
use crate::timebase::TimeBase;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SampleError {
    #[error("reading {value} outside domain [{lo}, {hi}]")]
    OutOfDomain { value: f64, lo: f64, hi: f64 },
    #[error("actuator reports negative speed: {rpm} rpm")]
    NegativeActuatorSpeed { rpm: i64 },
}

/// One side of the fixed producer set. Exactly two implementations exist:
/// [`TemperatureSensor`] and [`ActuatorSource`].
pub trait SignalSource: Send {
    type Value: Copy + Send + 'static;

    fn label(&self) -> &'static str;

    /// Computes the next reading. A failure here is a per-cycle fault, not a
    /// task failure: the owning [`ProducerTask`] logs it and skips the push.
    fn sample(&mut self) -> Result<Self::Value, SampleError>;
}

/// Simulated temperature source drawing uniformly from a closed domain.
pub struct TemperatureSensor {
    lo: f64,
    hi: f64,
    rng: StdRng,
}

impl TemperatureSensor {
    pub fn new(lo: f64, hi: f64) -> Self {
        debug_assert!(lo <= hi);
        Self {
            lo,
            hi,
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for TemperatureSensor {
    fn default() -> Self {
        Self::new(35.0, 45.0)
    }
}

impl SignalSource for TemperatureSensor {
    type Value = f64;

    fn label(&self) -> &'static str {
        "temperature"
    }

    fn sample(&mut self) -> Result<f64, SampleError> {
        let value = self.rng.gen_range(self.lo..=self.hi);
        // Domain guard on the generated value, matching the sensor fault model.
        if value < self.lo || value > self.hi {
            return Err(SampleError::OutOfDomain {
                value,
                lo: self.lo,
                hi: self.hi,
            });
        }
        Ok(value)
    }
}

/// Republishes the current [`ActuatorState`] speed; it never invents values,
/// so configuration or command changes are visible on the next cycle.
pub struct ActuatorSource {
    state: Arc<ActuatorState>,
}

impl ActuatorSource {
    pub fn new(state: Arc<ActuatorState>) -> Self {
        Self { state }
    }
}

impl SignalSource for ActuatorSource {
    type Value = i64;

    fn label(&self) -> &'static str {
        "actuator"
    }

    fn sample(&mut self) -> Result<i64, SampleError> {
        let rpm = self.state.speed();
        if rpm < 0 {
            return Err(SampleError::NegativeActuatorSpeed { rpm });
        }
        Ok(rpm)
    }
}

#[derive(Clone, Copy, Default, Debug)]
pub struct ProducerStats {
    pub cycles: u64,
    pub faults: u64,
}

/// Periodic worker: sample, push, sleep. Runs until the stop flag is set;
/// a faulty cycle is logged and skipped, never fatal.
pub struct ProducerTask<S: SignalSource> {
    source: S,
    queue: Arc<SignalQueue<Reading<S::Value>>>,
    period: Duration,
    timebase: TimeBase,
    stats: ProducerStats,
}

impl<S: SignalSource> ProducerTask<S> {
    pub fn new(
        source: S,
        queue: Arc<SignalQueue<Reading<S::Value>>>,
        period: Duration,
        timebase: TimeBase,
    ) -> Self {
        Self {
            source,
            queue,
            period,
            timebase,
            stats: ProducerStats::default(),
        }
    }

    pub fn run(&mut self, stop: &AtomicBool) {
        while !stop.load(Ordering::Relaxed) {
            self.run_cycle();
            thread::sleep(self.period);
        }
    }

    fn run_cycle(&mut self) {
        match self.source.sample() {
            Ok(value) => {
                self.queue.push(Reading::new(value, self.timebase.now_us()));
            }
            Err(err) => {
                self.stats.faults += 1;
                warn!(source = self.source.label(), %err, "skipping cycle");
            }
        }
        self.stats.cycles += 1;
    }

    pub fn stats(&self) -> ProducerStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_stays_inside_declared_domain() {
        let mut sensor = TemperatureSensor::new(35.0, 45.0);
        for _ in 0..10_000 {
            let value = sensor.sample().unwrap();
            assert!((35.0..=45.0).contains(&value), "out of domain: {value}");
        }
    }

    #[test]
    fn actuator_source_tracks_state_changes() {
        let state = Arc::new(ActuatorState::new());
        let mut source = ActuatorSource::new(Arc::clone(&state));
        assert_eq!(source.sample().unwrap(), crate::DEFAULT_SPEED_RPM);
        state.set_speed(1500).unwrap();
        assert_eq!(source.sample().unwrap(), 1500);
    }

    struct FlakySource {
        calls: u64,
    }

    impl SignalSource for FlakySource {
        type Value = f64;

        fn label(&self) -> &'static str {
            "flaky"
        }

        fn sample(&mut self) -> Result<f64, SampleError> {
            self.calls += 1;
            if self.calls % 2 == 0 {
                Err(SampleError::OutOfDomain {
                    value: 99.0,
                    lo: 0.0,
                    hi: 1.0,
                })
            } else {
                Ok(0.5)
            }
        }
    }

    #[test]
    fn faulty_cycles_are_skipped_without_stopping_the_task() {
        let queue = Arc::new(SignalQueue::new());
        let mut task = ProducerTask::new(
            FlakySource { calls: 0 },
            Arc::clone(&queue),
            Duration::from_millis(1),
            TimeBase::new(),
        );
        for _ in 0..10 {
            task.run_cycle();
        }
        let stats = task.stats();
        assert_eq!(stats.cycles, 10);
        assert_eq!(stats.faults, 5);
        assert_eq!(queue.len(), 5);
    }

    #[test]
    fn run_stops_when_flag_is_set() {
        let queue = Arc::new(SignalQueue::new());
        let stop = Arc::new(AtomicBool::new(true));
        let mut task = ProducerTask::new(
            TemperatureSensor::default(),
            queue,
            Duration::from_millis(1),
            TimeBase::new(),
        );
        // Flag already set: run must return without a single cycle.
        task.run(&stop);
        assert_eq!(task.stats().cycles, 0);
    }
}
