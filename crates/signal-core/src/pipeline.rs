use crate::actuator::ActuatorState;
use crate::display::{AggregatingDisplay, DisplaySink, DrainPolicy};
use crate::producer::{ActuatorSource, ProducerTask, TemperatureSensor};
use crate::queue::SignalQueue;
use crate::timebase::TimeBase;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub sensor_period: Duration,
    pub actuator_period: Duration,
    pub display_tick: Duration,
    pub temperature_domain: (f64, f64),
    /// Startup speed from configuration; `None` keeps the compiled-in default.
    pub initial_speed_rpm: Option<i64>,
    pub drain_policy: DrainPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sensor_period: Duration::from_millis(200),
            actuator_period: Duration::from_millis(500),
            display_tick: Duration::from_secs(1),
            temperature_domain: (35.0, 45.0),
            initial_speed_rpm: None,
            drain_policy: DrainPolicy::Fifo,
        }
    }
}

/// Owns the queues and actuator state, runs each producer and the display on
/// its own thread, and supervises their lifetime. The workers run until
/// [`stop`](Self::stop); a process that never calls it runs until killed.
pub struct PipelineRunner {
    stop: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
    actuator: Arc<ActuatorState>,
}

impl PipelineRunner {
    pub fn start<W: DisplaySink + 'static>(config: PipelineConfig, sink: W) -> Self {
        let timebase = TimeBase::new();
        let temperature_queue = Arc::new(SignalQueue::new());
        let speed_queue = Arc::new(SignalQueue::new());
        let actuator = Arc::new(ActuatorState::new());

        if let Some(rpm) = config.initial_speed_rpm {
            match actuator.set_speed(rpm) {
                Ok(()) => info!(rpm, "applied configured actuator speed"),
                Err(err) => warn!(%err, "keeping default actuator speed"),
            }
        }

        let stop = Arc::new(AtomicBool::new(false));
        let mut workers = Vec::with_capacity(3);

        {
            let (lo, hi) = config.temperature_domain;
            let queue = Arc::clone(&temperature_queue);
            let period = config.sensor_period;
            let stop = Arc::clone(&stop);
            workers.push(thread::spawn(move || {
                let mut task =
                    ProducerTask::new(TemperatureSensor::new(lo, hi), queue, period, timebase);
                task.run(&stop);
            }));
        }

        {
            let source = ActuatorSource::new(Arc::clone(&actuator));
            let queue = Arc::clone(&speed_queue);
            let period = config.actuator_period;
            let stop = Arc::clone(&stop);
            workers.push(thread::spawn(move || {
                let mut task = ProducerTask::new(source, queue, period, timebase);
                task.run(&stop);
            }));
        }

        {
            let mut display = AggregatingDisplay::new(
                temperature_queue,
                speed_queue,
                config.display_tick,
                config.drain_policy,
                sink,
            );
            let stop = Arc::clone(&stop);
            workers.push(thread::spawn(move || display.run(&stop)));
        }

        info!(
            sensor_period_ms = config.sensor_period.as_millis() as u64,
            actuator_period_ms = config.actuator_period.as_millis() as u64,
            display_tick_ms = config.display_tick.as_millis() as u64,
            "pipeline started"
        );

        Self {
            stop,
            workers,
            actuator,
        }
    }

    /// Shared actuator state, for configuration or a future command path.
    pub fn actuator(&self) -> Arc<ActuatorState> {
        Arc::clone(&self.actuator)
    }

    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Waits for every worker to exit. Never returns unless [`stop`](Self::stop)
    /// has been called.
    pub fn join(self) {
        for handle in self.workers {
            let _ = handle.join();
        }
    }
}
