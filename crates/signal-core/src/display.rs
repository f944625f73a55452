use crate::queue::SignalQueue;
use crate::reading::Reading;
use chrono::{Local, NaiveTime};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How long a blocked pop waits before rechecking the stop flag.
const STOP_POLL: Duration = Duration::from_millis(100);

/// One composed output line. Ephemeral: built, handed to the sink, dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayLine {
    pub at: NaiveTime,
    pub temperature_c: f64,
    pub speed_rpm: i64,
}

impl fmt::Display for DisplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Time: {}] Temperature: {:.1} C | Motor Speed: {} RPM",
            self.at.format("%H:%M:%S"),
            self.temperature_c,
            self.speed_rpm
        )
    }
}

/// Output sink handed to the display at construction. No global device
/// accessor exists; tests inject a collecting sink.
pub trait DisplaySink: Send {
    fn emit(&mut self, line: &DisplayLine);
}

pub struct StdoutSink;

impl DisplaySink for StdoutSink {
    fn emit(&mut self, line: &DisplayLine) {
        println!("{line}");
    }
}

/// Per-tick queue drain behavior.
///
/// `Fifo` takes one reading per queue per tick, so a backlog accumulates
/// whenever production outpaces the tick and displayed values lag wall-clock
/// time. `Latest` drains each queue and keeps the newest reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrainPolicy {
    #[default]
    Fifo,
    Latest,
}

/// Consumer loop: once per tick, take one reading from each queue, compose a
/// timestamped line and hand it to the sink. Runs until stopped.
pub struct AggregatingDisplay<W: DisplaySink> {
    temperature: Arc<SignalQueue<Reading<f64>>>,
    speed: Arc<SignalQueue<Reading<i64>>>,
    tick: Duration,
    policy: DrainPolicy,
    sink: W,
}

impl<W: DisplaySink> AggregatingDisplay<W> {
    pub fn new(
        temperature: Arc<SignalQueue<Reading<f64>>>,
        speed: Arc<SignalQueue<Reading<i64>>>,
        tick: Duration,
        policy: DrainPolicy,
        sink: W,
    ) -> Self {
        Self {
            temperature,
            speed,
            tick,
            policy,
            sink,
        }
    }

    pub fn run(&mut self, stop: &AtomicBool) {
        while !stop.load(Ordering::Relaxed) {
            let Some(temp) = next_reading(&self.temperature, self.policy, stop) else {
                break;
            };
            let Some(speed) = next_reading(&self.speed, self.policy, stop) else {
                break;
            };
            let line = DisplayLine {
                at: Local::now().time(),
                temperature_c: temp.value,
                speed_rpm: speed.value,
            };
            self.sink.emit(&line);
            thread::sleep(self.tick);
        }
    }
}

/// Blocking pop that stays responsive to the stop flag. With
/// [`DrainPolicy::Latest`] the queue is drained and the newest reading kept.
fn next_reading<T: Copy>(
    queue: &SignalQueue<Reading<T>>,
    policy: DrainPolicy,
    stop: &AtomicBool,
) -> Option<Reading<T>> {
    loop {
        if stop.load(Ordering::Relaxed) {
            return None;
        }
        if let Some(mut reading) = queue.pop_timeout(STOP_POLL) {
            if policy == DrainPolicy::Latest {
                while let Some(newer) = queue.try_pop() {
                    reading = newer;
                }
            }
            return Some(reading);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Clone)]
    pub(crate) struct CollectingSink(pub Arc<Mutex<Vec<DisplayLine>>>);

    impl CollectingSink {
        pub fn new() -> Self {
            Self(Arc::new(Mutex::new(Vec::new())))
        }

        pub fn lines(&self) -> Vec<DisplayLine> {
            self.0.lock().unwrap().clone()
        }
    }

    impl DisplaySink for CollectingSink {
        fn emit(&mut self, line: &DisplayLine) {
            self.0.lock().unwrap().push(line.clone());
        }
    }

    #[test]
    fn line_formats_all_three_fields() {
        let line = DisplayLine {
            at: NaiveTime::from_hms_opt(14, 3, 9).unwrap(),
            temperature_c: 38.5,
            speed_rpm: 1000,
        };
        assert_eq!(
            line.to_string(),
            "[Time: 14:03:09] Temperature: 38.5 C | Motor Speed: 1000 RPM"
        );
    }

    #[test]
    fn fifo_policy_takes_the_oldest_reading() {
        let queue = Arc::new(SignalQueue::new());
        queue.push(Reading::new(35.0, 1));
        queue.push(Reading::new(44.0, 2));
        let stop = AtomicBool::new(false);
        let reading = next_reading(&queue, DrainPolicy::Fifo, &stop).unwrap();
        assert_eq!(reading.value, 35.0);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn latest_policy_drains_and_keeps_the_newest() {
        let queue = Arc::new(SignalQueue::new());
        queue.push(Reading::new(35.0, 1));
        queue.push(Reading::new(40.0, 2));
        queue.push(Reading::new(44.0, 3));
        let stop = AtomicBool::new(false);
        let reading = next_reading(&queue, DrainPolicy::Latest, &stop).unwrap();
        assert_eq!(reading.value, 44.0);
        assert!(queue.is_empty());
    }

    #[test]
    fn stopped_wait_returns_none() {
        let queue: Arc<SignalQueue<Reading<f64>>> = Arc::new(SignalQueue::new());
        let stop = AtomicBool::new(true);
        assert!(next_reading(&queue, DrainPolicy::Fifo, &stop).is_none());
    }

    #[test]
    fn display_composes_one_line_per_available_pair() {
        let temperature = Arc::new(SignalQueue::new());
        let speed = Arc::new(SignalQueue::new());
        temperature.push(Reading::new(39.2, 10));
        speed.push(Reading::new(1000, 11));

        let sink = CollectingSink::new();
        let mut display = AggregatingDisplay::new(
            Arc::clone(&temperature),
            Arc::clone(&speed),
            Duration::from_millis(1),
            DrainPolicy::Fifo,
            sink.clone(),
        );

        let stop = Arc::new(AtomicBool::new(false));
        let handle = {
            let stop = Arc::clone(&stop);
            thread::spawn(move || display.run(&stop))
        };
        // Give the display one tick, then stop it at the next empty wait.
        thread::sleep(Duration::from_millis(50));
        stop.store(true, Ordering::Relaxed);
        handle.join().unwrap();

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].temperature_c, 39.2);
        assert_eq!(lines[0].speed_rpm, 1000);
    }
}
