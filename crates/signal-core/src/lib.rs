pub mod actuator;
pub mod display;
pub mod pipeline;
pub mod producer;
pub mod queue;
pub mod reading;
pub mod timebase;

pub use actuator::{ActuatorState, CommandError, DEFAULT_SPEED_RPM};
pub use display::{AggregatingDisplay, DisplayLine, DisplaySink, DrainPolicy, StdoutSink};
pub use pipeline::{PipelineConfig, PipelineRunner};
pub use producer::{
    ActuatorSource, ProducerStats, ProducerTask, SampleError, SignalSource, TemperatureSensor,
};
pub use queue::SignalQueue;
pub use reading::Reading;
pub use timebase::TimeBase;
