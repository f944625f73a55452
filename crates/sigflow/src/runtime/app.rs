use crate::runtime::config::RuntimeConfig;
use crate::runtime::logging::init_tracing;
use crate::runtime::settings;
use signal_core::{DrainPolicy, PipelineConfig, PipelineRunner, StdoutSink};
use std::thread;
use std::time::Duration;
use tracing::info;

pub fn run_from_args() {
    let config = RuntimeConfig::from_env();
    if config.show_help {
        RuntimeConfig::print_help();
        return;
    }
    run(config);
}

pub fn run(config: RuntimeConfig) {
    init_tracing(config.json_logs);

    let initial_speed = settings::load_initial_speed(&config.config_path);

    let pipeline_config = PipelineConfig {
        sensor_period: Duration::from_millis(config.sensor_period_ms),
        actuator_period: Duration::from_millis(config.actuator_period_ms),
        display_tick: Duration::from_millis(config.display_tick_ms),
        initial_speed_rpm: initial_speed,
        drain_policy: if config.latest {
            DrainPolicy::Latest
        } else {
            DrainPolicy::Fifo
        },
        ..PipelineConfig::default()
    };

    let runner = PipelineRunner::start(pipeline_config, StdoutSink);

    if let Some(seconds) = config.run_seconds {
        thread::sleep(Duration::from_secs(seconds));
        runner.stop();
        runner.join();
        info!("run complete");
    } else {
        // No bounded run requested: run until the process is killed.
        runner.join();
    }
}
