use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub show_help: bool,
    pub run_seconds: Option<u64>,
    pub config_path: PathBuf,
    pub json_logs: bool,
    pub latest: bool,
    pub sensor_period_ms: u64,
    pub actuator_period_ms: u64,
    pub display_tick_ms: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            show_help: false,
            run_seconds: None,
            config_path: PathBuf::from("config.yaml"),
            json_logs: false,
            latest: false,
            sensor_period_ms: 200,
            actuator_period_ms: 500,
            display_tick_ms: 1000,
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::from_args(&args)
    }

    pub fn from_args(args: &[String]) -> Self {
        let mut cfg = RuntimeConfig::default();
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--run-seconds" => {
                    if i + 1 < args.len() {
                        cfg.run_seconds = args[i + 1].parse::<u64>().ok();
                        i += 1;
                    }
                }
                "--config" => {
                    if i + 1 < args.len() {
                        cfg.config_path = PathBuf::from(&args[i + 1]);
                        i += 1;
                    }
                }
                "--json-logs" => {
                    cfg.json_logs = true;
                }
                "--latest" => {
                    cfg.latest = true;
                }
                "--sensor-period-ms" => {
                    if i + 1 < args.len() {
                        cfg.sensor_period_ms = args[i + 1].parse().unwrap_or(200);
                        i += 1;
                    }
                }
                "--actuator-period-ms" => {
                    if i + 1 < args.len() {
                        cfg.actuator_period_ms = args[i + 1].parse().unwrap_or(500);
                        i += 1;
                    }
                }
                "--display-tick-ms" => {
                    if i + 1 < args.len() {
                        cfg.display_tick_ms = args[i + 1].parse().unwrap_or(1000);
                        i += 1;
                    }
                }
                "--help" | "-h" => {
                    cfg.show_help = true;
                    break;
                }
                _ => {}
            }
            i += 1;
        }
        cfg
    }

    pub fn print_help() {
        println!(
            r#"sigflow - periodic sensor/actuator telemetry pipeline

USAGE:
    sigflow [OPTIONS]

OPTIONS:
    --config <PATH>           YAML configuration file [default: config.yaml]
    --run-seconds <SECS>      Run for a fixed duration then exit (default: run until killed)
    --json-logs               Output logs in JSON format (for log aggregation)
    --latest                  Display the newest reading per tick instead of strict FIFO
    --sensor-period-ms <MS>   Temperature sampling period [default: 200]
    --actuator-period-ms <MS> Actuator republish period [default: 500]
    --display-tick-ms <MS>    Display composition period [default: 1000]
    -h, --help                Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG                  Set log filter (e.g., RUST_LOG=debug,sigflow=trace)

CONFIGURATION:
    The YAML file may set the initial actuator speed:

        motor:
          rpm: 1500

    A missing file, missing field or negative value keeps the built-in
    default of 1000 RPM.
"#
        );
    }
}
