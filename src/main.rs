use bl0942_rs::{
    init_logger, log_info, log_warn, Bl0942Config, Bl0942Driver, Bl0942Error, QuantityKind,
    SerialConfig, SerialTransport, Sink,
};
use clap::Parser;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "bl0942-cli")]
#[command(about = "CLI tool for polling a BL0942 energy meter over UART")]
struct Cli {
    /// Serial port path, e.g. /dev/ttyUSB0
    port: String,

    #[arg(short, long, default_value = "4800")]
    baudrate: u32,

    /// Poll interval in milliseconds
    #[arg(short, long, default_value = "1000")]
    interval_ms: u64,

    /// Stop after this many poll cycles
    #[arg(short, long)]
    count: Option<u64>,

    /// Disable the voltage output
    #[arg(long)]
    no_voltage: bool,

    /// Disable the current output
    #[arg(long)]
    no_current: bool,

    /// Disable the power output
    #[arg(long)]
    no_power: bool,

    /// Disable the power factor output
    #[arg(long)]
    no_power_factor: bool,
}

/// Sink that logs each published value with its presentation metadata.
struct LogSink {
    name: &'static str,
    unit: &'static str,
    decimals: usize,
}

impl Sink for LogSink {
    fn publish(&mut self, value: f64) {
        log_info(&format!(
            "{}: {:.*} {}",
            self.name, self.decimals, value, self.unit
        ));
    }
}

#[tokio::main]
async fn main() -> Result<(), Bl0942Error> {
    init_logger();

    let cli = Cli::parse();

    let mut config = Bl0942Config::default();
    config.update_interval = Duration::from_millis(cli.interval_ms);
    if cli.no_voltage {
        config.voltage = None;
    }
    if cli.no_current {
        config.current = None;
    }
    if cli.no_power {
        config.power = None;
    }
    if cli.no_power_factor {
        config.power_factor = None;
    }
    config.validate()?;

    let serial = SerialConfig {
        baudrate: cli.baudrate,
        ..SerialConfig::default()
    };
    let transport = SerialTransport::connect_with_config(&cli.port, serial).await?;
    let mut driver = Bl0942Driver::new(transport);

    for (kind, name) in [
        (QuantityKind::Voltage, "voltage"),
        (QuantityKind::Current, "current"),
        (QuantityKind::Power, "power"),
        (QuantityKind::PowerFactor, "power_factor"),
    ] {
        if let Some(sensor) = config.sensor(kind) {
            driver.bind(
                kind,
                Box::new(LogSink {
                    name,
                    unit: sensor.unit,
                    decimals: sensor.accuracy_decimals as usize,
                }),
            );
        }
    }
    log_info("Connected to BL0942 device");

    let mut ticker = tokio::time::interval(config.update_interval);
    let mut polls = 0u64;
    loop {
        ticker.tick().await;
        if let Err(err) = driver.poll().await {
            log_warn(&format!("poll failed: {err}"));
        }
        polls += 1;
        if polls % 60 == 0 {
            log_info(&format!("stats: {:?}", driver.stats()));
        }
        if let Some(count) = cli.count {
            if polls >= count {
                break;
            }
        }
    }

    log_info(&format!("final stats: {:?}", driver.stats()));
    Ok(())
}
