// src/bin/maxbotix.rs
//
// Manual test driver: talk to a sensor directly, run the pull-mode poller, or
// run the push-mode sampler the way a host service would.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use maxbotix::common::{model, Clock};
use maxbotix::{
    EventSampler, NativeInterface, Record, SensorConfig, SensorLink, SyncPoller, UnitSystem,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "maxbotix", version, about = "Test a MaxBotix range finder")]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["test_sensor", "test_driver", "test_service", "list_models"]),
))]
struct Cli {
    /// Serial port (overrides the configuration file)
    #[arg(long, value_name = "PORT")]
    port: Option<String>,

    /// Sensor model (overrides the configuration file)
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,

    /// TOML file with a [Maxbotix] table
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Read frames straight from the sensor (range in mm)
    #[arg(long)]
    test_sensor: bool,

    /// Run the pull-mode poller (range in cm)
    #[arg(long)]
    test_driver: bool,

    /// Sample once per second like a host service (range in inches)
    #[arg(long)]
    test_service: bool,

    /// Print the known sensor models
    #[arg(long)]
    list_models: bool,
}

const SERVICE_INTERVAL: Duration = Duration::from_secs(1);

fn load_config(cli: &Cli) -> Result<SensorConfig> {
    let mut config = match &cli.config {
        Some(path) => SensorConfig::from_path(path)?,
        None => SensorConfig::default(),
    };
    if let Some(port) = &cli.port {
        config.port = port.clone();
    }
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    Ok(config)
}

fn print_status(line: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "\r{line}")?;
    stdout.flush()?;
    Ok(())
}

fn test_sensor(config: &SensorConfig) -> Result<()> {
    let validated = config.validate()?;
    let mut link = SensorLink::with_model(validated.model, validated.link, NativeInterface::new());
    println!("range is mm");

    let mut session = link
        .session()
        .with_context(|| format!("cannot open {}", config.port))?;
    loop {
        match session.read_once() {
            Ok(Some(mm)) => print_status(&format!("{mm}"))?,
            Ok(None) => print_status("None")?,
            Err(e) => print_status(&format!("error: {e}"))?,
        }
        std::thread::sleep(SERVICE_INTERVAL);
    }
}

fn test_driver(config: &SensorConfig) -> Result<()> {
    let validated = config.validate()?;
    let link = SensorLink::with_model(validated.model, validated.link, NativeInterface::new());
    let mut poller = SyncPoller::new(link, validated.poll);
    println!("range is cm");

    for reading in poller.readings() {
        let record = Record::from_reading(reading?, UnitSystem::Metric);
        println!(
            "dateTime={} usUnits={} range={:?}",
            record.date_time,
            record.unit_system.code(),
            record.range
        );
    }
    Ok(())
}

fn test_service(config: &SensorConfig) -> Result<()> {
    let validated = config.validate()?;
    let link = SensorLink::with_model(validated.model, validated.link, NativeInterface::new());
    let mut sampler = EventSampler::new(link);
    println!("range is inches");

    loop {
        let now = sampler.link().interface().unix_timestamp();
        let mut record = Record::new(now, UnitSystem::Us);
        sampler.augment(&mut record);
        print_status(&format!("usUnits={} range={:?}", record.unit_system.code(), record.range))?;
        std::thread::sleep(SERVICE_INTERVAL);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list_models {
        for m in model::models() {
            println!("{m}");
        }
        return Ok(());
    }

    let config = load_config(&cli)?;
    if cli.test_sensor {
        test_sensor(&config)
    } else if cli.test_driver {
        test_driver(&config)
    } else {
        test_service(&config)
    }
}
