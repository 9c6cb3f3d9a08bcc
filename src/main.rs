use std::fs;

use automata_netgen::{
    config::RawNetGenConfig,
    interchange::encode_network,
    logger::{LogLevel, Logger},
    network::NetworkAssembler,
};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

#[derive(Parser, Debug)]
#[command(name = "Automata Network Generator")]
#[command(version = "0.1")]
#[command(about = "Generate random networks of automata with partially shared action alphabets", long_about = None)]
struct Args {
    /// Path to the configuration file (JSON or TOML).
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// Path the generated network is written to.
    #[arg(short, long, default_value = "automata.json")]
    out: String,

    #[arg(short, long, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Also write the log to a timestamped file under ./logs/.
    #[arg(long)]
    log_file: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut logger = Logger::new(args.log_level, "netgen");
    if args.log_file {
        logger = logger.with_run_file()?;
    }

    logger.info(&format!("Reading configuration file {}", args.config));
    let raw = RawNetGenConfig::from_file(&args.config)?;
    let (config, warnings) = raw.normalize();
    for warning in &warnings {
        logger.warn(warning);
    }

    let mut rng = StdRng::from_entropy();
    let network = NetworkAssembler::new(&config).assemble(&mut rng, Some(&logger))?;

    let documents = encode_network(&network);
    let json = serde_json::to_string_pretty(&documents)?;

    logger.info(&format!("Writing automata into {}", args.out));
    fs::write(&args.out, json)
        .map_err(|e| anyhow::anyhow!("cannot write to output file {}: {}", args.out, e))?;

    Ok(())
}
