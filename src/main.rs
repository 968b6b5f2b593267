//! MacNet CLI.
//!
//! Entry point for the `macnet` command-line tool: ad-hoc reads against a
//! live instrument and offline status-code decoding.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use macnet_client::{status, ClientConfig, MacNetClient};

#[derive(Parser)]
#[command(name = "macnet")]
#[command(about = "MacNet battery-cycler client", version)]
struct Cli {
    /// Instrument hostname or IP address
    #[arg(long)]
    host: Option<String>,

    /// Instrument TCP port
    #[arg(long)]
    port: Option<u16>,

    /// Path to a TOML config file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'd')]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read voltages for a run of channels
    Voltage {
        /// First channel to read
        #[arg(long, default_value_t = 0)]
        start: u32,
        /// Number of channels to read
        #[arg(long, default_value_t = 1)]
        count: u32,
    },

    /// Read currents for a run of channels
    Current {
        /// First channel to read
        #[arg(long, default_value_t = 0)]
        start: u32,
        /// Number of channels to read
        #[arg(long, default_value_t = 1)]
        count: u32,
    },

    /// Read the full status of one channel
    Channel {
        /// Channel to read
        #[arg(long)]
        chan: u32,
    },

    /// Read the auxiliary inputs of one channel
    Aux {
        /// Channel to read
        #[arg(long)]
        chan: u32,
    },

    /// Read the test file / procedure comment of one channel
    Comment {
        /// Channel to read
        #[arg(long)]
        chan: u32,
    },

    /// Read the SMB device status of one channel
    SmbStatus {
        /// Channel to read
        #[arg(long)]
        chan: u32,
    },

    /// Read one SMB register through the scan list
    SmbScan {
        /// Channel to read
        #[arg(long)]
        chan: u32,
        /// SMB register address
        #[arg(long)]
        reg: u32,
    },

    /// Decode a status code offline (no connection needed)
    Decode {
        /// Which code table to use
        table: StatusTable,
        /// The numeric code
        code: u16,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusTable {
    Rf1,
    Rf2,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.debug { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Offline commands first.
    if let Commands::Decode { table, code } = &cli.command {
        let name = match table {
            StatusTable::Rf1 => status::decode_rf1(*code),
            StatusTable::Rf2 => status::decode_rf2(*code),
        };
        println!("{}", name);
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let mut client = MacNetClient::connect(config)?;

    let output = match cli.command {
        Commands::Voltage { start, count } => {
            serde_json::to_value(client.read_voltage(start, count)?)?
        }
        Commands::Current { start, count } => {
            serde_json::to_value(client.read_current(start, count)?)?
        }
        Commands::Channel { chan } => {
            let st = client.read_channel(chan)?;
            serde_json::json!({
                "Chan": st.chan,
                "RF1": st.rf1,
                "RF1Name": st.rf1_name(),
                "RF2": st.rf2,
                "RF2Name": st.rf2_name(),
                "Cycle": st.cycle,
                "Step": st.step,
                "TestTime": st.test_time,
                "StepTime": st.step_time,
                "Voltage": st.voltage,
                "Current": st.current,
                "Capacity": st.capacity,
                "Energy": st.energy,
            })
        }
        Commands::Aux { chan } => serde_json::Value::Object(client.read_aux(chan)?),
        Commands::Comment { chan } => serde_json::Value::Object(client.read_comment(chan)?),
        Commands::SmbStatus { chan } => serde_json::Value::Object(client.smb_read_status(chan)?),
        Commands::SmbScan { chan, reg } => {
            serde_json::to_value(client.smb_read_scan_list(chan, reg)?)?
        }
        Commands::Decode { .. } => unreachable!("handled above"),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
