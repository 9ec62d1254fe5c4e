//! Account and endpoint configuration JSON demo
//!
//! Without a subcommand the account demo runs. Prints `Success` when the
//! demo completes, or `Exception: <reason>` and exits with status 1.

mod demo;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rvoip_ua_config::LogConfig;
use rvoip_ua_config::logging::setup_logging;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Console log level, 0 (off) to 6 (trace)
    #[arg(short, long, default_value_t = 2)]
    log_level: u32,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write an account config, reload it from text and compare
    Account,
    /// Round-trip an endpoint config through text and a file
    Endpoint {
        /// Document file to write, read back and delete
        #[arg(short, long, default_value = "jsontest.js")]
        file: PathBuf,
    },
    /// Initialize and start the library with a UDP transport, then shut down
    Lifecycle,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    setup_logging(&LogConfig {
        console_level: cli.log_level,
        ..Default::default()
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command.unwrap_or(Command::Account) {
        Command::Account => demo::run_account_demo(&mut out)?,
        Command::Endpoint { file } => demo::run_endpoint_demo(&mut out, &file)?,
        Command::Lifecycle => demo::run_lifecycle_demo(&mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => {
            println!("Success");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Exception: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
