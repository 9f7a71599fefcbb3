//! powerusb
//!
//! Command-line control for a USB-attached PowerUSB managed power strip.
//! Talks to the device over 64-byte interrupt-transfer exchanges: locate the
//! one attached strip, hold an exclusive session to it, issue read commands,
//! and decode the response bytes into model / firmware / outlet state.

mod report;
mod usb;

use anyhow::{bail, Context as _, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use common::setup_logging;
use protocol::OutletIndex;
use rusb::UsbContext as _;
use std::process;
use tracing::info;
use usb::{channel, locator, DeviceError, DeviceSession};

#[derive(Parser, Debug)]
#[command(name = "powerusb")]
#[command(author, version, about = "Control a PowerUSB managed power strip")]
#[command(long_about = "
Command-line control for a USB-attached PowerUSB managed power strip.

Exactly one strip must be attached; the wire protocol has no way to address
a specific device, so multiple attached strips are rejected.

EXAMPLES:
    # Print model, firmware version, and the state of every outlet
    powerusb

    # Read one outlet's state
    powerusb get state 2

    # Full status as JSON
    powerusb status --json

    # Run with debug logging
    powerusb --log-level debug
")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print model, firmware version, and the state of every outlet
    Status {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read a value from the device
    Get {
        #[command(subcommand)]
        what: GetCommand,
    },
    /// Switch an outlet on or off
    Set {
        /// Outlet number (1-3)
        outlet: u8,
        /// Desired state
        state: SwitchState,
    },
}

#[derive(Subcommand, Debug)]
enum GetCommand {
    /// Power draw over a sampling window
    Power {
        /// Sampling window in seconds
        sec: Option<u32>,
    },
    /// On/off state of one outlet
    State {
        /// Outlet number (1-3)
        outlet: u8,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum SwitchState {
    On,
    Off,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                // The tool's contract is exit status 1 for bad usage.
                _ => 1,
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    setup_logging(&args.log_level).context("Failed to setup logging")?;
    info!("powerusb v{}", env!("CARGO_PKG_VERSION"));

    match args.command.unwrap_or(Command::Status { json: false }) {
        Command::Status { json } => {
            let mut session = open_session()?;
            let report = report::gather(&mut session)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
        }

        Command::Get {
            what: GetCommand::State { outlet },
        } => {
            let outlet = OutletIndex::try_from(outlet)?;
            let mut session = open_session()?;
            let state = channel::outlet_state(&mut session, outlet)?;
            let label = if state.is_on() { "ON" } else { "OFF" };
            println!("Outlet{outlet} status: {label}");
        }

        Command::Get {
            what: GetCommand::Power { .. },
        } => {
            // No wire command for power metering exists in this firmware's
            // observed protocol.
            bail!("reading power draw is not supported by this device protocol");
        }

        Command::Set { outlet, state } => {
            // Validate the outlet anyway so bad usage is reported first.
            let outlet = OutletIndex::try_from(outlet)?;
            bail!(
                "switching outlet {} {:?} is not supported: this device protocol \
                 has no write command",
                outlet,
                state
            );
        }
    }

    Ok(())
}

/// Locate the single attached strip and open an exclusive session to it
///
/// The session releases the device claim when dropped, on success and error
/// paths alike.
fn open_session() -> Result<DeviceSession, DeviceError> {
    let context = rusb::Context::new().map_err(DeviceError::Context)?;
    let device = locator::locate(&context)?.require_single()?;
    DeviceSession::open(device)
}
