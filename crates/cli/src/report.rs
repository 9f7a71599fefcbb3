//! Full device status report
//!
//! Gathering the report issues the same command sequence the original
//! vendor tool ran on every start: model, firmware version, then the state
//! of all three outlets.

use crate::usb::channel::{self, CommandTransport};
use crate::usb::Result;
use protocol::{DeviceModel, FirmwareVersion, OutletIndex, OutletState};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct OutletStatus {
    pub outlet: u8,
    pub state: OutletState,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub model: DeviceModel,
    pub firmware_version: FirmwareVersion,
    pub outlets: Vec<OutletStatus>,
}

/// Query model, firmware version, and every outlet state in order
pub fn gather<T: CommandTransport>(transport: &mut T) -> Result<StatusReport> {
    let model = channel::model(transport)?;
    let firmware_version = channel::firmware_version(transport)?;

    let mut outlets = Vec::with_capacity(OutletIndex::ALL.len());
    for outlet in OutletIndex::ALL {
        outlets.push(OutletStatus {
            outlet: outlet.number(),
            state: channel::outlet_state(transport, outlet)?,
        });
    }

    Ok(StatusReport {
        model,
        firmware_version,
        outlets,
    })
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model: {}", self.model)?;
        writeln!(f, "firmware version: {}", self.firmware_version)?;
        for status in &self.outlets {
            writeln!(f, "Outlet{}: {}", status.outlet, status.state)?;
        }
        Ok(())
    }
}
