pub mod descriptor;
pub mod input;
pub mod output;

use crate::error::{MacroError, Result};
use descriptor::ReportDescriptor;
use hidapi::{HidApi, HidDevice};
use std::collections::HashSet;
use tracing::{debug, info};

/// Framework Laptop 16 macro pad.
pub const VENDOR_ID: u16 = 0x32AC;
pub const PRODUCT_ID: u16 = 0x0013;

/// Consumer Control → Programmable Buttons.
pub const BUTTONS_USAGE_CHAIN: &[u32] = &[0x000C_0001, 0x000C_0003];
/// QMK raw HID interface.
pub const RAW_HID_USAGE_CHAIN: &[u32] = &[0xFF60_0061];

const MAX_DESCRIPTOR_LEN: usize = 4096;

/// An open macro pad: button reports in, LED frames out.
pub trait MacroPad {
    /// Length of an input report, report id included.
    fn input_report_len(&self) -> usize;

    /// Non-blocking read of one input report into `buf`.
    /// Returns `Ok(None)` when nothing is pending.
    fn read_report(&mut self, buf: &mut [u8]) -> Result<Option<usize>>;

    /// Write one logical frame, split into as many output reports as needed.
    fn write_frame(&mut self, frame: &[u8]) -> Result<()>;
}

/// Opens a fresh [`MacroPad`] for each connection epoch.
pub trait Connector {
    type Device: MacroPad;

    fn connect(&mut self) -> Result<Self::Device>;
}

/// Macro pad reached through hidapi: one interface for buttons, one for
/// raw data.
pub struct HidMacroPad {
    buttons: HidDevice,
    raw: HidDevice,
    input_report_len: usize,
    output_report_len: usize,
}

impl MacroPad for HidMacroPad {
    fn input_report_len(&self) -> usize {
        self.input_report_len
    }

    fn read_report(&mut self, buf: &mut [u8]) -> Result<Option<usize>> {
        match self.buttons.read(buf) {
            Ok(0) => Ok(None),
            Ok(n) => Ok(Some(n)),
            Err(e) => Err(MacroError::DeviceIo(format!("button read: {e}"))),
        }
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        for report in output::chunk_frame(frame, self.output_report_len) {
            self.raw
                .write(&report)
                .map_err(|e| MacroError::DeviceIo(format!("raw write: {e}")))?;
        }
        debug!("wrote {} byte frame", frame.len());
        Ok(())
    }
}

/// Discovers the macro pad by vendor/product id and usage chains.
#[derive(Debug, Clone)]
pub struct HidConnector {
    pub vendor_id: u16,
    pub product_id: u16,
    pub buttons_chain: &'static [u32],
    pub raw_chain: &'static [u32],
}

impl Default for HidConnector {
    fn default() -> Self {
        Self {
            vendor_id: VENDOR_ID,
            product_id: PRODUCT_ID,
            buttons_chain: BUTTONS_USAGE_CHAIN,
            raw_chain: RAW_HID_USAGE_CHAIN,
        }
    }
}

impl Connector for HidConnector {
    type Device = HidMacroPad;

    fn connect(&mut self) -> Result<HidMacroPad> {
        let api = HidApi::new()?;

        let candidates = self.open_candidates(&api);
        if candidates.is_empty() {
            return Err(MacroError::NoDevice);
        }

        let mut buttons = None;
        let mut raw = None;
        for (device, desc) in candidates {
            if buttons.is_none() && desc.has_usage_chain(self.buttons_chain) {
                buttons = Some((device, desc));
            } else if raw.is_none() && desc.has_usage_chain(self.raw_chain) {
                raw = Some((device, desc));
            }
        }

        let (buttons, buttons_desc) =
            buttons.ok_or(MacroError::DeviceNotFound { role: "buttons" })?;
        let (raw, raw_desc) = raw.ok_or(MacroError::DeviceNotFound { role: "raw data" })?;

        buttons.set_blocking_mode(false)?;

        info!(
            "macro pad connected (input report {} bytes, output report {} bytes)",
            buttons_desc.max_input_report_len, raw_desc.max_output_report_len
        );

        Ok(HidMacroPad {
            buttons,
            raw,
            input_report_len: buttons_desc.max_input_report_len,
            output_report_len: raw_desc.max_output_report_len,
        })
    }
}

impl HidConnector {
    /// Open every matching interface once and parse its report descriptor.
    /// Interfaces that cannot be opened or described are skipped.
    fn open_candidates(&self, api: &HidApi) -> Vec<(HidDevice, ReportDescriptor)> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        for info in api
            .device_list()
            .filter(|d| d.vendor_id() == self.vendor_id && d.product_id() == self.product_id)
        {
            if !seen.insert(info.path().to_owned()) {
                continue;
            }
            let device = match info.open_device(api) {
                Ok(d) => d,
                Err(e) => {
                    debug!("skipping {:?}: {e}", info.path());
                    continue;
                }
            };
            match read_descriptor(&device) {
                Ok(desc) => out.push((device, desc)),
                Err(e) => debug!("skipping {:?}: {e}", info.path()),
            }
        }

        out
    }
}

fn read_descriptor(device: &HidDevice) -> Result<ReportDescriptor> {
    let mut buf = [0u8; MAX_DESCRIPTOR_LEN];
    let len = device.get_report_descriptor(&mut buf)?;
    ReportDescriptor::parse(&buf[..len])
}
