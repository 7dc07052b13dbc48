//! HID report descriptor parsing.
//!
//! Only what discovery needs is kept: the collection tree with the usages
//! attached to each collection, and the longest input/output report so read
//! buffers and output chunks can be sized. Report lengths include the leading
//! report-id byte whether or not the device numbers its reports.

use crate::error::{MacroError, Result};
use std::collections::HashMap;

const ITEM_MAIN: u8 = 0;
const ITEM_GLOBAL: u8 = 1;
const ITEM_LOCAL: u8 = 2;
const LONG_ITEM_PREFIX: u8 = 0xFE;

// Main item tags.
const TAG_INPUT: u8 = 0x8;
const TAG_OUTPUT: u8 = 0x9;
const TAG_COLLECTION: u8 = 0xA;
const TAG_END_COLLECTION: u8 = 0xC;

// Global item tags.
const TAG_USAGE_PAGE: u8 = 0x0;
const TAG_REPORT_SIZE: u8 = 0x7;
const TAG_REPORT_ID: u8 = 0x8;
const TAG_REPORT_COUNT: u8 = 0x9;
const TAG_PUSH: u8 = 0xA;
const TAG_POP: u8 = 0xB;

// Local item tags.
const TAG_USAGE: u8 = 0x0;
const TAG_USAGE_MIN: u8 = 0x1;
const TAG_USAGE_MAX: u8 = 0x2;

/// An inclusive range of extended (page << 16 | id) usages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageRange {
    pub min: u32,
    pub max: u32,
}

impl UsageRange {
    pub fn contains(&self, usage: u32) -> bool {
        (self.min..=self.max).contains(&usage)
    }
}

/// A collection and the collections nested inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    pub usages: Vec<UsageRange>,
    pub children: Vec<Collection>,
}

impl Collection {
    pub fn has_usage(&self, usage: u32) -> bool {
        self.usages.iter().any(|r| r.contains(usage))
    }

    /// True if this collection carries `chain[0]` and, when more usages
    /// remain, some child matches the rest of the chain.
    pub fn matches_chain(&self, chain: &[u32]) -> bool {
        let Some((&first, rest)) = chain.split_first() else {
            return false;
        };
        if !self.has_usage(first) {
            return false;
        }
        rest.is_empty() || self.children.iter().any(|c| c.matches_chain(rest))
    }
}

/// Parsed report descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDescriptor {
    /// Top-level (application) collections.
    pub collections: Vec<Collection>,
    pub max_input_report_len: usize,
    pub max_output_report_len: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct GlobalState {
    usage_page: u32,
    report_size: u32,
    report_count: u32,
    report_id: u8,
}

/// A usage as written in the descriptor; short usages pick up the usage
/// page in effect when the main item is reached.
#[derive(Debug, Clone, Copy)]
enum LocalUsage {
    Single(u32, bool),
    Min(u32, bool),
    Max(u32, bool),
}

impl ReportDescriptor {
    /// Parse raw descriptor bytes.
    ///
    /// # Errors
    /// Returns `MacroError::Descriptor` on truncated items or unbalanced
    /// collections.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut globals = GlobalState::default();
        let mut global_stack: Vec<GlobalState> = Vec::new();
        let mut locals: Vec<LocalUsage> = Vec::new();
        let mut open: Vec<Collection> = Vec::new();
        let mut collections = Vec::new();
        let mut input_bits: HashMap<u8, u32> = HashMap::new();
        let mut output_bits: HashMap<u8, u32> = HashMap::new();

        let mut pos = 0;
        while pos < bytes.len() {
            let prefix = bytes[pos];

            if prefix == LONG_ITEM_PREFIX {
                let size = *bytes
                    .get(pos + 1)
                    .ok_or_else(|| truncated(pos))? as usize;
                pos += 3 + size;
                continue;
            }

            let size = match prefix & 0x03 {
                3 => 4,
                n => n as usize,
            };
            let data = bytes
                .get(pos + 1..pos + 1 + size)
                .ok_or_else(|| truncated(pos))?;
            let value = data
                .iter()
                .rev()
                .fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
            let kind = (prefix >> 2) & 0x03;
            let tag = prefix >> 4;
            pos += 1 + size;

            match kind {
                ITEM_MAIN => {
                    let usages = resolve_usages(&locals, globals.usage_page);
                    locals.clear();
                    match tag {
                        TAG_INPUT => add_report_bits(&mut input_bits, &globals, pos)?,
                        TAG_OUTPUT => add_report_bits(&mut output_bits, &globals, pos)?,
                        TAG_COLLECTION => open.push(Collection {
                            usages,
                            children: Vec::new(),
                        }),
                        TAG_END_COLLECTION => {
                            let done = open.pop().ok_or_else(|| {
                                MacroError::Descriptor(format!(
                                    "end collection without open collection at byte {pos}"
                                ))
                            })?;
                            match open.last_mut() {
                                Some(parent) => parent.children.push(done),
                                None => collections.push(done),
                            }
                        }
                        _ => {}
                    }
                }
                ITEM_GLOBAL => match tag {
                    TAG_USAGE_PAGE => globals.usage_page = value,
                    TAG_REPORT_SIZE => globals.report_size = value,
                    TAG_REPORT_COUNT => globals.report_count = value,
                    TAG_REPORT_ID => globals.report_id = value as u8,
                    TAG_PUSH => global_stack.push(globals),
                    TAG_POP => {
                        globals = global_stack.pop().ok_or_else(|| {
                            MacroError::Descriptor("pop without push".to_string())
                        })?;
                    }
                    _ => {}
                },
                ITEM_LOCAL => {
                    let extended = size == 4;
                    match tag {
                        TAG_USAGE => locals.push(LocalUsage::Single(value, extended)),
                        TAG_USAGE_MIN => locals.push(LocalUsage::Min(value, extended)),
                        TAG_USAGE_MAX => locals.push(LocalUsage::Max(value, extended)),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        if !open.is_empty() {
            return Err(MacroError::Descriptor(format!(
                "{} collection(s) left open",
                open.len()
            )));
        }

        Ok(Self {
            collections,
            max_input_report_len: report_len(&input_bits),
            max_output_report_len: report_len(&output_bits),
        })
    }

    /// True if any top-level collection satisfies the usage chain.
    pub fn has_usage_chain(&self, chain: &[u32]) -> bool {
        self.collections.iter().any(|c| c.matches_chain(chain))
    }
}

fn truncated(pos: usize) -> MacroError {
    MacroError::Descriptor(format!("truncated item at byte {pos}"))
}

/// Add one main item's bits to its report's running total.
fn add_report_bits(
    bits: &mut HashMap<u8, u32>,
    globals: &GlobalState,
    pos: usize,
) -> Result<()> {
    let total = bits.entry(globals.report_id).or_default();
    let sum = globals
        .report_size
        .checked_mul(globals.report_count)
        .and_then(|b| total.checked_add(b))
        .ok_or_else(|| {
            MacroError::Descriptor(format!(
                "report {} too large at byte {pos}",
                globals.report_id
            ))
        })?;
    *total = sum;
    Ok(())
}

fn resolve_usages(locals: &[LocalUsage], usage_page: u32) -> Vec<UsageRange> {
    let full = |value: u32, extended: bool| {
        if extended {
            value
        } else {
            (usage_page << 16) | (value & 0xFFFF)
        }
    };

    let mut usages = Vec::new();
    let mut min = None;
    for local in locals {
        match *local {
            LocalUsage::Single(v, ext) => {
                let u = full(v, ext);
                usages.push(UsageRange { min: u, max: u });
            }
            LocalUsage::Min(v, ext) => min = Some(full(v, ext)),
            LocalUsage::Max(v, ext) => {
                if let Some(lo) = min.take() {
                    usages.push(UsageRange {
                        min: lo,
                        max: full(v, ext),
                    });
                }
            }
        }
    }
    usages
}

/// Longest report in bytes, plus one for the report id.
fn report_len(bits: &HashMap<u8, u32>) -> usize {
    bits.values()
        .map(|&b| b.div_ceil(8) as usize + 1)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Consumer control collection with a nested programmable-buttons
    /// collection carrying 32 one-bit buttons under report id 5.
    const PROGRAMMABLE_BUTTONS: &[u8] = &[
        0x05, 0x0C, // Usage Page (Consumer)
        0x09, 0x01, // Usage (Consumer Control)
        0xA1, 0x01, // Collection (Application)
        0x85, 0x05, //   Report ID (5)
        0x09, 0x03, //   Usage (Programmable Buttons)
        0xA1, 0x04, //   Collection (Named Array)
        0x05, 0x09, //     Usage Page (Button)
        0x19, 0x01, //     Usage Minimum (1)
        0x29, 0x20, //     Usage Maximum (32)
        0x15, 0x00, //     Logical Minimum (0)
        0x25, 0x01, //     Logical Maximum (1)
        0x95, 0x20, //     Report Count (32)
        0x75, 0x01, //     Report Size (1)
        0x81, 0x02, //     Input (Data,Var,Abs)
        0xC0, //   End Collection
        0xC0, // End Collection
    ];

    /// Vendor raw-data interface, 32 byte reports both ways.
    const RAW_HID: &[u8] = &[
        0x06, 0x60, 0xFF, // Usage Page (Vendor 0xFF60)
        0x09, 0x61, // Usage (0x61)
        0xA1, 0x01, // Collection (Application)
        0x09, 0x62, //   Usage (0x62)
        0x15, 0x00, //   Logical Minimum (0)
        0x26, 0xFF, 0x00, //   Logical Maximum (255)
        0x95, 0x20, //   Report Count (32)
        0x75, 0x08, //   Report Size (8)
        0x81, 0x02, //   Input (Data,Var,Abs)
        0x09, 0x63, //   Usage (0x63)
        0x15, 0x00, //   Logical Minimum (0)
        0x26, 0xFF, 0x00, //   Logical Maximum (255)
        0x95, 0x20, //   Report Count (32)
        0x75, 0x08, //   Report Size (8)
        0x91, 0x02, //   Output (Data,Var,Abs)
        0xC0, // End Collection
    ];

    #[test]
    fn nested_collections() {
        let desc = ReportDescriptor::parse(PROGRAMMABLE_BUTTONS).unwrap();
        assert_eq!(desc.collections.len(), 1);
        let top = &desc.collections[0];
        assert!(top.has_usage(0x000C_0001));
        assert_eq!(top.children.len(), 1);
        assert!(top.children[0].has_usage(0x000C_0003));
        assert_eq!(desc.max_input_report_len, 5);
        assert_eq!(desc.max_output_report_len, 0);
    }

    #[test]
    fn buttons_usage_chain() {
        let desc = ReportDescriptor::parse(PROGRAMMABLE_BUTTONS).unwrap();
        assert!(desc.has_usage_chain(&[0x000C_0001, 0x000C_0003]));
        assert!(desc.has_usage_chain(&[0x000C_0001]));
        assert!(!desc.has_usage_chain(&[0x000C_0003]));
        assert!(!desc.has_usage_chain(&[0x000C_0001, 0x000C_0004]));
        assert!(!desc.has_usage_chain(&[0xFF60_0061]));
        assert!(!desc.has_usage_chain(&[]));
    }

    #[test]
    fn raw_hid_interface() {
        let desc = ReportDescriptor::parse(RAW_HID).unwrap();
        assert!(desc.has_usage_chain(&[0xFF60_0061]));
        assert!(!desc.has_usage_chain(&[0x000C_0001, 0x000C_0003]));
        assert_eq!(desc.max_input_report_len, 33);
        assert_eq!(desc.max_output_report_len, 33);
    }

    #[test]
    fn extended_usage_ignores_page() {
        let bytes = [
            0x05, 0x01, // Usage Page (Generic Desktop)
            0x0B, 0x01, 0x00, 0x0C, 0x00, // Usage (Consumer:Consumer Control), 4 bytes
            0xA1, 0x01, // Collection (Application)
            0xC0, // End Collection
        ];
        let desc = ReportDescriptor::parse(&bytes).unwrap();
        assert!(desc.has_usage_chain(&[0x000C_0001]));
    }

    #[test]
    fn usage_range_on_collection() {
        let bytes = [
            0x05, 0x09, // Usage Page (Button)
            0x19, 0x01, // Usage Minimum (1)
            0x29, 0x08, // Usage Maximum (8)
            0xA1, 0x02, // Collection (Logical)
            0xC0, // End Collection
        ];
        let desc = ReportDescriptor::parse(&bytes).unwrap();
        assert!(desc.has_usage_chain(&[0x0009_0004]));
        assert!(!desc.has_usage_chain(&[0x0009_0009]));
    }

    #[test]
    fn unbalanced_collections_rejected() {
        assert!(ReportDescriptor::parse(&[0x09, 0x01, 0xA1, 0x01]).is_err());
        assert!(ReportDescriptor::parse(&[0xC0]).is_err());
    }

    #[test]
    fn truncated_item_rejected() {
        assert!(ReportDescriptor::parse(&[0x06, 0x60]).is_err());
    }

    #[test]
    fn oversized_report_rejected() {
        // Report Size 8, Report Count 0xFFFFFFFF, Input.
        let err = ReportDescriptor::parse(&[0x75, 0x08, 0x97, 0xFF, 0xFF, 0xFF, 0xFF, 0x81, 0x02])
            .unwrap_err();
        assert!(matches!(err, MacroError::Descriptor(_)));

        // Two inputs that only overflow once summed.
        let err = ReportDescriptor::parse(&[
            0x75, 0x01, 0x97, 0x00, 0x00, 0x00, 0xC0, 0x81, 0x02, 0x81, 0x02,
        ])
        .unwrap_err();
        assert!(matches!(err, MacroError::Descriptor(_)));
    }
}
