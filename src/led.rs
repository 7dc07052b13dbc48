use crate::config::schema::Layout;

/// Tells the device a layout sync follows.
pub const RESET_MARKER: u8 = 0xFF;
/// Set on the first byte of every color record.
pub const RECORD_FLAG: u8 = 0x80;
pub const RECORD_LEN: usize = 4;

/// Frames that push a layout's colors to the device: the reset marker,
/// then one `[0x80 | button, r, g, b]` record per mapped button.
///
/// Frames must be written in order. The device does not acknowledge them.
pub fn encode_sync(layout: &Layout) -> [Vec<u8>; 2] {
    let mut records = Vec::with_capacity(layout.macros.len() * RECORD_LEN);
    for (&button, m) in &layout.macros {
        records.extend_from_slice(&[
            RECORD_FLAG | button,
            m.color.red,
            m.color.green,
            m.color.blue,
        ]);
    }
    [vec![RESET_MARKER], records]
}
