/// First byte of every raw-data output report.
pub const REPORT_SENTINEL: u8 = 0x45;

/// Split a logical frame into output reports of at most `max_report_len`
/// bytes, each starting with [`REPORT_SENTINEL`]. An empty frame produces no
/// reports.
pub fn chunk_frame(frame: &[u8], max_report_len: usize) -> Vec<Vec<u8>> {
    let payload_len = max_report_len.saturating_sub(1).max(1);
    frame
        .chunks(payload_len)
        .map(|chunk| {
            let mut report = Vec::with_capacity(chunk.len() + 1);
            report.push(REPORT_SENTINEL);
            report.extend_from_slice(chunk);
            report
        })
        .collect()
}
