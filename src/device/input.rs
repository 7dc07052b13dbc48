use crate::config::schema::ButtonId;
use tracing::debug;

/// Turns level-triggered button reports into press edges.
///
/// Byte 0 of a report is the report id and is skipped; the remaining bytes
/// are a little-endian bit vector where bit `i` is button `i + 1`.
#[derive(Debug, Clone)]
pub struct ButtonEdgeDetector {
    previous: Vec<u8>,
}

impl ButtonEdgeDetector {
    /// Detector for reports of `report_len` bytes (report id included),
    /// starting with every button released.
    pub fn new(report_len: usize) -> Self {
        Self {
            previous: vec![0; report_len.saturating_sub(1)],
        }
    }

    /// Buttons that went from released to pressed since the last report,
    /// ascending. `None` means no report was available; state is kept.
    pub fn poll(&mut self, report: Option<&[u8]>) -> Vec<ButtonId> {
        let Some(report) = report else {
            return Vec::new();
        };
        let pressed_now = report.get(1..).unwrap_or_default();

        let mut pressed = Vec::new();
        for (byte_idx, &now) in pressed_now.iter().enumerate() {
            let before = self.previous.get(byte_idx).copied().unwrap_or(0);
            let rising = now & !before;
            if rising == 0 {
                continue;
            }
            for bit in 0..8 {
                if rising & (1 << bit) == 0 {
                    continue;
                }
                // Buttons past 255 cannot be addressed by a layout.
                if let Ok(button) = ButtonId::try_from(byte_idx * 8 + bit + 1) {
                    pressed.push(button);
                }
            }
        }

        self.previous.clear();
        self.previous.extend_from_slice(pressed_now);

        if !pressed.is_empty() {
            debug!("buttons pressed: {pressed:?}");
        }
        pressed
    }
}
