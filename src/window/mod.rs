#[cfg(target_os = "linux")]
pub mod x11;

use crate::error::Result;
use std::path::Path;

/// Reports which application owns the focused window.
pub trait ForegroundWindow {
    /// Application identifier (executable file name) of the focused window,
    /// or `None` if nothing is focused or it cannot be identified.
    fn current_application(&mut self) -> Result<Option<String>>;
}

/// Application identifier for an executable path: its file name.
pub fn application_name(exe: &Path) -> Option<String> {
    let name = exe.file_name()?.to_str()?;
    // Linux marks the exe link of a replaced binary.
    let name = name.strip_suffix(" (deleted)").unwrap_or(name);
    (!name.is_empty()).then(|| name.to_string())
}
