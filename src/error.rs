use std::path::PathBuf;

/// Central error type for macropadd.
#[derive(Debug, thiserror::Error)]
pub enum MacroError {
    #[error("config error: {0}")]
    Config(String),

    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no macro pad found")]
    NoDevice,

    #[error("no interface matches the {role} usage chain")]
    DeviceNotFound { role: &'static str },

    #[error("HID error: {0}")]
    Hid(String),

    #[error("device I/O error: {0}")]
    DeviceIo(String),

    #[error("report descriptor error: {0}")]
    Descriptor(String),

    #[error("key injection failed: {0}")]
    Inject(String),

    #[error("window lookup failed: {0}")]
    Window(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MacroError {
    /// Whether this error means the device could not be opened, as opposed
    /// to an established connection going bad.
    pub fn is_discovery_failure(&self) -> bool {
        matches!(
            self,
            Self::NoDevice | Self::DeviceNotFound { .. } | Self::Descriptor(_)
        )
    }
}

impl From<hidapi::HidError> for MacroError {
    fn from(e: hidapi::HidError) -> Self {
        Self::Hid(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MacroError>;
