pub mod keycode;
pub mod schema;

use crate::error::{MacroError, Result};
use json_comments::StripComments;
use schema::MacroConfig;
use std::path::{Path, PathBuf};
use tracing::info;

const APP_DIR: &str = "QMKMacroService";
const CONFIG_FILE: &str = "MacroConfig.json";

/// Highest button id that fits in the 7-bit header of a sync record.
pub const MAX_BUTTON_ID: u8 = 0x7F;

/// Default config location, e.g. `~/.config/QMKMacroService/MacroConfig.json`.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}

/// Load and parse configuration from a JSON file. `//` and `/* */`
/// comments are skipped.
///
/// # Errors
/// Returns `MacroError::ConfigNotFound` if the file doesn't exist,
/// `MacroError::Io` on read errors, `MacroError::Json` on syntax errors,
/// or `MacroError::Config` on validation failures.
pub fn load(path: &Path) -> Result<MacroConfig> {
    if !path.exists() {
        return Err(MacroError::ConfigNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: MacroConfig =
        serde_json::from_reader(StripComments::new(content.as_bytes()))?;

    validate(&config)?;
    Ok(config)
}

/// Load the config, writing the built-in default first if the file is missing.
///
/// # Errors
/// Same as [`load`], plus `MacroError::Io` if the default cannot be written.
pub fn load_or_create(path: &Path) -> Result<MacroConfig> {
    if path.exists() {
        return load(path);
    }

    let config = MacroConfig::default();
    save(path, &config)?;
    info!("wrote default config to {}", path.display());
    Ok(config)
}

/// Write the config as pretty-printed JSON, creating parent directories.
///
/// # Errors
/// Returns `MacroError::Io` or `MacroError::Json`.
pub fn save(path: &Path, config: &MacroConfig) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Validate config constraints.
fn validate(config: &MacroConfig) -> Result<()> {
    let layouts = std::iter::once(("default", &config.default_layout)).chain(
        config
            .application_layouts
            .iter()
            .map(|(app, layout)| (app.as_str(), layout)),
    );

    for (name, layout) in layouts {
        for &button in layout.macros.keys() {
            if button == 0 || button > MAX_BUTTON_ID {
                return Err(MacroError::Config(format!(
                    "layout '{name}': button {button} out of range (1-{MAX_BUTTON_ID})"
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::Macro;

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, MacroError::ConfigNotFound(_)));
    }

    #[test]
    fn load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("QMKMacroService").join(CONFIG_FILE);

        let created = load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created, MacroConfig::default());

        let reloaded = load(&path).unwrap();
        assert_eq!(reloaded, created);
    }

    #[test]
    fn load_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load(&path), Err(MacroError::Json(_))));
    }

    #[test]
    fn load_accepts_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{
                // shown when nothing else matches
                "DefaultLayout": {
                    "Macros": {
                        /* copy */
                        "1": {
                            "Color": { "Red": 255, "Green": 0, "Blue": 0 },
                            "KeyActions": [
                                { "Keycode": "CONTROL", "Event": "KEYDOWN" }, // hold
                                { "Keycode": "KEY_C", "Event": "KEYDOWN" }
                            ]
                        }
                    }
                },
                "ApplicationLayouts": {}
            }"#,
        )
        .unwrap();

        let config = load(&path).unwrap();
        let copy = config.default_layout.macro_for(1).unwrap();
        assert_eq!(copy.color.red, 255);
        assert_eq!(copy.key_actions.len(), 2);
        assert!(config.application_layouts.is_empty());
    }

    #[test]
    fn button_zero_rejected() {
        let mut config = MacroConfig::default();
        config.default_layout.macros.insert(0, Macro::default());
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("button 0"));
    }

    #[test]
    fn button_above_seven_bits_rejected() {
        let mut config = MacroConfig::default();
        let mut layout = config.default_layout.clone();
        layout.macros.insert(128, Macro::default());
        config
            .application_layouts
            .insert("game.exe".to_string(), layout);
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("game.exe"));
    }

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&MacroConfig::default()).is_ok());
    }
}
