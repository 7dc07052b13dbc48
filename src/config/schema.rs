use super::keycode::Keycode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Physical button number, 1-based, as reported by the macro pad.
pub type ButtonId = u8;

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MacroConfig {
    /// Layout used when no application layout matches.
    pub default_layout: Layout,

    /// Layouts keyed by application identifier (executable file name).
    #[serde(default)]
    pub application_layouts: HashMap<String, Layout>,
}

/// A button → macro mapping. Compared by value to suppress redundant LED syncs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Layout {
    #[serde(default)]
    pub macros: BTreeMap<ButtonId, Macro>,
}

/// A recorded key sequence plus the LED color of its button.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Macro {
    #[serde(default, alias = "Colour")]
    pub color: Color,

    #[serde(default)]
    pub key_actions: Vec<KeyAction>,
}

/// RGB color; the default is off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Color {
    #[serde(default)]
    pub red: u8,
    #[serde(default)]
    pub green: u8,
    #[serde(default)]
    pub blue: u8,
}

/// One key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyAction {
    pub keycode: Keycode,
    pub event: KeyEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyEvent {
    #[serde(rename = "KEYDOWN", alias = "KeyDown")]
    KeyDown,
    #[serde(rename = "KEYUP", alias = "KeyUp")]
    KeyUp,
}

impl KeyAction {
    pub fn down(keycode: Keycode) -> Self {
        Self {
            keycode,
            event: KeyEvent::KeyDown,
        }
    }

    pub fn up(keycode: Keycode) -> Self {
        Self {
            keycode,
            event: KeyEvent::KeyUp,
        }
    }
}

impl Layout {
    /// Look up the macro bound to a button.
    pub fn macro_for(&self, button: ButtonId) -> Option<&Macro> {
        self.macros.get(&button)
    }
}

impl MacroConfig {
    /// Layout for an application, falling back to the default layout.
    pub fn layout_for(&self, application: Option<&str>) -> &Layout {
        application
            .and_then(|app| self.application_layouts.get(app))
            .unwrap_or(&self.default_layout)
    }
}

impl Default for MacroConfig {
    /// Copy, paste and screenshot on buttons 1-3, LEDs off.
    fn default() -> Self {
        let chord = |keys: &[Keycode]| Macro {
            color: Color::default(),
            key_actions: keys
                .iter()
                .map(|&k| KeyAction::down(k))
                .chain(keys.iter().map(|&k| KeyAction::up(k)))
                .collect(),
        };

        let mut macros = BTreeMap::new();
        macros.insert(1, chord(&[Keycode::Control, Keycode::KeyC]));
        macros.insert(2, chord(&[Keycode::Control, Keycode::KeyV]));
        macros.insert(3, chord(&[Keycode::Lwin, Keycode::Shift, Keycode::KeyS]));

        Self {
            default_layout: Layout { macros },
            application_layouts: HashMap::new(),
        }
    }
}
