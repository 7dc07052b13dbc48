use serde::{Deserialize, Serialize};

/// Named virtual keys accepted in `KeyActions`.
///
/// Names follow the Windows virtual-key spelling (`CONTROL`, `KEY_C`, `F5`,
/// `OEM_1`, ...) so configurations recorded on Windows load unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Keycode {
    /// Backspace.
    Back,
    Tab,
    Clear,
    Return,
    Shift,
    Control,
    /// Alt.
    Menu,
    Pause,
    /// Caps lock.
    Capital,
    Escape,
    Space,
    /// Page up.
    Prior,
    /// Page down.
    Next,
    End,
    Home,
    Left,
    Up,
    Right,
    Down,
    Select,
    Print,
    Execute,
    /// Print screen.
    Snapshot,
    Insert,
    Delete,
    Help,
    #[serde(rename = "KEY_0")]
    Key0,
    #[serde(rename = "KEY_1")]
    Key1,
    #[serde(rename = "KEY_2")]
    Key2,
    #[serde(rename = "KEY_3")]
    Key3,
    #[serde(rename = "KEY_4")]
    Key4,
    #[serde(rename = "KEY_5")]
    Key5,
    #[serde(rename = "KEY_6")]
    Key6,
    #[serde(rename = "KEY_7")]
    Key7,
    #[serde(rename = "KEY_8")]
    Key8,
    #[serde(rename = "KEY_9")]
    Key9,
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF,
    KeyG,
    KeyH,
    KeyI,
    KeyJ,
    KeyK,
    KeyL,
    KeyM,
    KeyN,
    KeyO,
    KeyP,
    KeyQ,
    KeyR,
    KeyS,
    KeyT,
    KeyU,
    KeyV,
    KeyW,
    KeyX,
    KeyY,
    KeyZ,
    Lwin,
    Rwin,
    /// Context menu key.
    Apps,
    Sleep,
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    Multiply,
    Add,
    Separator,
    Subtract,
    Decimal,
    Divide,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,
    Numlock,
    /// Scroll lock.
    Scroll,
    Lshift,
    Rshift,
    Lcontrol,
    Rcontrol,
    Lmenu,
    Rmenu,
    BrowserBack,
    BrowserForward,
    BrowserRefresh,
    BrowserStop,
    BrowserSearch,
    BrowserFavorites,
    BrowserHome,
    VolumeMute,
    VolumeDown,
    VolumeUp,
    MediaNextTrack,
    MediaPrevTrack,
    MediaStop,
    MediaPlayPause,
    LaunchMail,
    /// `;:` on US layouts.
    #[serde(rename = "OEM_1")]
    Oem1,
    OemPlus,
    OemComma,
    OemMinus,
    OemPeriod,
    /// `/?` on US layouts.
    #[serde(rename = "OEM_2")]
    Oem2,
    /// `` `~ `` on US layouts.
    #[serde(rename = "OEM_3")]
    Oem3,
    /// `[{` on US layouts.
    #[serde(rename = "OEM_4")]
    Oem4,
    /// `\|` on US layouts.
    #[serde(rename = "OEM_5")]
    Oem5,
    /// `]}` on US layouts.
    #[serde(rename = "OEM_6")]
    Oem6,
    /// `'"` on US layouts.
    #[serde(rename = "OEM_7")]
    Oem7,
}

impl Keycode {
    /// X11 keysym for this key (see `X11/keysymdef.h`, `XF86keysym.h`).
    ///
    /// Letters map to their lowercase keysym; the X server applies Shift.
    pub fn x11_keysym(self) -> u32 {
        match self {
            Self::Back => 0xff08,
            Self::Tab => 0xff09,
            Self::Clear => 0xff0b,
            Self::Return => 0xff0d,
            Self::Shift => 0xffe1,
            Self::Control => 0xffe3,
            Self::Menu => 0xffe9,
            Self::Pause => 0xff13,
            Self::Capital => 0xffe5,
            Self::Escape => 0xff1b,
            Self::Space => 0x0020,
            Self::Prior => 0xff55,
            Self::Next => 0xff56,
            Self::End => 0xff57,
            Self::Home => 0xff50,
            Self::Left => 0xff51,
            Self::Up => 0xff52,
            Self::Right => 0xff53,
            Self::Down => 0xff54,
            Self::Select => 0xff60,
            Self::Print => 0xff61,
            Self::Execute => 0xff62,
            Self::Snapshot => 0xff61,
            Self::Insert => 0xff63,
            Self::Delete => 0xffff,
            Self::Help => 0xff6a,
            Self::Key0 => 0x0030,
            Self::Key1 => 0x0031,
            Self::Key2 => 0x0032,
            Self::Key3 => 0x0033,
            Self::Key4 => 0x0034,
            Self::Key5 => 0x0035,
            Self::Key6 => 0x0036,
            Self::Key7 => 0x0037,
            Self::Key8 => 0x0038,
            Self::Key9 => 0x0039,
            Self::KeyA => 0x0061,
            Self::KeyB => 0x0062,
            Self::KeyC => 0x0063,
            Self::KeyD => 0x0064,
            Self::KeyE => 0x0065,
            Self::KeyF => 0x0066,
            Self::KeyG => 0x0067,
            Self::KeyH => 0x0068,
            Self::KeyI => 0x0069,
            Self::KeyJ => 0x006a,
            Self::KeyK => 0x006b,
            Self::KeyL => 0x006c,
            Self::KeyM => 0x006d,
            Self::KeyN => 0x006e,
            Self::KeyO => 0x006f,
            Self::KeyP => 0x0070,
            Self::KeyQ => 0x0071,
            Self::KeyR => 0x0072,
            Self::KeyS => 0x0073,
            Self::KeyT => 0x0074,
            Self::KeyU => 0x0075,
            Self::KeyV => 0x0076,
            Self::KeyW => 0x0077,
            Self::KeyX => 0x0078,
            Self::KeyY => 0x0079,
            Self::KeyZ => 0x007a,
            Self::Lwin => 0xffeb,
            Self::Rwin => 0xffec,
            Self::Apps => 0xff67,
            Self::Sleep => 0x1008ff2f,
            Self::Numpad0 => 0xffb0,
            Self::Numpad1 => 0xffb1,
            Self::Numpad2 => 0xffb2,
            Self::Numpad3 => 0xffb3,
            Self::Numpad4 => 0xffb4,
            Self::Numpad5 => 0xffb5,
            Self::Numpad6 => 0xffb6,
            Self::Numpad7 => 0xffb7,
            Self::Numpad8 => 0xffb8,
            Self::Numpad9 => 0xffb9,
            Self::Multiply => 0xffaa,
            Self::Add => 0xffab,
            Self::Separator => 0xffac,
            Self::Subtract => 0xffad,
            Self::Decimal => 0xffae,
            Self::Divide => 0xffaf,
            Self::F1 => 0xffbe,
            Self::F2 => 0xffbf,
            Self::F3 => 0xffc0,
            Self::F4 => 0xffc1,
            Self::F5 => 0xffc2,
            Self::F6 => 0xffc3,
            Self::F7 => 0xffc4,
            Self::F8 => 0xffc5,
            Self::F9 => 0xffc6,
            Self::F10 => 0xffc7,
            Self::F11 => 0xffc8,
            Self::F12 => 0xffc9,
            Self::F13 => 0xffca,
            Self::F14 => 0xffcb,
            Self::F15 => 0xffcc,
            Self::F16 => 0xffcd,
            Self::F17 => 0xffce,
            Self::F18 => 0xffcf,
            Self::F19 => 0xffd0,
            Self::F20 => 0xffd1,
            Self::F21 => 0xffd2,
            Self::F22 => 0xffd3,
            Self::F23 => 0xffd4,
            Self::F24 => 0xffd5,
            Self::Numlock => 0xff7f,
            Self::Scroll => 0xff14,
            Self::Lshift => 0xffe1,
            Self::Rshift => 0xffe2,
            Self::Lcontrol => 0xffe3,
            Self::Rcontrol => 0xffe4,
            Self::Lmenu => 0xffe9,
            Self::Rmenu => 0xffea,
            Self::BrowserBack => 0x1008ff26,
            Self::BrowserForward => 0x1008ff27,
            Self::BrowserRefresh => 0x1008ff29,
            Self::BrowserStop => 0x1008ff28,
            Self::BrowserSearch => 0x1008ff1b,
            Self::BrowserFavorites => 0x1008ff30,
            Self::BrowserHome => 0x1008ff18,
            Self::VolumeMute => 0x1008ff12,
            Self::VolumeDown => 0x1008ff11,
            Self::VolumeUp => 0x1008ff13,
            Self::MediaNextTrack => 0x1008ff17,
            Self::MediaPrevTrack => 0x1008ff16,
            Self::MediaStop => 0x1008ff15,
            Self::MediaPlayPause => 0x1008ff14,
            Self::LaunchMail => 0x1008ff19,
            Self::Oem1 => 0x003b,
            Self::OemPlus => 0x003d,
            Self::OemComma => 0x002c,
            Self::OemMinus => 0x002d,
            Self::OemPeriod => 0x002e,
            Self::Oem2 => 0x002f,
            Self::Oem3 => 0x0060,
            Self::Oem4 => 0x005b,
            Self::Oem5 => 0x005c,
            Self::Oem6 => 0x005d,
            Self::Oem7 => 0x0027,
        }
    }
}
