use super::InputInjector;
use crate::config::schema::{KeyAction, KeyEvent};
use crate::error::{MacroError, Result};
use crate::xdisplay::XDisplay;
use std::os::raw::{c_int, c_uint, c_ulong};
use x11::{xlib, xtest};

/// Let the server timestamp synthesized events.
const CURRENT_TIME: c_ulong = 0;

/// Replays key actions through the XTest extension.
pub struct XTestInjector {
    display: XDisplay,
}

impl XTestInjector {
    /// # Errors
    /// Returns `MacroError::Inject` if the X display cannot be opened.
    pub fn new() -> Result<Self> {
        let display = XDisplay::open()
            .ok_or_else(|| MacroError::Inject("cannot open X display (is DISPLAY set?)".into()))?;
        Ok(Self { display })
    }

    fn keycode(&self, action: &KeyAction) -> Result<c_uint> {
        let keysym = xlib::KeySym::from(action.keycode.x11_keysym());
        let code = unsafe { xlib::XKeysymToKeycode(self.display.as_ptr(), keysym) };
        if code == 0 {
            return Err(MacroError::Inject(format!(
                "{:?} has no keycode in the current keymap",
                action.keycode
            )));
        }
        Ok(c_uint::from(code))
    }
}

impl InputInjector for XTestInjector {
    fn inject(&mut self, actions: &[KeyAction]) -> Result<()> {
        // Resolve everything first so a bad key cannot leave modifiers held.
        let codes = actions
            .iter()
            .map(|a| self.keycode(a))
            .collect::<Result<Vec<_>>>()?;

        let dpy = self.display.as_ptr();
        for (action, code) in actions.iter().zip(codes) {
            let is_press = c_int::from(action.event == KeyEvent::KeyDown);
            unsafe {
                xtest::XTestFakeKeyEvent(dpy, code, is_press, CURRENT_TIME);
            }
        }
        unsafe {
            xlib::XFlush(dpy);
        }
        Ok(())
    }
}
