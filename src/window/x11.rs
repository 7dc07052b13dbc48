use super::{application_name, ForegroundWindow};
use crate::error::{MacroError, Result};
use crate::xdisplay::XDisplay;
use std::ffi::CString;
use std::os::raw::{c_int, c_uchar, c_ulong};
use ::x11::xlib;

const ANY_PROPERTY_TYPE: xlib::Atom = 0;

/// Foreground window lookup through EWMH properties:
/// `_NET_ACTIVE_WINDOW` on the root, then `_NET_WM_PID`, then `/proc/<pid>/exe`.
pub struct X11ForegroundWindow {
    display: XDisplay,
    active_window: xlib::Atom,
    wm_pid: xlib::Atom,
}

impl X11ForegroundWindow {
    /// # Errors
    /// Returns `MacroError::Window` if the X display cannot be opened.
    pub fn new() -> Result<Self> {
        let display = XDisplay::open()
            .ok_or_else(|| MacroError::Window("cannot open X display (is DISPLAY set?)".into()))?;
        let active_window = intern(&display, "_NET_ACTIVE_WINDOW")?;
        let wm_pid = intern(&display, "_NET_WM_PID")?;
        Ok(Self {
            display,
            active_window,
            wm_pid,
        })
    }

    /// First 32-bit item of a window property.
    fn property(&self, window: xlib::Window, atom: xlib::Atom) -> Option<c_ulong> {
        let mut actual_type: xlib::Atom = 0;
        let mut actual_format: c_int = 0;
        let mut nitems: c_ulong = 0;
        let mut bytes_after: c_ulong = 0;
        let mut prop: *mut c_uchar = std::ptr::null_mut();

        let status = unsafe {
            xlib::XGetWindowProperty(
                self.display.as_ptr(),
                window,
                atom,
                0,
                1,
                xlib::False,
                ANY_PROPERTY_TYPE,
                &mut actual_type,
                &mut actual_format,
                &mut nitems,
                &mut bytes_after,
                &mut prop,
            )
        };
        if status != c_int::from(xlib::Success) || prop.is_null() {
            return None;
        }

        // Format-32 data comes back as an array of C longs.
        let value = (actual_format == 32 && nitems > 0)
            .then(|| unsafe { *prop.cast::<c_ulong>() });
        unsafe {
            xlib::XFree(prop.cast());
        }
        value
    }
}

impl ForegroundWindow for X11ForegroundWindow {
    fn current_application(&mut self) -> Result<Option<String>> {
        let root = unsafe { xlib::XDefaultRootWindow(self.display.as_ptr()) };

        let Some(window) = self.property(root, self.active_window).filter(|&w| w != 0) else {
            return Ok(None);
        };
        let Some(pid) = self.property(window, self.wm_pid) else {
            return Ok(None);
        };

        let exe = match std::fs::read_link(format!("/proc/{pid}/exe")) {
            Ok(exe) => exe,
            Err(_) => return Ok(None),
        };
        Ok(application_name(&exe))
    }
}

fn intern(display: &XDisplay, name: &str) -> Result<xlib::Atom> {
    let c_name = CString::new(name).map_err(|e| MacroError::Window(e.to_string()))?;
    let atom = unsafe { xlib::XInternAtom(display.as_ptr(), c_name.as_ptr(), xlib::False) };
    if atom == 0 {
        return Err(MacroError::Window(format!("cannot intern atom {name}")));
    }
    Ok(atom)
}
