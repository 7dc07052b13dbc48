use std::os::raw::c_int;
use std::ptr::NonNull;
use x11::xlib;

/// Owned Xlib display connection.
pub struct XDisplay(NonNull<xlib::Display>);

impl XDisplay {
    /// Connect to the display named by `DISPLAY`. Returns `None` if no X
    /// server is reachable.
    pub fn open() -> Option<Self> {
        // The default handler exits the process on errors such as BadWindow,
        // which a focus change between two requests can trigger.
        unsafe {
            xlib::XSetErrorHandler(Some(ignore_x_error));
        }
        let ptr = unsafe { xlib::XOpenDisplay(std::ptr::null()) };
        NonNull::new(ptr).map(Self)
    }

    pub fn as_ptr(&self) -> *mut xlib::Display {
        self.0.as_ptr()
    }
}

impl Drop for XDisplay {
    fn drop(&mut self) {
        unsafe {
            xlib::XCloseDisplay(self.0.as_ptr());
        }
    }
}

unsafe extern "C" fn ignore_x_error(
    _display: *mut xlib::Display,
    _event: *mut xlib::XErrorEvent,
) -> c_int {
    0
}
