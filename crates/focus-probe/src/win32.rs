//! Win32 adapter using the foreground window.

use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetWindowTextLengthW, GetWindowTextW,
};

use crate::{Error, FocusProbe, Result};

/// Focus probe reading the title of the foreground window.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Probe;

impl FocusProbe for Win32Probe {
    fn query(&self) -> Result<Option<String>> {
        // SAFETY: GetForegroundWindow takes no arguments and may return null.
        let hwnd = unsafe { GetForegroundWindow() };
        if hwnd.0.is_null() {
            return Ok(None);
        }
        // SAFETY: hwnd is a window handle just returned by the system.
        let len = unsafe { GetWindowTextLengthW(hwnd) };
        if len <= 0 {
            return Ok(None);
        }
        let mut buf = vec![0u16; len as usize + 1];
        // SAFETY: buf is a writable buffer whose length is passed alongside it.
        let copied = unsafe { GetWindowTextW(hwnd, &mut buf) };
        if copied <= 0 {
            return Ok(None);
        }
        buf.truncate(copied as usize);
        String::from_utf16(&buf)
            .map(Some)
            .map_err(|_| Error::Encoding)
    }
}
