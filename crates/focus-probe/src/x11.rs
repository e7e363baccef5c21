//! X11 adapter using EWMH root-window properties.

use std::fmt::Display;

use x11rb::{
    connection::Connection,
    protocol::xproto::{Atom, AtomEnum, ConnectionExt, Window},
    rust_connection::RustConnection,
};

use crate::{Error, FocusProbe, Result};

/// Longest title read from a window property, in 32-bit units.
const MAX_TITLE_WORDS: u32 = 1024;

/// Focus probe backed by a connection to the X server.
pub struct X11Probe {
    /// Live connection to the display named by `$DISPLAY`.
    conn: RustConnection,
    /// Root window of the default screen.
    root: Window,
    /// Interned `_NET_ACTIVE_WINDOW`.
    active_window: Atom,
    /// Interned `_NET_WM_NAME`.
    net_wm_name: Atom,
    /// Interned `UTF8_STRING`.
    utf8_string: Atom,
}

impl X11Probe {
    /// Connect to the display named by `$DISPLAY` and intern the atoms we need.
    pub fn connect() -> Result<Self> {
        let (conn, screen_num) =
            x11rb::connect(None).map_err(|err| Error::Connect(err.to_string()))?;
        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .ok_or_else(|| Error::Connect(format!("screen {screen_num} not found")))?;
        let active_window = intern(&conn, "_NET_ACTIVE_WINDOW")?;
        let net_wm_name = intern(&conn, "_NET_WM_NAME")?;
        let utf8_string = intern(&conn, "UTF8_STRING")?;
        Ok(Self {
            conn,
            root,
            active_window,
            net_wm_name,
            utf8_string,
        })
    }

    /// Fetch a property's raw bytes.
    fn property(&self, window: Window, property: Atom, kind: Atom) -> Result<Vec<u8>> {
        let reply = self
            .conn
            .get_property(false, window, property, kind, 0, MAX_TITLE_WORDS)
            .map_err(request_err)?
            .reply()
            .map_err(request_err)?;
        Ok(reply.value)
    }

    /// The window the window manager reports as active, if any.
    fn active(&self) -> Result<Option<Window>> {
        let reply = self
            .conn
            .get_property(false, self.root, self.active_window, AtomEnum::WINDOW, 0, 1)
            .map_err(request_err)?
            .reply()
            .map_err(request_err)?;
        let window = reply.value32().and_then(|mut values| values.next());
        Ok(window.filter(|&id| id != 0))
    }

    /// Title of `window`, preferring the UTF-8 EWMH name over legacy `WM_NAME`.
    fn title(&self, window: Window) -> Result<Option<String>> {
        let name = self.property(window, self.net_wm_name, self.utf8_string)?;
        if !name.is_empty() {
            return String::from_utf8(name).map(Some).map_err(|_| Error::Encoding);
        }
        // WM_NAME is ISO 8859-1.
        let legacy = self.property(window, AtomEnum::WM_NAME.into(), AtomEnum::STRING.into())?;
        if legacy.is_empty() {
            return Ok(None);
        }
        Ok(Some(legacy.into_iter().map(char::from).collect()))
    }
}

impl FocusProbe for X11Probe {
    fn query(&self) -> Result<Option<String>> {
        match self.active()? {
            Some(window) => self.title(window),
            None => Ok(None),
        }
    }
}

/// Intern an atom by name.
fn intern(conn: &RustConnection, name: &str) -> Result<Atom> {
    conn.intern_atom(false, name.as_bytes())
        .map_err(request_err)?
        .reply()
        .map(|reply| reply.atom)
        .map_err(request_err)
}

/// Wrap any X11 error as a request failure.
fn request_err(err: impl Display) -> Error {
    Error::Request(err.to_string())
}
