//! Read/replace access to the page's URL fragment.
//!
//! The selection logic only talks to [`Location`], so it runs against the
//! real browser in the app and against [`MemoryLocation`] in tests.

use web_sys::wasm_bindgen::JsValue;

use crate::console;

pub trait Location {
    /// Current fragment including the leading `#`, or `""` when there is none.
    fn hash(&self) -> String;

    /// Replace the fragment in place. Must not add a history entry.
    fn replace_hash(&mut self, fragment: &str);
}

/// `window.location` / `window.history` of the running page.
pub struct BrowserLocation;

impl Location for BrowserLocation {
    fn hash(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default()
    }

    fn replace_hash(&mut self, fragment: &str) {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            return;
        };
        // A bare `#...` URL resolves against the current document, so path and
        // query survive.
        if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(fragment)) {
            console::warn(&format!("history.replaceState failed for {fragment}: {e:?}"));
        }
    }
}

/// In-memory stand-in for the browser's location and session history.
#[cfg(test)]
#[derive(Debug)]
pub struct MemoryLocation {
    /// Session history; the last entry is the current URL fragment.
    pub history: Vec<String>,
    /// Number of `replace_hash` calls that reached this location.
    pub writes: usize,
}

#[cfg(test)]
impl MemoryLocation {
    pub fn new(initial: &str) -> Self {
        Self {
            history: vec![initial.to_string()],
            writes: 0,
        }
    }

    /// Simulate a navigation the component did not make (link, address bar).
    pub fn navigate(&mut self, fragment: &str) {
        self.history.push(fragment.to_string());
    }
}

#[cfg(test)]
impl Location for MemoryLocation {
    fn hash(&self) -> String {
        self.history.last().cloned().unwrap_or_default()
    }

    fn replace_hash(&mut self, fragment: &str) {
        self.writes += 1;
        match self.history.last_mut() {
            Some(current) => *current = fragment.to_string(),
            None => self.history.push(fragment.to_string()),
        }
    }
}
