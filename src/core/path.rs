// Path interning: opaque handles <-> UTF-8 strings

use std::collections::HashMap;
use std::fmt;

/// Interned path handle
///
/// Handles are allocated in increasing order starting at 1 and are never
/// released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(u64);

impl Path {
    /// Get the raw handle value
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Create a path handle from a raw value (it may not be interned)
    pub fn from_u64(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path#{}", self.0)
    }
}

/// Bidirectional string table
#[derive(Debug, Default)]
pub struct PathInterner {
    by_handle: HashMap<Path, String>,
    by_string: HashMap<String, Path>,
    last_index: u64,
}

impl PathInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle for `text`, allocating one on first use
    pub fn intern(&mut self, text: &str) -> Path {
        if let Some(&path) = self.by_string.get(text) {
            return path;
        }

        self.last_index += 1;
        let path = Path(self.last_index);
        self.by_handle.insert(path, text.to_string());
        self.by_string.insert(text.to_string(), path);
        path
    }

    /// Look up the string behind a handle
    pub fn resolve(&self, path: Path) -> Option<&str> {
        self.by_handle.get(&path).map(String::as_str)
    }

    /// Resolve an optional handle for diagnostics: empty for none, a marker for unknown
    pub fn describe(&self, path: Option<Path>) -> String {
        match path {
            None => String::new(),
            Some(path) => self
                .resolve(path)
                .map(str::to_string)
                .unwrap_or_else(|| "<unknown>".to_string()),
        }
    }

    pub fn len(&self) -> usize {
        self.by_handle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_handle.is_empty()
    }
}
