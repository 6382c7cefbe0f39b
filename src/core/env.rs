//! Resolved secret environment.
//!
//! Holds the `name -> value` pairs fetched for a run. Values stay in
//! zeroizing buffers until they are handed to the launched process or
//! written to a sources file.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::path::Path;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::types::{SecretValue, VarName};
use crate::error::Result;

/// Variables to overlay on the inherited process environment.
#[derive(Default)]
pub struct Environment {
    vars: BTreeMap<VarName, SecretValue>,
}

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value.
    pub fn insert(&mut self, name: VarName, value: SecretValue) {
        self.vars.insert(name, value);
    }

    /// Look up a variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(|v| v.as_str())
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no variable is set.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over `(name, value)` pairs, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as shell-sourceable `NAME="value"` lines.
    ///
    /// Lines are newline-separated with no trailing newline.
    pub fn to_sources(&self) -> Zeroizing<String> {
        let mut rendered = Zeroizing::new(String::new());
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                rendered.push('\n');
            }
            rendered.push_str(name);
            rendered.push_str("=\"");
            push_double_quoted(&mut rendered, value);
            rendered.push('"');
        }
        rendered
    }

    /// Write the sources rendering to `path` as a read-only file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created or written, e.g.
    /// when a read-only file from a previous run is still in place.
    pub fn write_sources(&self, path: &Path) -> Result<()> {
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o444);
        }

        let mut file = options.open(path)?;
        file.write_all(self.to_sources().as_bytes())?;

        debug!(path = %path.display(), vars = self.len(), "sources file written");
        Ok(())
    }
}

/// Lists names only; values never reach logs or panic messages.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.vars.keys()).finish()
    }
}

/// Append `value` escaped for use inside double quotes in a POSIX shell.
fn push_double_quoted(out: &mut String, value: &str) {
    for ch in value.chars() {
        if matches!(ch, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(ch);
    }
}
