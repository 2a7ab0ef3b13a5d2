//! Command implementations
//!
//! # Available Commands
//!
//! - [`fetch`] - Download the requested maps into a scratch directory
//! - [`mod@print`] - Hand a downloaded map to the configured print command

pub mod fetch;
pub mod print;

#[cfg(all(test, unix))]
pub(crate) mod tests {
    use std::{fs, os::unix::fs::PermissionsExt, path::Path};
    use tokio::sync::Mutex;

    /// Held by every test that spawns a process, so no fork can inherit the
    /// write handle of a script another test is still creating.
    pub static PROCESS_LOCK: Mutex<()> = Mutex::const_new(());

    /// Write an executable `sh` script and return its path as a string.
    pub fn write_script(dir: &Path, name: &str, body: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_str().unwrap().to_string()
    }
}
