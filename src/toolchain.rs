use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::{Error, Result};

/// Access to the external binaries that do the actual archive work.
///
/// The renaming policy only needs two operations from a toolchain, so they
/// are expressed as a trait. Tests substitute an implementation that never
/// spawns a process.
pub trait Toolchain {
    /// List the defined symbols of `archive`, one raw record per line.
    fn list_defined_symbols(&self, archive: &Path) -> Result<Vec<String>>;

    /// Rename `old` to `new` in `archive`, in place.
    ///
    /// Returns whether the tool reported success. An unsuccessful exit is an
    /// expected outcome for symbols the tool cannot redefine, and callers
    /// must tolerate it. `Err` is reserved for invocations that could not
    /// run at all.
    fn redefine_symbol(&self, archive: &Path, old: &str, new: &str) -> Result<bool>;
}

impl<T: Toolchain + ?Sized> Toolchain for &T {
    fn list_defined_symbols(&self, archive: &Path) -> Result<Vec<String>> {
        (**self).list_defined_symbols(archive)
    }

    fn redefine_symbol(&self, archive: &Path, old: &str, new: &str) -> Result<bool> {
        (**self).redefine_symbol(archive, old, new)
    }
}

/// A toolchain that invokes an `nm`-compatible lister and an
/// `objcopy`-compatible rewriter as child processes.
#[derive(Debug, Clone)]
pub struct CommandToolchain {
    nm: PathBuf,
    objcopy: PathBuf,
}

impl CommandToolchain {
    /// Create a toolchain from the two executable paths.
    pub fn new(nm: impl Into<PathBuf>, objcopy: impl Into<PathBuf>) -> Self {
        CommandToolchain {
            nm: nm.into(),
            objcopy: objcopy.into(),
        }
    }
}

impl Toolchain for CommandToolchain {
    fn list_defined_symbols(&self, archive: &Path) -> Result<Vec<String>> {
        let output = Command::new(&self.nm)
            .arg("--defined-only")
            .arg("--format=posix")
            .arg(archive)
            .output()?;
        if !output.status.success() {
            return Err(Error::enumerate(format!(
                "{} exited with {}: {}",
                self.nm.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect())
    }

    fn redefine_symbol(&self, archive: &Path, old: &str, new: &str) -> Result<bool> {
        // The archive is both source and destination, so the rewrite happens
        // in place. Diagnostics are discarded: an unredefinable symbol is not
        // an event worth reporting.
        let status = Command::new(&self.objcopy)
            .arg("--redefine-sym")
            .arg(format!("{}={}", old, new))
            .arg(archive)
            .arg(archive)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        Ok(status.success())
    }
}
