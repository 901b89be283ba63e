use std::path::Path;
use std::{error, fmt, io};

/// An error that occurred while renaming symbols in an archive.
#[derive(Debug)]
pub struct Error {
    inner: ErrorInner,
}

#[derive(Debug)]
enum ErrorInner {
    Config(String),
    Enumerate(String),
    EmptyPlan(String),
    Name(String),
    Io(io::Error),
}

/// The kind of error that occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A configured path did not pass validation.
    Config,
    /// The symbol lister ran but did not produce a listing.
    Enumerate,
    /// Every defined symbol already carries the keep-prefix.
    EmptyPlan,
    /// The name generator was configured with an unusable token length.
    Name,
    /// An external tool could not be invoked at all.
    Io(io::ErrorKind),
}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            ErrorInner::Config(e) => e.fmt(f),
            ErrorInner::Enumerate(e) => e.fmt(f),
            ErrorInner::EmptyPlan(e) => e.fmt(f),
            ErrorInner::Name(e) => e.fmt(f),
            ErrorInner::Io(e) => e.fmt(f),
        }
    }
}

impl error::Error for Error {}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Self {
            inner: ErrorInner::Io(error),
        }
    }
}

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> ErrorKind {
        match &self.inner {
            ErrorInner::Config(_) => ErrorKind::Config,
            ErrorInner::Enumerate(_) => ErrorKind::Enumerate,
            ErrorInner::EmptyPlan(_) => ErrorKind::EmptyPlan,
            ErrorInner::Name(_) => ErrorKind::Name,
            ErrorInner::Io(e) => ErrorKind::Io(e.kind()),
        }
    }

    /// Create an error for a symbol listing that could not be produced.
    ///
    /// This is public so that [`Toolchain`](crate::Toolchain) implementations
    /// outside this crate can report enumeration failures.
    pub fn enumerate(message: impl Into<String>) -> Self {
        Self {
            inner: ErrorInner::Enumerate(message.into()),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self {
            inner: ErrorInner::Config(message.into()),
        }
    }

    pub(crate) fn empty_plan(archive: &Path) -> Self {
        Self {
            inner: ErrorInner::EmptyPlan(format!(
                "no symbols to rename in {}",
                archive.display()
            )),
        }
    }

    pub(crate) fn name(message: impl Into<String>) -> Self {
        Self {
            inner: ErrorInner::Name(message.into()),
        }
    }
}

/// The result type used by this library.
pub type Result<T> = std::result::Result<T, Error>;
