use std::collections::BTreeSet;
use std::path::PathBuf;

#[cfg(feature = "logging")]
use log::info;

use crate::names::private_name;
use crate::symbols::defined_symbols;
use crate::{CommandToolchain, Error, RandomTokens, Result, TokenSource, Toolchain};

/// Keep-prefix used when none is configured.
pub const DEFAULT_KEEP_PREFIX: &str = "sn_";

/// Configuration for one renaming run.
///
/// Fields may be set directly. [`Options::new`] fills in the default
/// keep-prefix.
#[derive(Debug, Clone)]
pub struct Options {
    /// The static archive to rewrite in place.
    pub archive: PathBuf,
    /// Symbols starting with this prefix are left untouched.
    ///
    /// The match is case-sensitive and anchored at the start of the name.
    pub keep_prefix: String,
    /// Path to the `nm`-compatible symbol lister.
    pub nm: PathBuf,
    /// Path to the `objcopy`-compatible symbol rewriter.
    pub objcopy: PathBuf,
}

impl Options {
    /// Create options for `archive` with the default keep-prefix.
    pub fn new(
        archive: impl Into<PathBuf>,
        nm: impl Into<PathBuf>,
        objcopy: impl Into<PathBuf>,
    ) -> Self {
        Options {
            archive: archive.into(),
            keep_prefix: DEFAULT_KEEP_PREFIX.to_string(),
            nm: nm.into(),
            objcopy: objcopy.into(),
        }
    }

    /// Check that the configured paths exist.
    ///
    /// The rewriter is checked first, then the lister, then the archive.
    /// Existence is all that is checked; execute permission and archive
    /// format problems surface when the tools run.
    pub fn validate(&self) -> Result<()> {
        if !self.objcopy.exists() {
            return Err(Error::config(format!(
                "objcopy binary not found: {}",
                self.objcopy.display()
            )));
        }
        if !self.nm.exists() {
            return Err(Error::config(format!(
                "nm binary not found: {}",
                self.nm.display()
            )));
        }
        if !self.archive.exists() {
            return Err(Error::config(format!(
                "archive not found: {}",
                self.archive.display()
            )));
        }
        Ok(())
    }
}

/// Counts reported by a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Defined symbols enumerated from the archive, after deduplication.
    pub defined: usize,
    /// Symbols selected for renaming, one rewrite attempt each.
    pub planned: usize,
}

/// Renames every defined symbol in an archive that does not carry the
/// keep-prefix.
#[derive(Debug)]
pub struct Stripper<T = CommandToolchain, S = RandomTokens> {
    options: Options,
    toolchain: T,
    tokens: S,
}

impl Stripper {
    /// Validate `options` and create a stripper that invokes the configured
    /// external binaries.
    pub fn open(options: Options) -> Result<Self> {
        options.validate()?;
        let toolchain = CommandToolchain::new(&options.nm, &options.objcopy);
        Ok(Stripper {
            options,
            toolchain,
            tokens: RandomTokens::default(),
        })
    }
}

impl<T: Toolchain, S: TokenSource> Stripper<T, S> {
    /// Create a stripper from explicit capabilities, skipping path
    /// validation.
    pub fn with_parts(options: Options, toolchain: T, tokens: S) -> Self {
        Stripper {
            options,
            toolchain,
            tokens,
        }
    }

    /// Symbols that do not carry the keep-prefix, in sorted order.
    fn plan<'symbols>(&self, symbols: &'symbols BTreeSet<String>) -> Vec<&'symbols str> {
        symbols
            .iter()
            .filter(|symbol| !symbol.starts_with(&self.options.keep_prefix))
            .map(String::as_str)
            .collect()
    }

    /// Enumerate the archive's defined symbols and rename every one that
    /// does not carry the keep-prefix.
    ///
    /// An archive with nothing to rename is an error, before any rewrite is
    /// attempted. A rewrite that runs but reports failure is tolerated and
    /// the run continues with the remaining symbols.
    pub fn run(&mut self) -> Result<Outcome> {
        let symbols = defined_symbols(&self.toolchain, &self.options.archive)?;
        let plan = self.plan(&symbols);
        if plan.is_empty() {
            return Err(Error::empty_plan(&self.options.archive));
        }
        #[cfg(feature = "logging")]
        info!(
            "Found {} defined symbols, renaming {} without the {} prefix",
            symbols.len(),
            plan.len(),
            self.options.keep_prefix
        );
        let outcome = Outcome {
            defined: symbols.len(),
            planned: plan.len(),
        };
        for old in plan {
            let new = private_name(&self.options.keep_prefix, old, &self.tokens.token());
            #[cfg(feature = "logging")]
            info!("Renaming symbol {} to {}", old, new);
            // An unsuccessful exit is expected for symbols the rewriter
            // cannot touch. Keep going.
            self.toolchain
                .redefine_symbol(&self.options.archive, old, &new)?;
        }
        #[cfg(feature = "logging")]
        info!("Symbol cleanup complete");
        Ok(outcome)
    }
}
