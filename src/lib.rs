//! Rename the internal symbols of static archives.
//!
//! `symhide` renames every defined symbol that does not start with a
//! configured keep-prefix to a collision-resistant private name, so that an
//! archive's internals cannot clash with the symbols of the program linking
//! against it. It is a policy layer over an external toolchain: an
//! `nm`-compatible tool enumerates the defined symbols, and an
//! `objcopy`-compatible tool performs each rename in place.
//!
//! Describe a run with [`Options`] and execute it with [`Stripper`]:
//!
//! ```no_run
//! use symhide::{Options, Stripper};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut options = Options::new("libfoo.a", "/usr/bin/nm", "/usr/bin/objcopy");
//!     options.keep_prefix = "foo_".to_string();
//!     let outcome = Stripper::open(options)?.run()?;
//!     println!("renamed {} of {} symbols", outcome.planned, outcome.defined);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod error;
pub use error::{Error, ErrorKind, Result};

mod toolchain;
pub use toolchain::{CommandToolchain, Toolchain};

mod symbols;
pub use symbols::defined_symbols;

mod names;
pub use names::{private_name, RandomTokens, TokenSource, DEFAULT_TOKEN_LEN};

mod stripper;
pub use stripper::{Options, Outcome, Stripper, DEFAULT_KEEP_PREFIX};
