use crate::{Error, Result};

/// Marker spliced between the keep-prefix and the original name.
pub(crate) const MARKER: &str = "_internal_pri_";

/// Default length of the random token at the end of a generated name.
pub const DEFAULT_TOKEN_LEN: usize = 5;

/// A source of fresh tokens for generated names.
///
/// The production implementation is [`RandomTokens`]; tests substitute a
/// source that returns known tokens.
pub trait TokenSource {
    /// Produce the next token.
    fn token(&mut self) -> String;
}

/// Generates random tokens of a fixed length.
///
/// Tokens start with an alphabetic character and continue with alphanumeric
/// characters, so a generated name is always a valid C identifier.
#[derive(Debug)]
pub struct RandomTokens {
    len: usize,
    rng: fastrand::Rng,
}

impl RandomTokens {
    /// Create a token source producing tokens of `len` characters.
    ///
    /// `len` must be at least 1.
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(Error::name("token length must be at least 1"));
        }
        Ok(RandomTokens {
            len,
            rng: fastrand::Rng::new(),
        })
    }
}

impl Default for RandomTokens {
    fn default() -> Self {
        RandomTokens {
            len: DEFAULT_TOKEN_LEN,
            rng: fastrand::Rng::new(),
        }
    }
}

impl TokenSource for RandomTokens {
    fn token(&mut self) -> String {
        let mut token = String::with_capacity(self.len);
        token.push(self.rng.alphabetic());
        for _ in 1..self.len {
            token.push(self.rng.alphanumeric());
        }
        token
    }
}

/// Build the private name that replaces `symbol`.
///
/// The result carries the keep-prefix, so a second run over the same archive
/// leaves already renamed symbols alone. The original name stays embedded in
/// the middle to keep linker diagnostics readable.
pub fn private_name(keep_prefix: &str, symbol: &str, token: &str) -> String {
    format!("{}{}{}_{}__", keep_prefix, MARKER, symbol, token)
}
