//! Short code sources and the fabricated short link.
//!
//! Codes are drawn from an injected [`CodeSource`] so the flow can be driven
//! deterministically: a seeded [`RandomCodes`] replays the same sequence, and any
//! `FnMut() -> String` closure works as a scripted source in tests.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Display domain used for every fabricated link unless configured otherwise.
pub const DEFAULT_DOMAIN: &str = "linklux.io";

/// Default number of characters in a short code.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Characters a short code is sampled from.
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Anything that can hand out short codes.
pub trait CodeSource {
    fn next_code(&mut self) -> String;
}

impl<F> CodeSource for F
where
    F: FnMut() -> String,
{
    fn next_code(&mut self) -> String {
        self()
    }
}

/// Pseudo-random lowercase alphanumeric codes.
///
/// Not collision resistant: the links are for display only.
pub struct RandomCodes {
    rng: StdRng,
    length: usize,
}

impl RandomCodes {
    /// Codes seeded from the operating system.
    pub fn from_entropy(length: usize) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            length,
        }
    }

    /// Reproducible codes: the same seed always yields the same sequence.
    pub fn seeded(seed: u64, length: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            length,
        }
    }
}

impl CodeSource for RandomCodes {
    fn next_code(&mut self) -> String {
        (0..self.length)
            .map(|_| ALPHABET[self.rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

/// A fabricated short link: `<domain>/<code>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    domain: String,
    code: String,
}

impl ShortLink {
    pub fn new(domain: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            code: code.into(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Fully qualified form written to the clipboard and shown in the result panel.
    pub fn url(&self) -> String {
        format!("https://{}", self)
    }
}

impl fmt::Display for ShortLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.code)
    }
}
