//! Content hashes with domain separation.
//!
//! Every digest is `SHA-256(domain_prefix || data)` rendered as
//! `"sha256:<hex>"`. The prefix keeps digests of different artifact kinds
//! from colliding even when their payload bytes coincide.

use sha2::{Digest, Sha256};

/// Typed domain separator for [`canonical_hash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashDomain {
    /// Move sequence of a solution, in human-readable notation.
    SolutionMoves,
    /// Source text of a puzzle layout or map.
    PuzzleLayout,
}

impl HashDomain {
    /// All domains in declaration order.
    pub const ALL: &'static [HashDomain] = &[Self::SolutionMoves, Self::PuzzleLayout];

    /// The null-terminated prefix bytes fed to the hasher.
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::SolutionMoves => b"SLIDEWISE::SOLUTION_MOVES::V1\0",
            Self::PuzzleLayout => b"SLIDEWISE::PUZZLE_LAYOUT::V1\0",
        }
    }
}

impl std::fmt::Display for HashDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SolutionMoves => f.write_str("SolutionMoves"),
            Self::PuzzleLayout => f.write_str("PuzzleLayout"),
        }
    }
}

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` if the colon is missing or either side is empty.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    /// The algorithm portion (e.g., "sha256").
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    /// The full `"algorithm:hex_digest"` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// SHA-256 of `domain || data`, as a [`ContentHash`].
#[must_use]
pub fn canonical_hash(domain: HashDomain, data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    hasher.update(data);
    let hex_digest = hex::encode(hasher.finalize());
    ContentHash {
        colon: "sha256".len(),
        full: format!("sha256:{hex_digest}"),
    }
}
