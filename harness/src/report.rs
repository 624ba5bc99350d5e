//! Solution reports: human-readable text and JSON.
//!
//! The report carries a `digest` over the move notation so two runs can be
//! compared for determinism without diffing move lists.

use std::fmt::{Display, Write as _};

use serde::Serialize;
use slidewise_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use slidewise_search::node::Cost;
use slidewise_search::search::{SearchStats, SearchStatus};

use crate::runner::{RunError, SearchRun};

/// Digest of a move list: `sha256` over the notation joined by `,`.
#[must_use]
pub fn solution_digest(notation: &[String]) -> ContentHash {
    canonical_hash(HashDomain::SolutionMoves, notation.join(",").as_bytes())
}

/// Serializable summary of a [`SearchRun`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionReport {
    pub problem: String,
    pub status: SearchStatus,
    pub solved: bool,
    pub moves: Vec<String>,
    pub move_count: usize,
    pub cost: Option<Cost>,
    pub stats: SearchStats,
    pub elapsed_ms: f64,
    /// Present only when solved.
    pub digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_digest: Option<String>,
}

impl SolutionReport {
    #[must_use]
    pub fn new<M: Display>(run: &SearchRun<M>) -> Self {
        let moves: Vec<String> = run
            .moves
            .iter()
            .flatten()
            .map(ToString::to_string)
            .collect();
        let digest = run
            .is_solved()
            .then(|| solution_digest(&moves).as_str().to_string());
        Self {
            problem: run.problem_id.clone(),
            status: run.status,
            solved: run.is_solved(),
            move_count: moves.len(),
            moves,
            cost: run.cost,
            stats: run.stats,
            elapsed_ms: run.elapsed.as_secs_f64() * 1000.0,
            digest,
            layout_digest: None,
        }
    }

    /// Attach the digest of the puzzle the run solved.
    #[must_use]
    pub fn with_layout_digest(mut self, digest: &ContentHash) -> Self {
        self.layout_digest = Some(digest.as_str().to_string());
        self
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Serialize`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, RunError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Console summary: moves joined by `separator`, the count, and the
    /// elapsed time.
    #[must_use]
    pub fn to_text(&self, separator: &str) -> String {
        let mut out = String::new();
        if self.solved {
            let _ = writeln!(out, "Moves: {}", self.moves.join(separator));
            let _ = writeln!(out, "(total of {})", self.move_count);
        } else {
            out.push_str("No solution\n");
        }
        let _ = writeln!(
            out,
            "Elapsed time: {:.3} ms ({} expansions)",
            self.elapsed_ms, self.stats.expansions
        );
        out
    }
}
