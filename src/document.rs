//! Node and relationship document types and their synthesizers.
//!
//! Field names match what downstream query tooling expects: nodes carry a
//! `simple_id` used for graph linkage plus decoy identifiers and filler fields
//! that give the document realistic size; relationships carry exactly
//! `source`, `source_coll`, `target`, `target_coll` and `type`.

use crate::corpus::WordCorpus;
use crate::error::PopulateError;
use crate::pool::{Pool, FANOUT_POOL_SIZE, FLOAT_POOL_SIZE, UUID_POOL_SIZE};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Target minimum length of the `description` filler field.
pub const DESCRIPTION_LEN: usize = 200;

/// Target minimum length of the `boilerplate` filler field.
pub const BOILERPLATE_LEN: usize = 2000;

/// Number of floats in the `per` feature vector.
pub const VECTOR_LEN: usize = 20;

/// A node document. `simple_id` (`<level-letter>-<counter>`) is the only field
/// used for linkage and is unique across the run; the rest is filler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDoc {
    pub simple_id: String,
    pub fake_id: String,
    pub diff_id: String,
    pub description: String,
    pub boilerplate: String,
    pub per: Vec<f64>,
}

/// A directed, typed relationship document linking a node to its parent's level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelDoc {
    pub source: String,
    pub source_coll: String,
    pub target: String,
    pub target_coll: String,
    #[serde(rename = "type")]
    pub rel_type: String,
}

impl RelDoc {
    pub fn new(
        source: impl Into<String>,
        source_coll: impl Into<String>,
        target: impl Into<String>,
        target_coll: impl Into<String>,
        rel_type: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            source_coll: source_coll.into(),
            target: target.into(),
            target_coll: target_coll.into(),
            rel_type: rel_type.into(),
        }
    }
}

/// Synthesizes documents from pooled randomness.
///
/// Owns the three pools and the word corpus; all pool state is explicit here
/// rather than ambient, so independent factories never cross-contaminate.
pub struct EntityFactory {
    uuids: Pool<Uuid>,
    floats: Pool<f64>,
    fanouts: Pool<u64>,
    corpus: WordCorpus,
}

// Sub-seed mixing constant so the three pools draw independent streams
// from one user-facing seed.
const SEED_MIX: u64 = 0x9E3779B97F4A7C15;

impl EntityFactory {
    /// Create a factory with default-sized pools.
    ///
    /// `trials` and `p` parameterize the binomial fan-out distribution.
    pub fn new(corpus: WordCorpus, trials: u64, p: f64, seed: u64) -> Result<Self, PopulateError> {
        Ok(Self {
            uuids: Pool::uuids(UUID_POOL_SIZE, seed),
            floats: Pool::uniform(FLOAT_POOL_SIZE, seed.wrapping_add(SEED_MIX)),
            fanouts: Pool::binomial(
                FANOUT_POOL_SIZE,
                trials,
                p,
                seed.wrapping_add(2u64.wrapping_mul(SEED_MIX)),
            )?,
            corpus,
        })
    }

    /// Create a factory from explicit pools. Used by tests to pin the
    /// fan-out sequence.
    pub fn with_pools(
        corpus: WordCorpus,
        uuids: Pool<Uuid>,
        floats: Pool<f64>,
        fanouts: Pool<u64>,
    ) -> Self {
        Self {
            uuids,
            floats,
            fanouts,
            corpus,
        }
    }

    /// Synthesize one node document for the given level letter and sequence
    /// number. Consumes pool values; never touches any other shared state.
    pub fn node(&mut self, letter: char, seq: u64) -> NodeDoc {
        NodeDoc {
            simple_id: format!("{letter}-{seq}"),
            fake_id: self.uuids.next().to_string(),
            diff_id: self.uuids.next().to_string(),
            description: self.filler_text(DESCRIPTION_LEN),
            boilerplate: self.filler_text(BOILERPLATE_LEN),
            per: (0..VECTOR_LEN).map(|_| self.floats.next()).collect(),
        }
    }

    /// Draw one fan-out count for a parent node.
    pub fn fanout(&mut self) -> u64 {
        self.fanouts.next()
    }

    /// Assemble corpus words, separated by single spaces, until the text
    /// reaches the target minimum length.
    fn filler_text(&mut self, min_len: usize) -> String {
        let mut out = String::with_capacity(min_len + 16);
        while out.len() < min_len {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(self.corpus.pick(self.floats.next()));
        }
        out
    }
}
