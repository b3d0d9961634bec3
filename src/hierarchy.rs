//! Recursive hierarchy expansion.
//!
//! Given a root node, populates every descendant level depth-first: each parent
//! draws one binomial fan-out count, and each child gets one node document plus
//! one relationship document back to its parent before being recursed into.
//! Fan-out compounds multiplicatively across levels, so leaf levels vastly
//! outnumber root levels for branching probability > 0.

use crate::document::{EntityFactory, RelDoc};
use crate::error::PopulateError;
use crate::levels::{LevelScheme, REL_COLLECTION};
use crate::sink::{BatchSink, BulkWriter};

/// One monotonically increasing identifier sequence shared across all levels.
///
/// Per-level numbering is therefore non-dense; identifiers are unique globally
/// for the lifetime of a run, which is all linkage requires.
#[derive(Debug)]
pub struct SequenceCounter {
    next: u64,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Dispense the next sequence number. Never reused within a run.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Total identifiers dispensed so far.
    pub fn dispensed(&self) -> u64 {
        self.next - 1
    }
}

impl Default for SequenceCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Recursively create nodes and relationships below `parent_id`.
///
/// `depth` is the level of the children to create (the root, depth 0, is
/// created by the caller). Recursion terminates when depth reaches the level
/// count; a fan-out draw of zero terminates a branch naturally. Children of the
/// same parent are generated and recursed into sequentially, so sink order
/// reflects a depth-first pre-order traversal.
///
/// Returns the number of descendant nodes created. Each descendant also
/// contributes exactly one relationship document.
pub fn extend_hierarchy<W: BulkWriter>(
    parent_id: &str,
    depth: usize,
    scheme: &LevelScheme,
    factory: &mut EntityFactory,
    seq: &mut SequenceCounter,
    sink: &mut BatchSink<W>,
) -> Result<u64, PopulateError> {
    if depth >= scheme.depth_count() {
        return Ok(0);
    }

    let mut created = 0;
    let fanout = factory.fanout();
    for _ in 0..fanout {
        let node = factory.node(scheme.letter(depth), seq.next_id());
        let rel = RelDoc::new(
            parent_id,
            scheme.collection(depth - 1),
            node.simple_id.clone(),
            scheme.collection(depth),
            scheme.rel_type(depth - 1, depth),
        );

        sink.append(REL_COLLECTION, bson::to_document(&rel)?);
        sink.append(&scheme.collection(depth), bson::to_document(&node)?);
        created += 1;

        created += extend_hierarchy(&node.simple_id, depth + 1, scheme, factory, seq, sink)?;
    }

    Ok(created)
}
