//! Driver that orchestrates graph generation.

use crate::document::EntityFactory;
use crate::error::PopulateError;
use crate::hierarchy::{extend_hierarchy, SequenceCounter};
use crate::levels::LevelScheme;
use crate::sink::{BatchSink, BulkWriter};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Metrics from a populate run.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Node documents generated (roots included).
    pub nodes_generated: u64,
    /// Relationship documents generated.
    pub rels_generated: u64,
    /// Documents handed to the backend.
    pub docs_inserted: u64,
    /// Bulk-insert calls issued.
    pub batch_count: u64,
    /// Total time taken.
    pub total_duration: Duration,
}

impl PopulateMetrics {
    /// Documents inserted per second.
    pub fn docs_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.docs_inserted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Generates the configured number of root nodes and expands each one into a
/// randomly-branching hierarchy, flushing batches as it goes.
///
/// Owns all mutable generation state (pools via the factory, the sequence
/// counter, the sink buffers), so independent populators never interfere.
pub struct GraphPopulator<W> {
    sink: BatchSink<W>,
    factory: EntityFactory,
    scheme: LevelScheme,
    seq: SequenceCounter,
    num_root_docs: u64,
    batch_size: usize,
}

impl<W: BulkWriter> GraphPopulator<W> {
    pub fn new(
        writer: W,
        factory: EntityFactory,
        scheme: LevelScheme,
        num_root_docs: u64,
        batch_size: usize,
    ) -> Self {
        Self {
            sink: BatchSink::new(writer),
            factory,
            scheme,
            seq: SequenceCounter::new(),
            num_root_docs,
            batch_size,
        }
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        self.sink.writer()
    }

    /// Generate the whole graph and drain every buffer.
    pub async fn run(&mut self) -> Result<PopulateMetrics, PopulateError> {
        let start = Instant::now();
        let mut metrics = PopulateMetrics::default();

        info!(
            "Generating {} root docs across {} levels (batch size: {})",
            self.num_root_docs,
            self.scheme.depth_count(),
            self.batch_size
        );

        for cnt in 0..self.num_root_docs {
            self.sink.maybe_flush(self.batch_size).await?;

            let root = self
                .factory
                .node(self.scheme.letter(0), self.seq.next_id());
            let root_id = root.simple_id.clone();
            self.sink
                .append(&self.scheme.collection(0), bson::to_document(&root)?);
            metrics.nodes_generated += 1;

            let descendants = extend_hierarchy(
                &root_id,
                1,
                &self.scheme,
                &mut self.factory,
                &mut self.seq,
                &mut self.sink,
            )?;
            metrics.nodes_generated += descendants;
            metrics.rels_generated += descendants;

            debug!(
                "Root {} of {} complete ({} descendants)",
                cnt + 1,
                self.num_root_docs,
                descendants
            );
        }

        self.sink.flush_all().await?;

        metrics.docs_inserted = self.sink.docs_flushed();
        metrics.batch_count = self.sink.batches_flushed();
        metrics.total_duration = start.elapsed();

        info!(
            "Population complete: {} nodes, {} rels, {} docs in {:?} ({:.2} docs/sec)",
            metrics.nodes_generated,
            metrics.rels_generated,
            metrics.docs_inserted,
            metrics.total_duration,
            metrics.docs_per_second()
        );

        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::WordCorpus;
    use crate::pool::Pool;
    use crate::sink::MemoryWriter;

    fn factory(fanout: u64) -> EntityFactory {
        let corpus = WordCorpus::from_words(vec!["fixture".into(), "data".into()]).unwrap();
        EntityFactory::with_pools(
            corpus,
            Pool::uuids(256, 42),
            Pool::uniform(65536, 42),
            Pool::fixed_fanout(256, fanout),
        )
    }

    #[test]
    fn test_metrics_rate() {
        let metrics = PopulateMetrics {
            nodes_generated: 700,
            rels_generated: 300,
            docs_inserted: 1000,
            batch_count: 10,
            total_duration: Duration::from_secs(10),
        };
        assert_eq!(metrics.docs_per_second(), 100.0);
    }

    #[tokio::test]
    async fn test_run_drains_all_buffers() {
        let mut populator = GraphPopulator::new(
            MemoryWriter::new(),
            factory(2),
            LevelScheme::new(3).unwrap(),
            2,
            4,
        );
        let metrics = populator.run().await.unwrap();

        // Per root: 1 + 2 + 4 nodes and 6 rels.
        assert_eq!(metrics.nodes_generated, 14);
        assert_eq!(metrics.rels_generated, 12);
        assert_eq!(metrics.docs_inserted, 26);

        let writer = populator.writer();
        assert_eq!(writer.documents("acoll").len(), 2);
        assert_eq!(writer.documents("bcoll").len(), 4);
        assert_eq!(writer.documents("ccoll").len(), 8);
        assert_eq!(writer.documents("rels").len(), 12);
    }

    #[tokio::test]
    async fn test_zero_fanout_produces_roots_only() {
        let mut populator = GraphPopulator::new(
            MemoryWriter::new(),
            factory(0),
            LevelScheme::new(5).unwrap(),
            3,
            100,
        );
        let metrics = populator.run().await.unwrap();

        assert_eq!(metrics.nodes_generated, 3);
        assert_eq!(metrics.rels_generated, 0);
        assert_eq!(populator.writer().documents("acoll").len(), 3);
        assert!(populator.writer().documents("rels").is_empty());
    }
}
