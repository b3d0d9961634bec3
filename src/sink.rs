//! Batched write sink.
//!
//! `BatchSink` buffers generated documents per destination collection and flushes
//! each buffer to a [`BulkWriter`] independently once it crosses a size threshold,
//! keeping peak memory bounded regardless of total generation volume.
//!
//! Generation code is generic over `BulkWriter` for zero-cost dispatch: the CLI
//! entry point branches once (MongoDB vs dry-run) and everything downstream is
//! monomorphized for the chosen writer.

use crate::error::PopulateError;
use bson::Document;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::{debug, info};

/// Destination for bulk document writes.
#[async_trait::async_trait]
pub trait BulkWriter: Send + Sync {
    /// Insert an ordered batch of documents into the named collection.
    ///
    /// A failure must be detectable; it aborts the run. Returns the number of
    /// documents inserted.
    async fn insert_many(
        &self,
        collection: &str,
        documents: &[Document],
    ) -> Result<u64, PopulateError>;
}

/// Per-collection document buffers with threshold-based flushing.
pub struct BatchSink<W> {
    writer: W,
    buffers: BTreeMap<String, Vec<Document>>,
    docs_flushed: u64,
    batches_flushed: u64,
}

impl<W: BulkWriter> BatchSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffers: BTreeMap::new(),
            docs_flushed: 0,
            batches_flushed: 0,
        }
    }

    /// Add a document to a collection's buffer.
    pub fn append(&mut self, collection: &str, document: Document) {
        self.buffers
            .entry(collection.to_string())
            .or_default()
            .push(document);
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Number of documents currently buffered across all collections.
    pub fn buffered(&self) -> usize {
        self.buffers.values().map(Vec::len).sum()
    }

    /// Total documents handed to the writer so far.
    pub fn docs_flushed(&self) -> u64 {
        self.docs_flushed
    }

    /// Total bulk-insert calls issued so far.
    pub fn batches_flushed(&self) -> u64 {
        self.batches_flushed
    }

    /// Flush every buffer whose length is at least `threshold`; buffers below
    /// the threshold are left untouched. No buffer is left at length >=
    /// `threshold` on success.
    pub async fn maybe_flush(&mut self, threshold: usize) -> Result<(), PopulateError> {
        let mut flushed_any = false;
        for (collection, buffer) in &mut self.buffers {
            if buffer.is_empty() || buffer.len() < threshold {
                continue;
            }
            info!("Insert batch of {} docs to {collection}", buffer.len());
            let inserted = self.writer.insert_many(collection, buffer).await?;
            // Cleared only after the insert call returned; a failure above
            // leaves the buffer intact and aborts the run.
            buffer.clear();
            self.docs_flushed += inserted;
            self.batches_flushed += 1;
            flushed_any = true;
        }
        if flushed_any {
            let sizes: Vec<String> = self
                .buffers
                .iter()
                .map(|(name, buf)| format!("{name}: {}", buf.len()))
                .collect();
            debug!(
                "Buffer sizes after flush: {}; {} docs flushed so far",
                sizes.join(", "),
                self.docs_flushed
            );
        }
        Ok(())
    }

    /// Unconditionally flush every non-empty buffer. Used once at the end of
    /// generation to drain remainders.
    pub async fn flush_all(&mut self) -> Result<(), PopulateError> {
        self.maybe_flush(0).await
    }
}

/// Writer that counts documents per collection without retaining them.
/// Backs dry-run mode.
#[derive(Default)]
pub struct NullWriter {
    counts: Mutex<BTreeMap<String, u64>>,
}

impl NullWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents "inserted" per collection so far.
    pub fn counts(&self) -> BTreeMap<String, u64> {
        self.counts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl BulkWriter for NullWriter {
    async fn insert_many(
        &self,
        collection: &str,
        documents: &[Document],
    ) -> Result<u64, PopulateError> {
        let mut counts = self.counts.lock().unwrap();
        *counts.entry(collection.to_string()).or_default() += documents.len() as u64;
        Ok(documents.len() as u64)
    }
}

/// Writer that records every batch in memory. Test double for asserting on
/// exactly what was written and in what order.
#[derive(Default)]
pub struct MemoryWriter {
    batches: Mutex<Vec<(String, Vec<Document>)>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded (collection, batch) pairs in insertion order.
    pub fn batches(&self) -> Vec<(String, Vec<Document>)> {
        self.batches.lock().unwrap().clone()
    }

    /// All documents written to one collection, across batches, in order.
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.batches
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == collection)
            .flat_map(|(_, batch)| batch.iter().cloned())
            .collect()
    }
}

#[async_trait::async_trait]
impl BulkWriter for MemoryWriter {
    async fn insert_many(
        &self,
        collection: &str,
        documents: &[Document],
    ) -> Result<u64, PopulateError> {
        self.batches
            .lock()
            .unwrap()
            .push((collection.to_string(), documents.to_vec()));
        Ok(documents.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[tokio::test]
    async fn test_maybe_flush_respects_threshold() {
        let mut sink = BatchSink::new(MemoryWriter::new());
        for i in 0..5 {
            sink.append("acoll", doc! { "n": i });
        }
        for i in 0..2 {
            sink.append("bcoll", doc! { "n": i });
        }

        sink.maybe_flush(3).await.unwrap();

        // acoll crossed the threshold and was drained; bcoll was left alone.
        let batches = sink.writer.batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].0, "acoll");
        assert_eq!(batches[0].1.len(), 5);
        assert_eq!(sink.buffered(), 2);

        // Post-condition: no buffer at length >= threshold.
        for (_, batch) in &sink.buffers {
            assert!(batch.len() < 3);
        }
    }

    #[tokio::test]
    async fn test_flush_all_drains_everything() {
        let mut sink = BatchSink::new(MemoryWriter::new());
        sink.append("acoll", doc! { "n": 1 });
        sink.append("rels", doc! { "n": 2 });
        sink.append("rels", doc! { "n": 3 });

        sink.flush_all().await.unwrap();

        assert_eq!(sink.buffered(), 0);
        // Exactly one insert call per non-empty buffer.
        let batches = sink.writer.batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(sink.batches_flushed(), 2);
        assert_eq!(sink.docs_flushed(), 3);
    }

    #[tokio::test]
    async fn test_flush_all_skips_empty_buffers() {
        let mut sink = BatchSink::new(MemoryWriter::new());
        sink.append("acoll", doc! { "n": 1 });
        sink.flush_all().await.unwrap();
        // acoll's buffer is now empty; a second drain issues no call for it.
        sink.flush_all().await.unwrap();
        assert_eq!(sink.writer.batches().len(), 1);
    }

    #[tokio::test]
    async fn test_no_document_lost_or_duplicated() {
        let mut sink = BatchSink::new(MemoryWriter::new());
        for i in 0..10 {
            sink.append("acoll", doc! { "n": i });
            sink.maybe_flush(4).await.unwrap();
        }
        sink.flush_all().await.unwrap();

        let docs = sink.writer.documents("acoll");
        assert_eq!(docs.len(), 10);
        for (i, d) in docs.iter().enumerate() {
            assert_eq!(d.get_i32("n").unwrap(), i as i32);
        }
    }

    #[tokio::test]
    async fn test_null_writer_counts() {
        let writer = NullWriter::new();
        writer
            .insert_many("acoll", &[doc! {}, doc! {}])
            .await
            .unwrap();
        writer.insert_many("acoll", &[doc! {}]).await.unwrap();
        assert_eq!(writer.counts()["acoll"], 3);
    }
}
