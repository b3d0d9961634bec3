//! Hierarchical graph fixture-data populator for MongoDB load testing.
//!
//! Builds a multi-level hierarchy of typed node collections linked by typed
//! relationship documents and bulk-inserts it into MongoDB in bounded-size
//! batches. The root collection is `acoll` and each level below it takes the
//! next letter (`bcoll`, `ccoll`, ...); a single `rels` collection holds every
//! edge, typed by the letters of the levels it links ("AB", "BC", ...).
//!
//! # Architecture
//!
//! ```text
//! GraphPopulator (driver)
//!        │  per root node
//!        ▼
//! extend_hierarchy ── EntityFactory ── Pool (uuids / uniform / binomial)
//!        │                                      └ WordCorpus
//!        ▼
//!    BatchSink ── threshold crossed ──► BulkWriter (MongoBackend, ...)
//! ```
//!
//! Each node below the root draws its fan-out from a binomial distribution, so
//! document counts grow roughly geometrically with depth. Generation is
//! single-threaded and synchronous; flushes are blocking and strictly ordered
//! within each collection.

pub mod args;
pub mod corpus;
pub mod document;
pub mod error;
pub mod hierarchy;
pub mod levels;
pub mod mongo;
pub mod pool;
pub mod populator;
pub mod sink;

// Re-exports for convenience
pub use args::PopulateArgs;
pub use corpus::WordCorpus;
pub use document::{EntityFactory, NodeDoc, RelDoc};
pub use error::PopulateError;
pub use hierarchy::{extend_hierarchy, SequenceCounter};
pub use levels::{LevelScheme, REL_COLLECTION};
pub use mongo::MongoBackend;
pub use pool::Pool;
pub use populator::{GraphPopulator, PopulateMetrics};
pub use sink::{BatchSink, BulkWriter, MemoryWriter, NullWriter};
