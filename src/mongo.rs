//! MongoDB implementation of the bulk-write backend.

use crate::error::PopulateError;
use crate::sink::BulkWriter;
use bson::Document;
use mongodb::{Client, Collection, Database};
use tracing::info;

/// MongoDB-backed document store.
pub struct MongoBackend {
    database: Database,
}

impl MongoBackend {
    /// Connect to MongoDB and verify the connection.
    pub async fn connect(uri: &str, database_name: &str) -> Result<Self, PopulateError> {
        let client = Client::with_uri_str(uri).await?;
        let database = client.database(database_name);

        // Test connection
        database.list_collection_names().await?;

        info!("Connected to MongoDB database '{database_name}'");
        Ok(Self { database })
    }

    /// Create a backend from an existing database handle.
    pub fn with_database(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection(name)
    }

    /// Drop the named collections if they exist.
    pub async fn drop_collections(&self, names: &[String]) -> Result<(), PopulateError> {
        for name in names {
            info!("Dropping collection: {name}");
            self.collection(name).drop().await?;
        }
        Ok(())
    }

    /// Document count for a collection.
    pub async fn document_count(&self, name: &str) -> Result<u64, PopulateError> {
        let count = self.collection(name).count_documents(bson::doc! {}).await?;
        Ok(count)
    }
}

#[async_trait::async_trait]
impl BulkWriter for MongoBackend {
    async fn insert_many(
        &self,
        collection: &str,
        documents: &[Document],
    ) -> Result<u64, PopulateError> {
        if documents.is_empty() {
            return Ok(0);
        }
        let result = self.collection(collection).insert_many(documents).await?;
        Ok(result.inserted_ids.len() as u64)
    }
}
