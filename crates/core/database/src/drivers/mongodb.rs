use std::ops::Deref;

use devevent_result::Result as DatabaseResult;
use futures::{StreamExt, TryStreamExt};
use mongodb::bson::{doc, to_document, Document};
use mongodb::error::Result;
use mongodb::options::FindOptions;
use mongodb::results::{InsertOneResult, UpdateResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

database_derived!(
    /// MongoDB implementation
    pub struct MongoDb(pub ::mongodb::Client, pub String);
);

impl Deref for MongoDb {
    type Target = mongodb::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[allow(dead_code)]
impl MongoDb {
    /// Get the DevEvent database
    pub fn db(&self) -> mongodb::Database {
        self.database(&self.1)
    }

    /// Get a collection by its name
    pub fn col<T: Send + Sync>(&self, collection: &str) -> mongodb::Collection<T> {
        self.db().collection(collection)
    }

    /// Round-trip to the server so a dead deployment is reported at connect time
    pub async fn ping(&self) -> DatabaseResult<()> {
        self.db()
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|err| {
                create_error!(ConnectionFailed {
                    reason: err.to_string()
                })
            })
    }

    /// Insert one document into a collection
    pub async fn insert_one<T: Serialize + Send + Sync>(
        &self,
        collection: &'static str,
        document: T,
    ) -> Result<InsertOneResult> {
        self.col::<T>(collection).insert_one(document).await
    }

    /// Count documents by projection
    pub async fn count_documents(
        &self,
        collection: &'static str,
        projection: Document,
    ) -> Result<u64> {
        self.col::<Document>(collection)
            .count_documents(projection)
            .await
    }

    /// Find multiple documents in a collection with options
    pub async fn find_with_options<O, T: DeserializeOwned + Unpin + Send + Sync>(
        &self,
        collection: &'static str,
        projection: Document,
        options: O,
    ) -> Result<Vec<T>>
    where
        O: Into<Option<FindOptions>>,
    {
        let cursor = self
            .col::<T>(collection)
            .find(projection)
            .with_options(options)
            .await?;

        if cfg!(debug_assertions) {
            // Hard fail on invalid documents
            cursor.try_collect().await
        } else {
            Ok(cursor
                .filter_map(|s| async move {
                    s.map_err(|err| warn!("Skipping malformed document in {collection}: {err}"))
                        .ok()
                })
                .collect::<Vec<T>>()
                .await)
        }
    }

    /// Find multiple documents in a collection
    pub async fn find<T: DeserializeOwned + Unpin + Send + Sync>(
        &self,
        collection: &'static str,
        projection: Document,
    ) -> Result<Vec<T>> {
        self.find_with_options(collection, projection, None).await
    }

    /// Find one document
    pub async fn find_one<T: DeserializeOwned + Unpin + Send + Sync>(
        &self,
        collection: &'static str,
        projection: Document,
    ) -> Result<Option<T>> {
        self.col::<T>(collection).find_one(projection).await
    }

    /// Find one document by its ID
    pub async fn find_one_by_id<T: DeserializeOwned + Unpin + Send + Sync>(
        &self,
        collection: &'static str,
        id: &str,
    ) -> Result<Option<T>> {
        self.find_one(
            collection,
            doc! {
                "_id": id
            },
        )
        .await
    }

    /// Set the fields of a partial document on the document with the given ID
    pub async fn update_one_by_id<T: Serialize>(
        &self,
        collection: &'static str,
        id: &str,
        partial: T,
    ) -> Result<UpdateResult> {
        self.col::<Document>(collection)
            .update_one(
                doc! {
                    "_id": id
                },
                doc! {
                    "$set": to_document(&partial)?
                },
            )
            .await
    }
}
