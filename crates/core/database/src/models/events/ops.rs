use devevent_result::Result;

use crate::{Database, Event};

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractEvents: Sync + Send {
    /// Insert a new event into the database
    async fn insert_event(&self, event: &Event) -> Result<()>;

    /// Fetch an event by its id
    async fn fetch_event(&self, id: &str) -> Result<Event>;

    /// Fetch an event by its slug
    async fn fetch_event_by_slug(&self, slug: &str) -> Result<Event>;

    /// Fetch all events, newest first
    async fn fetch_events(&self) -> Result<Vec<Event>>;

    /// Check whether an event with the given id exists
    async fn event_exists(&self, id: &str) -> Result<bool>;
}

/// The one question documents referencing an event need answered
#[async_trait]
pub trait EventLookup: Sync + Send {
    /// Whether an event with this id exists
    async fn exists(&self, event_id: &str) -> Result<bool>;
}

#[async_trait]
impl EventLookup for Database {
    async fn exists(&self, event_id: &str) -> Result<bool> {
        self.event_exists(event_id).await
    }
}
