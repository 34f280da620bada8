use devevent_result::Result;

use super::AbstractEvents;
use crate::{Event, ReferenceDb};

#[async_trait]
impl AbstractEvents for ReferenceDb {
    async fn insert_event(&self, event: &Event) -> Result<()> {
        let mut events = self.events.lock().await;
        if events.contains_key(&event.id) || events.values().any(|e| e.slug == event.slug) {
            Err(create_database_error!("insert", "event"))
        } else {
            events.insert(event.id.to_string(), event.clone());
            Ok(())
        }
    }

    async fn fetch_event(&self, id: &str) -> Result<Event> {
        let events = self.events.lock().await;
        events
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(NotFound))
    }

    async fn fetch_event_by_slug(&self, slug: &str) -> Result<Event> {
        let events = self.events.lock().await;
        events
            .values()
            .find(|event| event.slug == slug)
            .cloned()
            .ok_or_else(|| create_error!(NotFound))
    }

    async fn fetch_events(&self) -> Result<Vec<Event>> {
        let events = self.events.lock().await;
        let mut events: Vec<Event> = events.values().cloned().collect();
        events.sort_by(|a, b| (*b.created_at).cmp(&*a.created_at));
        Ok(events)
    }

    async fn event_exists(&self, id: &str) -> Result<bool> {
        Ok(self.events.lock().await.contains_key(id))
    }
}
