use devevent_result::Result;
use mongodb::options::FindOptions;

use super::AbstractEvents;
use crate::{Event, MongoDb};

static COL: &str = "events";

#[async_trait]
impl AbstractEvents for MongoDb {
    async fn insert_event(&self, event: &Event) -> Result<()> {
        query!(self, insert_one, COL, event).map(|_| ())
    }

    async fn fetch_event(&self, id: &str) -> Result<Event> {
        query!(self, find_one_by_id, COL, id)?.ok_or_else(|| create_error!(NotFound))
    }

    async fn fetch_event_by_slug(&self, slug: &str) -> Result<Event> {
        query!(
            self,
            find_one,
            COL,
            doc! {
                "slug": slug
            }
        )?
        .ok_or_else(|| create_error!(NotFound))
    }

    async fn fetch_events(&self) -> Result<Vec<Event>> {
        query!(
            self,
            find_with_options,
            COL,
            doc! {},
            FindOptions::builder()
                .sort(doc! {
                    "createdAt": -1_i32
                })
                .build()
        )
    }

    async fn event_exists(&self, id: &str) -> Result<bool> {
        query!(
            self,
            count_documents,
            COL,
            doc! {
                "_id": id
            }
        )
        .map(|count| count > 0)
    }
}
