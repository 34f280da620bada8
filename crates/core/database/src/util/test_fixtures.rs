use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::from_str;

use crate::{Booking, Database, Event};

static RE_ID: Lazy<Regex> = Lazy::new(|| Regex::new("__ID:(\\d+)__").unwrap());

#[derive(Debug, Deserialize)]
#[serde(tag = "_object_type")]
enum LoadedFixture {
    Event(Event),
    Booking(Booking),
}

pub async fn load_fixture(db: &Database, input: &str) -> HashMap<String, String> {
    let mut ids = HashMap::<String, String>::new();
    let input = RE_ID.replace_all(input, |cap: &Captures| {
        let d = cap.get(1).unwrap().as_str();

        ids.entry(d.to_string())
            .or_insert_with(|| ulid::Ulid::new().to_string())
            .clone()
    });

    // Deserialise the fixtures
    let items: Vec<LoadedFixture> = from_str(&input).expect("Failed to deserialise fixture");

    // Fixtures are inserted as-is, bypassing validation and reference checks
    for item in items {
        match item {
            LoadedFixture::Event(event) => db.insert_event(&event).await.unwrap(),
            LoadedFixture::Booking(booking) => db.insert_booking(&booking).await.unwrap(),
        }
    }

    // Return IDs for ease of use
    ids
}

#[async_trait]
pub trait FetchFixture {
    async fn event(&self, db: &Database, d: usize) -> Event;
    async fn booking(&self, db: &Database, d: usize) -> Booking;
}

#[async_trait]
impl FetchFixture for HashMap<String, String> {
    async fn event(&self, db: &Database, d: usize) -> Event {
        db.fetch_event(self.get(&d.to_string()).unwrap())
            .await
            .unwrap()
    }

    async fn booking(&self, db: &Database, d: usize) -> Booking {
        db.fetch_booking(self.get(&d.to_string()).unwrap())
            .await
            .unwrap()
    }
}

#[macro_export]
macro_rules! fixture {
    ( $database:expr, $name:expr, $( $variable:ident $type:ident $id:literal )+ ) => {
        use $crate::util::test_fixtures::FetchFixture;

        let fixtures = $crate::util::test_fixtures::load_fixture(
            &$database,
            include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/", $name, ".json")),
        )
        .await;

        $(
            let $variable = fixtures.$type(&$database, $id).await;
        )+
    };
}

#[cfg(test)]
mod tests {
    use crate::{Booking, EventLookup, PartialBooking};

    #[async_std::test]
    async fn loads_event_with_bookings() {
        database_test!(|db| async move {
            fixture!(db, "event_with_bookings",
                event event 0
                ada booking 1
                grace booking 2);

            assert_eq!(event.slug, "rust-meetup");
            assert_eq!(ada.event_id, event.id);
            assert_eq!(grace.email, "grace@example.com");
            assert_eq!(db.count_bookings_for_event(&event.id).await.unwrap(), 2);
            assert!(db.exists(&event.id).await.unwrap());

            let mut ada: Booking = ada;
            let created_at = ada.created_at;
            ada.update(
                &db,
                &db,
                PartialBooking {
                    email: Some("ada@lovelace.dev".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

            assert_eq!(ada.created_at, created_at);
            assert_ne!(ada.updated_at, created_at);
            assert_eq!(db.fetch_booking(&ada.id).await.unwrap(), ada);
        });
    }
}
