use devevent_result::Result;
use iso8601_timestamp::Timestamp;

use crate::util::regex::RE_EMAIL;
use crate::util::time;
use crate::{Database, EventLookup};

auto_derived!(
    /// Booking of a place at an event
    pub struct Booking {
        /// Booking Id
        #[serde(rename = "_id")]
        pub id: String,

        /// Event this booking is for
        #[serde(rename = "eventId")]
        pub event_id: String,

        /// Email address of the attendee, stored trimmed and lower-cased
        pub email: String,

        /// Creation timestamp
        #[serde(rename = "createdAt")]
        pub created_at: Timestamp,

        /// Last modification timestamp
        #[serde(rename = "updatedAt")]
        pub updated_at: Timestamp,
    }

    /// Changes to apply to an existing booking
    #[derive(Default)]
    pub struct PartialBooking {
        /// Move the booking to another event
        #[serde(rename = "eventId", skip_serializing_if = "Option::is_none")]
        pub event_id: Option<String>,

        /// Change the attendee's email address
        #[serde(skip_serializing_if = "Option::is_none")]
        pub email: Option<String>,

        /// Last modification timestamp, set when the update is saved
        #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
        pub updated_at: Option<Timestamp>,
    }
);

impl Default for Booking {
    fn default() -> Self {
        Self {
            id: Default::default(),
            event_id: Default::default(),
            email: Default::default(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}

impl Booking {
    /// Create a new unsaved booking with a fresh id
    pub fn new(event_id: impl Into<String>, email: impl Into<String>) -> Booking {
        Booking {
            id: ulid::Ulid::new().to_string(),
            event_id: event_id.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    /// Normalise the email address and check the shape of every field
    ///
    /// Does not touch the database, see [`Booking::create`] for the reference check.
    pub fn validate(&mut self) -> Result<()> {
        if self.event_id.trim().is_empty() {
            return Err(create_validation_error!("Event ID is required"));
        }

        self.email = self.email.trim().to_lowercase();
        if self.email.is_empty() {
            return Err(create_validation_error!("Email is required"));
        }

        if !RE_EMAIL.is_match(&self.email) {
            return Err(create_validation_error!(
                "Please provide a valid email address"
            ));
        }

        Ok(())
    }

    /// Make sure the referenced event exists
    async fn verify_event(&self, events: &dyn EventLookup) -> Result<()> {
        if events.exists(&self.event_id).await? {
            Ok(())
        } else {
            Err(create_error!(UnknownEvent))
        }
    }

    /// Apply the set fields of a partial
    pub fn apply_options(&mut self, partial: PartialBooking) {
        if let Some(event_id) = partial.event_id {
            self.event_id = event_id;
        }

        if let Some(email) = partial.email {
            self.email = email;
        }

        if let Some(updated_at) = partial.updated_at {
            self.updated_at = updated_at;
        }
    }

    /// Validate, check the event reference, stamp and insert this booking
    pub async fn create(&mut self, db: &Database, events: &dyn EventLookup) -> Result<()> {
        self.validate()?;
        self.verify_event(events).await?;

        let now = time::now();
        self.created_at = now;
        self.updated_at = now;

        db.insert_booking(self).await?;
        debug!("Booked {} onto event {}.", self.id, self.event_id);

        Ok(())
    }

    /// Apply and persist changes to this booking
    ///
    /// The event reference is only checked again if the update moves the
    /// booking to a different event.
    pub async fn update(
        &mut self,
        db: &Database,
        events: &dyn EventLookup,
        partial: PartialBooking,
    ) -> Result<()> {
        let mut updated = self.clone();
        updated.apply_options(PartialBooking {
            updated_at: None,
            ..partial.clone()
        });
        updated.validate()?;

        if updated.event_id != self.event_id {
            updated.verify_event(events).await?;
        }

        updated.updated_at = time::now();

        let changes = PartialBooking {
            event_id: partial.event_id.map(|_| updated.event_id.clone()),
            email: partial.email.map(|_| updated.email.clone()),
            updated_at: Some(updated.updated_at),
        };

        db.update_booking(&self.id, &changes).await?;
        *self = updated;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use devevent_result::{ErrorType, Result};
    use iso8601_timestamp::Timestamp;

    use crate::{Booking, Database, Event, EventLookup, PartialBooking};

    /// Counts lookups before delegating to the database
    struct CountingLookup {
        db: Database,
        calls: AtomicUsize,
    }

    impl CountingLookup {
        fn new(db: &Database) -> CountingLookup {
            CountingLookup {
                db: db.clone(),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EventLookup for CountingLookup {
        async fn exists(&self, event_id: &str) -> Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.db.exists(event_id).await
        }
    }

    /// Lookup whose backing store is unreachable
    struct UnreachableLookup;

    #[async_trait]
    impl EventLookup for UnreachableLookup {
        async fn exists(&self, _: &str) -> Result<bool> {
            Err(create_database_error!("count_documents", "events"))
        }
    }

    async fn event(db: &Database, title: &str) -> Event {
        let mut event = Event::new(title, "An event to book");
        event.create(db).await.unwrap();
        event
    }

    fn validation_message(booking: &mut Booking) -> String {
        match booking.validate().unwrap_err().error_type {
            ErrorType::FailedValidation { error } => error,
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn validation_normalises_email() {
        let mut booking = Booking::new("event", "  Ada.Lovelace@Example.COM ");
        booking.validate().unwrap();
        assert_eq!(booking.email, "ada.lovelace@example.com");
    }

    #[test]
    fn validation_rejects_bad_fields() {
        assert_eq!(
            validation_message(&mut Booking::new("", "ada@example.com")),
            "Event ID is required"
        );
        assert_eq!(
            validation_message(&mut Booking::new("event", "   ")),
            "Email is required"
        );

        for email in ["not-an-email", "ada@example", "ada @example.com", "@example.com"] {
            assert_eq!(
                validation_message(&mut Booking::new("event", email)),
                "Please provide a valid email address"
            );
        }
    }

    #[async_std::test]
    async fn crud() {
        database_test!(|db| async move {
            let event = event(&db, "Rust Meetup").await;
            let lookup = CountingLookup::new(&db);

            let mut booking = Booking::new(&event.id, "Grace@Example.com");
            booking.create(&db, &lookup).await.unwrap();

            assert_eq!(lookup.calls(), 1);
            assert_eq!(booking.email, "grace@example.com");
            assert_ne!(booking.created_at, Timestamp::UNIX_EPOCH);
            assert_eq!(booking.created_at, booking.updated_at);

            let fetched = db.fetch_booking(&booking.id).await.unwrap();
            assert_eq!(fetched, booking);

            let for_event = db.fetch_bookings_for_event(&event.id).await.unwrap();
            assert_eq!(for_event, vec![booking.clone()]);
            assert_eq!(db.count_bookings_for_event(&event.id).await.unwrap(), 1);
        });
    }

    #[async_std::test]
    async fn rejects_unknown_event_without_persisting() {
        database_test!(|db| async move {
            let mut booking = Booking::new("01ARZ3NDEKTSV4RRFFQ69G5FAV", "ada@example.com");
            let error = booking.create(&db, &db).await.unwrap_err();

            assert_eq!(error.error_type, ErrorType::UnknownEvent);
            assert!(db.fetch_booking(&booking.id).await.is_err());
            assert_eq!(
                db.count_bookings_for_event("01ARZ3NDEKTSV4RRFFQ69G5FAV")
                    .await
                    .unwrap(),
                0
            );
        });
    }

    #[async_std::test]
    async fn rejects_invalid_email_before_lookup() {
        database_test!(|db| async move {
            let event = event(&db, "Rust Meetup").await;
            let lookup = CountingLookup::new(&db);

            let mut booking = Booking::new(&event.id, "not-an-email");
            let error = booking.create(&db, &lookup).await.unwrap_err();

            assert!(matches!(error.error_type, ErrorType::FailedValidation { .. }));
            assert_eq!(lookup.calls(), 0);
            assert!(db.fetch_booking(&booking.id).await.is_err());
        });
    }

    #[async_std::test]
    async fn propagates_lookup_failure() {
        database_test!(|db| async move {
            let mut booking = Booking::new("event", "ada@example.com");
            let error = booking.create(&db, &UnreachableLookup).await.unwrap_err();

            assert!(matches!(error.error_type, ErrorType::DatabaseError { .. }));
            assert!(db.fetch_booking(&booking.id).await.is_err());
        });
    }

    #[async_std::test]
    async fn update_skips_lookup_when_event_is_unchanged() {
        database_test!(|db| async move {
            let event = event(&db, "Rust Meetup").await;
            let lookup = CountingLookup::new(&db);

            let mut booking = Booking::new(&event.id, "ada@example.com");
            booking.create(&db, &lookup).await.unwrap();
            let created_at = booking.created_at;

            booking
                .update(
                    &db,
                    &lookup,
                    PartialBooking {
                        email: Some(" ADA@lovelace.dev ".to_string()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();

            booking
                .update(
                    &db,
                    &lookup,
                    PartialBooking {
                        event_id: Some(event.id.clone()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();

            assert_eq!(lookup.calls(), 1);
            assert_eq!(booking.email, "ada@lovelace.dev");
            assert_eq!(booking.created_at, created_at);

            let fetched = db.fetch_booking(&booking.id).await.unwrap();
            assert_eq!(fetched, booking);
        });
    }

    #[async_std::test]
    async fn update_checks_new_event() {
        database_test!(|db| async move {
            let first = event(&db, "Rust Meetup").await;
            let second = event(&db, "Rust Conf").await;
            let lookup = CountingLookup::new(&db);

            let mut booking = Booking::new(&first.id, "ada@example.com");
            booking.create(&db, &lookup).await.unwrap();

            let error = booking
                .update(
                    &db,
                    &lookup,
                    PartialBooking {
                        event_id: Some("01ARZ3NDEKTSV4RRFFQ69G5FAV".to_string()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap_err();

            assert_eq!(error.error_type, ErrorType::UnknownEvent);
            assert_eq!(booking.event_id, first.id);
            assert_eq!(db.fetch_booking(&booking.id).await.unwrap().event_id, first.id);

            booking
                .update(
                    &db,
                    &lookup,
                    PartialBooking {
                        event_id: Some(second.id.clone()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();

            assert_eq!(lookup.calls(), 3);
            assert_eq!(db.count_bookings_for_event(&first.id).await.unwrap(), 0);
            assert_eq!(db.count_bookings_for_event(&second.id).await.unwrap(), 1);
        });
    }
}
