use devevent_result::Result;

use super::AbstractBookings;
use crate::{Booking, MongoDb, PartialBooking};

static COL: &str = "bookings";

#[async_trait]
impl AbstractBookings for MongoDb {
    /// Insert a new booking into the database
    async fn insert_booking(&self, booking: &Booking) -> Result<()> {
        query!(self, insert_one, COL, booking).map(|_| ())
    }

    /// Fetch a booking by its id
    async fn fetch_booking(&self, id: &str) -> Result<Booking> {
        query!(self, find_one_by_id, COL, id)?.ok_or_else(|| create_error!(NotFound))
    }

    /// Fetch all bookings for an event
    async fn fetch_bookings_for_event(&self, event_id: &str) -> Result<Vec<Booking>> {
        query!(
            self,
            find,
            COL,
            doc! {
                "eventId": event_id
            }
        )
    }

    /// Count bookings for an event
    async fn count_bookings_for_event(&self, event_id: &str) -> Result<u64> {
        query!(
            self,
            count_documents,
            COL,
            doc! {
                "eventId": event_id
            }
        )
    }

    /// Update a booking with new information
    async fn update_booking(&self, id: &str, partial: &PartialBooking) -> Result<()> {
        let result = query!(self, update_one_by_id, COL, id, partial)?;
        if result.matched_count == 0 {
            Err(create_error!(NotFound))
        } else {
            Ok(())
        }
    }
}
