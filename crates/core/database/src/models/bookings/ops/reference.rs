use devevent_result::Result;

use super::AbstractBookings;
use crate::{Booking, PartialBooking, ReferenceDb};

#[async_trait]
impl AbstractBookings for ReferenceDb {
    /// Insert a new booking into the database
    async fn insert_booking(&self, booking: &Booking) -> Result<()> {
        let mut bookings = self.bookings.lock().await;
        if bookings.contains_key(&booking.id) {
            Err(create_database_error!("insert", "booking"))
        } else {
            bookings.insert(booking.id.to_string(), booking.clone());
            Ok(())
        }
    }

    /// Fetch a booking by its id
    async fn fetch_booking(&self, id: &str) -> Result<Booking> {
        let bookings = self.bookings.lock().await;
        bookings
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(NotFound))
    }

    /// Fetch all bookings for an event
    async fn fetch_bookings_for_event(&self, event_id: &str) -> Result<Vec<Booking>> {
        let bookings = self.bookings.lock().await;
        Ok(bookings
            .values()
            .filter(|booking| booking.event_id == event_id)
            .cloned()
            .collect())
    }

    /// Count bookings for an event
    async fn count_bookings_for_event(&self, event_id: &str) -> Result<u64> {
        let bookings = self.bookings.lock().await;
        Ok(bookings
            .values()
            .filter(|booking| booking.event_id == event_id)
            .count() as u64)
    }

    /// Update a booking with new information
    async fn update_booking(&self, id: &str, partial: &PartialBooking) -> Result<()> {
        let mut bookings = self.bookings.lock().await;
        if let Some(booking) = bookings.get_mut(id) {
            booking.apply_options(partial.clone());
            Ok(())
        } else {
            Err(create_error!(NotFound))
        }
    }
}
