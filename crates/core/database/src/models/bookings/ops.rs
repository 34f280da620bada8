use devevent_result::Result;

use crate::{Booking, PartialBooking};

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractBookings: Sync + Send {
    /// Insert a new booking into the database
    async fn insert_booking(&self, booking: &Booking) -> Result<()>;

    /// Fetch a booking by its id
    async fn fetch_booking(&self, id: &str) -> Result<Booking>;

    /// Fetch all bookings for an event
    async fn fetch_bookings_for_event(&self, event_id: &str) -> Result<Vec<Booking>>;

    /// Count bookings for an event
    async fn count_bookings_for_event(&self, event_id: &str) -> Result<u64>;

    /// Update a booking with new information
    async fn update_booking(&self, id: &str, partial: &PartialBooking) -> Result<()>;
}
