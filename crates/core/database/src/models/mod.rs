mod bookings;
mod events;
mod migrations;

pub use bookings::*;
pub use events::*;
pub use migrations::*;

#[cfg(feature = "mongodb")]
use crate::MongoDb;
use crate::{Database, ReferenceDb};

pub trait AbstractDatabase:
    Sync
    + Send
    + migrations::AbstractMigrations
    + events::AbstractEvents
    + bookings::AbstractBookings
{
}

impl AbstractDatabase for ReferenceDb {}
#[cfg(feature = "mongodb")]
impl AbstractDatabase for MongoDb {}

impl std::ops::Deref for Database {
    type Target = dyn AbstractDatabase;

    fn deref(&self) -> &Self::Target {
        match &self {
            Database::Reference(dummy) => dummy,
            #[cfg(feature = "mongodb")]
            Database::MongoDb(mongo) => mongo,
        }
    }
}
