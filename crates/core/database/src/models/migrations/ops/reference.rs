use devevent_result::Result;

use crate::ReferenceDb;

use super::AbstractMigrations;

#[async_trait]
impl AbstractMigrations for ReferenceDb {
    #[cfg(test)]
    /// Drop the database
    async fn drop_database(&self) {
        self.events.lock().await.clear();
        self.bookings.lock().await.clear();
    }

    /// Nothing to migrate, the reference driver enforces its constraints itself
    async fn migrate_database(&self) -> Result<()> {
        Ok(())
    }
}
