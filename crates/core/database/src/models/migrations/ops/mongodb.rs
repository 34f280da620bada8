use devevent_result::Result;

use crate::MongoDb;

use super::AbstractMigrations;

mod init;

#[async_trait]
impl AbstractMigrations for MongoDb {
    #[cfg(test)]
    /// Drop the database
    async fn drop_database(&self) {
        self.db().drop().await.ok();
    }

    /// Create missing collections and make sure every index exists
    async fn migrate_database(&self) -> Result<()> {
        info!("Migrating the database.");

        let list = self
            .list_database_names()
            .await
            .map_err(|_| create_database_error!("list_database_names", &self.1))?;

        if !list.iter().any(|x| x == &self.1) {
            init::create_database(self).await?;
        }

        init::create_indexes(self).await
    }
}
