use devevent_result::Result;

use crate::mongodb::bson::doc;
use crate::mongodb::options::IndexOptions;
use crate::mongodb::IndexModel;
use crate::MongoDb;

/// Collections owned by this crate
const COLLECTIONS: [&str; 2] = ["events", "bookings"];

pub async fn create_database(db: &MongoDb) -> Result<()> {
    info!("Creating database.");
    let database = db.db();

    for collection in COLLECTIONS {
        database
            .create_collection(collection)
            .await
            .map_err(|_| create_database_error!("create_collection", collection))?;
    }

    Ok(())
}

pub async fn create_indexes(db: &MongoDb) -> Result<()> {
    db.col::<bson::Document>("bookings")
        .create_index(
            IndexModel::builder()
                .keys(doc! {
                    "eventId": 1_i32
                })
                .options(
                    IndexOptions::builder()
                        .name("eventId".to_string())
                        .build(),
                )
                .build(),
        )
        .await
        .map_err(|_| create_database_error!("create_index", "bookings"))?;

    db.col::<bson::Document>("events")
        .create_index(
            IndexModel::builder()
                .keys(doc! {
                    "slug": 1_i32
                })
                .options(
                    IndexOptions::builder()
                        .name("slug".to_string())
                        .unique(true)
                        .build(),
                )
                .build(),
        )
        .await
        .map_err(|_| create_database_error!("create_index", "events"))?;

    debug!("Indexes are up to date.");
    Ok(())
}
