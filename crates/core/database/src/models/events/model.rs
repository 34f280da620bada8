use devevent_result::Result;
use iso8601_timestamp::Timestamp;

use crate::util::regex::RE_SLUG_SEPARATOR;
use crate::util::time;
use crate::Database;

auto_derived!(
    /// How an event is attended
    #[serde(rename_all = "lowercase")]
    pub enum EventMode {
        Online,
        Offline,
        Hybrid,
    }

    /// Event
    pub struct Event {
        /// Event Id
        #[serde(rename = "_id")]
        pub id: String,

        /// Event title
        pub title: String,

        /// URL-safe identifier derived from the title
        pub slug: String,

        /// Event description
        pub description: String,

        /// Venue name
        #[serde(default)]
        pub venue: String,

        /// City or address
        #[serde(default)]
        pub location: String,

        /// Date as entered by the organiser
        #[serde(default)]
        pub date: String,

        /// Time as entered by the organiser
        #[serde(default)]
        pub time: String,

        /// How the event is attended
        #[serde(default)]
        pub mode: EventMode,

        /// Who is running the event
        #[serde(default)]
        pub organizer: String,

        /// Tags
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub tags: Vec<String>,

        /// Creation timestamp
        #[serde(rename = "createdAt")]
        pub created_at: Timestamp,

        /// Last modification timestamp
        #[serde(rename = "updatedAt")]
        pub updated_at: Timestamp,
    }
);

impl Default for EventMode {
    fn default() -> Self {
        Self::Offline
    }
}

impl Default for Event {
    fn default() -> Self {
        Self {
            id: Default::default(),
            title: Default::default(),
            slug: Default::default(),
            description: Default::default(),
            venue: Default::default(),
            location: Default::default(),
            date: Default::default(),
            time: Default::default(),
            mode: Default::default(),
            organizer: Default::default(),
            tags: Default::default(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}

/// Turn a title into a lower-case, dash separated slug
pub fn slugify(title: &str) -> String {
    RE_SLUG_SEPARATOR
        .replace_all(&title.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

impl Event {
    /// Create a new unsaved event with a fresh id
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Event {
        Event {
            id: ulid::Ulid::new().to_string(),
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Normalise fields and check required ones are present
    pub fn validate(&mut self) -> Result<()> {
        for field in [
            &mut self.title,
            &mut self.description,
            &mut self.venue,
            &mut self.location,
            &mut self.organizer,
        ] {
            *field = field.trim().to_string();
        }

        self.tags = self
            .tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        if self.title.is_empty() {
            return Err(create_validation_error!("Title is required"));
        }

        if self.description.is_empty() {
            return Err(create_validation_error!("Description is required"));
        }

        Ok(())
    }

    /// Validate, derive the slug, stamp and insert this event
    pub async fn create(&mut self, db: &Database) -> Result<()> {
        self.validate()?;

        self.slug = slugify(&self.title);
        if self.slug.is_empty() {
            return Err(create_validation_error!(
                "Title must contain at least one letter or digit"
            ));
        }

        let now = time::now();
        self.created_at = now;
        self.updated_at = now;

        db.insert_event(self).await?;
        debug!("Created event {} ({}).", self.id, self.slug);

        Ok(())
    }
}
