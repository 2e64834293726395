use async_trait::async_trait;
use mongodb::{
    bson::doc,
    options::{IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::PersonalityResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonalityResultRepository: Send + Sync {
    async fn find_by_custom_id(&self, custom_id: &str) -> AppResult<Option<PersonalityResult>>;
    /// Replaces the whole stored document for the id, creating it if needed.
    async fn upsert_replace(&self, result: PersonalityResult) -> AppResult<PersonalityResult>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoPersonalityResultRepository {
    collection: Collection<PersonalityResult>,
}

impl MongoPersonalityResultRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.personality_results(),
        }
    }
}

#[async_trait]
impl PersonalityResultRepository for MongoPersonalityResultRepository {
    async fn find_by_custom_id(&self, custom_id: &str) -> AppResult<Option<PersonalityResult>> {
        let result = self
            .collection
            .find_one(doc! { "customId": custom_id })
            .await?;
        Ok(result)
    }

    async fn upsert_replace(&self, result: PersonalityResult) -> AppResult<PersonalityResult> {
        let filter = doc! { "customId": &result.custom_id };
        let options = ReplaceOptions::builder().upsert(true).build();

        let outcome = self
            .collection
            .replace_one(filter, &result)
            .with_options(options)
            .await?;

        log::debug!(
            "Upserted personality result '{}' (matched {}, upserted {})",
            result.custom_id,
            outcome.matched_count,
            outcome.upserted_id.is_some()
        );

        Ok(result)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for personality results collection");

        let custom_id_index = IndexModel::builder()
            .keys(doc! { "customId": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("custom_id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(custom_id_index).await?;

        log::info!("Successfully created indexes for personality results collection");
        Ok(())
    }
}
