use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_document},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::QuestionSet,
};

const DUPLICATE_KEY_CODE: i32 = 11000;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionSetRepository: Send + Sync {
    async fn find_by_custom_id(&self, custom_id: &str) -> AppResult<Option<QuestionSet>>;
    /// Stores `set` unless one already exists for its id, and returns the
    /// set that ends up stored.
    async fn insert_if_absent(&self, set: QuestionSet) -> AppResult<QuestionSet>;
    async fn ensure_indexes(&self) -> AppResult<()>;
    async fn ping(&self) -> AppResult<()>;
}

pub struct MongoQuestionSetRepository {
    db: Database,
    collection: Collection<QuestionSet>,
}

impl MongoQuestionSetRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            collection: db.question_sets(),
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        _ => false,
    }
}

#[async_trait]
impl QuestionSetRepository for MongoQuestionSetRepository {
    async fn find_by_custom_id(&self, custom_id: &str) -> AppResult<Option<QuestionSet>> {
        let set = self
            .collection
            .find_one(doc! { "customId": custom_id })
            .await?;
        Ok(set)
    }

    async fn insert_if_absent(&self, set: QuestionSet) -> AppResult<QuestionSet> {
        let filter = doc! { "customId": &set.custom_id };
        let mut fields = to_document(&set)?;
        fields.remove("customId");
        let update = doc! { "$setOnInsert": fields };
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let stored = match self
            .collection
            .find_one_and_update(filter.clone(), update)
            .with_options(options)
            .await
        {
            Ok(stored) => stored,
            // Two concurrent upserts for a fresh id: the loser reads the winner's set.
            Err(err) if is_duplicate_key(&err) => self.collection.find_one(filter).await?,
            Err(err) => return Err(err.into()),
        };

        stored.ok_or_else(|| {
            AppError::InternalError(format!(
                "Question set '{}' missing after upsert",
                set.custom_id
            ))
        })
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for question sets collection");

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

        log::info!("Successfully created indexes for question sets collection");
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        self.db.ping().await
    }
}
