use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::{ApiError, AppError, AppResult},
    repositories::{
        MongoPersonalityResultRepository, MongoQuestionSetRepository, PersonalityResultRepository,
        QuestionSetRepository,
    },
    services::{
        image_resolver::{ArtworkSource, HttpArtworkSource, ImageResolver},
        model_service::{ChatModelService, TextGenerator},
        personality_service::PersonalityService,
        quiz_service::QuizService,
    },
};

/// Everything the handlers need, built once at startup and shared by
/// cloning `Arc` handles.
#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub personality_service: Arc<PersonalityService>,
    pub config: Arc<Config>,
    db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let question_sets = Arc::new(MongoQuestionSetRepository::new(&db));
        question_sets.ensure_indexes().await?;

        let personality_results = Arc::new(MongoPersonalityResultRepository::new(&db));
        personality_results.ensure_indexes().await?;

        let generator = Arc::new(ChatModelService::new(&config));
        let artwork = Arc::new(HttpArtworkSource::new(&config));

        let mut state = Self::from_parts(
            config,
            question_sets,
            personality_results,
            generator,
            artwork,
        );
        state.db = Some(db);
        Ok(state)
    }

    /// Wires the services from already-built collaborators. Used by `new`
    /// and by tests that swap in in-memory stores and stub clients.
    pub fn from_parts(
        config: Config,
        question_sets: Arc<dyn QuestionSetRepository>,
        personality_results: Arc<dyn PersonalityResultRepository>,
        generator: Arc<dyn TextGenerator>,
        artwork: Arc<dyn ArtworkSource>,
    ) -> Self {
        let image_resolver = Arc::new(ImageResolver::new(artwork, &config));

        let quiz_service = Arc::new(QuizService::new(
            question_sets,
            generator.clone(),
            config.quiz_schema.clone(),
        ));
        let personality_service = Arc::new(PersonalityService::new(
            personality_results,
            generator,
            image_resolver,
            config.quiz_schema.clone(),
        ));

        Self {
            quiz_service,
            personality_service,
            config: Arc::new(config),
            db: None,
        }
    }

    /// Attaches the environment's detail policy to a service error.
    pub fn api_error(&self, error: AppError) -> ApiError {
        ApiError::new(error, self.config.environment.exposes_error_details())
    }

    pub async fn shutdown(self) {
        if let Some(db) = self.db {
            db.shutdown().await;
        }
    }
}
