use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::domain::{QuestionSet, QuizSchema},
    repositories::QuestionSetRepository,
    services::{
        model_service::TextGenerator,
        prompt_builder,
        response_extractor::{extract_json, ExtractionMode},
        schema_validator,
    },
};

pub struct QuizService {
    repository: Arc<dyn QuestionSetRepository>,
    generator: Arc<dyn TextGenerator>,
    schema: QuizSchema,
}

impl QuizService {
    pub fn new(
        repository: Arc<dyn QuestionSetRepository>,
        generator: Arc<dyn TextGenerator>,
        schema: QuizSchema,
    ) -> Self {
        Self {
            repository,
            generator,
            schema,
        }
    }

    /// Returns the stored question set for `custom_id`, generating and
    /// storing one first if none exists.
    pub async fn get_or_generate_questions(&self, custom_id: &str) -> AppResult<QuestionSet> {
        if let Some(existing) = self.repository.find_by_custom_id(custom_id).await? {
            log::debug!("Serving stored question set for '{}'", custom_id);
            return Ok(existing);
        }

        log::info!(
            "Generating question set for '{}' (schema v{})",
            custom_id,
            self.schema.version
        );

        let prompt = prompt_builder::question_prompt(&self.schema);
        let raw = self.generator.generate(&prompt).await?;
        let payload = extract_json(&raw, ExtractionMode::Strict)?;
        let questions = schema_validator::validate_questions(&payload, &self.schema)?;

        self.repository
            .insert_if_absent(QuestionSet::new(custom_id, questions))
            .await
    }

    pub async fn storage_ready(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
