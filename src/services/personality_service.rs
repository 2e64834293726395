use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{PersonalityResult, QuizSchema},
        dto::request::AnswerInput,
    },
    repositories::PersonalityResultRepository,
    services::{
        image_resolver::{slugify, ImageResolution, ImageResolver},
        model_service::TextGenerator,
        prompt_builder,
        response_extractor::{extract_json, ExtractionMode},
        schema_validator,
    },
};

pub struct PersonalityService {
    repository: Arc<dyn PersonalityResultRepository>,
    generator: Arc<dyn TextGenerator>,
    image_resolver: Arc<ImageResolver>,
    schema: QuizSchema,
}

impl PersonalityService {
    pub fn new(
        repository: Arc<dyn PersonalityResultRepository>,
        generator: Arc<dyn TextGenerator>,
        image_resolver: Arc<ImageResolver>,
        schema: QuizSchema,
    ) -> Self {
        Self {
            repository,
            generator,
            image_resolver,
            schema,
        }
    }

    /// Runs the answers through the model and replaces whatever result was
    /// stored for `custom_id` before.
    pub async fn generate_result(
        &self,
        custom_id: &str,
        answers: &[AnswerInput],
    ) -> AppResult<PersonalityResult> {
        if answers.is_empty() {
            return Err(AppError::ValidationError(
                "answers must be a non-empty array".to_string(),
            ));
        }

        log::info!(
            "Generating personality result for '{}' from {} answers",
            custom_id,
            answers.len()
        );

        let prompt = prompt_builder::result_prompt(answers, &self.schema);
        let raw = self.generator.generate(&prompt).await?;
        let payload = extract_json(&raw, ExtractionMode::Lenient)?;
        let traits = schema_validator::validate_personality(&payload, &self.schema)?;

        let (image_url, slug) = match self.image_resolver.resolve(&traits.creature_name).await {
            ImageResolution::Found { url, slug } => (url, slug),
            ImageResolution::NotFound => (
                self.image_resolver.placeholder_url().to_string(),
                slugify(&traits.creature_name),
            ),
        };

        let result = PersonalityResult::new(custom_id, traits, &image_url, &slug);
        self.repository.upsert_replace(result).await
    }

    pub async fn get_result(&self, custom_id: &str) -> AppResult<PersonalityResult> {
        self.repository
            .find_by_custom_id(custom_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No personality result for id '{}'", custom_id))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config,
        repositories::personality_result_repository::MockPersonalityResultRepository,
        services::{
            image_resolver::{LookupOutcome, MockArtworkSource, ProbeOutcome},
            model_service::MockTextGenerator,
        },
        test_utils::fixtures::{answers, personality_payload},
    };

    fn resolver(found: bool) -> Arc<ImageResolver> {
        let mut source = MockArtworkSource::new();
        source.expect_probe().returning(move |_| {
            if found {
                ProbeOutcome::Found
            } else {
                ProbeOutcome::NotFound
            }
        });
        source.expect_lookup().returning(|_| LookupOutcome::NotFound);
        Arc::new(ImageResolver::new(Arc::new(source), &Config::test_config()))
    }

    fn service(
        repository: MockPersonalityResultRepository,
        generator: MockTextGenerator,
        artwork_found: bool,
    ) -> PersonalityService {
        PersonalityService::new(
            Arc::new(repository),
            Arc::new(generator),
            resolver(artwork_found),
            QuizSchema::v2(),
        )
    }

    #[actix_rt::test]
    async fn test_generate_result_resolves_artwork_and_upserts() {
        let mut repository = MockPersonalityResultRepository::new();
        repository
            .expect_upsert_replace()
            .times(1)
            .withf(|result| result.custom_id == "session-1" && result.creature_slug == "pikachu")
            .returning(Ok);

        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .withf(|prompt| prompt.contains("\"selectedOption\""))
            .returning(|_| Ok(format!("```json\n{}\n```", personality_payload("Pikachu", "zap"))));

        let result = service(repository, generator, true)
            .generate_result("session-1", &answers(3))
            .await
            .unwrap();

        assert_eq!(result.creature_image, "https://artwork.test/pikachu.jpg");
        assert_eq!(result.traits.roast, "zap");
    }

    #[actix_rt::test]
    async fn test_missing_artwork_uses_placeholder() {
        let mut repository = MockPersonalityResultRepository::new();
        repository.expect_upsert_replace().returning(Ok);

        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Ok(personality_payload("Glorp Mon", "meh").to_string()));

        let result = service(repository, generator, false)
            .generate_result("session-2", &answers(2))
            .await
            .unwrap();

        assert_eq!(result.creature_image, "https://placeholder.test/unknown.png");
        assert_eq!(result.creature_slug, "glorp-mon");
    }

    #[actix_rt::test]
    async fn test_lenient_output_is_accepted() {
        let mut repository = MockPersonalityResultRepository::new();
        repository.expect_upsert_replace().returning(Ok);

        let mut generator = MockTextGenerator::new();
        generator.expect_generate().returning(|_| {
            let mut raw = personality_payload("Eevee", "ok").to_string();
            raw.insert_str(raw.len() - 1, ",");
            Ok(raw)
        });

        let result = service(repository, generator, true)
            .generate_result("session-3", &answers(1))
            .await
            .unwrap();
        assert_eq!(result.traits.creature_name, "Eevee");
    }

    #[actix_rt::test]
    async fn test_incomplete_result_is_not_stored() {
        let mut repository = MockPersonalityResultRepository::new();
        repository.expect_upsert_replace().never();

        let mut generator = MockTextGenerator::new();
        generator.expect_generate().returning(|_| {
            let mut payload = personality_payload("Eevee", "ok");
            payload.as_object_mut().unwrap().remove("briefDescription");
            Ok(payload.to_string())
        });

        let err = service(repository, generator, true)
            .generate_result("session-4", &answers(1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::IncompleteAiResult(_)));
    }

    #[actix_rt::test]
    async fn test_empty_answers_skip_model() {
        let mut repository = MockPersonalityResultRepository::new();
        repository.expect_upsert_replace().never();

        let mut generator = MockTextGenerator::new();
        generator.expect_generate().never();

        let err = service(repository, generator, true)
            .generate_result("session-5", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[actix_rt::test]
    async fn test_get_result_not_found() {
        let mut repository = MockPersonalityResultRepository::new();
        repository.expect_find_by_custom_id().returning(|_| Ok(None));

        let err = service(repository, MockTextGenerator::new(), true)
            .get_result("missing")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
