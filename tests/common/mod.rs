#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tokio::sync::{Mutex, RwLock};

use vibe_quiz_server::{
    app_state::AppState,
    config::{Config, Environment},
    errors::{AppError, AppResult},
    models::domain::{PersonalityResult, QuestionSet, QuizSchema},
    repositories::{PersonalityResultRepository, QuestionSetRepository},
    services::{
        image_resolver::{ArtworkSource, LookupOutcome, ProbeOutcome},
        model_service::TextGenerator,
    },
};

pub const ARTWORK_BASE: &str = "https://artwork.test";
pub const PLACEHOLDER: &str = "https://placeholder.test/unknown.png";

#[derive(Default)]
pub struct InMemoryQuestionSetRepository {
    sets: RwLock<HashMap<String, QuestionSet>>,
}

#[async_trait]
impl QuestionSetRepository for InMemoryQuestionSetRepository {
    async fn find_by_custom_id(&self, custom_id: &str) -> AppResult<Option<QuestionSet>> {
        Ok(self.sets.read().await.get(custom_id).cloned())
    }

    async fn insert_if_absent(&self, set: QuestionSet) -> AppResult<QuestionSet> {
        let mut sets = self.sets.write().await;
        Ok(sets.entry(set.custom_id.clone()).or_insert(set).clone())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

impl InMemoryQuestionSetRepository {
    pub async fn len(&self) -> usize {
        self.sets.read().await.len()
    }
}

#[derive(Default)]
pub struct InMemoryPersonalityResultRepository {
    results: RwLock<HashMap<String, PersonalityResult>>,
}

#[async_trait]
impl PersonalityResultRepository for InMemoryPersonalityResultRepository {
    async fn find_by_custom_id(&self, custom_id: &str) -> AppResult<Option<PersonalityResult>> {
        Ok(self.results.read().await.get(custom_id).cloned())
    }

    async fn upsert_replace(&self, result: PersonalityResult) -> AppResult<PersonalityResult> {
        self.results
            .write()
            .await
            .insert(result.custom_id.clone(), result.clone());
        Ok(result)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

impl InMemoryPersonalityResultRepository {
    pub async fn len(&self) -> usize {
        self.results.read().await.len()
    }
}

/// Replays canned model responses in order and counts calls.
#[derive(Default)]
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<AppResult<String>>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(responses: Vec<AppResult<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(AppError::EmptyModelResponse("script exhausted".into())))
    }
}

/// Artwork exists only for the listed slugs; the lookup API knows nothing.
pub struct FixedArtwork {
    known_slugs: Vec<&'static str>,
}

impl FixedArtwork {
    pub fn new(known_slugs: Vec<&'static str>) -> Self {
        Self { known_slugs }
    }
}

#[async_trait]
impl ArtworkSource for FixedArtwork {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        let known = self
            .known_slugs
            .iter()
            .any(|slug| url == format!("{}/{}.jpg", ARTWORK_BASE, slug));
        if known {
            ProbeOutcome::Found
        } else {
            ProbeOutcome::NotFound
        }
    }

    async fn lookup(&self, _key: &str) -> LookupOutcome {
        LookupOutcome::NotFound
    }
}

pub struct TestContext {
    pub state: AppState,
    pub questions: Arc<InMemoryQuestionSetRepository>,
    pub results: Arc<InMemoryPersonalityResultRepository>,
    pub generator: Arc<ScriptedGenerator>,
}

pub fn test_config(environment: Environment) -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "vibe-quiz-test".to_string(),
        question_sets_collection: "question_sets".to_string(),
        personality_results_collection: "personality_results".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 1997,
        environment,
        model_api_key: "test-key".to_string().into(),
        model_name: "test-model".to_string(),
        model_base_url: "http://localhost:9/v1".to_string(),
        quiz_schema: QuizSchema::v1(),
        artwork_base_url: ARTWORK_BASE.to_string(),
        creature_lookup_base_url: "https://lookup.test".to_string(),
        placeholder_image_url: PLACEHOLDER.to_string(),
        external_http_timeout_secs: 1,
    }
}

pub fn context(environment: Environment, responses: Vec<AppResult<String>>) -> TestContext {
    let questions = Arc::new(InMemoryQuestionSetRepository::default());
    let results = Arc::new(InMemoryPersonalityResultRepository::default());
    let generator = Arc::new(ScriptedGenerator::new(responses));

    let state = AppState::from_parts(
        test_config(environment),
        questions.clone(),
        results.clone(),
        generator.clone(),
        Arc::new(FixedArtwork::new(vec!["pikachu", "snorlax"])),
    );

    TestContext {
        state,
        questions,
        results,
        generator,
    }
}

pub fn questions_output(count: usize, options: usize) -> String {
    let questions: Vec<Value> = (1..=count)
        .map(|q| {
            json!({
                "questionText": format!("Question {q}?"),
                "options": (1..=options).map(|o| format!("Option {q}.{o}")).collect::<Vec<_>>(),
            })
        })
        .collect();
    format!("```json\n{}\n```", json!({ "questions": questions }))
}

pub fn personality_output(creature: &str, roast: &str) -> String {
    let mut object = Map::new();
    for key in QuizSchema::v2().required_result_keys {
        object.insert(key.to_string(), json!(format!("{key} for {creature}")));
    }
    object.insert("pokemonName".to_string(), json!(creature));
    object.insert("roast".to_string(), json!(roast));
    format!("```json\n{}\n```", Value::Object(object))
}

pub fn answers_body() -> Value {
    json!({
        "answers": [
            { "questionText": "Question 1?", "selectedOption": "Option 1.2" },
            { "questionText": "Question 2?", "selectedOption": "Option 2.4" }
        ]
    })
}
