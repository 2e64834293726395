use std::{env, fmt, str::FromStr};

use secrecy::{ExposeSecret, SecretString};

use crate::{
    errors::{AppError, AppResult},
    models::domain::QuizSchema,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Anything other than an explicit "development" is treated as production.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            _ => Environment::Production,
        }
    }

    pub fn exposes_error_details(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub question_sets_collection: String,
    pub personality_results_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub environment: Environment,
    pub model_api_key: SecretString,
    pub model_name: String,
    pub model_base_url: String,
    pub quiz_schema: QuizSchema,
    pub artwork_base_url: String,
    pub creature_lookup_base_url: String,
    pub placeholder_image_url: String,
    pub external_http_timeout_secs: u64,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Reads a numeric variable, falling back to `default` only when it is unset.
fn parse_var<T: FromStr>(key: &str, default: T) -> AppResult<T> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            AppError::ValidationError(format!("{} must be a number, got '{}'", key, raw))
        }),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        let environment = env::var("APP_ENV")
            .or_else(|_| env::var("NODE_ENV"))
            .map(|value| Environment::parse(&value))
            .unwrap_or(Environment::Production);

        let quiz_schema = match env::var("QUIZ_SCHEMA_VERSION") {
            Ok(version) => QuizSchema::from_version(&version)?,
            Err(_) => QuizSchema::default(),
        };

        Ok(Self {
            mongo_conn_string: var_or("MONGO_CONN_STRING", "mongodb://localhost:27017"),
            mongo_db_name: var_or("MONGO_DB_NAME", "vibe-quiz-local"),
            question_sets_collection: var_or("QUESTION_SETS_COLLECTION", "question_sets"),
            personality_results_collection: var_or(
                "PERSONALITY_RESULTS_COLLECTION",
                "personality_results",
            ),
            web_server_host: var_or("WEB_SERVER_HOST", "127.0.0.1"),
            web_server_port: parse_var("PORT", 1997)?,
            environment,
            model_api_key: SecretString::from(
                env::var("MODEL_API_KEY")
                    .or_else(|_| env::var("GEMINI_API_KEY"))
                    .unwrap_or_default(),
            ),
            model_name: var_or("MODEL_NAME", "gemini-2.0-flash"),
            model_base_url: var_or(
                "MODEL_BASE_URL",
                "https://generativelanguage.googleapis.com/v1beta/openai",
            ),
            quiz_schema,
            artwork_base_url: var_or("ARTWORK_BASE_URL", "https://img.pokemondb.net/artwork/large"),
            creature_lookup_base_url: var_or(
                "CREATURE_LOOKUP_BASE_URL",
                "https://pokeapi.co/api/v2/pokemon",
            ),
            placeholder_image_url: var_or(
                "PLACEHOLDER_IMAGE_URL",
                "https://placehold.co/475x475?text=%3F",
            ),
            external_http_timeout_secs: parse_var("EXTERNAL_HTTP_TIMEOUT_SECS", 10)?,
        })
    }

    /// Rejects configuration the server cannot start with.
    pub fn validate(&self) -> AppResult<()> {
        if self.model_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ValidationError(
                "MODEL_API_KEY (or GEMINI_API_KEY) must be set".to_string(),
            ));
        }

        if self.web_server_port == 0 {
            return Err(AppError::ValidationError(
                "PORT must be a non-zero port number".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "vibe-quiz-test".to_string(),
            question_sets_collection: "question_sets".to_string(),
            personality_results_collection: "personality_results".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 1997,
            environment: Environment::Development,
            model_api_key: SecretString::from("test_model_key".to_string()),
            model_name: "test-model".to_string(),
            model_base_url: "http://localhost:9/v1".to_string(),
            quiz_schema: QuizSchema::v1(),
            artwork_base_url: "https://artwork.test".to_string(),
            creature_lookup_base_url: "https://lookup.test".to_string(),
            placeholder_image_url: "https://placeholder.test/unknown.png".to_string(),
            external_http_timeout_secs: 1,
        }
    }
}
