use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use std::time::Duration;

use crate::{
    config::Config,
    errors::AppResult,
    models::domain::{PersonalityResult, QuestionSet},
};

const MONGO_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection to the quiz database plus the two collections it serves.
#[derive(Clone)]
pub struct Database {
    client: Client,
    database: mongodb::Database,
    question_sets: Collection<QuestionSet>,
    personality_results: Collection<PersonalityResult>,
}

impl Database {
    /// Connects and pings the deployment.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(MONGO_TIMEOUT);
        options.server_selection_timeout = Some(MONGO_TIMEOUT);

        let db = Self::from_client(Client::with_options(options)?, config);
        db.ping().await?;

        log::info!(
            "Connected to MongoDB database '{}' (question sets: '{}', results: '{}')",
            config.mongo_db_name,
            config.question_sets_collection,
            config.personality_results_collection
        );
        Ok(db)
    }

    fn from_client(client: Client, config: &Config) -> Self {
        let database = client.database(&config.mongo_db_name);
        Self {
            question_sets: database.collection(&config.question_sets_collection),
            personality_results: database.collection(&config.personality_results_collection),
            database,
            client,
        }
    }

    pub fn question_sets(&self) -> Collection<QuestionSet> {
        self.question_sets.clone()
    }

    pub fn personality_results(&self) -> Collection<PersonalityResult> {
        self.personality_results.clone()
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Waits for in-flight operations and closes the connection pool.
    pub async fn shutdown(self) {
        log::info!("Closing MongoDB connections");
        self.client.shutdown().await;
    }
}
