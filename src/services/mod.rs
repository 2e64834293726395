pub mod image_resolver;
pub mod model_service;
pub mod personality_service;
pub mod prompt_builder;
pub mod quiz_service;
pub mod response_extractor;
pub mod schema_validator;
