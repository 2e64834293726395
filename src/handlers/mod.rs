pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

use crate::errors::AppError;

pub use health_handler::{health_check, health_check_ready};
pub use quiz_handler::{generate_questions, generate_result, get_personality};

const JSON_BODY_LIMIT: usize = 64 * 1024;

/// JSON extractor settings: bodies that fail to parse (wrong shape,
/// non-array `answers`, too large) become validation errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            AppError::ValidationError(format!("Invalid request data: {}", err)).into()
        })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health_check)
        .service(health_check_ready)
        .service(generate_questions)
        .service(generate_result)
        .service(get_personality);
}
