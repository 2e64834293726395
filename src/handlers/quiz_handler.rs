use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::{ApiError, AppError, AppResult},
    models::dto::{
        request::SubmitAnswersRequest,
        response::{PersonalityResultDto, QuestionSetDto},
    },
};

const MAX_SESSION_ID_LEN: usize = 128;

fn session_id(raw: &str) -> AppResult<&str> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(AppError::ValidationError("Missing ID parameter".to_string()));
    }
    if id.len() > MAX_SESSION_ID_LEN {
        return Err(AppError::ValidationError(format!(
            "ID parameter must be at most {} characters",
            MAX_SESSION_ID_LEN
        )));
    }
    Ok(id)
}

#[post("/api/{id}/generate")]
pub async fn generate_questions(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = session_id(&id).map_err(|e| state.api_error(e))?;

    let set = state
        .quiz_service
        .get_or_generate_questions(id)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(HttpResponse::Ok().json(QuestionSetDto::from(set)))
}

#[post("/api/{id}/result")]
pub async fn generate_result(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitAnswersRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = session_id(&id).map_err(|e| state.api_error(e))?;
    request
        .validate()
        .map_err(|e| state.api_error(AppError::from(e)))?;

    let result = state
        .personality_service
        .generate_result(id, &request.answers)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(HttpResponse::Ok().json(PersonalityResultDto::from(result)))
}

#[get("/api/{id}/personality")]
pub async fn get_personality(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = session_id(&id).map_err(|e| state.api_error(e))?;

    let result = state
        .personality_service
        .get_result(id)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(HttpResponse::Ok().json(PersonalityResultDto::from(result)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_trims_and_accepts() {
        assert_eq!(session_id(" 1718000000000 ").unwrap(), "1718000000000");
    }

    #[test]
    fn test_session_id_rejects_blank_and_oversized() {
        assert!(matches!(session_id("   "), Err(AppError::ValidationError(_))));
        let long = "x".repeat(MAX_SESSION_ID_LEN + 1);
        assert!(matches!(session_id(&long), Err(AppError::ValidationError(_))));
    }
}
