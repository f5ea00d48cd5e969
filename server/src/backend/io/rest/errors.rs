//! Translation of service errors into HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::backend::domain::generation_service::GenerationError;
use crate::backend::domain::models::child::ChildValidationError;
use crate::backend::domain::models::rating::RatingError;
use crate::backend::domain::models::shared_story::PublishValidationError;
use crate::backend::domain::models::story::StoryValidationError;
use crate::backend::domain::models::EntityNotFound;

/// Wraps a service error; the status code is picked from the error type
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        let e = &self.0;
        if e.is::<EntityNotFound>() {
            StatusCode::NOT_FOUND
        } else if let Some(rating_error) = e.downcast_ref::<RatingError>() {
            match rating_error {
                RatingError::LoginRequired => StatusCode::UNAUTHORIZED,
                RatingError::ValueOutOfRange(_) => StatusCode::BAD_REQUEST,
            }
        } else if e.is::<ChildValidationError>()
            || e.is::<StoryValidationError>()
            || e.is::<PublishValidationError>()
        {
            StatusCode::BAD_REQUEST
        } else if e.is::<GenerationError>() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };
        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::integrations::IntegrationError;

    fn status_of(error: impl Into<anyhow::Error>) -> StatusCode {
        ApiError::from(error.into()).status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(status_of(EntityNotFound::story("story::1")), StatusCode::NOT_FOUND);
        assert_eq!(status_of(ChildValidationError::EmptyName), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(StoryValidationError::MissingTheme), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(PublishValidationError::ConsentMissing), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(RatingError::ValueOutOfRange(9)), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(RatingError::LoginRequired), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(GenerationError::Cover(IntegrationError::Network("down".to_string()))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(status_of(anyhow::anyhow!("disk full")), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
