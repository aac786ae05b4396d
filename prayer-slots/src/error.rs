use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Message shown to API clients whenever the roster cannot be built
pub const FEED_FAILURE_MESSAGE: &str = "Failed to fetch or process data";

/// Failure to obtain the sign-up sheet. Fatal for the whole request.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request to sheet failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("sheet responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("sheet is not valid CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl ResponseError for FeedError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        tracing::error!(error = %self, "error fetching or processing data");
        HttpResponse::build(self.status_code())
            .insert_header((header::CACHE_CONTROL, "no-store, max-age=0"))
            .insert_header((header::PRAGMA, "no-cache"))
            .json(serde_json::json!({ "error": FEED_FAILURE_MESSAGE }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn feed_error_renders_generic_payload() {
        let err = FeedError::Status(reqwest::StatusCode::NOT_FOUND);
        let resp = err.error_response();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.headers().get(header::PRAGMA).unwrap(), "no-cache");
        assert_eq!(
            resp.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store, max-age=0"
        );

        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], FEED_FAILURE_MESSAGE);
    }
}
