//! Axum extractor that deserialises and validates JSON

use crate::error::DecimatorError;

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Json},
    http::Request,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// An axum extractor based on the Json extractor that also performs validation using the validator
/// crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S, B> FromRequest<S, B> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, B, Rejection = JsonRejection>,
    B: Send + 'static,
{
    type Rejection = DecimatorError;

    /// Extract a `ValidatedJson` from a `Request`.
    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    // https://github.com/tokio-rs/axum/blob/main/examples/testing/src/main.rs

    use super::*;
    use crate::models::CurveReadRequest;

    use axum::{
        body::Body,
        http::{self, Request, StatusCode},
        response::Response,
        routing::post,
        Router,
    };
    use regex::Regex;
    use tower::ServiceExt; // for `oneshot` and `ready`

    // Handler function that accepts a ValidatedJson extractor.
    async fn test_handler(ValidatedJson(request): ValidatedJson<CurveReadRequest>) -> String {
        format!(
            "filename: {} maxDepth: {:?} dtMultiplier: {}",
            request.filename, request.max_depth, request.dt_multiplier
        )
    }

    // Build a router and make a oneshot request.
    async fn request(body: Body) -> Response {
        Router::new()
            .route("/", post(test_handler))
            .oneshot(
                Request::builder()
                    .method(http::Method::POST)
                    .uri("/")
                    .header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    // Jump through the hoops to get the body as a string.
    async fn body_string(response: Response) -> String {
        String::from_utf8(
            hyper::body::to_bytes(response.into_body())
                .await
                .unwrap()
                .to_vec(),
        )
        .unwrap()
    }

    async fn assert_bad_request(body: &'static str, pattern: &str) {
        let response = request(Body::from(body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_string(response).await;
        let re = Regex::new(r".*request data is not valid.*").unwrap();
        assert!(re.is_match(&body[..]), "body: {body}");
        let re = Regex::new(pattern).unwrap();
        assert!(re.is_match(&body[..]), "body: {body}");
    }

    #[tokio::test]
    async fn ok() {
        let body = Body::from(r#"{"filename": "well.las", "maxDepth": 100, "dtMultiplier": 2}"#);
        let response = request(body).await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert_eq!(&body[..], "filename: well.las maxDepth: Some(100) dtMultiplier: 2");
    }

    #[tokio::test]
    async fn ok_defaults() {
        let body = Body::from(r#"{"filename": "well.las"}"#);
        let body = body_string(request(body).await).await;
        assert_eq!(&body[..], "filename: well.las maxDepth: None dtMultiplier: 1");
    }

    #[tokio::test]
    async fn invalid_json() {
        assert_bad_request("{\"", r"Failed to parse the request body as JSON").await;
    }

    #[tokio::test]
    async fn invalid_max_depth_type() {
        assert_bad_request(
            r#"{"filename": "well.las", "maxDepth": "deep"}"#,
            r".*maxDepth: invalid type: string.*",
        )
        .await;
    }

    #[tokio::test]
    async fn unknown_field() {
        assert_bad_request(
            r#"{"filename": "well.las", "colour": "red"}"#,
            r".*unknown field `colour`.*",
        )
        .await;
    }

    #[tokio::test]
    async fn missing_filename() {
        assert_bad_request(r#"{}"#, r".*missing field `filename`.*").await;
    }

    #[tokio::test]
    async fn empty_filename() {
        assert_bad_request(r#"{"filename": ""}"#, r".*filename must not be empty.*").await;
    }

    #[tokio::test]
    async fn path_filename() {
        assert_bad_request(
            r#"{"filename": "../secret.las"}"#,
            r".*filename must not contain a path.*",
        )
        .await;
    }

    #[tokio::test]
    async fn invalid_dt_multiplier() {
        assert_bad_request(
            r#"{"filename": "well.las", "dtMultiplier": 0}"#,
            r".*dtMultiplier must be greater than 0.*",
        )
        .await;
    }

    #[tokio::test]
    async fn negative_max_depth() {
        assert_bad_request(
            r#"{"filename": "well.las", "maxDepth": -1}"#,
            r".*maxDepth must not be negative.*",
        )
        .await;
    }
}
