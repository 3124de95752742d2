use axum::{
    async_trait,
    body::HttpBody,
    extract::FromRequest,
    http::{Request, StatusCode},
    BoxError,
};
use bytes::Bytes;
use serde::Deserialize;

/// Form fields posted by the messaging platform. Everything except the message text is ignored.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct WebhookForm {
    #[serde(rename = "Body", default)]
    pub body: String,
}

pub struct WebhookMessage(pub WebhookForm);

#[async_trait]
impl<S, B> FromRequest<S, B> for WebhookMessage
where
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::error!("failed to read webhook body: {}", rejection);
            (StatusCode::INTERNAL_SERVER_ERROR, rejection.to_string())
        })?;

        let form: WebhookForm = serde_urlencoded::from_bytes(&bytes).map_err(|e| {
            tracing::error!("Parsing error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

        Ok(WebhookMessage(form))
    }
}
