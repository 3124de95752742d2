use crate::modules::models::{request::WebhookMessage, response::MessagingResponse};
use axum::extract::Extension;
use contest_bot_libs::MessageHandler;
use std::sync::Arc;
use tokio::time::Instant;

pub type SharedHandler = Arc<dyn MessageHandler + Send + Sync>;

pub const HOME_MESSAGE: &str = "Codeforces WhatsApp Bot is running!";

pub async fn webhook(
    Extension(handler): Extension<SharedHandler>,
    WebhookMessage(form): WebhookMessage,
) -> MessagingResponse {
    let start_process = Instant::now();

    let reply = handler.handle(&form.body).await;

    let time: u32 = Instant::now().duration_since(start_process).as_millis() as u32;
    tracing::info!(
        target: "querylog",
        "elapsed_time={} body={:?} reply_length={}",
        time, form.body, reply.len()
    );

    MessagingResponse::new(reply)
}

pub async fn home() -> &'static str {
    HOME_MESSAGE
}
