use async_trait::async_trait;

/// Turns the text of an inbound message into the text of the reply.
///
/// Transports (the webhook server, the command line) only wrap this capability.
#[async_trait]
pub trait MessageHandler {
    async fn handle(&self, body: &str) -> String;
}
