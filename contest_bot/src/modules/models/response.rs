use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// TwiML reply carrying a single text message.
#[derive(Debug, PartialEq, Eq)]
pub struct MessagingResponse {
    pub message: String,
}

impl MessagingResponse {
    pub fn new(message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    pub fn to_xml(&self) -> String {
        format!(
            "{}<Response><Message>{}</Message></Response>",
            XML_DECLARATION,
            escape_xml(&self.message)
        )
    }
}

impl IntoResponse for MessagingResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(CONTENT_TYPE, "application/xml")],
            self.to_xml(),
        )
            .into_response()
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_to_xml() {
        let response = MessagingResponse::new("No upcoming contests found.");
        assert_eq!(
            response.to_xml(),
            r#"<?xml version="1.0" encoding="UTF-8"?><Response><Message>No upcoming contests found.</Message></Response>"#
        );
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml(r#"Div. 1 & 2 <rated> "for" I'm"#),
            "Div. 1 &amp; 2 &lt;rated&gt; &quot;for&quot; I&apos;m"
        );
    }

    #[test]
    fn test_multiline_message_is_kept() {
        let response = MessagingResponse::new("🏆 Div 2\n⏳ Duration: 2 hours\n");
        assert!(response
            .to_xml()
            .contains("<Message>🏆 Div 2\n⏳ Duration: 2 hours\n</Message>"));
    }
}
