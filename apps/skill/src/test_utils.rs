//! テスト用のリクエストエンベロープと設定

use koemail_domain::request::RequestEnvelope;
use serde_json::{Value, json};

use crate::config::{NotificationBackend, NotificationConfig};

pub(crate) const APPLICATION_ID: &str = "amzn1.ask.skill.00000000-0000-0000-0000-000000000000";

fn base(request: Value) -> Value {
    json!({
        "version": "1.0",
        "session": {
            "new": true,
            "sessionId": "amzn1.echo-api.session.test",
            "application": { "applicationId": APPLICATION_ID },
            "user": { "userId": "amzn1.ask.account.test" }
        },
        "context": {
            "System": {
                "application": { "applicationId": APPLICATION_ID },
                "user": { "userId": "amzn1.ask.account.test" },
                "apiEndpoint": "https://api.fe.amazonalexa.com",
                "apiAccessToken": "test-access-token"
            }
        },
        "request": request
    })
}

pub(crate) fn launch_json() -> Value {
    base(json!({
        "type": "LaunchRequest",
        "requestId": "amzn1.echo-api.request.launch",
        "timestamp": "2024-01-01T00:00:00Z",
        "locale": "ja-JP"
    }))
}

pub(crate) fn intent_json(name: &str) -> Value {
    base(json!({
        "type": "IntentRequest",
        "requestId": "amzn1.echo-api.request.intent",
        "timestamp": "2024-01-01T00:00:00Z",
        "locale": "ja-JP",
        "intent": { "name": name, "confirmationStatus": "NONE" }
    }))
}

pub(crate) fn session_ended_json() -> Value {
    base(json!({
        "type": "SessionEndedRequest",
        "requestId": "amzn1.echo-api.request.ended",
        "timestamp": "2024-01-01T00:00:00Z",
        "locale": "ja-JP",
        "reason": "USER_INITIATED"
    }))
}

pub(crate) fn envelope(json: Value) -> RequestEnvelope {
    serde_json::from_value(json).unwrap()
}

pub(crate) fn notification_config() -> NotificationConfig {
    NotificationConfig {
        backend:           NotificationBackend::Noop,
        email_sender:      "noreply@koemail.example.com".to_string(),
        role_arn:          "arn:aws:iam::123456789012:role/SendEmailRole".to_string(),
        role_session_name: "SendEmailRoleSession".to_string(),
        ses_region:        "ap-northeast-1".to_string(),
    }
}
