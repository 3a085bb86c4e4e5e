//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! koemail-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use koemail_domain::{
    credentials::TemporaryCredentials,
    notification::{EmailMessage, NotificationError, SendReceipt},
    request::ApiAccess,
};

use crate::{InfraError, NotificationSender, ProfileClient, RoleAssumer};

// ===== MockProfileClient =====

/// プロフィール API の応答パターン
#[derive(Debug, Clone)]
pub enum ProfileOutcome {
    /// メールアドレスを返す
    Email(String),
    /// 指定ステータスのサービスエラーを返す
    Status(u16),
    /// 不正なレスポンスエラーを返す
    Malformed,
}

#[derive(Clone)]
pub struct MockProfileClient {
    outcome: ProfileOutcome,
    calls:   Arc<Mutex<Vec<String>>>,
}

impl MockProfileClient {
    pub fn new(outcome: ProfileOutcome) -> Self {
        Self {
            outcome,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn returning_email(email: &str) -> Self {
        Self::new(ProfileOutcome::Email(email.to_string()))
    }

    pub fn failing_with_status(status: u16) -> Self {
        Self::new(ProfileOutcome::Status(status))
    }

    /// 呼び出しに使われたエンドポイント一覧
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileClient for MockProfileClient {
    async fn get_profile_email(&self, access: &ApiAccess) -> Result<String, InfraError> {
        self.calls.lock().unwrap().push(access.endpoint.clone());
        match &self.outcome {
            ProfileOutcome::Email(email) => Ok(email.clone()),
            ProfileOutcome::Status(status) => Err(InfraError::service_error(
                *status,
                format!("mock status {status}"),
            )),
            ProfileOutcome::Malformed => Err(InfraError::invalid_response("mock malformed body")),
        }
    }
}

// ===== MockRoleAssumer =====

#[derive(Clone, Default)]
pub struct MockRoleAssumer {
    fail:  bool,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockRoleAssumer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// 呼び出しに使われた (role_arn, session_name) の一覧
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoleAssumer for MockRoleAssumer {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<TemporaryCredentials, InfraError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((role_arn.to_string(), session_name.to_string()));
        if self.fail {
            return Err(InfraError::role_assumption("mock AccessDenied"));
        }
        // 呼び出しごとに異なるアクセスキーを払い出す
        Ok(TemporaryCredentials::new(
            format!("ASIAMOCK{}", calls.len()),
            "mock-secret",
            "mock-session-token",
            None,
        ))
    }
}

// ===== MockNotificationSender =====

/// 送信済みメールの記録
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub access_key_id: String,
    pub email:         EmailMessage,
}

#[derive(Clone, Default)]
pub struct MockNotificationSender {
    fail: bool,
    sent: Arc<Mutex<Vec<SentEmail>>>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent_emails(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(
        &self,
        credentials: TemporaryCredentials,
        email: &EmailMessage,
    ) -> Result<SendReceipt, NotificationError> {
        if self.fail {
            return Err(NotificationError::SendFailed(
                "mock MessageRejected".to_string(),
            ));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentEmail {
            access_key_id: credentials.access_key_id().to_string(),
            email:         email.clone(),
        });
        Ok(SendReceipt {
            message_id: Some(format!("mock-message-{}", sent.len())),
        })
    }
}
