//! # 一時認証情報
//!
//! ロール引き受け（AssumeRole）で得る短期間の認証情報。
//!
//! 1 回のメール送信のためだけに発行し、キャッシュも再利用もしない。
//! 所有権を送信処理にムーブして使い捨てにする。

use std::time::SystemTime;

/// 一時認証情報
///
/// # セキュリティ
///
/// Debug 出力ではシークレットアクセスキーとセッショントークンをマスクする。
#[derive(Clone)]
pub struct TemporaryCredentials {
    access_key_id:     String,
    secret_access_key: String,
    session_token:     String,
    expiration:        Option<SystemTime>,
}

impl std::fmt::Debug for TemporaryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemporaryCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .field("session_token", &"[REDACTED]")
            .field("expiration", &self.expiration)
            .finish()
    }
}

impl TemporaryCredentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: impl Into<String>,
        expiration: Option<SystemTime>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: session_token.into(),
            expiration,
        }
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    pub fn session_token(&self) -> &str {
        &self.session_token
    }

    pub fn expiration(&self) -> Option<SystemTime> {
        self.expiration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug出力でシークレットとトークンがマスクされる() {
        let credentials =
            TemporaryCredentials::new("ASIAEXAMPLE", "secret-key", "session-token", None);
        let debug = format!("{credentials:?}");

        assert!(debug.contains("ASIAEXAMPLE"));
        assert!(!debug.contains("secret-key"));
        assert!(!debug.contains("session-token"));
    }
}
