//! # スキルサービス設定
//!
//! 環境変数からスキルサービスの設定を読み込む。
//! 起動時に一度だけ読み込み、以降は読み取り専用の値として各コンポーネントに渡す。

use std::env;

use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が設定されていない
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 値の形式が不正
    #[error("{name} の値が不正です: {value}")]
    Invalid { name: &'static str, value: String },
}

/// スキルサービスの設定
#[derive(Debug, Clone)]
pub struct SkillConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// スキル ID（設定時のみリクエストのアプリケーション ID を検証する）
    pub skill_id:     Option<String>,
    /// 通知設定
    pub notification: NotificationConfig,
}

/// 通知メール送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationBackend {
    /// Amazon SES v2 経由で送信
    Ses,
    /// 送信しない（ログ出力のみ）
    Noop,
}

/// 通知機能の設定
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// 送信バックエンド
    pub backend:           NotificationBackend,
    /// 送信元メールアドレス（SES で検証済みであること）
    pub email_sender:      String,
    /// メール送信用に引き受けるロールの ARN
    pub role_arn:          String,
    /// ロールセッション名
    pub role_session_name: String,
    /// SES のリージョン
    pub ses_region:        String,
}

const DEFAULT_ROLE_SESSION_NAME: &str = "SendEmailRoleSession";

impl SkillConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の取得関数から設定を読み込む
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let port_value = require("SKILL_PORT")?;
        let port = port_value.parse().map_err(|_| ConfigError::Invalid {
            name:  "SKILL_PORT",
            value: port_value.clone(),
        })?;

        Ok(Self {
            host: get("SKILL_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            skill_id: get("SKILL_ID"),
            notification: NotificationConfig {
                backend:           parse_backend(get("NOTIFICATION_BACKEND"))?,
                email_sender:      require("EMAIL_SENDER")?,
                role_arn:          require("ROLE_ARN")?,
                role_session_name: get("ROLE_SESSION_NAME")
                    .unwrap_or_else(|| DEFAULT_ROLE_SESSION_NAME.to_string()),
                ses_region:        require("SES_REGION")?,
            },
        })
    }
}

fn parse_backend(value: Option<String>) -> Result<NotificationBackend, ConfigError> {
    match value.as_deref() {
        None | Some("ses") => Ok(NotificationBackend::Ses),
        Some("noop") => Ok(NotificationBackend::Noop),
        Some(other) => Err(ConfigError::Invalid {
            name:  "NOTIFICATION_BACKEND",
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            ("SKILL_PORT", "13100"),
            ("EMAIL_SENDER", "noreply@koemail.example.com"),
            ("ROLE_ARN", "arn:aws:iam::123456789012:role/SendEmailRole"),
            ("SES_REGION", "ap-northeast-1"),
        ]
    }

    #[test]
    fn 必須項目だけで既定値が補われる() {
        let config = SkillConfig::from_lookup(lookup_from(&required())).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 13100);
        assert_eq!(config.skill_id, None);
        assert_eq!(config.notification.backend, NotificationBackend::Ses);
        assert_eq!(config.notification.role_session_name, "SendEmailRoleSession");
        assert_eq!(config.notification.ses_region, "ap-northeast-1");
    }

    #[test]
    fn 任意項目を上書きできる() {
        let mut pairs = required();
        pairs.extend([
            ("SKILL_HOST", "127.0.0.1"),
            ("SKILL_ID", "amzn1.ask.skill.test"),
            ("NOTIFICATION_BACKEND", "noop"),
            ("ROLE_SESSION_NAME", "CustomSession"),
        ]);

        let config = SkillConfig::from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.skill_id.as_deref(), Some("amzn1.ask.skill.test"));
        assert_eq!(config.notification.backend, NotificationBackend::Noop);
        assert_eq!(config.notification.role_session_name, "CustomSession");
    }

    #[test]
    fn 必須項目が欠けるとmissingを返す() {
        let pairs: Vec<_> = required()
            .into_iter()
            .filter(|(k, _)| *k != "ROLE_ARN")
            .collect();

        let result = SkillConfig::from_lookup(lookup_from(&pairs));

        assert_eq!(result.unwrap_err(), ConfigError::Missing("ROLE_ARN"));
    }

    #[test]
    fn 空文字列は未設定として扱う() {
        let mut pairs = required();
        pairs.push(("SKILL_ID", ""));
        pairs.retain(|(k, _)| *k != "EMAIL_SENDER");
        pairs.push(("EMAIL_SENDER", "  "));

        let result = SkillConfig::from_lookup(lookup_from(&pairs));

        assert_eq!(result.unwrap_err(), ConfigError::Missing("EMAIL_SENDER"));
    }

    #[test]
    fn 不正なポート番号はinvalidを返す() {
        let mut pairs = required();
        pairs.retain(|(k, _)| *k != "SKILL_PORT");
        pairs.push(("SKILL_PORT", "not-a-port"));

        let result = SkillConfig::from_lookup(lookup_from(&pairs));

        assert!(matches!(
            result.unwrap_err(),
            ConfigError::Invalid { name: "SKILL_PORT", .. }
        ));
    }

    #[test]
    fn 未知のバックエンドはinvalidを返す() {
        let mut pairs = required();
        pairs.push(("NOTIFICATION_BACKEND", "smtp"));

        let result = SkillConfig::from_lookup(lookup_from(&pairs));

        assert_eq!(
            result.unwrap_err(),
            ConfigError::Invalid {
                name:  "NOTIFICATION_BACKEND",
                value: "smtp".to_string(),
            }
        );
    }
}
