//! # プロフィール API クライアント
//!
//! 音声プラットフォームのプロフィール API からユーザーのメールアドレスを取得する。
//!
//! ## エンドポイント
//!
//! - `GET {apiEndpoint}/v2/accounts/~current/settings/Profile.email`
//!
//! エンドポイントとアクセストークンはリクエストエンベロープに含まれ、
//! リクエストごとに異なるため、クライアント自体は保持しない。
//!
//! ## エラーの扱い
//!
//! 成功以外のステータスはすべて [`InfraErrorKind::ServiceError`](crate::InfraErrorKind::ServiceError)
//! として返す。403 を「ユーザーが権限を許可していない」と解釈するのはユースケース層の責務。

use async_trait::async_trait;
use koemail_domain::request::ApiAccess;

use crate::InfraError;

const PROFILE_EMAIL_PATH: &str = "/v2/accounts/~current/settings/Profile.email";

/// プロフィール API クライアントトレイト
///
/// テスト時にスタブを使用できるようトレイトで定義。
#[async_trait]
pub trait ProfileClient: Send + Sync {
    /// ユーザーのメールアドレスを取得する
    ///
    /// 返す文字列は未検証のまま。形式チェックは呼び出し側で行う。
    async fn get_profile_email(&self, access: &ApiAccess) -> Result<String, InfraError>;
}

/// プロフィール API クライアント実装
pub struct AlexaProfileClient {
    client: reqwest::Client,
}

impl AlexaProfileClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for AlexaProfileClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileClient for AlexaProfileClient {
    #[tracing::instrument(skip_all)]
    async fn get_profile_email(&self, access: &ApiAccess) -> Result<String, InfraError> {
        let url = format!(
            "{}{}",
            access.endpoint.trim_end_matches('/'),
            PROFILE_EMAIL_PATH
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(access.token.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "プロフィール API がエラーを返しました");
            return Err(InfraError::service_error(status.as_u16(), body));
        }

        // 成功時のボディは JSON 文字列（例: "taro@example.com"）
        let body = response.text().await?;
        serde_json::from_str::<String>(&body).map_err(|e| {
            InfraError::invalid_response(format!("メールアドレスを読み取れません: {e}"))
        })
    }
}
