//! # プロフィール取得
//!
//! プロフィール API からユーザーのメールアドレスを取得し、
//! 「権限未許可」を通常の結果として扱う。

use std::sync::Arc;

use koemail_domain::{profile::EmailAddress, request::ApiAccess};
use koemail_infra::ProfileClient;

use crate::error::SkillError;

/// プロフィール API が権限未許可を表すステータス
const CONSENT_NOT_GRANTED: u16 = 403;

/// プロフィール取得ユースケース
pub struct ProfileLookup {
    client: Arc<dyn ProfileClient>,
}

impl ProfileLookup {
    pub fn new(client: Arc<dyn ProfileClient>) -> Self {
        Self { client }
    }

    /// ユーザーのメールアドレスを取得する
    ///
    /// - 取得できた場合: `Ok(Some(address))`
    /// - 403（ユーザーが権限を許可していない）または空の値: `Ok(None)`
    /// - それ以外の失敗: `Err`
    #[tracing::instrument(skip_all)]
    pub async fn fetch_profile_email(
        &self,
        access: &ApiAccess,
    ) -> Result<Option<EmailAddress>, SkillError> {
        let raw = match self.client.get_profile_email(access).await {
            Ok(raw) => raw,
            Err(e) if e.service_status() == Some(CONSENT_NOT_GRANTED) => {
                tracing::info!("メールアドレスの読み取り権限が許可されていません");
                return Ok(None);
            }
            Err(e) => return Err(SkillError::ProfileLookup(e)),
        };

        if raw.trim().is_empty() {
            tracing::info!("プロフィールのメールアドレスが空です");
            return Ok(None);
        }

        EmailAddress::new(raw)
            .map(Some)
            .map_err(SkillError::InvalidEmail)
    }
}

#[cfg(test)]
mod tests {
    use koemail_domain::request::ApiAccessToken;
    use koemail_infra::mock::{MockProfileClient, ProfileOutcome};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn access() -> ApiAccess {
        ApiAccess {
            endpoint: "https://api.fe.amazonalexa.com".to_string(),
            token:    ApiAccessToken::new("token"),
        }
    }

    fn lookup(client: MockProfileClient) -> ProfileLookup {
        ProfileLookup::new(Arc::new(client))
    }

    #[tokio::test]
    async fn メールアドレスを取得できる() {
        let client = MockProfileClient::returning_email("taro@example.com");
        let sut = lookup(client.clone());

        let result = sut.fetch_profile_email(&access()).await.unwrap();

        assert_eq!(result.map(EmailAddress::into_string), Some("taro@example.com".to_string()));
        assert_eq!(client.calls(), vec!["https://api.fe.amazonalexa.com".to_string()]);
    }

    #[tokio::test]
    async fn ステータス403は権限未許可としてnoneを返す() {
        let sut = lookup(MockProfileClient::failing_with_status(403));

        let result = sut.fetch_profile_email(&access()).await.unwrap();

        assert_eq!(result, None);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[tokio::test]
    async fn 空のメールアドレスはnoneを返す(#[case] raw: &str) {
        let sut = lookup(MockProfileClient::returning_email(raw));

        let result = sut.fetch_profile_email(&access()).await.unwrap();

        assert_eq!(result, None);
    }

    #[rstest]
    #[case(401)]
    #[case(404)]
    #[case(500)]
    #[case(503)]
    #[tokio::test]
    async fn ステータス403以外はエラーを返す(#[case] status: u16) {
        let sut = lookup(MockProfileClient::failing_with_status(status));

        let result = sut.fetch_profile_email(&access()).await;

        assert!(matches!(
            result,
            Err(SkillError::ProfileLookup(e)) if e.service_status() == Some(status)
        ));
    }

    #[tokio::test]
    async fn 不正なレスポンスはエラーを返す() {
        let sut = lookup(MockProfileClient::new(ProfileOutcome::Malformed));

        let result = sut.fetch_profile_email(&access()).await;

        assert!(matches!(result, Err(SkillError::ProfileLookup(_))));
    }

    #[tokio::test]
    async fn 形式が不正なメールアドレスはエラーを返す() {
        let sut = lookup(MockProfileClient::returning_email("not-an-address"));

        let result = sut.fetch_profile_email(&access()).await;

        assert!(matches!(result, Err(SkillError::InvalidEmail(_))));
    }
}
