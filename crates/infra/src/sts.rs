//! # STS ロール引き受け
//!
//! メール送信専用のロールを引き受け、短期間だけ有効な認証情報を取得する。
//!
//! ## 設計方針
//!
//! - **1 回の非同期呼び出し**: 成功なら認証情報、失敗なら [`InfraError`] の一経路のみ
//! - **キャッシュしない**: 呼び出しのたびに新しい認証情報を取得する
//! - **ベース認証情報**: STS 自体の呼び出しには実行環境の認証情報
//!   （環境変数、インスタンスロール等）を `aws-config` の既定チェーンで使う

use std::time::SystemTime;

use async_trait::async_trait;
use aws_config::meta::region::{ProvideRegion, RegionProviderChain};
use aws_sdk_sts::{Client, config::Region, error::DisplayErrorContext};
use koemail_domain::credentials::TemporaryCredentials;

use crate::InfraError;

/// ロール引き受けトレイト
#[async_trait]
pub trait RoleAssumer: Send + Sync {
    /// ロールを引き受けて一時認証情報を取得する
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<TemporaryCredentials, InfraError>;
}

/// STS クライアントを作成する
///
/// 実行環境の既定の認証情報チェーンとリージョン設定を使う。
/// 実行環境にリージョン設定が無い場合は `fallback_region` を使う。
pub async fn create_client(fallback_region: &str) -> Client {
    let region = region_with_fallback(RegionProviderChain::default_provider(), fallback_region);
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(region)
        .load()
        .await;
    Client::new(&config)
}

fn region_with_fallback(
    primary: impl ProvideRegion + 'static,
    fallback_region: &str,
) -> RegionProviderChain {
    RegionProviderChain::first_try(primary).or_else(Region::new(fallback_region.to_string()))
}

/// STS によるロール引き受け実装
pub struct StsRoleAssumer {
    client: Client,
}

impl StsRoleAssumer {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoleAssumer for StsRoleAssumer {
    #[tracing::instrument(skip(self))]
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<TemporaryCredentials, InfraError> {
        let output = self
            .client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(session_name)
            .send()
            .await
            .map_err(|e| InfraError::role_assumption(DisplayErrorContext(&e).to_string()))?;

        let credentials = output
            .credentials()
            .ok_or_else(InfraError::missing_credentials)?;

        let expiration = SystemTime::try_from(*credentials.expiration()).ok();

        tracing::debug!(
            access_key_id = credentials.access_key_id(),
            "一時認証情報を取得しました"
        );

        Ok(TemporaryCredentials::new(
            credentials.access_key_id(),
            credentials.secret_access_key(),
            credentials.session_token(),
            expiration,
        ))
    }
}
