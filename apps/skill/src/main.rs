//! # KoeMail スキルサーバー
//!
//! 音声プラットフォームのスキルエンドポイント。
//!
//! ## 役割
//!
//! - **リクエストの振り分け**: 起動・インテント・セッション終了を各ハンドラへ
//! - **メール送信**: 許可済みのユーザーにプロフィールのアドレス宛で通知メールを送る
//!
//! ## アーキテクチャ
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │    Alexa     │────▶│    Skill     │────▶│ Profile API      │
//! │              │     │  port: 13100 │     └──────────────────┘
//! └──────────────┘     └──────────────┘
//!                             │            ┌──────────────────┐
//!                             ├───────────▶│ STS (AssumeRole) │
//!                             │            └──────────────────┘
//!                             │            ┌──────────────────┐
//!                             └───────────▶│ SES v2           │
//!                                          └──────────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `SKILL_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `SKILL_PORT` | **Yes** | ポート番号 |
//! | `SKILL_ID` | No | 受け付けるスキル ID（未設定なら検証しない） |
//! | `NOTIFICATION_BACKEND` | No | `ses`（デフォルト）または `noop` |
//! | `EMAIL_SENDER` | **Yes** | 送信元メールアドレス |
//! | `ROLE_ARN` | **Yes** | メール送信用に引き受けるロールの ARN |
//! | `ROLE_SESSION_NAME` | No | ロールセッション名（デフォルト: `SendEmailRoleSession`） |
//! | `SES_REGION` | **Yes** | SES のリージョン（実行環境にリージョン設定が無い場合は STS にも使う） |
//! | `LOG_FORMAT` | No | `json` または `pretty` |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p koemail-skill
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use koemail_infra::{
    AlexaProfileClient,
    NotificationSender,
    StsRoleAssumer,
    notification::{NoopNotificationSender, SesNotificationSender},
    sts,
};
use koemail_shared::observability::TracingConfig;
use koemail_skill::{
    app_builder::{build_app, build_skill_router},
    config::{NotificationBackend, SkillConfig},
    handler::SkillState,
    usecase::{NotificationService, ProfileLookup, SendEmailIntentHandler},
};
use tokio::net::TcpListener;

/// スキルサーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. 外部クライアントとルーターの構築
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("skill");
    koemail_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "skill").entered();

    let config = SkillConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "スキルサーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let sender: Arc<dyn NotificationSender> = match config.notification.backend {
        NotificationBackend::Ses => {
            tracing::info!(region = %config.notification.ses_region, "通知バックエンド: SES");
            Arc::new(SesNotificationSender::new(&config.notification.ses_region))
        }
        NotificationBackend::Noop => {
            tracing::warn!("通知バックエンド: Noop（メールは送信されません）");
            Arc::new(NoopNotificationSender)
        }
    };
    let role_assumer = Arc::new(StsRoleAssumer::new(
        sts::create_client(&config.notification.ses_region).await,
    ));

    let send_email = SendEmailIntentHandler::new(
        ProfileLookup::new(Arc::new(AlexaProfileClient::new())),
        NotificationService::new(role_assumer, sender, config.notification.clone()),
    );

    if config.skill_id.is_none() {
        tracing::warn!("SKILL_ID が未設定のため、アプリケーション ID を検証しません");
    }

    let state = Arc::new(SkillState {
        router:   build_skill_router(Arc::new(send_email)),
        skill_id: config.skill_id.clone(),
    });
    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("スキルサーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
