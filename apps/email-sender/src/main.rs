//! # Email Sender
//!
//! ユーザープールのカスタムメール送信トリガーを処理する Lambda 関数。
//!
//! ## 役割
//!
//! - **仮パスワード通知**: `CustomEmailSender_AdminCreateUser` トリガー →
//!   新規ユーザーへ仮パスワードをメールで通知
//! - **パスワード再設定通知**: `CustomEmailSender_ForgotPassword` トリガー →
//!   当該ユーザーへ確認コードをメールで通知
//! - **ワンタイムコード復号**: 暗号文で届くコードを KMS で復号して本文に埋め込む
//!
//! 上記以外のトリガー種別は警告ログのみで処理しない。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `KEY_ALIAS` | No* | 生成鍵エイリアス（例: `alias/hikyaku-email`） |
//! | `KEY_ID` | No* | 追加の鍵 ID |
//! | `SENDGRID_API_KEY` | No* | SendGrid API キー |
//! | `NOTIFICATION_BACKEND` | No | `sendgrid`（デフォルト）/ `smtp` / `noop` |
//! | `NOTIFICATION_FROM_ADDRESS` | No | 送信元アドレス（デフォルト: `no-reply@example.com`） |
//! | `SMTP_HOST` / `SMTP_PORT` | No | backend=smtp の接続先（デフォルト: `localhost` / `1025`） |
//! | `LOG_FORMAT` | No | `json` / `pretty` |
//! | `RUST_LOG` | No | トレーシングフィルタ |
//!
//! *欠損は起動時には検証せず、最初のコラボレータ呼び出しの失敗として表面化する。
//!
//! ## 起動方法
//!
//! ```bash
//! # ローカル実行（cargo-lambda）
//! cargo lambda watch -p hikyaku-email-sender
//!
//! # デプロイ用ビルド
//! cargo lambda build -p hikyaku-email-sender --release --arm64
//! ```

use std::sync::Arc;

use hikyaku_email_sender::{
    config::SenderConfig,
    handler::{AppContext, handle_event},
    usecase::{CodeResolver, NotificationService, TemplateRenderer, VerificationMailUseCase},
};
use hikyaku_infra::{
    decryption::{self, CodeDecryptor, KeyringConfig, KmsCodeDecryptor},
    notification::{
        NoopNotificationSender,
        NotificationSender,
        SendGridNotificationSender,
        SmtpNotificationSender,
    },
};
use hikyaku_shared::observability::TracingConfig;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tracing::Instrument as _;

/// Email Sender のエントリーポイント
///
/// 依存コンポーネント（KMS クライアント、メール送信バックエンド）は
/// プロセス起動時に一度だけ構築し、全呼び出しで読み取り専用に共有する。
#[tokio::main]
async fn main() -> Result<(), Error> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("email-sender");
    hikyaku_shared::observability::init_tracing(tracing_config);
    let _app_span = tracing::info_span!("app", service = "email-sender").entered();

    // 設定読み込み
    let config = SenderConfig::from_env();

    // 復号コラボレータを初期化
    let kms_client = decryption::create_client().await;
    let keyring = KeyringConfig::new(config.keyring.key_alias.clone(), config.keyring.key_ids());
    let decryptor: Arc<dyn CodeDecryptor> = Arc::new(KmsCodeDecryptor::new(kms_client, keyring));

    // メール送信バックエンドを選択
    let sender: Arc<dyn NotificationSender> = match config.notification.backend.as_str() {
        "sendgrid" => Arc::new(SendGridNotificationSender::new(
            config.notification.sendgrid_api_key.clone(),
            config.notification.from_address.clone(),
        )),
        "smtp" => Arc::new(SmtpNotificationSender::new(
            &config.notification.smtp_host,
            config.notification.smtp_port,
            config.notification.from_address.clone(),
        )),
        "noop" => Arc::new(NoopNotificationSender),
        other => {
            tracing::warn!(backend = other, "未知の NOTIFICATION_BACKEND のため noop を使用");
            Arc::new(NoopNotificationSender)
        }
    };

    // ユースケースとコンテキストを組み立てる
    let template_renderer = TemplateRenderer::new().expect("テンプレートの初期化に失敗しました");
    let usecase = VerificationMailUseCase::new(
        CodeResolver::new(decryptor),
        NotificationService::new(sender, template_renderer),
    );
    let ctx = Arc::new(AppContext { usecase });

    tracing::info!(
        backend = %config.notification.backend,
        "Email Sender を起動しました"
    );

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let ctx = Arc::clone(&ctx);
        async move {
            let (payload, context) = event.into_parts();
            handle_event(&ctx, payload)
                .instrument(tracing::info_span!(
                    "invocation",
                    request_id = %context.request_id
                ))
                .await
                .map_err(Error::from)
        }
    }))
    .await
}
