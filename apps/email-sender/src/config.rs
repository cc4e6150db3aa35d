//! # Email Sender 設定
//!
//! 環境変数から Email Sender の設定を読み込む。
//!
//! ## 設計方針
//!
//! 起動時に一度だけ読み込み、以後は読み取り専用で使い回す。
//! 鍵や API キーの欠損は起動時には検証せず、最初のコラボレータ呼び出しの
//! 失敗として表面化させる（呼び出しごとのエラーはベストエフォートで
//! 吸収されるため、設定不備が呼び出し基盤の失敗として観測されることはない）。

use std::env;

/// Email Sender の設定
#[derive(Debug, Clone)]
pub struct SenderConfig {
    /// 鍵アクセスハンドルの設定
    pub keyring:      KeyringSettings,
    /// 通知設定
    pub notification: NotificationConfig,
}

/// 鍵アクセスハンドルの設定
#[derive(Debug, Clone)]
pub struct KeyringSettings {
    /// 生成鍵エイリアス（`KEY_ALIAS`、未設定は空文字）
    pub key_alias: String,
    /// 追加の鍵 ID（`KEY_ID`、未設定は空文字）
    pub key_id:    String,
}

/// 通知機能の設定
///
/// `NOTIFICATION_BACKEND` 環境変数で送信バックエンドを切り替える:
/// - `sendgrid`: SendGrid Mail Send API 経由で送信（本番、デフォルト）
/// - `smtp`: Mailpit（開発）/ SMTP サーバー経由で送信
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// 送信バックエンド（"sendgrid" | "smtp" | "noop"）
    pub backend:          String,
    /// SendGrid API キー（backend=sendgrid の場合に使用）
    pub sendgrid_api_key: String,
    /// SMTP ホスト（backend=smtp の場合に使用）
    pub smtp_host:        String,
    /// SMTP ポート（backend=smtp の場合に使用）
    pub smtp_port:        u16,
    /// 送信元メールアドレス
    pub from_address:     String,
}

impl SenderConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self {
            keyring:      KeyringSettings {
                key_alias: env::var("KEY_ALIAS").unwrap_or_default(),
                key_id:    env::var("KEY_ID").unwrap_or_default(),
            },
            notification: NotificationConfig::from_env(),
        }
    }
}

impl KeyringSettings {
    /// 追加鍵 ID のリストを返す（未設定は空リスト）
    pub fn key_ids(&self) -> Vec<String> {
        if self.key_id.is_empty() {
            Vec::new()
        } else {
            vec![self.key_id.clone()]
        }
    }
}

impl NotificationConfig {
    /// 環境変数から通知設定を読み込む
    fn from_env() -> Self {
        Self {
            backend:          env::var("NOTIFICATION_BACKEND")
                .unwrap_or_else(|_| "sendgrid".to_string()),
            sendgrid_api_key: env::var("SENDGRID_API_KEY").unwrap_or_default(),
            smtp_host:        env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port:        env::var("SMTP_PORT")
                .unwrap_or_else(|_| "1025".to_string())
                .parse()
                .expect("SMTP_PORT は有効なポート番号である必要があります"),
            from_address:     env::var("NOTIFICATION_FROM_ADDRESS")
                .unwrap_or_else(|_| "no-reply@example.com".to_string()),
        }
    }
}
