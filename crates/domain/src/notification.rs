//! # 通知
//!
//! メール通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 要件 |
//! |---|------------|------|
//! | [`VerificationNotification`] | 検証通知イベント | 2 種類: 仮パスワード通知、パスワード再設定通知 |
//! | [`NotificationEventType`] | 通知イベント種別 | 構造化ログの `notification.event_type` フィールド値 |
//! | [`EmailMessage`] | メールメッセージ | テンプレートレンダリングの出力 |
//!
//! ## 設計方針
//!
//! - **enum による通知イベント**: 各バリアントが対応トリガーのメールに対応
//! - **復号成功が構築の前提**: バリアントは [`OneTimeCode`] を必須で保持し、
//!   復号前に通知を組み立てられない型にする
//! - **テンプレート分離**: 通知イベントとメール生成は分離（TemplateRenderer は app 側）

use strum::IntoStaticStr;
use thiserror::Error;

use crate::one_time_code::{CodeKind, OneTimeCode};

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// 通知イベント種別
///
/// 構造化ログの `notification.event_type` フィールドに出力される値。
/// snake_case でシリアライズされる。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationEventType {
    /// 仮パスワード通知: 管理者によるユーザー作成 → 新規ユーザーに送信
    TemporaryPassword,
    /// パスワード再設定通知: パスワード再設定要求 → 当該ユーザーに送信
    PasswordResetCode,
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
}

/// 検証通知イベント
///
/// 各バリアントが対応トリガー（AdminCreateUser / ForgotPassword）の
/// 通知メールに対応する。復号済みの [`OneTimeCode`] を必須で保持する。
#[derive(Debug, Clone)]
pub enum VerificationNotification {
    /// 仮パスワード通知: 管理者によるユーザー作成 → 新規ユーザーに送信
    TemporaryPassword {
        username: String,
        email:    String,
        code:     OneTimeCode,
    },
    /// パスワード再設定通知: パスワード再設定要求 → 当該ユーザーに送信
    PasswordResetCode {
        username: String,
        email:    String,
        code:     OneTimeCode,
    },
}

impl VerificationNotification {
    /// 通知イベント種別を返す
    pub fn event_type(&self) -> NotificationEventType {
        match self {
            Self::TemporaryPassword { .. } => NotificationEventType::TemporaryPassword,
            Self::PasswordResetCode { .. } => NotificationEventType::PasswordResetCode,
        }
    }

    /// 対応するコード種別を返す
    pub fn code_kind(&self) -> CodeKind {
        match self {
            Self::TemporaryPassword { .. } => CodeKind::TemporaryPassword,
            Self::PasswordResetCode { .. } => CodeKind::ConfirmationCode,
        }
    }

    /// 受信者のメールアドレスを返す
    pub fn recipient_email(&self) -> &str {
        match self {
            Self::TemporaryPassword { email, .. } | Self::PasswordResetCode { email, .. } => email,
        }
    }

    /// 本文に表示するユーザー名を返す
    pub fn username(&self) -> &str {
        match self {
            Self::TemporaryPassword { username, .. }
            | Self::PasswordResetCode { username, .. } => username,
        }
    }

    /// 復号済みワンタイムコードを返す
    pub fn code(&self) -> &OneTimeCode {
        match self {
            Self::TemporaryPassword { code, .. } | Self::PasswordResetCode { code, .. } => code,
        }
    }
}
