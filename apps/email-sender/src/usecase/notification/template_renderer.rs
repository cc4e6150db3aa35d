//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **件名はトリガー種別ごとに固定**: 他のフィールド値に依存しない
//! - **HTML 自動エスケープ**: `.html` テンプレートには tera の
//!   デフォルトエスケープが適用される（本文に埋め込む username / code は
//!   ユーザープール由来だが、マークアップとして解釈させない）

use hikyaku_domain::notification::{EmailMessage, NotificationError, VerificationNotification};
use tera::{Context, Tera};

/// 仮パスワード通知の件名（固定）
const SUBJECT_TEMPORARY_PASSWORD: &str = "Your temporary password";

/// パスワード再設定通知の件名（固定）
const SUBJECT_PASSWORD_RESET: &str = "Notification of password reset";

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、`VerificationNotification` から
/// `EmailMessage` を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "temporary_password.html",
                    include_str!("../../../templates/notifications/temporary_password.html"),
                ),
                (
                    "temporary_password.txt",
                    include_str!("../../../templates/notifications/temporary_password.txt"),
                ),
                (
                    "password_reset.html",
                    include_str!("../../../templates/notifications/password_reset.html"),
                ),
                (
                    "password_reset.txt",
                    include_str!("../../../templates/notifications/password_reset.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 通知イベントからメールメッセージを生成する
    pub fn render(
        &self,
        notification: &VerificationNotification,
    ) -> Result<EmailMessage, NotificationError> {
        let (template_name, subject) = match notification {
            VerificationNotification::TemporaryPassword { .. } => {
                ("temporary_password", SUBJECT_TEMPORARY_PASSWORD)
            }
            VerificationNotification::PasswordResetCode { .. } => {
                ("password_reset", SUBJECT_PASSWORD_RESET)
            }
        };

        let mut context = Context::new();
        context.insert("username", notification.username());
        context.insert("code", notification.code().as_str());

        let html_body = self
            .engine
            .render(&format!("{template_name}.html"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text_body = self
            .engine
            .render(&format!("{template_name}.txt"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(EmailMessage {
            to: notification.recipient_email().to_string(),
            subject: subject.to_string(),
            html_body,
            text_body,
        })
    }
}
