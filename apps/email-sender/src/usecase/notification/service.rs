//! # 通知サービス
//!
//! テンプレートレンダリング → メール送信を統合するサービス。
//!
//! ## 設計方針
//!
//! - **明示的な結果型**: `notify()` はレンダリング・送信の失敗を `Err` で返す。
//!   失敗を呼び出し失敗にするかの判断はディスパッチャのポリシーに委ねる
//! - **構造化ログ**: 送信の成否は `log_business_event!` で記録する
//! - **依存性注入**: `NotificationSender` は trait で抽象化

use std::sync::Arc;

use hikyaku_domain::notification::{NotificationError, VerificationNotification};
use hikyaku_infra::notification::NotificationSender;
use hikyaku_shared::{event_log::event, log_business_event};

use super::TemplateRenderer;

/// 通知サービス
///
/// 検証通知イベントからメールを生成し、設定されたバックエンドへ送信する。
pub struct NotificationService {
    sender:            Arc<dyn NotificationSender>,
    template_renderer: TemplateRenderer,
}

impl NotificationService {
    pub fn new(sender: Arc<dyn NotificationSender>, template_renderer: TemplateRenderer) -> Self {
        Self {
            sender,
            template_renderer,
        }
    }

    /// 通知を送信する
    ///
    /// テンプレートレンダリング → メール送信を行い、結果を明示的に返す。
    pub async fn notify(
        &self,
        notification: &VerificationNotification,
    ) -> Result<(), NotificationError> {
        let event_type: &str = notification.event_type().into();

        let email = match self.template_renderer.render(notification) {
            Ok(email) => email,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    notification.event_type = event_type,
                    "通知テンプレートのレンダリングに失敗"
                );
                return Err(e);
            }
        };

        tracing::info!(
            to = %email.to,
            notification.event_type = event_type,
            "メール送信を開始"
        );

        match self.sender.send_email(&email).await {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.result = event::result::SUCCESS,
                    notification.event_type = event_type,
                    notification.recipient = %email.to,
                    "通知メール送信成功"
                );
                Ok(())
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.result = event::result::FAILURE,
                    notification.event_type = event_type,
                    notification.recipient = %email.to,
                    error = %e,
                    "通知メール送信失敗"
                );
                Err(e)
            }
        }
    }
}
