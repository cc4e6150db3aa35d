//! # ユースケース
//!
//! コード解決と通知送信を統合する検証メールユースケース。
//!
//! ## モジュール構成
//!
//! - [`code_resolver`] - 暗号文ワンタイムコードの解決
//! - [`notification`] - テンプレートレンダリングとメール送信の統合サービス

pub mod code_resolver;
pub mod notification;

use hikyaku_domain::{
    event::VerificationRequest,
    notification::{NotificationError, VerificationNotification},
    one_time_code::CodeKind,
};
use thiserror::Error;

pub use code_resolver::{CodeResolveError, CodeResolver};
pub use notification::{NotificationService, TemplateRenderer};

/// 検証メールユースケースのエラー
///
/// フローの失敗をコード解決と送信に区別して表す内部結果型。
/// どちらを呼び出し失敗にするかの判断はディスパッチャが行う。
#[derive(Debug, Error)]
pub enum VerificationMailError {
    /// ワンタイムコードの解決に失敗（メールは送信されない）
    #[error("{kind}の復号に失敗: {source}")]
    CodeResolve {
        kind:   CodeKind,
        #[source]
        source: CodeResolveError,
    },

    /// 通知メールの送信に失敗
    #[error("{kind}通知メールの送信に失敗: {source}")]
    Notification {
        kind:   CodeKind,
        #[source]
        source: NotificationError,
    },
}

/// 検証メールユースケース
///
/// 2 つのフロー（仮パスワード通知 / パスワード再設定通知）を提供する。
/// どちらも「コード解決 → 通知組み立て → 送信」の同じ形で、
/// 通知はコード解決が成功した場合にのみ組み立てられる。
pub struct VerificationMailUseCase {
    resolver:     CodeResolver,
    notification: NotificationService,
}

impl VerificationMailUseCase {
    pub fn new(resolver: CodeResolver, notification: NotificationService) -> Self {
        Self {
            resolver,
            notification,
        }
    }

    /// 仮パスワード通知フロー（AdminCreateUser トリガー）
    pub async fn notify_temporary_password(
        &self,
        request: &VerificationRequest,
    ) -> Result<(), VerificationMailError> {
        self.run(request, CodeKind::TemporaryPassword).await
    }

    /// パスワード再設定通知フロー（ForgotPassword トリガー）
    pub async fn notify_password_reset_code(
        &self,
        request: &VerificationRequest,
    ) -> Result<(), VerificationMailError> {
        self.run(request, CodeKind::ConfirmationCode).await
    }

    /// 共通フロー本体
    ///
    /// 復号は送信試行より前に必ず完了する（1 呼び出し内の順序保証）。
    async fn run(
        &self,
        request: &VerificationRequest,
        kind: CodeKind,
    ) -> Result<(), VerificationMailError> {
        let code = self
            .resolver
            .resolve(request.code.as_deref())
            .await
            .map_err(|source| VerificationMailError::CodeResolve { kind, source })?;

        let username = request.client_metadata.username.clone();
        let email = request.user_attributes.email.clone();
        let notification = match kind {
            CodeKind::TemporaryPassword => VerificationNotification::TemporaryPassword {
                username,
                email,
                code,
            },
            CodeKind::ConfirmationCode => VerificationNotification::PasswordResetCode {
                username,
                email,
                code,
            },
        };

        self.notification
            .notify(&notification)
            .await
            .map_err(|source| VerificationMailError::Notification { kind, source })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hikyaku_domain::event::{ClientMetadata, UserAttributes};
    use hikyaku_infra::mock::{MockCodeDecryptor, MockNotificationSender};
    use pretty_assertions::assert_eq;

    use super::*;

    // base64("encrypted-code")
    const CIPHERTEXT_B64: &str = "ZW5jcnlwdGVkLWNvZGU=";

    fn make_usecase(
        decryptor: MockCodeDecryptor,
        sender: MockNotificationSender,
    ) -> VerificationMailUseCase {
        VerificationMailUseCase::new(
            CodeResolver::new(Arc::new(decryptor)),
            NotificationService::new(Arc::new(sender), TemplateRenderer::new().unwrap()),
        )
    }

    fn make_request(code: Option<&str>) -> VerificationRequest {
        VerificationRequest {
            code:            code.map(String::from),
            client_metadata: ClientMetadata {
                username: "tanaka".to_string(),
            },
            user_attributes: UserAttributes {
                email: "tanaka@example.com".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn 仮パスワードフローで1通のメールが組み立てられる() {
        let decryptor = MockCodeDecryptor::new();
        decryptor.register(b"encrypted-code".to_vec(), b"Temp#1234".to_vec());
        let sender = MockNotificationSender::new();
        let usecase = make_usecase(decryptor, sender.clone());

        usecase
            .notify_temporary_password(&make_request(Some(CIPHERTEXT_B64)))
            .await
            .unwrap();

        let sent = sender.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "tanaka@example.com");
        assert_eq!(sent[0].subject, "Your temporary password");
        assert!(sent[0].html_body.contains("tanaka"));
        assert!(sent[0].html_body.contains("Temp#1234"));
    }

    #[tokio::test]
    async fn パスワード再設定フローは確認コードの件名で送信する() {
        let decryptor = MockCodeDecryptor::new();
        decryptor.register(b"encrypted-code".to_vec(), b"123456".to_vec());
        let sender = MockNotificationSender::new();
        let usecase = make_usecase(decryptor, sender.clone());

        usecase
            .notify_password_reset_code(&make_request(Some(CIPHERTEXT_B64)))
            .await
            .unwrap();

        let sent = sender.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Notification of password reset");
        assert!(sent[0].text_body.contains("123456"));
    }

    #[tokio::test]
    async fn codeが欠損しているとメールを送信せずエラーを返す() {
        let sender = MockNotificationSender::new();
        let usecase = make_usecase(MockCodeDecryptor::new(), sender.clone());

        let err = usecase
            .notify_temporary_password(&make_request(None))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            VerificationMailError::CodeResolve {
                kind: CodeKind::TemporaryPassword,
                ..
            }
        ));
        assert!(sender.sent_emails().is_empty());
    }

    #[tokio::test]
    async fn 復号に失敗するとメールを送信せずエラーを返す() {
        // 未登録の暗号文 → モックは KMS エラーを返す
        let sender = MockNotificationSender::new();
        let usecase = make_usecase(MockCodeDecryptor::new(), sender.clone());

        let err = usecase
            .notify_password_reset_code(&make_request(Some(CIPHERTEXT_B64)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            VerificationMailError::CodeResolve {
                kind: CodeKind::ConfirmationCode,
                ..
            }
        ));
        assert!(sender.sent_emails().is_empty());
    }

    #[tokio::test]
    async fn 送信失敗はnotificationエラーとして返す() {
        let decryptor = MockCodeDecryptor::new();
        decryptor.register(b"encrypted-code".to_vec(), b"abc123".to_vec());
        let sender = MockNotificationSender::with_failure("provider outage");
        let usecase = make_usecase(decryptor, sender);

        let err = usecase
            .notify_temporary_password(&make_request(Some(CIPHERTEXT_B64)))
            .await
            .unwrap_err();

        assert!(matches!(err, VerificationMailError::Notification { .. }));
    }

    #[test]
    fn エラーメッセージにコード種別のラベルが含まれる() {
        let err = VerificationMailError::CodeResolve {
            kind:   CodeKind::TemporaryPassword,
            source: CodeResolveError::Missing,
        };

        assert!(err.to_string().contains("仮パスワード"));

        let err = VerificationMailError::CodeResolve {
            kind:   CodeKind::ConfirmationCode,
            source: CodeResolveError::Missing,
        };

        assert!(err.to_string().contains("確認コード"));
    }
}
