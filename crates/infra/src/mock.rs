//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリモック実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! hikyaku-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use hikyaku_domain::{
    notification::{EmailMessage, NotificationError},
    one_time_code::DecryptError,
};

use crate::{decryption::CodeDecryptor, notification::NotificationSender};

// ===== MockCodeDecryptor =====

/// テスト用のモック CodeDecryptor
///
/// `register` で登録した暗号文→平文の対応表で復号する。
/// 未登録の暗号文は KMS エラーとして失敗する。
#[derive(Clone, Default)]
pub struct MockCodeDecryptor {
    plaintexts: Arc<Mutex<HashMap<Vec<u8>, Vec<u8>>>>,
}

impl MockCodeDecryptor {
    pub fn new() -> Self {
        Self {
            plaintexts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// 暗号文と対応する平文を登録する
    pub fn register(&self, ciphertext: impl Into<Vec<u8>>, plaintext: impl Into<Vec<u8>>) {
        self.plaintexts
            .lock()
            .unwrap()
            .insert(ciphertext.into(), plaintext.into());
    }
}

#[async_trait]
impl CodeDecryptor for MockCodeDecryptor {
    async fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, DecryptError> {
        self.plaintexts
            .lock()
            .unwrap()
            .get(ciphertext)
            .cloned()
            .ok_or_else(|| DecryptError::Kms("登録されていない暗号文".to_string()))
    }
}

// ===== MockNotificationSender =====

/// テスト用のモック NotificationSender
///
/// 送信されたメッセージを記録する。`with_failure` で作成すると
/// すべての送信が失敗する（配信失敗ポリシーのテスト用）。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:    Arc<Mutex<Vec<EmailMessage>>>,
    failure: Option<String>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self {
            sent:    Arc::new(Mutex::new(Vec::new())),
            failure: None,
        }
    }

    /// すべての送信が指定メッセージで失敗するインスタンスを作成する
    pub fn with_failure(message: impl Into<String>) -> Self {
        Self {
            sent:    Arc::new(Mutex::new(Vec::new())),
            failure: Some(message.into()),
        }
    }

    /// 送信されたメッセージの一覧を返す
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        if let Some(message) = &self.failure {
            return Err(NotificationError::SendFailed(message.clone()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
