//! # コードリゾルバ
//!
//! base64 エンコードされた暗号文ワンタイムコードを復号し、
//! 平文の [`OneTimeCode`] として解決する。
//!
//! ## 設計方針
//!
//! - **明示的な結果型**: 失敗は `Err` として呼び出し側へ返す。
//!   `Err` は「フローを中止してメールを送信しない」ことを意味する
//! - **依存性注入**: 復号の具体的な方法は `CodeDecryptor` trait で抽象化

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use hikyaku_domain::one_time_code::{DecryptError, OneTimeCode};
use hikyaku_infra::decryption::CodeDecryptor;
use thiserror::Error;

/// コード解決エラー
#[derive(Debug, Error)]
pub enum CodeResolveError {
    /// リクエストに code が含まれない、または空
    #[error("リクエストに code が含まれていない")]
    Missing,

    /// base64 デコードに失敗
    #[error("code の base64 デコードに失敗: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// 復号に失敗（呼び出し失敗、または平文が空）
    #[error(transparent)]
    Decrypt(#[from] DecryptError),
}

/// コードリゾルバ
///
/// 両フロー（仮パスワード通知 / パスワード再設定通知）で共有される。
pub struct CodeResolver {
    decryptor: Arc<dyn CodeDecryptor>,
}

impl CodeResolver {
    pub fn new(decryptor: Arc<dyn CodeDecryptor>) -> Self {
        Self { decryptor }
    }

    /// 暗号文ワンタイムコードを平文へ解決する
    ///
    /// # 引数
    ///
    /// - `ciphertext_b64`: リクエストの `code` フィールド（base64 暗号文）
    pub async fn resolve(
        &self,
        ciphertext_b64: Option<&str>,
    ) -> Result<OneTimeCode, CodeResolveError> {
        let encoded = match ciphertext_b64 {
            Some(value) if !value.is_empty() => value,
            _ => return Err(CodeResolveError::Missing),
        };

        let ciphertext = STANDARD.decode(encoded)?;
        let plaintext = self.decryptor.decrypt(&ciphertext).await?;

        // 実装によらず空の平文は失敗として扱う
        if plaintext.is_empty() {
            return Err(CodeResolveError::Decrypt(DecryptError::EmptyPlaintext));
        }

        // コードは短い英数字想定。バイト列はテキストとして損失許容で表示する
        Ok(OneTimeCode::new(
            String::from_utf8_lossy(&plaintext).into_owned(),
        ))
    }
}
