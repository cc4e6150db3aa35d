//! # ワンタイムコード復号
//!
//! 暗号文ワンタイムコードの復号を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `CodeDecryptor` trait で復号を抽象化
//! - **鍵アクセスハンドル**: 生成鍵エイリアスと追加鍵 ID の組を
//!   [`KeyringConfig`] として起動時に一度だけ構築し、読み取り専用で使い回す
//! - **復号スキームは外部の責務**: エンベロープ暗号の内部（データ鍵の導出等）は
//!   鍵アクセスサービス側が担い、このモジュールは呼び出しの成否のみ扱う

mod kms;

use async_trait::async_trait;
use hikyaku_domain::one_time_code::DecryptError;
pub use kms::{KmsCodeDecryptor, create_client};

/// ワンタイムコード復号トレイト
///
/// 復号基盤の中核。暗号文から平文を取り出す具体的な方法を抽象化する。
/// 本番は KMS、テストはインメモリモックを使用する。
#[async_trait]
pub trait CodeDecryptor: Send + Sync {
    /// 暗号文を復号して平文バイト列を返す
    async fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, DecryptError>;
}

/// 鍵アクセスハンドル
///
/// 環境変数から起動時に構築される。生成鍵エイリアスを第一候補、
/// 追加の鍵 ID を後続候補として復号を試行する。
#[derive(Debug, Clone)]
pub struct KeyringConfig {
    /// 生成鍵エイリアス（例: `alias/hikyaku-email`）
    pub generator_key_alias: String,
    /// 追加の鍵 ID
    pub key_ids:             Vec<String>,
}

impl KeyringConfig {
    /// 新しい鍵アクセスハンドルを作成する
    pub fn new(generator_key_alias: impl Into<String>, key_ids: Vec<String>) -> Self {
        Self {
            generator_key_alias: generator_key_alias.into(),
            key_ids,
        }
    }

    /// 復号に試行する鍵識別子を優先順に返す
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.generator_key_alias.as_str())
            .chain(self.key_ids.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn candidatesは生成鍵エイリアスを先頭に返す() {
        let keyring = KeyringConfig::new(
            "alias/hikyaku-email",
            vec!["key-1".to_string(), "key-2".to_string()],
        );

        let candidates: Vec<&str> = keyring.candidates().collect();

        assert_eq!(candidates, vec!["alias/hikyaku-email", "key-1", "key-2"]);
    }

    #[test]
    fn 追加鍵なしでも生成鍵エイリアスだけを返す() {
        let keyring = KeyringConfig::new("alias/hikyaku-email", Vec::new());

        let candidates: Vec<&str> = keyring.candidates().collect();

        assert_eq!(candidates, vec!["alias/hikyaku-email"]);
    }
}
