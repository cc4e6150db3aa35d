//! KMS 復号実装
//!
//! AWS KMS の Decrypt API を使用して暗号文ワンタイムコードを復号する。
//! 本番環境で使用する。

use async_trait::async_trait;
use aws_sdk_kms::{Client, primitives::Blob};
use hikyaku_domain::one_time_code::DecryptError;

use super::{CodeDecryptor, KeyringConfig};

/// KMS コード復号
///
/// `aws_sdk_kms::Client` をラップする。
/// [`KeyringConfig`] の鍵識別子を優先順に試行し、最初に成功した平文を返す。
pub struct KmsCodeDecryptor {
    client:  Client,
    keyring: KeyringConfig,
}

impl KmsCodeDecryptor {
    /// 新しい KMS 復号インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `client`: AWS KMS クライアント
    /// - `keyring`: 鍵アクセスハンドル（生成鍵エイリアス + 追加鍵 ID）
    pub fn new(client: Client, keyring: KeyringConfig) -> Self {
        Self { client, keyring }
    }
}

#[async_trait]
impl CodeDecryptor for KmsCodeDecryptor {
    async fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, DecryptError> {
        let mut last_error: Option<String> = None;

        for key_id in self.keyring.candidates() {
            let result = self
                .client
                .decrypt()
                .key_id(key_id)
                .ciphertext_blob(Blob::new(ciphertext.to_vec()))
                .send()
                .await;

            match result {
                Ok(output) => {
                    let plaintext = output
                        .plaintext()
                        .map(|blob| blob.as_ref().to_vec())
                        .unwrap_or_default();
                    if plaintext.is_empty() {
                        return Err(DecryptError::EmptyPlaintext);
                    }
                    return Ok(plaintext);
                }
                Err(err) => {
                    tracing::debug!(key_id, error = %err, "この鍵では復号できないため次の候補を試行");
                    last_error = Some(format!("Decrypt の実行に失敗: {err}"));
                }
            }
        }

        Err(DecryptError::Kms(last_error.unwrap_or_else(|| {
            "復号に使用できる鍵が設定されていない".to_string()
        })))
    }
}

/// KMS クライアントを作成する
///
/// 認証情報とリージョンは SDK のデフォルトチェーンで解決する:
/// - ローカル: 環境変数 `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` / `AWS_REGION`
/// - 本番: Lambda 実行ロールと実行環境のリージョン
pub async fn create_client() -> Client {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;

    Client::new(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KmsCodeDecryptor>();
    }
}
