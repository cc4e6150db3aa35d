//! # ワンタイムコード
//!
//! 復号済みワンタイムコードに関する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`OneTimeCode`] | ワンタイムコード | 復号済みの仮パスワード / 確認コード |
//! | [`CodeKind`] | コード種別 | ログ文脈の区別（仮パスワード vs 確認コード） |
//! | [`DecryptError`] | 復号エラー | 鍵アクセスサービス呼び出しの失敗 |

use derive_more::Display;
use thiserror::Error;

/// ワンタイムコード（復号済み平文）
///
/// 仮パスワードまたは確認コードをラップする。メール本文への埋め込みにのみ
/// 使用し、ログには出力しない。
///
/// # セキュリティ
///
/// Debug 出力では値をマスクする。
#[derive(Clone, PartialEq, Eq)]
pub struct OneTimeCode(String);

impl std::fmt::Debug for OneTimeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("OneTimeCode").field(&"[REDACTED]").finish()
    }
}

impl OneTimeCode {
    /// ワンタイムコードを作成する
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// コード種別
///
/// 復号失敗時のエラーメッセージに使うラベルを `Display` で提供する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CodeKind {
    /// 仮パスワード（AdminCreateUser フロー）
    #[display("仮パスワード")]
    TemporaryPassword,
    /// 確認コード（ForgotPassword フロー）
    #[display("確認コード")]
    ConfirmationCode,
}

/// 復号エラー
///
/// 鍵アクセスサービス（KMS）への復号依頼で発生するエラー。
/// AWS SDK のエラー型はジェネリクスが深く `#[from]` が困難なため、
/// インフラ側で String にマップする。
#[derive(Debug, Error)]
pub enum DecryptError {
    /// 鍵アクセスサービスの呼び出しに失敗
    #[error("KMS 復号に失敗: {0}")]
    Kms(String),

    /// 復号は成功したが平文が空
    #[error("復号結果の平文が空")]
    EmptyPlaintext,
}
