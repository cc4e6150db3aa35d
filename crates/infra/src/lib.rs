//! # Hikyaku インフラ層
//!
//! 外部サービスとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはドメイン層が前提とする外部コラボレータ（鍵アクセスサービス、
//! メール配信 API）へのアクセスを trait の具体実装として提供する。
//! 外部サービスの詳細をカプセル化し、ドメイン層とユースケース層を
//! インフラの変更から保護する。
//!
//! ## 責務
//!
//! - **ワンタイムコード復号**: KMS への復号依頼（[`decryption`]）
//! - **メール送信**: SendGrid / SMTP / Noop バックエンド（[`notification`]）
//! - **テストモック**: `test-utils` feature で公開されるインメモリ実装（[`mock`]）
//!
//! ## 依存関係
//!
//! ```text
//! app → infra → domain
//! ```
//!
//! インフラ層は `domain` に依存する。
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。

pub mod decryption;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;

pub use decryption::{CodeDecryptor, KeyringConfig, KmsCodeDecryptor};
pub use notification::NotificationSender;
