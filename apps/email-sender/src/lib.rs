//! # Email Sender
//!
//! ユーザープールのカスタムメール送信トリガーを処理する Lambda 関数。
//!
//! ## 処理フロー
//!
//! ```text
//! イベント → ディスパッチャ → {仮パスワード通知 | パスワード再設定通知}
//!                                   ↓
//!                             コードリゾルバ（KMS 復号）
//!                                   ↓
//!                             通知サービス（テンプレート → メール配信 API）
//! ```
//!
//! ## モジュール構成
//!
//! - [`config`] - 環境変数からの設定読み込み
//! - [`error`] - ハンドラエラー定義
//! - [`handler`] - イベントのディスパッチャ
//! - [`usecase`] - コード解決と通知送信のユースケース

pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
