//! # Email Sender エラー定義

use hikyaku_domain::event::EventParseError;
use thiserror::Error;

/// ハンドラエラー
///
/// 呼び出し基盤に失敗として返る唯一のエラー。
/// 復号失敗・送信失敗はハンドラ内で吸収されるため、ここには含まれない。
#[derive(Debug, Error)]
pub enum HandlerError {
    /// イベントの構造が不正
    #[error("イベントの解析に失敗: {0}")]
    Event(#[from] EventParseError),
}
