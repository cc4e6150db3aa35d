//! # イベントハンドラ
//!
//! ユーザープールから届くカスタムメール送信イベントのディスパッチャ。
//!
//! ## 設計方針
//!
//! - **境界でのパース**: 受信ペイロードを入口で型付きイベントへ変換し、
//!   フロー側には検証済みの [`VerificationRequest`] だけを渡す
//! - **ベストエフォート吸収**: 復号失敗・送信失敗はエラーログのみで正常終了。
//!   失敗を基盤へ返すと再試行が再復号・重複送信を招くため
//!   （このシステムは重複排除の仕組みを持たない）
//! - **構造違反のみ失敗**: 対応トリガーの request がスキーマに一致しない
//!   場合だけ `Err` を返し、基盤に失敗として観測させる
//!
//! [`VerificationRequest`]: hikyaku_domain::event::VerificationRequest

use hikyaku_domain::event::{RawSenderEvent, SenderEvent, TriggerPayload};

use crate::{error::HandlerError, usecase::VerificationMailUseCase};

/// プロセス全体で共有するアプリケーションコンテキスト
///
/// 起動時に一度だけ構築し、全呼び出しから読み取り専用で参照する。
/// 呼び出し間で共有される状態はこれだけで、可変な状態は持たない。
pub struct AppContext {
    /// 検証メールユースケース
    pub usecase: VerificationMailUseCase,
}

/// カスタムメール送信イベントを処理する
///
/// イベントの識別フィールドをログに残し、トリガー種別ごとのフローへ
/// 振り分ける。未対応のトリガー種別は警告ログのみで正常終了する。
pub async fn handle_event(
    ctx: &AppContext,
    payload: serde_json::Value,
) -> Result<(), HandlerError> {
    let raw = RawSenderEvent::from_value(payload)?;

    tracing::info!(
        user_pool_id = %raw.user_pool_id,
        trigger_source = %raw.trigger_source,
        request = %raw.request,
        "カスタムメール送信イベントを受信"
    );

    let event = SenderEvent::try_from(raw)?;

    match &event.trigger {
        TriggerPayload::AdminCreateUser(request) => {
            if let Err(e) = ctx.usecase.notify_temporary_password(request).await {
                tracing::error!(error = %e, "仮パスワード通知フローが失敗（呼び出しは正常終了扱い）");
            }
        }
        TriggerPayload::ForgotPassword(request) => {
            if let Err(e) = ctx.usecase.notify_password_reset_code(request).await {
                tracing::error!(error = %e, "パスワード再設定通知フローが失敗（呼び出しは正常終了扱い）");
            }
        }
        TriggerPayload::Other { trigger_source } => {
            tracing::warn!(
                trigger_source = %trigger_source,
                "未対応の triggerSource のため処理をスキップ"
            );
        }
    }

    Ok(())
}
