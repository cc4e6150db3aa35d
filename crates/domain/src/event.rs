//! # トリガーイベント
//!
//! ユーザープールのカスタムメール送信トリガーが渡すイベントを
//! 型付きスキーマとして定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 要件 |
//! |---|------------|------|
//! | [`SenderEvent`] | カスタムメール送信イベント | 境界でパース済みのイベント全体 |
//! | [`TriggerPayload`] | トリガー種別ごとのペイロード | 対応 2 種 + その他の直和型 |
//! | [`VerificationRequest`] | 検証リクエスト | 暗号文コードと送信先情報 |
//!
//! ## 設計方針
//!
//! - **境界でのパース**: 動的なフィールド探索をフロー側に持ち込まず、
//!   ハンドラ入口で [`SenderEvent::from_value`] により型へ変換する
//! - **未対応トリガーは寛容に**: 認識しない `triggerSource` は request の
//!   中身を検査せず [`TriggerPayload::Other`] に落とす（エラーにしない）
//! - **対応トリガーは厳格に**: `AdminCreateUser` / `ForgotPassword` で
//!   request が [`VerificationRequest`] に一致しない場合のみパース失敗となり、
//!   呼び出し基盤へ唯一のエラーとして伝播する

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 管理者によるユーザー作成時のトリガー種別タグ
pub const TRIGGER_ADMIN_CREATE_USER: &str = "CustomEmailSender_AdminCreateUser";

/// パスワード再設定時のトリガー種別タグ
pub const TRIGGER_FORGOT_PASSWORD: &str = "CustomEmailSender_ForgotPassword";

/// イベントパースエラー
#[derive(Debug, Error)]
pub enum EventParseError {
    /// イベント全体がカスタムメール送信イベントの形をしていない
    #[error("イベントの形式が不正: {0}")]
    Envelope(#[source] serde_json::Error),

    /// 認識済み triggerSource の request が想定スキーマに一致しない
    #[error("{trigger_source} の request が不正: {source}")]
    MalformedRequest {
        trigger_source: String,
        #[source]
        source:         serde_json::Error,
    },
}

/// 受信イベントの素の形
///
/// `triggerSource` の値を見るまで request の中身は検査しない。
/// [`SenderEvent`] への変換時にトリガー種別に応じたスキーマを適用する。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSenderEvent {
    /// トリガー種別タグ
    pub trigger_source: String,
    /// ユーザープール ID（観測用。欠損時は空文字）
    #[serde(default)]
    pub user_pool_id:   String,
    /// トリガー種別ごとのリクエスト本体（未検査）
    #[serde(default)]
    pub request:        serde_json::Value,
}

impl RawSenderEvent {
    /// JSON ペイロードからエンベロープをパースする
    ///
    /// 観測ログ用のフィールド（`userPoolId`、`triggerSource`、request 全体）を
    /// 取り出すだけで、request の中身はまだ検査しない。
    pub fn from_value(payload: serde_json::Value) -> Result<Self, EventParseError> {
        serde_json::from_value(payload).map_err(EventParseError::Envelope)
    }
}

/// 検証リクエスト
///
/// 対応トリガー（AdminCreateUser / ForgotPassword）の request 部。
/// `code` は鍵アクセスサービスで復号する base64 エンコード済み暗号文。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    /// base64 エンコードされた暗号文（欠損・空はフロー側で送信中止）
    #[serde(default)]
    pub code:            Option<String>,
    /// クライアントメタデータ
    pub client_metadata: ClientMetadata,
    /// ユーザー属性
    pub user_attributes: UserAttributes,
}

/// クライアントメタデータ
///
/// `username` の欠損は構造違反としてパース失敗になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMetadata {
    /// 通知メール本文に表示するユーザー名
    pub username: String,
}

/// ユーザー属性
///
/// `email` の欠損は構造違反としてパース失敗になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAttributes {
    /// 通知メールの送信先メールアドレス
    pub email: String,
}

/// トリガー種別ごとのペイロード
///
/// 対応する 2 種のトリガーと、それ以外を表す catch-all の直和型。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerPayload {
    /// 管理者によるユーザー作成 → 仮パスワード通知フロー
    AdminCreateUser(VerificationRequest),
    /// パスワード再設定 → 確認コード通知フロー
    ForgotPassword(VerificationRequest),
    /// 未対応のトリガー種別（警告ログのみで処理しない）
    Other {
        /// 受信したトリガー種別タグ
        trigger_source: String,
    },
}

impl TriggerPayload {
    /// トリガー種別タグを返す
    pub fn trigger_source(&self) -> &str {
        match self {
            Self::AdminCreateUser(_) => TRIGGER_ADMIN_CREATE_USER,
            Self::ForgotPassword(_) => TRIGGER_FORGOT_PASSWORD,
            Self::Other { trigger_source } => trigger_source,
        }
    }
}

/// 境界でパース済みのカスタムメール送信イベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderEvent {
    /// ユーザープール ID（観測用）
    pub user_pool_id: String,
    /// トリガー種別ごとのペイロード
    pub trigger:      TriggerPayload,
}

impl SenderEvent {
    /// JSON ペイロードからイベントをパースする
    ///
    /// ハンドラ入口で一度だけ呼ばれる。対応トリガーの request が
    /// スキーマに一致しない場合のみ `Err` を返す。
    pub fn from_value(payload: serde_json::Value) -> Result<Self, EventParseError> {
        Self::try_from(RawSenderEvent::from_value(payload)?)
    }
}

impl TryFrom<RawSenderEvent> for SenderEvent {
    type Error = EventParseError;

    fn try_from(raw: RawSenderEvent) -> Result<Self, EventParseError> {
        let RawSenderEvent {
            trigger_source,
            user_pool_id,
            request,
        } = raw;

        let trigger = if trigger_source == TRIGGER_ADMIN_CREATE_USER {
            TriggerPayload::AdminCreateUser(parse_request(&trigger_source, request)?)
        } else if trigger_source == TRIGGER_FORGOT_PASSWORD {
            TriggerPayload::ForgotPassword(parse_request(&trigger_source, request)?)
        } else {
            TriggerPayload::Other { trigger_source }
        };

        Ok(Self {
            user_pool_id,
            trigger,
        })
    }
}

/// 対応トリガーの request 部を型付きスキーマへ変換する
fn parse_request(
    trigger_source: &str,
    request: serde_json::Value,
) -> Result<VerificationRequest, EventParseError> {
    serde_json::from_value(request).map_err(|source| EventParseError::MalformedRequest {
        trigger_source: trigger_source.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn admin_create_user_payload() -> serde_json::Value {
        json!({
            "triggerSource": "CustomEmailSender_AdminCreateUser",
            "userPoolId": "ap-northeast-1_XXXX",
            "request": {
                "code": "AQIDBA==",
                "clientMetadata": { "username": "tanaka" },
                "userAttributes": { "email": "tanaka@example.com", "sub": "uuid" }
            }
        })
    }

    #[test]
    fn admin_create_userイベントをパースできる() {
        let event = SenderEvent::from_value(admin_create_user_payload()).unwrap();

        assert_eq!(event.user_pool_id, "ap-northeast-1_XXXX");
        let TriggerPayload::AdminCreateUser(request) = event.trigger else {
            panic!("AdminCreateUser であること");
        };
        assert_eq!(request.code.as_deref(), Some("AQIDBA=="));
        assert_eq!(request.client_metadata.username, "tanaka");
        assert_eq!(request.user_attributes.email, "tanaka@example.com");
    }

    #[test]
    fn forgot_passwordイベントをパースできる() {
        let payload = json!({
            "triggerSource": "CustomEmailSender_ForgotPassword",
            "userPoolId": "ap-northeast-1_XXXX",
            "request": {
                "code": "AQIDBA==",
                "clientMetadata": { "username": "alice" },
                "userAttributes": { "email": "alice@example.com" }
            }
        });

        let event = SenderEvent::from_value(payload).unwrap();

        assert!(matches!(event.trigger, TriggerPayload::ForgotPassword(_)));
        assert_eq!(
            event.trigger.trigger_source(),
            "CustomEmailSender_ForgotPassword"
        );
    }

    #[test]
    fn 未対応のtrigger_sourceはotherになる() {
        let payload = json!({
            "triggerSource": "CustomEmailSender_SignUp",
            "userPoolId": "ap-northeast-1_XXXX",
            "request": { "code": "AQIDBA==" }
        });

        let event = SenderEvent::from_value(payload).unwrap();

        assert_eq!(
            event.trigger,
            TriggerPayload::Other {
                trigger_source: "CustomEmailSender_SignUp".to_string(),
            }
        );
    }

    #[test]
    fn 未対応トリガーはrequestの形を検査しない() {
        // 対応トリガーなら構造違反になる request でも Other はパースに成功する
        let payload = json!({
            "triggerSource": "CustomEmailSender_VerifyUserAttribute",
            "request": { "clientMetadata": {} }
        });

        let event = SenderEvent::from_value(payload).unwrap();

        assert!(matches!(event.trigger, TriggerPayload::Other { .. }));
    }

    #[test]
    fn codeが欠損していてもパースは成功する() {
        let payload = json!({
            "triggerSource": "CustomEmailSender_ForgotPassword",
            "request": {
                "clientMetadata": { "username": "alice" },
                "userAttributes": { "email": "alice@example.com" }
            }
        });

        let event = SenderEvent::from_value(payload).unwrap();

        let TriggerPayload::ForgotPassword(request) = event.trigger else {
            panic!("ForgotPassword であること");
        };
        assert_eq!(request.code, None);
    }

    #[test]
    fn client_metadataの欠損はmalformed_requestになる() {
        let payload = json!({
            "triggerSource": "CustomEmailSender_AdminCreateUser",
            "request": {
                "code": "AQIDBA==",
                "userAttributes": { "email": "tanaka@example.com" }
            }
        });

        let err = SenderEvent::from_value(payload).unwrap_err();

        assert!(matches!(
            err,
            EventParseError::MalformedRequest { trigger_source, .. }
                if trigger_source == "CustomEmailSender_AdminCreateUser"
        ));
    }

    #[test]
    fn user_attributesのemail欠損はmalformed_requestになる() {
        let payload = json!({
            "triggerSource": "CustomEmailSender_ForgotPassword",
            "request": {
                "code": "AQIDBA==",
                "clientMetadata": { "username": "alice" },
                "userAttributes": {}
            }
        });

        let err = SenderEvent::from_value(payload).unwrap_err();

        assert!(matches!(err, EventParseError::MalformedRequest { .. }));
    }

    #[test]
    fn trigger_sourceを欠くペイロードはenvelopeエラーになる() {
        let err = SenderEvent::from_value(json!({ "hello": "world" })).unwrap_err();

        assert!(matches!(err, EventParseError::Envelope(_)));
    }

    #[test]
    fn user_pool_idの欠損は空文字にフォールバックする() {
        let payload = json!({
            "triggerSource": "CustomEmailSender_AccountTakeOverNotification",
            "request": {}
        });

        let event = SenderEvent::from_value(payload).unwrap();

        assert_eq!(event.user_pool_id, "");
    }
}
