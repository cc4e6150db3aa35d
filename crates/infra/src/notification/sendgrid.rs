//! SendGrid 通知送信実装
//!
//! SendGrid v3 Mail Send API を使用してメールを送信する。
//! 本番環境で使用する。

use async_trait::async_trait;
use hikyaku_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

/// SendGrid v3 Mail Send エンドポイント
const SEND_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";

/// SendGrid 通知送信
///
/// `reqwest::Client` をラップし、Bearer 認証で Mail Send API を呼び出す。
/// API キーは起動時に環境変数から一度だけ渡される。
pub struct SendGridNotificationSender {
    http:         reqwest::Client,
    api_key:      String,
    from_address: String,
}

impl SendGridNotificationSender {
    /// 新しい SendGrid 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `api_key`: SendGrid API キー
    /// - `from_address`: 送信元メールアドレス（SendGrid で検証済みであること）
    pub fn new(api_key: String, from_address: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            from_address,
        }
    }

    /// Mail Send API のリクエストボディを構築する
    ///
    /// text/plain を text/html より先に並べる（API の content 順序要件）。
    fn build_payload(&self, email: &EmailMessage) -> serde_json::Value {
        serde_json::json!({
            "personalizations": [{ "to": [{ "email": email.to }] }],
            "from": { "email": self.from_address },
            "subject": email.subject,
            "content": [
                { "type": "text/plain", "value": email.text_body },
                { "type": "text/html", "value": email.html_body },
            ],
        })
    }
}

#[async_trait]
impl NotificationSender for SendGridNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let response = self
            .http
            .post(SEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&self.build_payload(email))
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SendGrid リクエスト失敗: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::SendFailed(format!(
                "SendGrid 応答エラー: status={status} body={body}"
            )));
        }

        Ok(())
    }
}
