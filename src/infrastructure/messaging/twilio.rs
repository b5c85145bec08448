use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    application::services::channel::DeliveryChannel, domain::value_objects::NormalizedAddress,
};

pub struct TwilioWhatsAppChannel {
    http: Client,
    account_sid: String,
    auth_token: String,
    base_url: String,
}

impl TwilioWhatsAppChannel {
    pub fn new(account_sid: String, auth_token: String) -> Self {
        Self {
            http: Client::builder()
                .user_agent("reminders-service/twilio")
                .build()
                .expect("failed to build twilio client"),
            account_sid,
            auth_token,
            base_url: "https://api.twilio.com".to_string(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        )
    }
}

#[async_trait]
impl DeliveryChannel for TwilioWhatsAppChannel {
    async fn send(&self, to: &NormalizedAddress, from: &str, body: &str) -> anyhow::Result<()> {
        let response = self
            .http
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to.as_str()), ("From", from), ("Body", body)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let payload: TwilioErrorResponse = response.json().await.unwrap_or_default();
            anyhow::bail!(
                "twilio api error {status}: {}",
                payload
                    .message
                    .unwrap_or_else(|| "unknown error".to_string())
            );
        }

        let payload: TwilioMessageResponse = response.json().await?;
        tracing::debug!(sid = %payload.sid, to = to.as_str(), "twilio accepted message");
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct TwilioMessageResponse {
    sid: String,
}

#[derive(Debug, Default, Deserialize)]
struct TwilioErrorResponse {
    message: Option<String>,
}
