use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::application::services::generator::MessageGenerator;

pub struct OpenAiGenerator {
    http: Client,
    api_key: String,
    model: String,
    class_title: String,
    join_link: String,
    base_url: String,
}

impl OpenAiGenerator {
    pub fn new(api_key: String, model: String, class_title: String, join_link: String) -> Self {
        Self {
            http: Client::builder()
                .user_agent("reminders-service/openai")
                .build()
                .expect("failed to build openai client"),
            api_key,
            model,
            class_title,
            join_link,
            base_url: "https://api.openai.com".to_string(),
        }
    }

    fn build_prompt(&self, name: &str, role: &str, window_label: &str) -> String {
        format!(
            "Create a short WhatsApp reminder for {name}, a {role}, for the '{title}' class. \
             This is the {window_label} reminder. Keep it friendly and engaging. \
             Include this join link: {link}",
            title = self.class_title,
            link = self.join_link,
        )
    }
}

#[async_trait]
impl MessageGenerator for OpenAiGenerator {
    async fn generate(&self, name: &str, role: &str, window_label: &str) -> anyhow::Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": self.build_prompt(name, role, window_label)}],
            "max_tokens": 80,
        });

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("openai api error {status}: {detail}");
        }

        let payload: ChatCompletionResponse = response.json().await?;
        let content = payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("openai returned no choices"))?;

        Ok(content.trim().to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}
