use std::sync::Arc;

use poem_openapi::{ApiResponse, OpenApi, payload::Json};

use crate::{
    application::usecases::send_reminders::{SendRemindersConfig, SendRemindersUseCase},
    config::{ConfigError, ReminderConfig},
    infrastructure::{
        generation::openai::OpenAiGenerator, messaging::twilio::TwilioWhatsAppChannel,
        repositories::sheets::SheetsRosterSource,
    },
    presentation::http::{
        endpoints::root::EndpointsTags,
        mappers::map_report,
        responses::{DispatchErrorDto, SendRemindersResponseDto},
    },
};

pub struct RemindersEndpoints;

#[derive(ApiResponse)]
pub enum SendRemindersResponse {
    /// Completed pass; per-recipient failures are reported in the body, not
    /// as an error status.
    #[oai(status = 200)]
    Ok(Json<SendRemindersResponseDto>),
    /// Configuration or roster failure before any recipient was processed.
    #[oai(status = 500)]
    Failed(Json<DispatchErrorDto>),
}

#[OpenApi]
impl RemindersEndpoints {
    #[oai(path = "/send_reminders", method = "get", tag = EndpointsTags::Reminders)]
    pub async fn send_reminders(&self) -> SendRemindersResponse {
        // Collaborators are scoped to a single dispatch pass; configuration
        // is re-read and validated before any recipient is touched.
        let config = match ReminderConfig::from_env() {
            Ok(config) => config,
            Err(err) => return SendRemindersResponse::Failed(Json(config_error(err))),
        };

        match build_usecase(config).execute().await {
            Ok(report) => SendRemindersResponse::Ok(Json(map_report(&report))),
            Err(err) => SendRemindersResponse::Failed(Json(DispatchErrorDto {
                sent: 0,
                error: err.to_string(),
                missing: None,
            })),
        }
    }
}

fn build_usecase(config: ReminderConfig) -> SendRemindersUseCase {
    let roster = SheetsRosterSource::new(
        config.credentials,
        config.sheet_id,
        config.sheet_range,
    );
    let generator = OpenAiGenerator::new(
        config.openai_api_key,
        config.openai_model,
        config.class_title,
        config.join_link,
    );
    let channel = TwilioWhatsAppChannel::new(config.twilio_account_sid, config.twilio_auth_token);

    SendRemindersUseCase::new(
        Arc::new(roster),
        Arc::new(generator),
        Arc::new(channel),
        SendRemindersConfig {
            event_time: config.class_time,
            windows: config.windows,
            default_region_prefix: config.default_region_prefix,
            channel_scheme: config.channel_scheme,
            sender_address: config.twilio_from,
            generation_timeout: config.generation_timeout,
            delivery_timeout: config.delivery_timeout,
        },
    )
}

fn config_error(err: ConfigError) -> DispatchErrorDto {
    let missing = match &err {
        ConfigError::Missing(keys) => Some(keys.clone()),
        ConfigError::Invalid { .. } => None,
    };
    DispatchErrorDto {
        sent: 0,
        error: err.to_string(),
        missing,
    }
}
