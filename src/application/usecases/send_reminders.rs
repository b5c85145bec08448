use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use tokio::time::timeout;
use uuid::Uuid;

use crate::{
    application::services::{channel::DeliveryChannel, generator::MessageGenerator},
    domain::{
        errors::DispatchError,
        models::{DispatchOutcome, DispatchReport, LeadWindow, Recipient, RecipientOutcome, classify},
        repositories::RosterSource,
        value_objects::NormalizedAddress,
    },
};

pub struct SendRemindersConfig {
    pub event_time: DateTime<FixedOffset>,
    pub windows: Vec<LeadWindow>,
    pub default_region_prefix: String,
    pub channel_scheme: String,
    pub sender_address: String,
    pub generation_timeout: Duration,
    pub delivery_timeout: Duration,
}

pub struct SendRemindersUseCase {
    roster: Arc<dyn RosterSource>,
    generator: Arc<dyn MessageGenerator>,
    channel: Arc<dyn DeliveryChannel>,
    config: SendRemindersConfig,
}

impl SendRemindersUseCase {
    pub fn new(
        roster: Arc<dyn RosterSource>,
        generator: Arc<dyn MessageGenerator>,
        channel: Arc<dyn DeliveryChannel>,
        config: SendRemindersConfig,
    ) -> Self {
        Self {
            roster,
            generator,
            channel,
            config,
        }
    }

    /// Runs one dispatch pass. A roster failure is fatal and aborts before
    /// any recipient is touched; everything after that is isolated per
    /// recipient, so the pass always runs to the end of the roster.
    pub async fn execute(&self) -> Result<DispatchReport, DispatchError> {
        let rows = self
            .roster
            .fetch_rows()
            .await
            .map_err(|err| DispatchError::RosterFetch(err.to_string()))?;

        // Captured once so every recipient is classified against the same
        // instant; a batch must not straddle a window boundary mid-pass.
        let now = Utc::now();
        let invocation = Uuid::new_v4();
        tracing::info!(%invocation, rows = rows.len(), "starting dispatch pass");

        let mut outcomes = Vec::new();
        // The first roster row is the sheet header.
        for row in rows.iter().skip(1) {
            let recipient = row
                .first()
                .map(|name| name.trim().to_string())
                .unwrap_or_default();
            let outcome = self.process_row(row, now).await;
            match &outcome {
                DispatchOutcome::Sent => {
                    tracing::info!(%invocation, recipient = %recipient, "reminder sent");
                }
                DispatchOutcome::Skipped { reason } => {
                    tracing::debug!(%invocation, recipient = %recipient, reason, "recipient skipped");
                }
                DispatchOutcome::Failed { reason } => {
                    tracing::warn!(%invocation, recipient = %recipient, reason, "dispatch failed");
                }
            }
            outcomes.push(RecipientOutcome { recipient, outcome });
        }

        let report = DispatchReport::from_outcomes(outcomes);
        tracing::info!(%invocation, sent = report.sent_count, "dispatch pass finished");
        Ok(report)
    }

    async fn process_row(&self, row: &[String], now: DateTime<Utc>) -> DispatchOutcome {
        let recipient = match Recipient::from_row(row) {
            Ok(recipient) => recipient,
            Err(err) => {
                return DispatchOutcome::Skipped {
                    reason: err.to_string(),
                };
            }
        };

        let Some(window) = classify(now, self.config.event_time, &self.config.windows) else {
            return DispatchOutcome::Skipped {
                reason: "outside window".to_string(),
            };
        };

        let to = NormalizedAddress::normalize(
            &recipient.contact_address,
            &self.config.default_region_prefix,
            &self.config.channel_scheme,
        );

        let body = match self.generate_message(&recipient, &window.label).await {
            Ok(body) => body,
            Err(err) => {
                return DispatchOutcome::Failed {
                    reason: err.to_string(),
                };
            }
        };

        match self.deliver(&to, &body).await {
            Ok(()) => DispatchOutcome::Sent,
            Err(err) => DispatchOutcome::Failed {
                reason: err.to_string(),
            },
        }
    }

    async fn generate_message(
        &self,
        recipient: &Recipient,
        window_label: &str,
    ) -> Result<String, DispatchError> {
        let generation = self.generator.generate(
            &recipient.display_name,
            &recipient.role,
            window_label,
        );
        match timeout(self.config.generation_timeout, generation).await {
            Ok(Ok(body)) => Ok(body),
            Ok(Err(err)) => Err(DispatchError::Generation(err.to_string())),
            Err(_) => Err(DispatchError::Generation("timed out".to_string())),
        }
    }

    async fn deliver(&self, to: &NormalizedAddress, body: &str) -> Result<(), DispatchError> {
        let delivery = self.channel.send(to, &self.config.sender_address, body);
        match timeout(self.config.delivery_timeout, delivery).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(DispatchError::Delivery(err.to_string())),
            Err(_) => Err(DispatchError::Delivery("timed out".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Duration as TimeDelta;

    use super::*;
    use crate::infrastructure::repositories::in_memory::InMemoryRosterSource;

    struct FailingRoster;

    #[async_trait]
    impl RosterSource for FailingRoster {
        async fn fetch_rows(&self) -> anyhow::Result<Vec<Vec<String>>> {
            anyhow::bail!("sheet unreachable")
        }
    }

    struct StubGenerator {
        fail: bool,
        delay: Option<Duration>,
    }

    impl StubGenerator {
        fn ok() -> Self {
            Self {
                fail: false,
                delay: None,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                delay: None,
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                fail: false,
                delay: Some(delay),
            }
        }
    }

    #[async_trait]
    impl MessageGenerator for StubGenerator {
        async fn generate(
            &self,
            name: &str,
            _role: &str,
            window_label: &str,
        ) -> anyhow::Result<String> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                anyhow::bail!("model unavailable")
            }
            Ok(format!("Hi {name}, this is your {window_label} reminder"))
        }
    }

    #[derive(Default)]
    struct RecordingChannel {
        sent: Mutex<Vec<(String, String)>>,
        reject_containing: Option<String>,
    }

    impl RecordingChannel {
        fn rejecting(fragment: &str) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                reject_containing: Some(fragment.to_string()),
            }
        }

        fn sent_to(&self) -> Vec<String> {
            self.sent.lock().unwrap().iter().map(|(to, _)| to.clone()).collect()
        }
    }

    #[async_trait]
    impl DeliveryChannel for RecordingChannel {
        async fn send(&self, to: &NormalizedAddress, _from: &str, body: &str) -> anyhow::Result<()> {
            if let Some(fragment) = &self.reject_containing {
                if to.as_str().contains(fragment) {
                    anyhow::bail!("channel rejected recipient")
                }
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.as_str().to_string(), body.to_string()));
            Ok(())
        }
    }

    fn header() -> Vec<String> {
        vec!["Name", "Email", "Phone", "Role"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn row(name: &str, phone: &str) -> Vec<String> {
        vec![
            name.to_string(),
            format!("{name}@example.com"),
            phone.to_string(),
            "student".to_string(),
        ]
    }

    fn config_with_event_in(minutes: i64) -> SendRemindersConfig {
        SendRemindersConfig {
            event_time: (Utc::now() + TimeDelta::minutes(minutes)).fixed_offset(),
            windows: LeadWindow::defaults(),
            default_region_prefix: "+91".to_string(),
            channel_scheme: "whatsapp".to_string(),
            sender_address: "whatsapp:+14155238886".to_string(),
            generation_timeout: Duration::from_secs(5),
            delivery_timeout: Duration::from_secs(5),
        }
    }

    fn usecase(
        rows: Vec<Vec<String>>,
        generator: StubGenerator,
        channel: Arc<RecordingChannel>,
        config: SendRemindersConfig,
    ) -> SendRemindersUseCase {
        SendRemindersUseCase::new(
            Arc::new(InMemoryRosterSource::new(rows)),
            Arc::new(generator),
            channel,
            config,
        )
    }

    #[tokio::test]
    async fn delivers_to_everyone_inside_the_window() {
        let channel = Arc::new(RecordingChannel::default());
        let usecase = usecase(
            vec![header(), row("Asha", "9876543210"), row("Ravi", "+19876543210")],
            StubGenerator::ok(),
            channel.clone(),
            config_with_event_in(24 * 60),
        );

        let report = usecase.execute().await.unwrap();

        assert_eq!(report.sent_count, 2);
        assert_eq!(
            channel.sent_to(),
            vec!["whatsapp:+919876543210", "whatsapp:+19876543210"]
        );
    }

    #[tokio::test]
    async fn skips_everyone_outside_the_windows() {
        let channel = Arc::new(RecordingChannel::default());
        let usecase = usecase(
            vec![header(), row("Asha", "9876543210"), row("Ravi", "9123456780")],
            StubGenerator::ok(),
            channel.clone(),
            config_with_event_in(120),
        );

        let report = usecase.execute().await.unwrap();

        assert_eq!(report.sent_count, 0);
        assert!(channel.sent_to().is_empty());
        for entry in &report.outcomes {
            assert_eq!(
                entry.outcome,
                DispatchOutcome::Skipped {
                    reason: "outside window".to_string()
                }
            );
        }
    }

    #[tokio::test]
    async fn malformed_rows_are_skipped_without_stopping_the_pass() {
        let channel = Arc::new(RecordingChannel::default());
        let short_row: Vec<String> = vec!["Maya".to_string(), "maya@example.com".to_string()];
        let blank_phone = {
            let mut r = row("Noor", "9000000001");
            r[2] = "  ".to_string();
            r
        };
        let blank_role = {
            let mut r = row("Kiran", "9000000002");
            r[3] = String::new();
            r
        };
        let usecase = usecase(
            vec![
                header(),
                row("Asha", "9876543210"),
                short_row,
                blank_phone,
                blank_role,
                row("Ravi", "9123456780"),
            ],
            StubGenerator::ok(),
            channel.clone(),
            config_with_event_in(30),
        );

        let report = usecase.execute().await.unwrap();

        assert_eq!(report.sent_count, 2);
        assert_eq!(report.outcomes.len(), 5);
        let skipped = report
            .outcomes
            .iter()
            .filter(|entry| matches!(&entry.outcome, DispatchOutcome::Skipped { .. }))
            .count();
        assert_eq!(skipped, 3);
    }

    #[tokio::test]
    async fn one_delivery_failure_does_not_abort_the_rest() {
        let channel = Arc::new(RecordingChannel::rejecting("9123456780"));
        let usecase = usecase(
            vec![
                header(),
                row("Asha", "9876543210"),
                row("Ravi", "9123456780"),
                row("Maya", "9000000003"),
            ],
            StubGenerator::ok(),
            channel.clone(),
            config_with_event_in(24 * 60),
        );

        let report = usecase.execute().await.unwrap();

        assert_eq!(report.sent_count, 2);
        let failed: Vec<_> = report
            .outcomes
            .iter()
            .filter(|entry| matches!(&entry.outcome, DispatchOutcome::Failed { .. }))
            .collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].recipient, "Ravi");
        match &failed[0].outcome {
            DispatchOutcome::Failed { reason } => assert!(reason.contains("delivery error")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn generation_failure_marks_the_recipient_failed() {
        let channel = Arc::new(RecordingChannel::default());
        let usecase = usecase(
            vec![header(), row("Asha", "9876543210")],
            StubGenerator::failing(),
            channel.clone(),
            config_with_event_in(30),
        );

        let report = usecase.execute().await.unwrap();

        assert_eq!(report.sent_count, 0);
        assert!(channel.sent_to().is_empty());
        match &report.outcomes[0].outcome {
            DispatchOutcome::Failed { reason } => assert!(reason.contains("generation error")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_generation_times_out_as_a_failure() {
        let channel = Arc::new(RecordingChannel::default());
        let mut config = config_with_event_in(30);
        config.generation_timeout = Duration::from_millis(10);
        let usecase = usecase(
            vec![header(), row("Asha", "9876543210")],
            StubGenerator::slow(Duration::from_millis(100)),
            channel.clone(),
            config,
        );

        let report = usecase.execute().await.unwrap();

        assert_eq!(report.sent_count, 0);
        match &report.outcomes[0].outcome {
            DispatchOutcome::Failed { reason } => assert!(reason.contains("timed out")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn roster_failure_is_fatal_with_zero_attempts() {
        let channel = Arc::new(RecordingChannel::default());
        let usecase = SendRemindersUseCase::new(
            Arc::new(FailingRoster),
            Arc::new(StubGenerator::ok()),
            channel.clone(),
            config_with_event_in(30),
        );

        let err = usecase.execute().await.unwrap_err();

        assert!(matches!(err, DispatchError::RosterFetch(_)));
        assert!(channel.sent_to().is_empty());
    }

    #[tokio::test]
    async fn repeating_the_pass_inside_the_window_sends_again() {
        // No cross-invocation dedup exists; two passes in the same window
        // reach the same recipient twice.
        let channel = Arc::new(RecordingChannel::default());
        let usecase = usecase(
            vec![header(), row("Asha", "9876543210")],
            StubGenerator::ok(),
            channel.clone(),
            config_with_event_in(30),
        );

        usecase.execute().await.unwrap();
        usecase.execute().await.unwrap();

        assert_eq!(channel.sent_to().len(), 2);
    }

    #[tokio::test]
    async fn a_header_only_roster_dispatches_nothing() {
        let channel = Arc::new(RecordingChannel::default());
        let usecase = usecase(
            vec![header()],
            StubGenerator::ok(),
            channel.clone(),
            config_with_event_in(30),
        );

        let report = usecase.execute().await.unwrap();

        assert_eq!(report.sent_count, 0);
        assert!(report.outcomes.is_empty());
    }
}
