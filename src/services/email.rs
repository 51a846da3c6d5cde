//! SMTP delivery of booking notifications

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, Message, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use std::str::FromStr;
use std::time::Duration;

use super::notifications::{NotificationError, NotificationMessage, Notifier};
use crate::config::EmailConfig;

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
    timeout: Duration,
}

impl EmailService {
    pub fn new(config: EmailConfig, timeout: Duration) -> Self {
        Self { config, timeout }
    }

    fn build_message(&self, message: &NotificationMessage) -> Result<Message, NotificationError> {
        let from_name = self
            .config
            .smtp_from_name
            .as_deref()
            .unwrap_or("Hotel Reservations");
        let from_mailbox = Mailbox::from_str(&format!("{} <{}>", from_name, self.config.smtp_from))
            .map_err(|e| NotificationError::Address(format!("from: {}", e)))?;

        let to_mailbox = Mailbox::from_str(&message.to)
            .map_err(|e| NotificationError::Address(format!("to: {}", e)))?;

        Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(message.subject.as_str())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(message.body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(format!(
                                r#"<html><body><pre>{}</pre></body></html>"#,
                                message.body.replace('\n', "<br>")
                            )),
                    ),
            )
            .map_err(|e| NotificationError::Build(e.to_string()))
    }

    fn transport(&self) -> Result<SmtpTransport, NotificationError> {
        let builder = if self.config.smtp_use_tls {
            SmtpTransport::starttls_relay(&self.config.smtp_host)
                .map_err(|e| NotificationError::Delivery(format!("SMTP transport: {}", e)))?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        }
        .port(self.config.smtp_port)
        .timeout(Some(self.timeout));

        let builder = if let (Some(username), Some(password)) =
            (&self.config.smtp_username, &self.config.smtp_password)
        {
            builder.credentials(Credentials::new(username.clone(), password.clone()))
        } else {
            builder
        };

        Ok(builder.build())
    }
}

#[async_trait]
impl Notifier for EmailService {
    async fn deliver(&self, message: &NotificationMessage) -> Result<(), NotificationError> {
        let email = self.build_message(message)?;
        let mailer = self.transport()?;

        // lettre's SmtpTransport blocks
        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| NotificationError::Delivery(e.to_string()))?
            .map_err(|e| NotificationError::Delivery(e.to_string()))?;

        tracing::info!(to = %message.to, subject = %message.subject, "Notification email sent");
        Ok(())
    }
}
