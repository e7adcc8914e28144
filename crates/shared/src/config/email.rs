use crate::{
    abstract_trait::{EmailRequest, EmailServiceTrait},
    config::EmailConfig,
    errors::ServiceError,
};
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
    message::{Mailbox, Message, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::{error, info};

type SmtpTransport = AsyncSmtpTransport<Tokio1Executor>;

#[derive(Clone)]
pub struct SmtpMailer {
    mailer: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> anyhow::Result<Self> {
        let creds = Credentials::new(config.smtp_user.clone(), config.smtp_pass.clone());

        let mailer = SmtpTransport::starttls_relay(&config.smtp_server)
            .map_err(|e| anyhow::anyhow!("Failed to create SMTP relay: {e}"))?
            .credentials(creds)
            .port(config.smtp_port)
            .build();

        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid sender email format: {e}"))?;

        Ok(Self { mailer, from })
    }
}

#[async_trait]
impl EmailServiceTrait for SmtpMailer {
    async fn send(&self, req: &EmailRequest) -> Result<(), ServiceError> {
        let to: Mailbox = req.to.parse().map_err(|e| {
            error!("❌ Invalid recipient email: {}", e);
            ServiceError::Custom(format!("Invalid recipient email: {e}"))
        })?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&req.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(req.body.clone())
            .map_err(|e| {
                error!("❌ Failed to build email: {}", e);
                ServiceError::Custom(format!("Failed to build email: {e}"))
            })?;

        match self.mailer.send(email).await {
            Ok(_) => {
                info!("✅ Email sent to {}", req.to);
                Ok(())
            }
            Err(e) => {
                error!("❌ Failed to send email to {}: {}", req.to, e);
                Err(ServiceError::Custom(format!("Failed to send email: {e}")))
            }
        }
    }
}

/// Used when no SMTP relay is configured.
#[derive(Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl EmailServiceTrait for LogMailer {
    async fn send(&self, req: &EmailRequest) -> Result<(), ServiceError> {
        info!(
            to = %req.to,
            subject = %req.subject,
            "📧 SMTP not configured, email not delivered"
        );
        Ok(())
    }
}
