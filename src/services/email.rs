use anyhow::Context;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Message, SmtpTransport, Transport};

use crate::config::AppConfig;
use crate::models::Booking;

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends the booking-confirmed email for a record. Callers treat the
    /// outcome as advisory; delivery failures never reach the client.
    async fn send_confirmation(&self, booking: &Booking) -> anyhow::Result<()>;
}

pub struct SmtpMailer {
    transport: SmtpTransport,
    from: String,
    business_name: String,
}

impl SmtpMailer {
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let tls_params =
            TlsParameters::new(config.smtp_host.clone()).context("failed to build TLS parameters")?;

        let transport = SmtpTransport::relay(&config.smtp_host)
            .context("failed to create SMTP relay")?
            .port(config.smtp_port)
            .tls(Tls::Required(tls_params))
            .credentials(Credentials::new(
                config.smtp_user.clone(),
                config.smtp_pass.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: config.email_from.clone(),
            business_name: config.business_name.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_confirmation(&self, booking: &Booking) -> anyhow::Result<()> {
        let email = Message::builder()
            .from(
                format!("\"{}\" <{}>", self.business_name, self.from)
                    .parse()
                    .context("invalid from address")?,
            )
            .to(booking
                .email
                .parse()
                .with_context(|| format!("invalid recipient address: {}", booking.email))?)
            .subject(format!("Booking Confirmed - {}", self.business_name))
            .header(ContentType::TEXT_HTML)
            .body(render_confirmation(booking, &self.business_name))
            .context("failed to build confirmation email")?;

        // lettre's blocking transport; keep the runtime threads free.
        let transport = self.transport.clone();
        tokio::task::spawn_blocking(move || transport.send(&email))
            .await
            .context("email send task panicked")?
            .context("SMTP delivery failed")?;

        Ok(())
    }
}

pub fn render_confirmation(booking: &Booking, business_name: &str) -> String {
    format!(
        r#"<div style="font-family: sans-serif; color: #333; max-width: 600px; margin: auto; border: 1px solid #c5a059; padding: 20px;">
    <h2 style="color: #c5a059; border-bottom: 2px solid #c5a059; padding-bottom: 10px;">Booking Confirmed</h2>
    <p>Hi <strong>{name}</strong>,</p>
    <p>Great news! Your booking at <strong>{business}</strong> has been confirmed.</p>
    <div style="background: #f9f9f9; padding: 15px; border-radius: 5px; margin: 20px 0;">
        <p><strong>Service:</strong> {service}</p>
        <p><strong>Date:</strong> {date}</p>
        <p><strong>Time:</strong> {time}</p>
    </div>
    <p>We look forward to seeing you!</p>
    <p style="font-size: 0.8rem; color: #888;">- The {business} Team</p>
</div>"#,
        name = booking.name,
        business = business_name,
        service = booking.service,
        date = booking.date,
        time = booking.time,
    )
}
