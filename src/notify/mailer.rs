//! Outbound email
//!
//! Thin client for an HTTP mail relay. When no relay is configured the
//! service degrades to a no-op that logs what would have been sent, so
//! local setups work without credentials.

use serde::Serialize;
use std::sync::Arc;

/// Mail relay configuration, read from the environment
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Relay endpoint; `None` disables sending
    pub api_url: Option<String>,
    pub api_key: String,
    /// From address
    pub sender: String,
}

impl MailConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("MAIL_API_URL").ok(),
            api_key: std::env::var("MAIL_API_KEY").unwrap_or_default(),
            sender: std::env::var("MAIL_SENDER")
                .unwrap_or_else(|_| "no-reply@comanda.local".to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct MailPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[derive(Clone)]
pub struct MailerService {
    config: MailConfig,
    client: reqwest::Client,
}

impl MailerService {
    pub fn new(config: MailConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            client: reqwest::Client::new(),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.config.api_url.is_some()
    }

    /// Deliver one message through the relay
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), String> {
        let Some(api_url) = &self.config.api_url else {
            tracing::info!(to = to, subject = subject, "Mailer disabled, skipping send");
            return Ok(());
        };

        let payload = MailPayload {
            from: &self.config.sender,
            to,
            subject,
            html,
        };

        let response = self
            .client
            .post(api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| format!("Mail relay request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("Mail relay returned {status}: {body}"));
        }

        tracing::info!(to = to, subject = subject, "Email sent");
        Ok(())
    }

    /// Fire-and-forget: delivery failures are logged, never surfaced to
    /// the request that triggered them.
    pub fn spawn_send(self: &Arc<Self>, to: String, subject: String, html: String) {
        let mailer = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = mailer.send(&to, &subject, &html).await {
                tracing::error!(to = %to, error = %e, "Email delivery failed");
            }
        });
    }

    /// Account verification link after registration
    pub fn spawn_verification(self: &Arc<Self>, to: &str, name: &str, verify_url: &str) {
        let html = format!(
            "<p>Hola {name},</p>\
             <p>Confirma tu cuenta haciendo clic en el siguiente enlace:<br>\
             <a href=\"{verify_url}\">Verificar mi cuenta</a></p>\
             <p>Hello {name},<br>\
             Please confirm your account by clicking the link above.</p>"
        );
        self.spawn_send(
            to.to_string(),
            "Verifica tu cuenta / Verify your account".to_string(),
            html,
        );
    }

    /// Reservation received notice for the guest
    pub fn spawn_reservation_received(
        self: &Arc<Self>,
        to: &str,
        guest_name: &str,
        start_date_time: &str,
        quantity: i64,
    ) {
        let html = format!(
            "<p>Hola {guest_name},</p>\
             <p>Hemos recibido tu reserva para {quantity} persona(s) el {start_date_time}.<br>\
             Te avisaremos cuando sea confirmada.</p>\
             <p>Hello {guest_name},<br>\
             We received your reservation for {quantity} guest(s) on {start_date_time}.<br>\
             We will let you know once it is confirmed.</p>"
        );
        self.spawn_send(
            to.to_string(),
            "Reserva recibida / Reservation received".to_string(),
            html,
        );
    }

    /// Contact form relay to the restaurant inbox
    pub fn spawn_contact(self: &Arc<Self>, from_name: &str, from_email: &str, message: &str) {
        let html = format!(
            "<p><b>{from_name}</b> &lt;{from_email}&gt; escribió:</p><p>{message}</p>"
        );
        let inbox = self.config.sender.clone();
        self.spawn_send(
            inbox,
            format!("Nuevo mensaje de contacto de {from_name}"),
            html,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_mailer_is_a_noop() {
        let mailer = MailerService::new(MailConfig {
            api_url: None,
            api_key: String::new(),
            sender: "no-reply@comanda.local".to_string(),
        });
        assert!(!mailer.is_enabled());
        assert!(mailer.send("a@b.c", "subject", "<p>hi</p>").await.is_ok());
    }
}
