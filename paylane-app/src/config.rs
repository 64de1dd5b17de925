use std::env;

use paylane_providers::SandboxBehavior;

/// Application configuration, sourced from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// How the sandbox gateways answer provider calls.
    pub sandbox_behavior: SandboxBehavior,
    /// Optional endpoint that receives notification payloads as JSON.
    pub webhook_url: Option<String>,
    /// Sender address stamped on outgoing email notifications.
    pub email_sender: String,
    /// Sender id stamped on outgoing SMS notifications.
    pub sms_sender_id: String,
    /// Business number stamped on outgoing WhatsApp notifications.
    pub whatsapp_number: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let sandbox_behavior = env::var("SANDBOX_BEHAVIOR")
            .unwrap_or_else(|_| "approve".to_string())
            .parse::<SandboxBehavior>()
            .map_err(|e| anyhow::anyhow!(e))?;

        let webhook_url = env::var("NOTIFY_WEBHOOK_URL").ok();

        let email_sender = env::var("NOTIFY_EMAIL_SENDER")
            .unwrap_or_else(|_| "payments@paylane.dev".to_string());

        let sms_sender_id =
            env::var("NOTIFY_SMS_SENDER").unwrap_or_else(|_| "PAYLANE".to_string());

        let whatsapp_number =
            env::var("NOTIFY_WHATSAPP_NUMBER").unwrap_or_else(|_| "+971500000000".to_string());

        Ok(Config {
            sandbox_behavior,
            webhook_url,
            email_sender,
            sms_sender_id,
            whatsapp_number,
        })
    }
}
