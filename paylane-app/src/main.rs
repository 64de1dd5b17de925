//! # Paylane
//!
//! Command line driver for the payment engine. Wires the in-memory
//! repository, the sandbox provider gateways and the notification stack
//! into a [`PaymentService`] and drives full payment journeys against it.

mod config;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paylane_engine::{
    EventDispatcher, PaymentNotificationHandler, PaymentService, StrategySelector,
};
use paylane_notify::{
    EmailChannel, NotificationOrchestrator, SmsChannel, WebhookChannel, WhatsappChannel,
};
use paylane_providers::{
    CashStrategy, SandboxStripeGateway, SandboxTabbyGateway, StripeStrategy, TabbyStrategy,
};
use paylane_repo::MemoryRepo;
use paylane_types::{
    CreatePaymentRequest, Currency, PaymentMethod, ProcessPaymentRequest, RefundPaymentRequest,
};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "paylane")]
#[command(author, version, about = "Payment engine sandbox driver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive a single payment journey against the sandbox providers
    Pay {
        /// Payment method: stripe, tabby or cash
        #[arg(long, default_value = "stripe")]
        method: String,

        /// Amount in major units, e.g. 49.99
        #[arg(long, default_value = "49.99")]
        amount: Decimal,

        /// Currency code: USD, EUR, GBP, AED or SAR
        #[arg(long, default_value = "USD")]
        currency: String,

        /// Merchant order number; generated when omitted
        #[arg(long)]
        order: Option<String>,

        /// Customer email, used for notifications
        #[arg(long)]
        email: Option<String>,

        /// Customer phone, used when no email is present
        #[arg(long)]
        phone: Option<String>,

        /// Opaque metadata stored verbatim on the payment
        #[arg(long)]
        metadata: Option<String>,

        /// Process the payment right after creating it
        #[arg(long)]
        process: bool,

        /// Refund this amount after processing
        #[arg(long)]
        refund: Option<Decimal>,
    },

    /// Run one journey per payment method and print the results
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,paylane_app=debug,paylane_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing::info!(
        "Sandbox gateways answering with behavior: {}",
        config.sandbox_behavior
    );

    let service = build_service(&config);

    match cli.command {
        Commands::Pay {
            method,
            amount,
            currency,
            order,
            email,
            phone,
            metadata,
            process,
            refund,
        } => {
            let journey = Journey {
                method: parse_method(&method)?,
                amount,
                currency: parse_currency(&currency)?,
                order,
                email,
                phone,
                metadata,
                process,
                refund,
            };
            run_journey(&service, journey).await?;
        }
        Commands::Demo => run_demo(&service).await?,
    }

    Ok(())
}

/// Builds the fully wired payment service.
///
/// Every provider strategy talks to a sandbox gateway configured with the
/// same behavior, so one environment variable flips the whole application
/// between approving, declining and faulting providers.
fn build_service(config: &Config) -> PaymentService<MemoryRepo> {
    let repo = Arc::new(MemoryRepo::new());

    let mut strategies = StrategySelector::new();
    strategies.register(Arc::new(StripeStrategy::new(SandboxStripeGateway::new(
        config.sandbox_behavior,
    ))));
    strategies.register(Arc::new(TabbyStrategy::new(SandboxTabbyGateway::new(
        config.sandbox_behavior,
    ))));
    strategies.register(Arc::new(CashStrategy));

    let mut orchestrator = NotificationOrchestrator::new();
    orchestrator.register(Arc::new(EmailChannel::new(config.email_sender.clone())));
    orchestrator.register(Arc::new(SmsChannel::new(config.sms_sender_id.clone())));
    orchestrator.register(Arc::new(WhatsappChannel::new(
        config.whatsapp_number.clone(),
    )));
    if let Some(url) = &config.webhook_url {
        orchestrator.register(Arc::new(WebhookChannel::new(url.clone())));
    }

    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(PaymentNotificationHandler::new(
        repo.clone(),
        Arc::new(orchestrator),
    )));

    PaymentService::new(repo, strategies, dispatcher)
}

struct Journey {
    method: PaymentMethod,
    amount: Decimal,
    currency: Currency,
    order: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    metadata: Option<String>,
    process: bool,
    refund: Option<Decimal>,
}

async fn run_journey(service: &PaymentService<MemoryRepo>, journey: Journey) -> Result<()> {
    let created = service
        .create_payment(CreatePaymentRequest {
            order_number: journey.order,
            method: journey.method,
            amount: journey.amount,
            currency: journey.currency,
            user_id: None,
            customer_email: journey.email,
            customer_phone: journey.phone,
            metadata: journey.metadata,
        })
        .await?;
    println!("{}", serde_json::to_string_pretty(&created)?);

    if !journey.process {
        return Ok(());
    }

    let processed = service
        .process_payment(ProcessPaymentRequest {
            payment_id: created.payment.id,
            external_reference: None,
        })
        .await?;
    println!("{}", serde_json::to_string_pretty(&processed)?);

    if let Some(amount) = journey.refund {
        let refunded = service
            .refund_payment(RefundPaymentRequest {
                payment_id: created.payment.id,
                amount,
            })
            .await?;
        println!("{}", serde_json::to_string_pretty(&refunded)?);
    }

    let history = service.get_payment_history(created.payment.id).await?;
    println!("{}", serde_json::to_string_pretty(&history)?);

    Ok(())
}

async fn run_demo(service: &PaymentService<MemoryRepo>) -> Result<()> {
    for (method, currency) in [
        (PaymentMethod::Stripe, Currency::USD),
        (PaymentMethod::Tabby, Currency::AED),
        (PaymentMethod::Cash, Currency::USD),
    ] {
        tracing::info!("Running {} journey", method);
        let journey = Journey {
            method,
            amount: Decimal::new(4999, 2),
            currency,
            order: None,
            email: Some("customer@example.com".to_string()),
            phone: Some("+971500000000".to_string()),
            metadata: None,
            process: true,
            refund: None,
        };
        run_journey(service, journey).await?;
    }

    Ok(())
}

fn parse_method(value: &str) -> Result<PaymentMethod> {
    match value.to_lowercase().as_str() {
        "stripe" => Ok(PaymentMethod::Stripe),
        "tabby" => Ok(PaymentMethod::Tabby),
        "cash" => Ok(PaymentMethod::Cash),
        other => anyhow::bail!("Unknown payment method: {other}. Supported: stripe, tabby, cash"),
    }
}

fn parse_currency(value: &str) -> Result<Currency> {
    match value.to_uppercase().as_str() {
        "USD" => Ok(Currency::USD),
        "EUR" => Ok(Currency::EUR),
        "GBP" => Ok(Currency::GBP),
        "AED" => Ok(Currency::AED),
        "SAR" => Ok(Currency::SAR),
        other => {
            anyhow::bail!("Unknown currency: {other}. Supported: USD, EUR, GBP, AED, SAR")
        }
    }
}
