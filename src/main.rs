use anyhow::Context;
use clap::Parser;
use reqwest::Method;
use std::sync::Arc;
use storefront_ui::config::Command;
use storefront_ui::utils::{logger, validation::Validate};
use storefront_ui::{
    is_valid_email, is_valid_phone, mask_phone_digits, CliConfig, Host, MemoryClipboard,
    MemoryDocument, RequestOptions, ScriptedDialogs, StorefrontUi, TokioScheduler, UiConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = match &cli.config {
        Some(path) => UiConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => UiConfig::default(),
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // Headless page: no real browser behind the helpers.
    let host = Host::new(
        Arc::new(MemoryDocument::new()),
        Arc::new(TokioScheduler::current()?),
        Arc::new(MemoryClipboard::new()),
        Arc::new(ScriptedDialogs::always(true)),
    );
    let ui = StorefrontUi::new(host, &config)?;

    match cli.command {
        Command::Currency { value } => println!("{}", ui.format_currency(value)),
        Command::Date { input } => {
            let formatted = match epoch_millis(&input) {
                Some(ms) => ui.format_date(ms),
                None => ui.format_date(input),
            };
            println!("{}", formatted);
        }
        Command::MaskPhone { text } => println!("{}", mask_phone_digits(&text)),
        Command::CheckEmail { email } => report_check("e-mail", &email, is_valid_email(&email)),
        Command::CheckPhone { phone } => report_check("phone", &phone, is_valid_phone(&phone)),
        Command::Fetch {
            url,
            method,
            headers,
            data,
        } => {
            let mut options = RequestOptions::default().method(
                Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                    .with_context(|| format!("invalid HTTP method '{}'", method))?,
            );
            for header in headers {
                let (name, value) = header
                    .split_once(':')
                    .with_context(|| format!("header '{}' must look like 'Name: value'", header))?;
                options = options.header(name.trim(), value.trim());
            }
            if let Some(data) = data {
                options = options.json(serde_json::from_str(&data).context("--data is not JSON")?);
            }

            match ui.make_request(&url, options).await {
                Ok(body) => println!("{}", serde_json::to_string_pretty(&body)?),
                Err(e) => {
                    eprintln!("❌ {}", e.user_friendly_message());
                    std::process::exit(2);
                }
            }
        }
        Command::CheckConfig => {
            tracing::info!("✅ Configuration is valid");
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Integers longer than a year are epoch milliseconds.
fn epoch_millis(input: &str) -> Option<i64> {
    let digits = input.trim().trim_start_matches('-');
    if digits.len() <= 4 {
        return None;
    }
    input.trim().parse().ok()
}

fn report_check(label: &str, value: &str, valid: bool) {
    if valid {
        println!("✅ '{}' is a valid {}", value, label);
    } else {
        println!("❌ '{}' is not a valid {}", value, label);
        std::process::exit(1);
    }
}
