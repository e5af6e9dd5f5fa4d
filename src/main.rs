use anyhow::Context;
use chrono::Local;
use clap::Parser;
use correios::config::{cli::QuoteArgs, Command};
use correios::utils::{logger, validation::Validate};
use correios::{CliConfig, ClientConfig, Correios, CorreiosError, ErrorKind, ReqwestTransport};

type Client = Correios<ReqwestTransport, ClientConfig>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            ClientConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?
        }
        None => ClientConfig::default(),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(exit_code(&e));
    }

    let transport = ReqwestTransport::new(config.http.timeout(), &config.http.user_agent)?;
    let client = Correios::new(transport, config);

    let output = match &cli.command {
        Command::Quote(args) => quote(&client, args).await,
        Command::Address { postal_code } => client
            .find_address(postal_code)
            .await
            .and_then(|address| Ok(serde_json::to_value(address)?)),
        Command::Track { code } => client
            .track(code)
            .await
            .and_then(|events| Ok(serde_json::to_value(events)?)),
    };

    match output {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Request failed: {} (kind: {:?})", e, e.kind());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    }
}

async fn quote(client: &Client, args: &QuoteArgs) -> correios::Result<serde_json::Value> {
    let request = args.to_request();
    let dispatch = args
        .dispatch_date
        .unwrap_or_else(|| Local::now().date_naive());

    let quotes = client.calculate_shipping(&request).await?;

    let mut rows = Vec::with_capacity(quotes.len());
    for quote in &quotes {
        rows.push(serde_json::json!({
            "service": quote.service_code(),
            "name": quote.service_name(),
            "price": quote.format_currency("price", true)?,
            "lead_time_days": quote.lead_time_days(),
            "estimated_delivery": quote.estimated_delivery_date(dispatch)?,
            "saturday_delivery": quote.saturday_delivery(),
            "home_delivery": quote.home_delivery(),
            "error_code": quote.error_code(),
            "error_message": quote.error_message(),
        }));
    }

    Ok(serde_json::Value::Array(rows))
}

fn exit_code(error: &CorreiosError) -> i32 {
    match error.kind() {
        ErrorKind::InvalidArgument => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::Transport | ErrorKind::MalformedResponse => 4,
        ErrorKind::Config => 1,
    }
}
