//! adgen - ad-creative generation with an iterative vision-model loop.
//!
//! ## Usage
//!
//! ```bash
//! # Binary review, 10 iterations
//! adgen run --company-id 42
//!
//! # Conversational refinement, published at the end
//! adgen run --company-id 42 --mode conversational
//! ```

use adgen_cli::{AdGenConfig, Cli, Commands, run_session};
use clap::Parser;
use colored::Colorize;

fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}****")
}

fn print_config(config: &AdGenConfig) {
    println!("{}", "Configuration:".yellow().bold());
    println!(
        "  Chat model:    {} (key {})",
        config.openai.chat_model.cyan(),
        mask(&config.openai.api_key)
    );
    println!("  Image model:   {}", config.openai.image_model.cyan());
    if let Some(base_url) = &config.openai.base_url {
        println!("  OpenAI URL:    {base_url}");
    }
    println!("  Render API:    {}", config.render.url);
    match &config.supabase {
        Some(supabase) => println!("  Example ads:   {}", supabase.url.green()),
        None => println!("  Example ads:   {}", "disabled (no SUPABASE_URL)".red()),
    }
    match &config.slack {
        Some(slack) => println!("  Slack channel: {}", slack.channel_id.green()),
        None => println!("  Slack channel: {}", "disabled (no SLACK_BOT_TOKEN)".red()),
    }
    if let Some(secs) = config.http_timeout_secs {
        println!("  HTTP timeout:  {secs}s");
    }
    if let Some(endpoint) = &config.otlp_endpoint {
        println!("  OTLP endpoint: {endpoint}");
    }
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(path) = dotenvy::dotenv() {
        eprintln!("Loaded config from: {}", path.display());
    }

    let cli = Cli::parse();

    let config = match AdGenConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "Configuration Error".red().bold(), e);
            eprintln!();
            eprintln!("Required variables (environment or {}):", ".env".cyan());
            eprintln!("  OPENAI_API_KEY=sk-...");
            eprintln!("  RENDER_API_URL=https://...");
            eprintln!("  RENDER_API_TOKEN=...");
            std::process::exit(1);
        }
    };

    adgen_telemetry::init(&config.telemetry_config(cli.log_level.as_deref(), cli.json_logs))
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {e}"))?;

    let result = match cli.command {
        Commands::Config => {
            print_config(&config);
            println!("{}", "Configuration is valid.".green().bold());
            Ok(())
        }
        Commands::Run(args) => match run_session(&config, &args).await {
            Ok(summary) => {
                eprintln!("{}", "Session complete!".green().bold());
                println!("{}", serde_json::to_string_pretty(&summary)?);
                Ok(())
            }
            Err(e) => {
                eprintln!("{}: {e:#}", "Session failed".red().bold());
                Err(e)
            }
        },
    };

    adgen_telemetry::shutdown_telemetry();
    result
}
