//! groq-chat - Command-line chat client for Groq hosted models
//!
//! Usage:
//!     groq-chat [OPTIONS] [PROMPT]
//!
//! Environment Variables:
//!     GROQ_API_KEY: API key for the Groq service (required)
//!     GROQ_MODEL: Model name (default: llama3-70b)
//!     GROQ_BASE_URL: API base URL (default: https://api.groq.com/openai/v1)
//!     RUST_LOG: Log filter (default: warn)

use anyhow::{Context, Result};
use clap::Parser;
use groq_provider::{
    load_dotenv, load_dotenv_from, ApiKey, ChatResponse, LlmModel, ProviderConfig,
    DEFAULT_BASE_URL, DEFAULT_MODEL,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Groq Chat - talk to a hosted language model
#[derive(Parser, Debug)]
#[command(name = "groq-chat")]
#[command(about = "Groq Chat - talk to a hosted language model")]
#[command(after_help = r#"Examples:
    # Say hi to the default model
    groq-chat

    # Ask a specific model
    groq-chat --model mixtral-8x7b "Explain ownership in Rust"

    # Check credentials and model availability
    groq-chat --check

    # Chat interactively
    groq-chat -i
"#)]
struct Cli {
    /// Model name
    #[arg(short = 'm', long, env = "GROQ_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// API key for the Groq service
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// API base URL
    #[arg(long, env = "GROQ_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Env file to load instead of searching for .env
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// System prompt sent ahead of every prompt
    #[arg(long)]
    system: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    temperature: Option<f32>,

    /// Maximum tokens in the completion
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Check the model API and exit
    #[arg(long)]
    check: bool,

    /// Read prompts from stdin until 'quit'
    #[arg(short = 'i', long)]
    interactive: bool,

    /// Print the full response as JSON
    #[arg(long)]
    json: bool,

    /// Log request timing
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Suppress everything but the model output
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Prompt to send
    #[arg(default_value = "hi")]
    prompt: String,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Build provider settings from CLI flags
fn build_config(args: &Cli) -> Result<ProviderConfig> {
    let api_key = match &args.api_key {
        Some(key) => ApiKey::new(key.as_str())?,
        None => ApiKey::from_env()?,
    };

    let mut config = ProviderConfig::new(api_key)
        .with_model(Some(args.model.as_str()))
        .with_base_url(&args.base_url);

    if let Some(temperature) = args.temperature {
        config = config.with_temperature(temperature);
    }
    if let Some(max_tokens) = args.max_tokens {
        config = config.with_max_tokens(max_tokens);
    }
    if let Some(system) = &args.system {
        config = config.with_system_prompt(system);
    }

    Ok(config)
}

/// Check model API connectivity
async fn check_model_api(provider: &LlmModel) -> bool {
    let model = provider.get_model();
    print!("Checking model API ({})... ", model.model_name());
    io::stdout().flush().ok();

    match model.test_connection().await {
        Ok(()) => {
            println!("\u{2705} OK");
            true
        }
        Err(e) => {
            println!("\u{274C} FAILED");
            println!("   Error: {}", e);
            println!("   Base URL: {}", model.base_url());
            false
        }
    }
}

fn print_response(response: &ChatResponse, args: &Cli) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(response)?);
        return Ok(());
    }

    println!("{}", response.content);

    if !args.quiet {
        if let Some(usage) = response.usage {
            eprintln!(
                "[{} | {} prompt + {} completion tokens | {}ms]",
                response.model, usage.prompt_tokens, usage.completion_tokens, response.elapsed_ms
            );
        }
    }

    Ok(())
}

/// Print application header
fn print_header(provider: &LlmModel) {
    let model = provider.get_model();
    println!("{}", "=".repeat(50));
    println!("Groq Chat");
    println!("{}", "=".repeat(50));
    println!("Model: {}", provider.model_name());
    println!("Base URL: {}", model.base_url());
    if let Some(system) = &model.config().system_prompt {
        println!("System: {}", system);
    }
    println!("{}", "=".repeat(50));
}

/// Run interactive mode
async fn run_interactive_mode(provider: &LlmModel, args: &Cli) -> Result<()> {
    println!("\nEntering interactive mode. Type 'quit' to exit.\n");

    let model = provider.get_model();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(_) => {
                println!("\n\nInterrupted. Goodbye!");
                break;
            }
        }

        let prompt = input.trim();

        if prompt.eq_ignore_ascii_case("quit")
            || prompt.eq_ignore_ascii_case("exit")
            || prompt.eq_ignore_ascii_case("q")
        {
            println!("Goodbye!");
            break;
        }

        if prompt.is_empty() {
            continue;
        }

        match model.invoke(prompt).await {
            Ok(response) => {
                print_response(&response, args)?;
                println!();
            }
            Err(e) => eprintln!("\nError: {}\n", e),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Seed the environment before anything reads it
    match &args.env_file {
        Some(path) => {
            if !load_dotenv_from(path)? {
                anyhow::bail!("Env file not found: {}", path.display());
            }
        }
        None => {
            load_dotenv()?;
        }
    }

    init_logging(args.verbose);

    let config = build_config(&args)?;
    let provider = LlmModel::from_config(config).context("Failed to create model provider")?;

    if args.check {
        if !check_model_api(&provider).await {
            std::process::exit(1);
        }
        return Ok(());
    }

    if args.interactive {
        if !args.quiet {
            print_header(&provider);
        }
        return run_interactive_mode(&provider, &args).await;
    }

    let response = provider.get_model().invoke(&args.prompt).await?;
    print_response(&response, &args)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = Cli::parse_from(["groq-chat", "--api-key", "gsk_test"]);
        assert_eq!(args.model, DEFAULT_MODEL);
        assert_eq!(args.prompt, "hi");
        assert!(!args.interactive);
    }

    #[test]
    fn test_build_config_from_flags() {
        let args = Cli::parse_from([
            "groq-chat",
            "--api-key",
            "gsk_test",
            "-m",
            "mixtral-8x7b",
            "--temperature",
            "0.7",
            "--system",
            "Be brief.",
            "What is Rust?",
        ]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.model_name.as_deref(), Some("mixtral-8x7b"));
        assert_eq!(config.api_key.expose(), "gsk_test");
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.system_prompt.as_deref(), Some("Be brief."));
        assert_eq!(args.prompt, "What is Rust?");
    }

    #[test]
    fn test_empty_model_flag_fails() {
        let args = Cli::parse_from(["groq-chat", "--api-key", "gsk_test", "--model", ""]);
        let config = build_config(&args).unwrap();
        let err = LlmModel::from_config(config).unwrap_err();
        assert!(err.to_string().contains("not defined"));
    }
}
