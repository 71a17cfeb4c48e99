use agora::cli::{Cli, Commands};
use agora::types::config::Config;
use agora::AgoraResult;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    // API keys and endpoints may live in a local .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let config = Config::load_or_default(&cli.config).unwrap_or_else(|e| {
        eprintln!(
            "Warning: ignoring {} ({}), using defaults",
            cli.config.display(),
            e
        );
        Config::default_config()
    });

    init_logging(&cli, &config);
    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    if let Err(e) = dispatch(cli, &config).await {
        tracing::debug!("Command failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(cli: &Cli, config: &Config) {
    // CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("agora={}", log_level)
            .parse()
            .unwrap_or_else(|_| "agora=info".parse().expect("fallback directive is valid")),
    );

    if config.general.log_format == "json" {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }
}

async fn dispatch(cli: Cli, config: &Config) -> AgoraResult<()> {
    match cli.command {
        Commands::Run(args) => {
            agora::cli::commands::run(&args, config, cli.quiet).await?;
        }
        Commands::Init { path } => {
            agora::cli::commands::init(path).await?;
        }
        Commands::Datasets => {
            agora::cli::commands::datasets(config);
        }
        Commands::Version => {
            agora::cli::commands::version();
        }
    }

    Ok(())
}
