use anyhow::Context;
use clap::{Parser, Subcommand};

use storefront_server::auth::password::hash_password;
use storefront_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[derive(Parser)]
#[command(name = "storefront-server", version, about = "Visionary storefront backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print the Argon2 hash of a password for ADMIN_PASSWORD_HASH
    HashPassword {
        #[arg(env = "ADMIN_PASSWORD")]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::HashPassword { password } => {
            let hash = hash_password(&password)
                .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;
            println!("{hash}");
            Ok(())
        }
        Command::Serve => serve().await,
    }
}

async fn serve() -> anyhow::Result<()> {
    // logger first so config warnings are visible
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    print_banner();

    let config = Config::from_env().context("invalid configuration")?;
    tracing::info!(
        environment = %config.environment,
        work_dir = %config.work_dir,
        port = config.http_port,
        "Visionary storefront server starting"
    );

    let state = ServerState::initialize(&config)
        .await
        .context("failed to initialize server state")?;

    Server::with_state(config, state)
        .run()
        .await
        .context("server error")?;
    Ok(())
}
