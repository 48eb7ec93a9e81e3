
use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use trainer_shell::config::ClientConfig;
use trainer_shell::error::{ApiError, ConfigError};
use trainer_shell::guard::{Decision, GuardPolicy, NavigationGuard};
use trainer_shell::net::api::ApiClient;
use trainer_shell::net::types::Credentials;
use trainer_shell::notify::LogNotifier;
use trainer_shell::routes::{ProtectionProfile, RouteTable};
use trainer_shell::state::session::{SessionContext, SessionState};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("api error: {0}")]
    Api(#[from] ApiError),
    #[error("--username given without a password; pass --password or set TRAINER_PASSWORD")]
    MissingPassword,
    #[error("invalid {flag}: {value}")]
    InvalidFlag { flag: &'static str, value: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "trainer-cli", about = "Probe the trainer backend through the front-end navigation guard")]
struct Cli {
    /// Overrides `TRAINER_API_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    /// `admin_aware` or `lenient`; overrides `TRAINER_GUARD_POLICY`.
    #[arg(long)]
    policy: Option<String>,

    /// `protected` or `open`; overrides `TRAINER_ROUTE_PROFILE`.
    #[arg(long)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the route table with guard metadata.
    Routes,
    /// Call the session-check endpoint once.
    Session,
    /// Run the navigation guard for each path in order.
    Navigate(NavigateArgs),
}

#[derive(Args, Debug)]
struct NavigateArgs {
    /// Log in before navigating.
    #[arg(long)]
    username: Option<String>,

    #[arg(long, env = "TRAINER_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Paths to visit, e.g. `/ /train /test`.
    #[arg(required = true)]
    paths: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = apply_overrides(ClientConfig::from_env()?, &cli)?;
    tracing::debug!(base_url = %config.api_base_url, policy = ?config.guard_policy, "config loaded");

    match cli.command {
        Command::Routes => print_json(&routes_json(&config.route_table())),
        Command::Session => run_session(&config).await,
        Command::Navigate(args) => run_navigate(&config, args).await,
    }
}

fn apply_overrides(mut config: ClientConfig, cli: &Cli) -> Result<ClientConfig, CliError> {
    if let Some(base_url) = &cli.base_url {
        config.api_base_url = base_url.trim_end_matches('/').to_owned();
    }
    if let Some(raw) = &cli.policy {
        config.guard_policy = raw
            .parse::<GuardPolicy>()
            .map_err(|value| CliError::InvalidFlag { flag: "--policy", value })?;
    }
    if let Some(raw) = &cli.profile {
        config.route_profile = raw
            .parse::<ProtectionProfile>()
            .map_err(|value| CliError::InvalidFlag { flag: "--profile", value })?;
    }
    Ok(config)
}

async fn run_session(config: &ClientConfig) -> Result<(), CliError> {
    let api = ApiClient::new(config)?;
    let session = api.current_session().await?;
    print_json(&json!({ "username": session.username, "isAdmin": session.is_admin }))
}

async fn run_navigate(config: &ClientConfig, args: NavigateArgs) -> Result<(), CliError> {
    let api = ApiClient::new(config)?;

    if let Some(username) = args.username {
        let password = args.password.ok_or(CliError::MissingPassword)?;
        let ack = api.login(&Credentials::new(username, password)).await?;
        tracing::info!(message = %ack.message, "logged in");
    }

    let guard = NavigationGuard::new(
        api,
        LogNotifier,
        SessionContext::new(),
        config.route_table(),
        config.guard_policy,
    );

    let mut from: Option<String> = None;
    for path in &args.paths {
        let decision = guard.guard_path(path, from.as_deref()).await;
        let state = guard.session().snapshot();
        print_json(&navigation_json(path, &decision, &state))?;

        from = match decision {
            Decision::Allow => Some(path.clone()),
            Decision::Redirect(to) => Some(to),
            Decision::Superseded => from,
        };
    }
    Ok(())
}

fn routes_json(table: &RouteTable) -> Value {
    Value::Array(
        table
            .entries()
            .iter()
            .map(|e| {
                json!({
                    "path": e.path,
                    "name": e.name.as_str(),
                    "title": e.meta.title,
                    "requiresAuth": e.meta.requires_auth,
                    "requiresAdminAuth": e.meta.requires_admin_auth,
                })
            })
            .collect(),
    )
}

fn navigation_json(path: &str, decision: &Decision, state: &SessionState) -> Value {
    let (outcome, redirect) = match decision {
        Decision::Allow => ("allow", None),
        Decision::Redirect(to) => ("redirect", Some(to.as_str())),
        Decision::Superseded => ("superseded", None),
    };
    json!({
        "path": path,
        "decision": outcome,
        "redirect": redirect,
        "session": {
            "isLoggedIn": state.is_logged_in,
            "isAdmin": state.is_admin,
            "userName": state.user_name,
        },
    })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
