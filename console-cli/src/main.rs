//! Console CLI Tool
//!
//! Command line front end for the admin console backend

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use console_client::services::{activity, auth, user};
use console_client::{
    ApiOutcome, HttpClient, Notification, NotificationLevel, Notifier, NotifyingGateway,
};
use console_core::config::loader;
use console_core::{
    ActivityDraft, ActivityQuery, ActivityStatus, Config, LoginRequest, UserDraft, UserQuery,
};
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "console-cli")]
#[command(about = "A CLI tool for the admin console backend")]
struct Cli {
    /// Path to configuration file (defaults to $CONSOLE_CONFIG or console.toml)
    #[arg(short, long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration file
    ValidateConfig,
    /// Generate example configuration file
    GenerateConfig {
        /// Output path for configuration file
        #[arg(short, long, default_value = "console_example.toml")]
        output: String,
    },
    /// Log in and print the session payload
    Login(Credentials),
    /// Manage users
    Users {
        #[command(flatten)]
        session: Session,
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Manage activities
    Activities {
        #[command(flatten)]
        session: Session,
        #[command(subcommand)]
        command: ActivityCommands,
    },
}

#[derive(Args)]
struct Credentials {
    #[arg(short, long)]
    user: String,
    #[arg(short, long)]
    password: String,
}

/// 同一进程内先登录再操作（会话保存在客户端cookie中）
#[derive(Args)]
struct Session {
    #[arg(long, requires = "password")]
    user: Option<String>,
    #[arg(long, requires = "user")]
    password: Option<String>,
}

#[derive(Subcommand)]
enum UserCommands {
    /// List users
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
        #[arg(long)]
        id: Option<i64>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Register a user from a JSON document
    Create {
        /// JSON object with camelCase user fields
        #[arg(long)]
        data: String,
    },
    /// Update a user from a JSON document (must contain "id")
    Update {
        #[arg(long)]
        data: String,
    },
    /// Remove a user
    Remove {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Subcommand)]
enum ActivityCommands {
    /// List activities
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
        #[arg(long)]
        id: Option<i64>,
        #[arg(long)]
        name: Option<String>,
        /// 0 draft, 1 online, 2 offline
        #[arg(long)]
        status: Option<u8>,
    },
    /// Create an activity from a JSON document
    Create {
        #[arg(long)]
        data: String,
    },
    /// Update an activity from a JSON document (must contain "id")
    Update {
        #[arg(long)]
        data: String,
    },
    /// Remove an activity
    Remove {
        #[arg(long)]
        id: i64,
    },
    /// Publish an activity (switch to online)
    Publish {
        #[arg(long)]
        id: i64,
    },
    /// Take an activity offline
    Offline {
        #[arg(long)]
        id: i64,
    },
}

/// 把提示输出到标准错误
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => eprintln!("❌ {}", notification.text),
            NotificationLevel::Warning => eprintln!("⚠️  {}", notification.text),
            NotificationLevel::Success => eprintln!("✅ {}", notification.text),
            NotificationLevel::Info => eprintln!("ℹ️  {}", notification.text),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(loader::config_path);

    let ok = match cli.command {
        Commands::ValidateConfig => {
            println!("Validating configuration file: {}", config_path);
            match loader::load_config_from_path(&config_path) {
                Ok(cfg) => {
                    println!("✅ Configuration is valid");
                    println!("  - base_url: {}", cfg.client.base_url);
                    println!("  - with_credentials: {}", cfg.client.with_credentials);
                    println!("  - {} default headers", cfg.client.headers.len());
                    true
                }
                Err(e) => {
                    eprintln!("❌ Configuration validation failed: {}", e);
                    false
                }
            }
        }
        Commands::GenerateConfig { output } => {
            println!("Generating configuration file: {}", output);
            std::fs::write(&output, EXAMPLE_CONFIG)?;
            println!("✅ Configuration file generated successfully");
            true
        }
        Commands::Login(credentials) => {
            let gateway = build_gateway(&config_path)?;
            let request = LoginRequest::new(credentials.user, credentials.password);
            report(&gateway, auth::login(&gateway, &request).await, "登录成功")?
        }
        Commands::Users { session, command } => {
            let gateway = build_gateway(&config_path)?;
            if !open_session(&gateway, &session).await? {
                std::process::exit(1);
            }
            run_user_command(&gateway, command).await?
        }
        Commands::Activities { session, command } => {
            let gateway = build_gateway(&config_path)?;
            if !open_session(&gateway, &session).await? {
                std::process::exit(1);
            }
            run_activity_command(&gateway, command).await?
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn build_gateway(config_path: &str) -> Result<NotifyingGateway> {
    let config: Config = loader::load_config_from_path(config_path)?;
    let client = HttpClient::from_settings(&config.client)?;
    Ok(NotifyingGateway::with_settings(
        client,
        Arc::new(StderrNotifier),
        config.notifications,
    ))
}

async fn open_session(gateway: &NotifyingGateway, session: &Session) -> Result<bool> {
    match (&session.user, &session.password) {
        (Some(user), Some(password)) => {
            let request = LoginRequest::new(user.clone(), password.clone());
            let outcome = auth::login(gateway, &request).await;
            if outcome.is_success() {
                tracing::debug!("Session opened for {}", user);
                Ok(true)
            } else {
                report(gateway, outcome, "")
            }
        }
        _ => Ok(true),
    }
}

async fn run_user_command(gateway: &NotifyingGateway, command: UserCommands) -> Result<bool> {
    match command {
        UserCommands::List {
            page,
            page_size,
            id,
            name,
        } => {
            let mut query = UserQuery::page(page, page_size);
            query.id = id;
            query.user_name = name;
            report(gateway, user::list(gateway, &query).await, "")
        }
        UserCommands::Create { data } => {
            let draft: UserDraft = serde_json::from_str(&data)?;
            report(gateway, user::create(gateway, draft).await, "注册成功")
        }
        UserCommands::Update { data } => {
            let draft: UserDraft = serde_json::from_str(&data)?;
            report(gateway, user::update(gateway, draft).await, "更新成功")
        }
        UserCommands::Remove { id } => {
            report(gateway, user::remove(gateway, id).await, "删除成功")
        }
    }
}

async fn run_activity_command(
    gateway: &NotifyingGateway,
    command: ActivityCommands,
) -> Result<bool> {
    match command {
        ActivityCommands::List {
            page,
            page_size,
            id,
            name,
            status,
        } => {
            let mut query = ActivityQuery::page(page, page_size);
            query.id = id;
            query.name = name;
            query.status = status
                .map(ActivityStatus::try_from)
                .transpose()
                .map_err(anyhow::Error::msg)?;
            report(gateway, activity::list(gateway, &query).await, "")
        }
        ActivityCommands::Create { data } => {
            let draft: ActivityDraft = serde_json::from_str(&data)?;
            report(gateway, activity::create(gateway, draft).await, "创建成功")
        }
        ActivityCommands::Update { data } => {
            let draft: ActivityDraft = serde_json::from_str(&data)?;
            report(gateway, activity::update(gateway, draft).await, "更新成功")
        }
        ActivityCommands::Remove { id } => {
            report(gateway, activity::remove(gateway, id).await, "删除成功")
        }
        ActivityCommands::Publish { id } => {
            report(gateway, activity::publish(gateway, id).await, "发布成功")
        }
        ActivityCommands::Offline { id } => {
            report(gateway, activity::take_offline(gateway, id).await, "下线成功")
        }
    }
}

/// 输出调用结果
///
/// 网关已提示过的失败不再重复输出；业务失败在网关未开启统一提示时由这里提示。
fn report<T: Serialize>(
    gateway: &NotifyingGateway,
    outcome: ApiOutcome<T>,
    success_text: &str,
) -> Result<bool> {
    let settings = gateway.settings();
    match outcome {
        ApiOutcome::Success(data) => {
            if !success_text.is_empty() {
                gateway.notifier().success(success_text);
            }
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(true)
        }
        ApiOutcome::ApplicationFailure { errno, msg } => {
            if !settings.notify_application_failures {
                let text = if msg.is_empty() {
                    settings.application_failure_fallback.as_str()
                } else {
                    msg.as_str()
                };
                gateway.notifier().error(text);
            }
            tracing::debug!("Request failed with errno {}", errno);
            Ok(false)
        }
        ApiOutcome::TransportFailure {
            status,
            message,
            notified,
        } => {
            if !notified {
                gateway.notifier().error(&message);
            }
            tracing::debug!("Request failed (HTTP {:?}): {}", status, message);
            Ok(false)
        }
        ApiOutcome::Rejected { reason } => {
            gateway.notifier().error(&reason);
            Ok(false)
        }
    }
}

const EXAMPLE_CONFIG: &str = r#"# Admin Console Configuration File

[client]
base_url = "http://localhost:7001"
# 携带cookie凭据
with_credentials = true
# 可选：连接超时（秒），不配置则使用默认值
# connect_timeout_seconds = 10

[client.headers]
# "X-Client" = "console"

[notifications]
# errno != 0 时是否统一提示
notify_application_failures = false
application_failure_fallback = "Request failed, please retry"
"#;
