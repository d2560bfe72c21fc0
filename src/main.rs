//! chn - coding-agent hook notifier CLI
//!
//! Invoked once per hook event. `notify` handles the generic notification
//! event, `stop` the session-stop event, and `env` prints the probed
//! environment for diagnostics.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use code_hook_notify::delivery::console;
use code_hook_notify::{candidate_chain, hook, probe, HookRole, InputArgs};

#[derive(Parser)]
#[command(name = "chn")]
#[command(about = "Desktop notifications for coding-agent hook events")]
#[command(version)]
struct Cli {
    /// Write a per-role JSONL debug log (also enabled by CHN_DEBUG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle a generic notification event
    Notify {
        /// Notification title
        title: Option<String>,
        /// Notification message
        message: Option<String>,
        /// Severity level (info, warning, error)
        level: Option<String>,
    },
    /// Handle a session-stop event
    Stop {
        /// Notification title
        title: Option<String>,
        /// Notification message
        message: Option<String>,
    },
    /// Print the probed environment snapshot
    Env {
        /// Output JSON format
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    // Log level via RUST_LOG, default info. Logs go to stderr so stdout
    // stays clean for the console delivery method.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("code_hook_notify=info,chn=info"));
    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();
    let code = match run_command(cli).await {
        Ok(()) => 0,
        Err(e) => {
            error!(error = %e, "Hook failed");
            // last-resort console message; exit code depends on whether
            // even that write succeeded
            if console::emergency(&format!("⚠️ notification hook failed: {e}")) {
                0
            } else {
                1
            }
        }
    };
    std::process::exit(code);
}

async fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Notify {
            title,
            message,
            level,
        } => {
            let args = InputArgs {
                title,
                message,
                level,
            };
            let outcome = hook::run(HookRole::Notify, args, cli.debug).await?;
            if outcome.is_none() {
                info!("Nothing to deliver");
            }
            Ok(())
        }
        Commands::Stop { title, message } => {
            let args = InputArgs {
                title,
                message,
                level: None,
            };
            let outcome = hook::run(HookRole::Stop, args, cli.debug).await?;
            if outcome.is_none() {
                info!("Nothing to deliver");
            }
            Ok(())
        }
        Commands::Env { json } => {
            let snap = probe();
            if json {
                println!("{}", serde_json::to_string_pretty(snap)?);
            } else {
                println!("platform:         {:?}", snap.platform);
                println!(
                    "terminal:         {} (TERM={})",
                    snap.terminal_program.as_deref().unwrap_or("-"),
                    snap.term.as_deref().unwrap_or("-")
                );
                println!("ssh session:      {}", snap.is_ssh);
                println!("ci environment:   {}", snap.is_ci);
                println!("stdout tty:       {:?}", snap.stdout_is_tty);
                println!(
                    "parent app:       {} ({})",
                    snap.parent_app.name,
                    snap.parent_app.bundle_id.as_deref().unwrap_or("no bundle id")
                );
                println!("notifiers:        {:?}", snap.notifiers);
                println!("sound players:    {:?}", snap.sound_players);
                println!("force console:    {}", snap.force_console);
                let chain: Vec<&str> = candidate_chain(snap).iter().map(|m| m.name()).collect();
                println!("delivery chain:   {}", chain.join(" -> "));
            }
            Ok(())
        }
    }
}
