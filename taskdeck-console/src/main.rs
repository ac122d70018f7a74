//! # Taskdeck Console
//!
//! In-memory, single-user task manager behind a numbered text menu. No
//! network, no persistence: everything lives in process memory and is
//! discarded at exit.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskdeck-console
//! ```

use std::io;
use taskdeck_console::{cli, service::TaskService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskdeck_console=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The menu loop blocks on stdin; run it off the async runtime so Ctrl-C
    // can still interrupt it cleanly.
    let repl = tokio::task::spawn_blocking(|| {
        let mut service = TaskService::new();
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut input = stdin.lock();
        let mut output = stdout.lock();

        cli::run_loop(&mut service, &mut input, &mut output)
    });

    tokio::select! {
        result = repl => {
            result??;
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\nInterrupted. Goodbye!");
        }
    }

    Ok(())
}
