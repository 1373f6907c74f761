// Bias Lens terminal client
// Reads console lines, drives the analysis controller, prints every state change.

use bias_lens_core::actors::analysis::HttpAnalysisService;
use bias_lens_core::actors::controller::ControllerHandle;
use bias_lens_core::config::ClientConfig;
use bias_lens_core::console::{self, Command};
use bias_lens_core::controller::ControllerSnapshot;
use bias_lens_core::render;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = ClientConfig::from_env()?;
    let service = Arc::new(HttpAnalysisService::new(&config)?);
    info!("Using analysis endpoint {}", service.endpoint());

    let controller = ControllerHandle::spawn(service, config.error_dismiss_after());
    let mut updates = controller.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_printed: Option<ControllerSnapshot> = None;

    println!("{}", console::HELP);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match console::parse_command(&line) {
                    Command::Dispatch(action) => {
                        if let Err(e) = controller.dispatch(action).await {
                            error!("Controller unavailable: {}", e);
                            break;
                        }
                    }
                    Command::ListExamples => print!("{}", console::list_examples()),
                    Command::PrintHtml => match controller.snapshot().await?.last_result {
                        Some(result) => println!("{}", render::render(&result).to_html()),
                        None => println!("No result yet."),
                    },
                    Command::Help => println!("{}", console::HELP),
                    Command::Quit => break,
                    Command::Unknown(message) => println!("{}", message),
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                if last_printed.as_ref() == Some(&snapshot) {
                    continue;
                }
                print!("{}", console::format_snapshot(&snapshot));
                last_printed = Some(snapshot);
            }
        }
    }

    let _ = controller.shutdown().await;
    Ok(())
}
