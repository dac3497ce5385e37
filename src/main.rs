use color_eyre::{eyre::eyre, Result};
use joypad::driver::{Session, SessionDriver};
use joypad::haptics::TracingActuator;
use joypad::host::HostLink;
use joypad::JoypadConfig;
use std::path::PathBuf;
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    setup()?;

    let mut args = std::env::args().skip(1);
    let session_path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| eyre!("Usage: joypad <session.toml> [config.toml]"))?;
    let config_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(JoypadConfig::default_path);

    let config = JoypadConfig::load(&config_path)?;
    let session = Session::load(&session_path)?;

    let (frame_tx, mut frame_rx) = mpsc::unbounded_channel::<String>();
    let host_handle = tokio::spawn(async move {
        while let Some(frame) = frame_rx.recv().await {
            info!("Host <- {}", frame);
        }
    });

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(());
        }
    });

    let driver = SessionDriver::new(session, config, HostLink::connected(frame_tx), TracingActuator);
    let joypad = driver.run_until_shutdown(shutdown_rx).await;

    for diagnostic in joypad.diagnostics().iter() {
        warn!("Unacknowledged: {}", diagnostic);
    }
    info!("Final state: {}", joypad.state_frame());

    // Closes the frame channel.
    drop(joypad);
    host_handle
        .await
        .map_err(|e| eyre!("Host task failed: {}", e))?;

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
