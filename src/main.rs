use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// macropadd — per-application macros and LED layouts for a HID macro pad
#[derive(Parser)]
#[command(name = "macropadd", version, about)]
struct Cli {
    /// Path to the config file (JSON). Created with defaults if missing.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable JSON log output (for journald).
    #[arg(long)]
    json: bool,

    /// Validate config and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Init tracing.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("macropadd=info"));

    if cli.json {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt().with_env_filter(filter).init();
    }

    info!("macropadd v{}", env!("CARGO_PKG_VERSION"));

    // Load config.
    let config_path = cli.config.unwrap_or_else(macropadd::config::default_path);

    if cli.check {
        let config = macropadd::config::load(&config_path)?;
        println!(
            "config OK: {} application layouts, {} default macros",
            config.application_layouts.len(),
            config.default_layout.macros.len(),
        );
        return Ok(());
    }

    let config = macropadd::config::load_or_create(&config_path)?;
    info!(
        "loaded config from {}: {} application layouts",
        config_path.display(),
        config.application_layouts.len()
    );

    let cancel = CancellationToken::new();
    spawn_shutdown_listener(cancel.clone());

    run(Arc::new(config), cancel).await
}

#[cfg(target_os = "linux")]
async fn run(
    config: Arc<macropadd::config::schema::MacroConfig>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    use macropadd::action::xtest::XTestInjector;
    use macropadd::daemon::Supervisor;
    use macropadd::device::HidConnector;
    use macropadd::window::x11::X11ForegroundWindow;

    let window = X11ForegroundWindow::new()?;
    let injector = XTestInjector::new()?;

    Supervisor::new(config, HidConnector::default(), window, injector, cancel)
        .run()
        .await?;
    Ok(())
}

#[cfg(not(target_os = "linux"))]
async fn run(
    _config: Arc<macropadd::config::schema::MacroConfig>,
    _cancel: CancellationToken,
) -> anyhow::Result<()> {
    anyhow::bail!("no foreground window or key injection backend for this platform")
}

/// Cancel on SIGINT, or SIGTERM where available.
fn spawn_shutdown_listener(cancel: CancellationToken) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            match signal(SignalKind::terminate()) {
                Ok(mut term) => {
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => info!("received SIGINT, shutting down"),
                        _ = term.recv() => info!("received SIGTERM, shutting down"),
                    }
                }
                Err(_) => {
                    tokio::signal::ctrl_c().await.ok();
                    info!("received SIGINT, shutting down");
                }
            }
        }
        #[cfg(not(unix))]
        {
            tokio::signal::ctrl_c().await.ok();
            info!("received SIGINT, shutting down");
        }
        cancel.cancel();
    });
}
