use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::net::TcpListener;

mod app;
mod catalog;
mod commands;
mod model;
mod net;
mod server;
mod ui;

use app::App;

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(
    name = "tdash",
    version,
    about = "HTTP upload/download server with a terminal dashboard"
)]
struct Cli {
    /// Port to listen on
    port: u16,
    /// Directory to serve; uploads land in its uploads/ subdirectory
    #[arg(default_value = ".")]
    directory: PathBuf,
    /// Address clients use to reach this host (default: tun0, then the outbound interface)
    #[arg(long)]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // Everything that can fail fatally happens before the terminal is touched.
    let root = resolve_root(&cli.directory)?;
    let address = net::resolve_address(cli.address)?;
    let listener = TcpListener::bind(("0.0.0.0", cli.port))
        .await
        .with_context(|| format!("bind port {}", cli.port))?;
    tokio::spawn({
        let root = root.clone();
        async move {
            if let Err(err) = server::serve(listener, root).await {
                tracing::error!(%err, "transfer service stopped");
            }
        }
    });

    let mut app = App::new(address, cli.port, root, app::logging::default_log_path());

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    result
}

fn resolve_root(directory: &Path) -> Result<PathBuf> {
    let root = directory
        .canonicalize()
        .with_context(|| format!("directory does not exist: {}", directory.display()))?;
    if !root.is_dir() {
        anyhow::bail!("path is not a directory: {}", root.display());
    }
    Ok(root)
}

/// Quiet by default so request handling never writes over the dashboard.
/// RUST_LOG opts into stderr output, meant to be redirected to a file.
fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();
    }
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw_ui(frame, app))?;

        if event::poll(POLL_TIMEOUT)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
                        && matches!(key.code, KeyCode::Char('c'));
                    if ctrl_c {
                        return Ok(());
                    }
                    if app.handle_key(key)? {
                        return Ok(());
                    }
                }
            }
        }

        app.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_root_rejects_missing_directory() {
        let mut missing = std::env::temp_dir();
        missing.push("tdash-main-no-such-dir");
        assert!(resolve_root(&missing).is_err());
    }

    #[test]
    fn resolve_root_rejects_plain_files() {
        let mut path = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        path.push(format!("tdash-main-file-{nanos}"));
        std::fs::write(&path, b"x").unwrap();
        assert!(resolve_root(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn resolve_root_canonicalizes() {
        let root = resolve_root(Path::new(".")).unwrap();
        assert!(root.is_absolute());
        assert!(root.is_dir());
    }
}
