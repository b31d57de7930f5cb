mod buffer;
mod editor;
mod error;
mod mode;
mod ui;
mod undo;
mod viewport;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rhx", about = "A vi-like hex editor")]
struct Cli {
    /// File to open
    file: PathBuf,

    /// Octets per line (16 to 64)
    #[arg(short, long, default_value_t = viewport::DEFAULT_OCTETS_PER_LINE)]
    octets: usize,

    /// Octets per group (2 to 16)
    #[arg(short, long, default_value_t = viewport::DEFAULT_GROUPING)]
    grouping: usize,

    /// Write a trace log here; filtered by RUST_LOG
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = match &cli.log_file {
        Some(path) => Some(configure_logging(path)?),
        None => None,
    };

    let buffer = buffer::ByteBuffer::from_file(cli.file)?;
    let mut editor = editor::Editor::new(buffer).with_layout(cli.octets, cli.grouping);
    tracing::info!(
        target: "io",
        file = %editor.buffer.filename().display(),
        len = editor.buffer.len(),
        "opened"
    );

    // Set up terminal
    terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut editor);

    // Always restore the terminal, even if the loop errored
    terminal::disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("editor loop failed: {e:#}");
    }
    result
}

fn configure_logging(path: &Path) -> Result<WorkerGuard> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let dir = dir.unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("log path '{}' has no file name", path.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;
    Ok(guard)
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    editor: &mut editor::Editor,
) -> Result<()> {
    while editor.running {
        let size = terminal.size()?;
        editor
            .viewport
            .resize(size.height as usize, size.width as usize);

        terminal.draw(|frame| {
            ui::draw(frame, editor);
        })?;

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                tracing::trace!(
                    target: "input",
                    code = ?key.code,
                    modifiers = ?key.modifiers,
                    "key"
                );
                editor::handle_key(editor, key);
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
