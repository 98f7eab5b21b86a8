use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    Terminal,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use jujulens::ui::{self, table, Ansi, Monochrome, Palette};
use jujulens::{
    events, App, Baseline, ColorMode, CommandSource, FileSource, Overrides, Report, Section,
    Settings, Snapshot, SnapshotSource, StdinSource,
};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "JUJULENS_LOG";

#[derive(Parser, Debug)]
#[command(name = "jujulens", version)]
#[command(about = "Severity-colored summaries of a Juju status export")]
struct Args {
    /// Read a status export from a file (`-` for stdin) instead of running `juju status`
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Model passed to `juju status -m` (ignored with --file)
    #[arg(short, long, conflicts_with = "file")]
    model: Option<String>,

    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Open the interactive viewer
    #[arg(short, long)]
    tui: bool,

    /// Export every table to a JSON file and exit
    #[arg(short, long, conflicts_with = "tui")]
    export: Option<PathBuf>,

    /// When to color plain output
    #[arg(long, value_enum)]
    color: Option<ColorMode>,

    /// Newest platform version; models behind it are flagged
    #[arg(long)]
    latest_version: Option<String>,

    /// Oldest supported platform version
    #[arg(long)]
    version_floor: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let overrides = Overrides {
        version_floor: args.version_floor.clone(),
        latest_version: args.latest_version.clone(),
        color: args.color,
    };
    let settings = Settings::load(args.config.as_deref(), &overrides)?;
    let baseline = settings.baseline()?;
    debug!(?settings, "settings loaded");

    let mut source = open_source(&args);
    let document = source.load()?;
    let snapshot = Snapshot::build(&document)
        .with_context(|| format!("Invalid status export from {}", source.description()))?;

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        Report::build(&snapshot, &baseline).write(&export_path)?;
        info!(path = %export_path.display(), "export written");
        println!("Exported to {}", export_path.display());
        return Ok(());
    }

    if args.tui {
        let app = App::new(snapshot, baseline, source.description().to_string());
        return run_tui(app);
    }

    let decorate = settings.color.decorate();
    let palette: &dyn Palette = if decorate { &Ansi } else { &Monochrome };
    print_tables(&snapshot, &baseline, decorate, palette)
}

fn open_source(args: &Args) -> Box<dyn SnapshotSource> {
    match &args.file {
        Some(path) if path.as_os_str() == "-" => Box::new(StdinSource::new()),
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(CommandSource::juju(args.model.as_deref())),
    }
}

/// Write every non-empty section to stdout, separated by blank lines.
fn print_tables(
    snapshot: &Snapshot,
    baseline: &Baseline,
    decorate: bool,
    palette: &dyn Palette,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut first = true;

    for section in Section::ALL {
        let rows = section.rows(snapshot, baseline, decorate);
        if rows.is_empty() {
            continue;
        }
        if !first {
            writeln!(out)?;
        }
        first = false;
        table::render_section(&mut out, section, &rows, palette)?;
    }

    out.flush()?;
    Ok(())
}

/// Run the interactive viewer until the user quits.
fn run_tui(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Where the "terminal too small" banner goes; stays inside tiny terminals.
fn banner_area(area: Rect) -> Rect {
    let y = area.y + (area.height / 2).saturating_sub(2);
    Rect::new(area.x, y, area.width, area.height.min(5))
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                frame.render_widget(paragraph, banner_area(area));
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Section table
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);
            ui::section::render(frame, app, chunks[2]);
            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        if let Some(Event::Key(key)) = events::poll_event(Duration::from_millis(100))? {
            events::handle_key_event(app, key);
        }
    }

    Ok(())
}
