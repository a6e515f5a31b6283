use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::event::{
    poll as event_poll, read as event_read, Event as CrosstermEvent, KeyEventKind,
};
use folio::app::App;
use folio::config::Config;
use folio::content::Content;
use folio::services::time_source::RealTimeSource;
use folio::services::{log_dirs, tracing_setup};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// A terminal portfolio viewer
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "A terminal portfolio viewer with scroll-triggered animations", long_about = None)]
#[command(version)]
struct Args {
    /// Portfolio content file (JSON). Uses the built-in sample if omitted.
    #[arg(value_name = "CONTENT")]
    content: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Theme for this run ("dark" or "light"), overriding the persisted flag
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Path to log file for diagnostics (default: system state dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Print the built-in sample content as JSON and exit
    #[arg(long)]
    dump_content: bool,
}

fn load_config(args: &Args) -> AnyhowResult<(Config, Option<PathBuf>)> {
    let (mut config, path) = if let Some(config_path) = &args.config {
        let config = Config::load_from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
        (config, Some(config_path.clone()))
    } else {
        let path = Config::default_path();
        let config = match &path {
            Some(p) => Config::load_or_default(p)
                .with_context(|| format!("Failed to load config from {}", p.display()))?,
            None => Config::default(),
        };
        (config, path)
    };

    if let Some(theme) = &args.theme {
        config.theme = Some(theme.clone());
    }

    config.validate().context("Invalid configuration")?;
    Ok((config, path))
}

fn load_content(args: &Args) -> AnyhowResult<Content> {
    match &args.content {
        Some(path) => Content::load_from_file(path)
            .with_context(|| format!("Failed to load content from {}", path.display())),
        None => Ok(Content::default()),
    }
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    // Handle --dump-config early (no terminal setup needed)
    if args.dump_config {
        let (config, _) = load_config(&args)?;
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    // Handle --dump-content early (a starting point for a custom file)
    if args.dump_content {
        println!("{}", serde_json::to_string_pretty(&Content::default())?);
        return Ok(());
    }

    let log_file = args.log_file.clone().unwrap_or_else(log_dirs::main_log_path);
    if !tracing_setup::init_global(&log_file) {
        eprintln!("Warning: could not open log file {}", log_file.display());
    }
    log_dirs::cleanup_stale_logs();

    tracing::info!("folio starting");

    let (config, config_path) = load_config(&args)?;
    let content = load_content(&args)?;

    // Restore the terminal before the default panic report prints.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        ratatui::restore();
        original_hook(panic);
    }));

    let mut terminal = ratatui::init();
    let size = terminal.size()?;
    tracing::info!("Terminal size: {}x{}", size.width, size.height);

    let mut app = App::new(
        config,
        config_path,
        &content,
        RealTimeSource::shared(),
        size.width,
        size.height,
    );

    let result = run_event_loop(&mut app, &mut terminal);
    ratatui::restore();

    result.context("Event loop returned an error")
}

/// Main event loop
fn run_event_loop(app: &mut App, terminal: &mut DefaultTerminal) -> AnyhowResult<()> {
    const FRAME_DURATION: Duration = Duration::from_millis(16); // 60fps
    let mut last_render = Instant::now();
    let mut needs_render = true;

    loop {
        // Advance animations and poll the submission worker.
        if app.tick() {
            needs_render = true;
        }

        if app.should_quit() {
            break;
        }

        if needs_render && last_render.elapsed() >= FRAME_DURATION {
            terminal.draw(|frame| app.render(frame))?;
            last_render = Instant::now();
            needs_render = false;
        }

        let timeout = if needs_render {
            FRAME_DURATION.saturating_sub(last_render.elapsed())
        } else {
            let idle = Duration::from_millis(50);
            match app.next_deadline() {
                Some(due) => due.saturating_duration_since(Instant::now()).min(idle),
                None => idle,
            }
        };

        if !event_poll(timeout)? {
            continue;
        }

        match event_read()? {
            CrosstermEvent::Key(key_event) => {
                if key_event.kind == KeyEventKind::Press {
                    app.handle_key(key_event);
                    needs_render = true;
                }
            }
            CrosstermEvent::Resize(w, h) => {
                app.resize(w, h);
                needs_render = true;
            }
            _ => {}
        }
    }

    Ok(())
}
