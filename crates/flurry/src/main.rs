mod logging;
mod surface;
mod ticker;

use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use flurry_config::{Config, ConfigFile};
use flurry_snowfall::{PointerEvent, Snowfall};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Size},
    style::{Color, Stylize},
    text::Line,
};
use tracing::{error, info, warn};

use crate::surface::{TerminalSurface, TerminalViewport};
use crate::ticker::FrameTicker;

/// Event poll timeout while no frame is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Falling snow in your terminal.
#[derive(Debug, Parser)]
#[command(name = "flurry", version, about)]
pub struct Cli {
    /// Path to the config file (defaults to the platform config directory).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Disable the mouse pushing snowflakes around.
    #[arg(long)]
    no_pointer: bool,

    /// Start with the snow stopped. Does not change the saved preference.
    #[arg(long)]
    paused: bool,

    /// Seed the random stream for a reproducible snowfall.
    #[arg(long)]
    seed: Option<u64>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config_file = match &cli.config {
        Some(path) => ConfigFile::at(path),
        None => ConfigFile::default_location()?,
    };
    let config = config_file.load()?;

    let terminal = ratatui::init();
    let result = run(&cli, config, config_file, terminal);
    if let Err(e) = execute!(stdout(), DisableMouseCapture) {
        warn!(error = %e, "failed to release mouse capture");
    }
    ratatui::restore();
    result
}

fn run(
    cli: &Cli,
    config: Config,
    config_file: ConfigFile,
    terminal: DefaultTerminal,
) -> color_eyre::Result<()> {
    execute!(stdout(), EnableMouseCapture)?;
    let size = terminal.size()?;
    App::new(cli, config, config_file, size).run(terminal)
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    snowfall: Snowfall<TerminalSurface, FrameTicker, TerminalViewport>,
    /// Whether the snowfall initialized and can be toggled.
    snow_ready: bool,
    config: Config,
    config_file: ConfigFile,
}

impl App {
    /// Construct a new instance of [`App`] for a terminal of `size` cells.
    pub fn new(cli: &Cli, config: Config, config_file: ConfigFile, size: Size) -> Self {
        let settings = config.snowfall.clone();
        let ticker = FrameTicker::new(settings.frame_interval());
        let viewport = TerminalViewport::from_cells(size.width, size.height);
        let pointer = settings.pointer_interaction && !cli.no_pointer;

        let mut snowfall = Snowfall::new(settings, ticker, viewport);
        if let Some(seed) = cli.seed {
            snowfall = snowfall.with_seed(seed);
        }
        if pointer {
            snowfall = snowfall.with_pointer_casting();
        }

        let snow_ready = match snowfall.init(Some(TerminalSurface::new())) {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "snowfall unavailable");
                false
            }
        };
        if snow_ready && config.snow_enabled && !cli.paused {
            snowfall.start();
        }
        info!(
            config = %config_file.path().display(),
            pointer,
            running = snowfall.is_running(),
            "flurry started"
        );

        Self {
            running: false,
            snowfall,
            snow_ready,
            config,
            config_file,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;

            let now = Instant::now();
            self.snowfall.poll_pointer(now);
            if self.snowfall.scheduler_mut().take_due(now).is_some() {
                self.snowfall.frame();
            }
        }
        info!("flurry exiting");
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [_, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        // Snow covers the whole terminal so dots line up with mouse cells.
        if let Some(surface) = self.snowfall.surface() {
            surface.render(frame, area);
        }

        let accent = Color::White;
        let state = if self.snowfall.is_running() {
            "on"
        } else {
            "off"
        };
        let help = Line::from(vec![
            "q".bold().fg(accent),
            " quit  ".dark_gray(),
            "s".bold().fg(accent),
            format!(" snow ({state})").dark_gray(),
        ])
        .centered();
        frame.render_widget(help, help_area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits no longer than the next scheduled frame.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self
            .snowfall
            .scheduler()
            .time_until_due(Instant::now())
            .unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('s')) => self.toggle_snow(),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Moved | MouseEventKind::Drag(_) = mouse.kind {
            let position = TerminalViewport::cell_center(mouse.column, mouse.row);
            let event = PointerEvent::Move {
                x: position.x,
                y: position.y,
            };
            self.snowfall.pointer_moved(Instant::now(), &event);
        }
    }

    fn on_resize(&mut self, cols: u16, rows: u16) {
        self.snowfall.viewport_mut().set_cells(cols, rows);
        self.snowfall.resize();
    }

    /// Start or stop the snow and remember the choice.
    fn toggle_snow(&mut self) {
        if !self.snow_ready {
            warn!("snowfall unavailable, ignoring toggle");
            return;
        }
        if self.snowfall.is_running() {
            self.snowfall.stop();
        } else {
            self.snowfall.start();
        }
        self.config.snow_enabled = self.snowfall.is_running();
        if let Err(e) = self.config_file.save(&self.config) {
            warn!(error = %e, "failed to save snow preference");
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
