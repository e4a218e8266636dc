use std::{
    fs,
    path::PathBuf,
    time::{Duration, Instant},
};

use chrono::Local;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use digirain_config::SettingsFile;
use digirain_core::{ConfigPatch, ThemeTable};
use digirain_render::{CellCanvas, Renderer};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Rect, Size},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};
use tracing::{info, warn};

mod cli;
mod controls;
mod logging;
mod settings;

use cli::Args;
use controls::{Setting, reset_preset};
use settings::Startup;

/// Width of the controls panel in cells.
const PANEL_WIDTH: u16 = 38;

/// Cells used by a dial's bar.
const BAR_WIDTH: usize = 12;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if args.list_themes {
        let themes = ThemeTable::builtin();
        for key in themes.keys() {
            if let Some(theme) = themes.get(key) {
                println!("{key:<12} {}", theme.display_name);
            }
        }
        return Ok(());
    }

    logging::init(args.log_file.as_deref())?;
    let startup = settings::resolve(&args)?;

    let terminal = ratatui::init();
    let result = terminal
        .size()
        .map_err(Into::into)
        .and_then(|size| App::new(startup, &args, size))
        .and_then(|app| app.run(terminal));
    ratatui::restore();
    result
}

/// The main application which holds the rain and the controls panel state.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// The rain itself.
    rain: Renderer<CellCanvas>,
    /// Whether the controls panel is shown.
    panel_visible: bool,
    /// Dial adjusted by the arrow keys.
    selected: Setting,
    /// One-line message shown in the panel.
    status: Option<String>,
    /// Where `s` saves settings.
    settings_file: Option<SettingsFile>,
    /// Directory exported configs are written to.
    export_dir: PathBuf,
    frame_interval: Duration,
    last_frame: Instant,
}

impl App {
    /// Construct a new instance of [`App`] sized to the terminal.
    pub fn new(startup: Startup, args: &Args, size: Size) -> color_eyre::Result<Self> {
        let canvas = CellCanvas::new(size.width, size.height);
        let rng = args
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let mut rain =
            Renderer::with_parts(canvas, startup.options, ThemeTable::builtin(), rng)?;
        rain.start();

        Ok(Self {
            running: false,
            rain,
            panel_visible: true,
            selected: Setting::default(),
            status: startup.notice,
            settings_file: startup.settings_file,
            export_dir: PathBuf::from("."),
            frame_interval: Duration::from_secs_f64(1.0 / args.fps.max(1) as f64),
            last_frame: Instant::now(),
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            if self.last_frame.elapsed() >= self.frame_interval {
                self.last_frame = Instant::now();
                self.rain.on_frame();
            }
            terminal.draw(|frame| self.render(frame))?;
            let timeout = self.frame_interval.saturating_sub(self.last_frame.elapsed());
            self.handle_crossterm_events(timeout)?;
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.rain.surface().render(frame, area);
        if self.panel_visible {
            self.render_panel(frame, area);
        }
    }

    /// Draw the controls panel in the top-right corner.
    fn render_panel(&self, frame: &mut Frame, area: Rect) {
        let config = self.rain.config();
        let palette = self.rain.palette();
        let accent: Color = palette.foreground.into();
        let glow: Color = palette.glow.into();

        let mut lines = vec![
            Line::from(vec![
                "Theme  ".dark_gray(),
                Span::styled(palette.display_name, Style::new().fg(glow)),
            ]),
            Line::from(vec![
                "Glyphs ".dark_gray(),
                Span::styled(config.character_set.clone(), Style::new().fg(accent)),
            ]),
            Line::default(),
        ];

        for setting in Setting::ALL {
            let value = setting.value(&config);
            let (min, max) = setting.range();
            let filled = (((value - min) / (max - min)).clamp(0.0, 1.0) * BAR_WIDTH as f64).round()
                as usize;
            let marker = if setting == self.selected { "▸ " } else { "  " };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::new().fg(glow)),
                format!("{:<7}", setting.label()).dark_gray(),
                Span::styled("█".repeat(filled), Style::new().fg(accent)),
                "░".repeat(BAR_WIDTH - filled).dark_gray(),
                format!(" {value:>3}").into(),
            ]));
        }

        let state = if self.rain.is_running() {
            "● raining".fg(accent)
        } else {
            "❚❚ paused".dark_gray()
        };
        lines.push(Line::default());
        lines.push(Line::from(state));
        lines.push(help_line(&[("space", "pause"), ("r", "random"), ("t", "theme")], glow));
        lines.push(help_line(&[("↑↓", "select"), ("←→", "adjust"), ("x", "reset")], glow));
        lines.push(help_line(&[("e", "export"), ("s", "save"), ("c", "hide"), ("q", "quit")], glow));
        if let Some(status) = &self.status {
            lines.push(Line::from(status.clone().italic().fg(accent)));
        }

        let width = PANEL_WIDTH.min(area.width);
        let height = (lines.len() as u16 + 2).min(area.height);
        let panel = Rect::new(
            area.right().saturating_sub(width + 1),
            area.y + 1.min(area.height.saturating_sub(height)),
            width,
            height,
        )
        .intersection(area);

        let block = Block::bordered()
            .title(" digirain ")
            .border_style(Style::new().fg(accent))
            .style(Style::new().bg(Color::Black));
        frame.render_widget(Clear, panel);
        frame.render_widget(Paragraph::new(lines).block(block), panel);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so frames keep their pace.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(width, height) => self.on_resize(width, height),
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
            (_, KeyCode::Char(' ')) => self.rain.toggle(),
            (_, KeyCode::Char('r') | KeyCode::Char('R')) => self.random_theme(),
            (_, KeyCode::Char('c') | KeyCode::Char('C')) => self.panel_visible = !self.panel_visible,
            (_, KeyCode::Char('t')) => self.cycle_theme(),
            (_, KeyCode::Up) => self.selected = self.selected.prev(),
            (_, KeyCode::Down) => self.selected = self.selected.next(),
            (_, KeyCode::Left | KeyCode::Char('-')) => self.nudge(-1),
            (_, KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=')) => self.nudge(1),
            (_, KeyCode::Char('x')) => self.reset(),
            (_, KeyCode::Char('e')) => self.export(),
            (_, KeyCode::Char('s')) => self.save(),
            _ => {}
        }
    }

    /// Resize the canvas to a new terminal size.
    fn on_resize(&mut self, width: u16, height: u16) {
        let size = self
            .rain
            .surface()
            .metrics()
            .surface_size(width, height);
        self.rain.resize(size);
    }

    fn set_theme(&mut self, key: &str) {
        self.rain.update_config(ConfigPatch {
            theme: Some(key.to_string()),
            ..Default::default()
        });
        info!(theme = key, "theme changed");
    }

    fn random_theme(&mut self) {
        if let Some(key) = self.rain.random_theme() {
            self.set_theme(key);
        }
    }

    fn cycle_theme(&mut self) {
        let current = self.rain.config().theme;
        if let Some(key) = self.rain.themes().next_key(&current) {
            self.set_theme(key);
        }
    }

    fn nudge(&mut self, steps: i32) {
        let patch = self.selected.nudge(&self.rain.config(), steps);
        self.rain.update_config(patch);
    }

    fn reset(&mut self) {
        self.rain.update_config(reset_preset());
        if !self.rain.is_running() {
            self.rain.resume();
        }
        self.status = Some("settings reset".to_string());
    }

    /// Write the current config to a timestamped JSON file.
    fn export(&mut self) {
        let name = format!("digirain-config-{}.json", Local::now().format("%Y%m%d-%H%M%S"));
        let path = self.export_dir.join(name);
        let result = self
            .rain
            .export_config()
            .map_err(|err| err.to_string())
            .and_then(|text| fs::write(&path, text).map_err(|err| err.to_string()));
        self.status = Some(match result {
            Ok(()) => {
                info!(path = %path.display(), "config exported");
                format!("exported {}", path.display())
            }
            Err(err) => {
                warn!(%err, "export failed");
                format!("export failed: {err}")
            }
        });
    }

    /// Persist the current config to the settings file.
    fn save(&mut self) {
        let Some(file) = &self.settings_file else {
            self.status = Some("no settings file".to_string());
            return;
        };
        self.status = Some(match file.save(&self.rain.config()) {
            Ok(()) => format!("saved {}", file.path().display()),
            Err(err) => {
                warn!(%err, "save failed");
                format!("save failed: {err}")
            }
        });
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

fn help_line(keys: &[(&'static str, &'static str)], key_color: Color) -> Line<'static> {
    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(*key, Style::new().bold().fg(key_color)),
                format!(" {action}  ").dark_gray(),
            ]
        })
        .collect();
    Line::from(spans)
}
