//! Gate Runner entry point
//!
//! Terminal host: owns the terminal, turns key events into input edges,
//! runs one simulation tick per frame and presents the cell buffer.

use std::fs::File;
use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{self, Color as TermColor};
use crossterm::{cursor, execute, queue, terminal};

use gate_runner::sim::{GameEvent, GameState, TickInput, tick};
use gate_runner::{CellBuffer, Color, Settings};

/// Longest frame the simulation is allowed to see
const MAX_FRAME_DT: f32 = 0.1;

/// Puts the terminal into game mode and restores it on drop, including on error paths
struct TerminalGuard {
    out: Stdout,
    enhanced_keys: bool,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )
        .context("entering alternate screen")?;

        // Release events need the keyboard enhancement protocol
        let enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced_keys {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .context("enabling key release events")?;
        }
        log::info!("Terminal ready (key release events: {enhanced_keys})");

        Ok(Self { out, enhanced_keys })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.enhanced_keys {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            self.out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Game instance holding all state
struct Game {
    state: GameState,
    buffer: CellBuffer,
    input: TickInput,
    /// Without release events, a release is reported the frame after a press
    synthesize_release: bool,
    release_pending: bool,
    last_frame: Instant,
    quit: bool,
}

impl Game {
    fn new(settings: &Settings, seed: u64, synthesize_release: bool) -> Self {
        let screen = settings.screen();
        Self {
            state: GameState::new(seed, screen),
            buffer: CellBuffer::new(screen),
            input: TickInput::default(),
            synthesize_release,
            release_pending: false,
            last_frame: Instant::now(),
            quit: false,
        }
    }

    fn is_action(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char(' ') | KeyCode::Up)
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc if key.kind != KeyEventKind::Release => {
                self.quit = true;
            }
            code if Self::is_action(code) => match key.kind {
                KeyEventKind::Press => {
                    self.input.action_pressed = true;
                    if self.synthesize_release {
                        self.release_pending = true;
                    }
                }
                KeyEventKind::Release => self.input.action_released = true,
                KeyEventKind::Repeat => {}
            },
            _ => {}
        }
    }

    /// Drain pending terminal events into this frame's input edges
    fn poll_input(&mut self) -> Result<()> {
        self.input = TickInput::default();
        if self.release_pending {
            self.input.action_released = true;
            self.release_pending = false;
        }

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Run one simulation tick with the real elapsed time
    fn update(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32().min(MAX_FRAME_DT);
        self.last_frame = now;

        for event in tick(&mut self.state, &self.input, dt, &mut self.buffer) {
            match event {
                GameEvent::Collided { score } => log::info!("Crashed with score {score}"),
                GameEvent::RunStarted { attempt } => log::info!("Attempt {attempt}"),
                GameEvent::GravityInverted { gravity } => log::debug!("Gravity now {gravity:?}"),
                other => log::trace!("{other:?}"),
            }
        }
    }

    /// Present the cell buffer
    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let mut current = None;
        for (y, row) in self.buffer.rows().enumerate() {
            queue!(out, cursor::MoveTo(0, y as u16))?;
            for cell in row {
                if current != Some(cell.color) {
                    queue!(out, style::SetForegroundColor(term_color(cell.color)))?;
                    current = Some(cell.color);
                }
                queue!(out, style::Print(cell.glyph))?;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::White => TermColor::White,
        Color::Green => TermColor::Green,
        Color::Red => TermColor::Red,
        Color::Yellow => TermColor::Yellow,
    }
}

fn init_logging(settings: &Settings) -> Result<()> {
    match &settings.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        // stderr shares the terminal with the game; keep it to errors
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error"))
                .init();
        }
    }
    Ok(())
}

fn run(settings: &Settings) -> Result<()> {
    let (cols, rows) = terminal::size().context("querying terminal size")?;
    let screen = settings.screen();
    if i32::from(cols) < screen.width || i32::from(rows) < screen.height {
        bail!(
            "terminal is {cols}x{rows}, need at least {}x{}",
            screen.width,
            screen.height
        );
    }

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Seed {seed}");

    let mut terminal = TerminalGuard::enter()?;
    let mut game = Game::new(settings, seed, !terminal.enhanced_keys);
    let frame_duration = settings.frame_duration();

    while !game.quit {
        let frame_start = Instant::now();

        game.poll_input()?;
        if game.quit {
            break;
        }
        game.update();
        game.render(&mut terminal.out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            std::thread::sleep(frame_duration - elapsed);
        }
    }

    log::info!(
        "Quit after {} attempts, high score {}",
        game.state.run.attempt_count,
        game.state.run.high_score
    );
    Ok(())
}

fn main() -> Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(config_path.as_deref())?;
    init_logging(&settings)?;
    log::info!("Gate Runner starting ({}x{})", settings.screen_width, settings.screen_height);

    run(&settings)
}
