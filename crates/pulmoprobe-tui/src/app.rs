//! Terminal application: screen navigation, input dispatch and the draw loop.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    widgets::TableState,
    Frame, Terminal,
};

use crate::session::Session;
use crate::ui::{
    dashboard::render_dashboard,
    form::render_home,
    info::{render_about, render_contact},
    render_disclaimer, render_tabs,
};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Dashboard,
    About,
    Contact,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Home, Screen::Dashboard, Screen::About, Screen::Contact];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Dashboard => "Dashboard",
            Screen::About => "About",
            Screen::Contact => "Contact",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }
}

pub struct App {
    screen: Screen,
    should_quit: bool,
    session: Session,
    endpoint: String,
    table_state: TableState,
}

impl App {
    pub fn new(session: Session, endpoint: impl Into<String>) -> Self {
        Self {
            screen: Screen::Home,
            should_quit: false,
            session,
            endpoint: endpoint.into(),
            table_state: TableState::default(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Enter the alternate screen, run until quit, then restore the terminal.
    pub fn run(&mut self) -> eyre::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> eyre::Result<()> {
        while !self.should_quit {
            self.tick();
            terminal.draw(|f| self.draw(f))?;

            if event::poll(POLL_INTERVAL)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }
        }
        tracing::info!(predictions = self.session.history().len(), "session ended");
        Ok(())
    }

    /// Collect a finished submission, if one is waiting.
    pub fn tick(&mut self) -> bool {
        self.session.poll()
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(f.area());

        let titles: Vec<&str> = Screen::ALL.iter().map(|s| s.title()).collect();
        render_tabs(f, chunks[0], &titles, self.screen.index());

        let content = chunks[1];
        match self.screen {
            Screen::Home => render_home(
                f,
                content,
                self.session.form(),
                &self.session.options().high_risk_marker,
            ),
            Screen::Dashboard => {
                let dashboard = self.session.dashboard();
                render_dashboard(
                    f,
                    content,
                    &dashboard,
                    self.session.history(),
                    self.session.options(),
                    &mut self.table_state,
                );
            }
            Screen::About => render_about(f, content, self.session.form().schema(), &self.endpoint),
            Screen::Contact => render_contact(f, content),
        }

        render_disclaimer(f, chunks[2]);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('q') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::F(n @ 1..=4) => {
                self.screen = Screen::ALL[usize::from(n - 1)];
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Home => self.handle_home_key(key.code, ctrl),
            Screen::Dashboard => self.handle_dashboard_key(key.code),
            Screen::About | Screen::Contact => self.handle_info_key(key.code),
        }
    }

    fn handle_home_key(&mut self, code: KeyCode, ctrl: bool) {
        if ctrl {
            match code {
                KeyCode::Char('r') => self.session.reset(),
                KeyCode::Char('s') => self.session.form_mut().load_sample_data(),
                _ => {}
            }
            return;
        }

        if code == KeyCode::Enter {
            self.session.submit();
            return;
        }

        let form = self.session.form_mut();
        match code {
            KeyCode::Up | KeyCode::BackTab => form.prev_field(),
            KeyCode::Down | KeyCode::Tab => form.next_field(),
            KeyCode::Left => form.cycle_option(false),
            KeyCode::Right | KeyCode::Char(' ') => form.cycle_option(true),
            KeyCode::Backspace => form.delete_char(),
            KeyCode::Delete => form.clear_field(),
            KeyCode::Char(c) => form.input_char(c),
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Down | KeyCode::Char('j') => self.table_state.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.table_state.select_previous(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_info_key(&mut self, code: KeyCode) {
        if code == KeyCode::Char('q') {
            self.should_quit = true;
        }
    }
}
