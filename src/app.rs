use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use keypace::config::Config;
use keypace::engine::{RenderModel, Viewport};
use keypace::generator::{self, TextSource};
use keypace::session::{Clock, Key, RunResult, ScoreEntry, SystemClock, TestConfig, TestSession, Transition};
use keypace::store::{ModeFilter, ScoreLedger};

use crate::ui::components::menu::{Menu, MenuAction};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Test,
    Result,
    Stats,
}

pub struct App<C: Clock + Clone = SystemClock> {
    pub screen: AppScreen,
    pub session: TestSession<C>,
    pub ledger: ScoreLedger,
    pub config: Config,
    pub menu: Menu<'static>,
    pub theme: &'static Theme,
    pub last_result: Option<RunResult>,
    /// Best score for the finished run's configuration before it was recorded.
    pub previous_best: Option<ScoreEntry>,
    pub stats_filter: ModeFilter,
    pub confirm_clear: bool,
    pub status: Option<String>,
    pub should_quit: bool,
    text: Box<dyn TextSource>,
    clock: C,
}

/// Translates a terminal key press into a session key.
pub fn session_key(key: &KeyEvent) -> Key {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return Key::Ignored;
    }
    match key.code {
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::Char(ch) => Key::Char(ch),
        _ => Key::Ignored,
    }
}

impl<C: Clock + Clone> App<C> {
    pub fn new(
        config: Config,
        theme: Theme,
        ledger: ScoreLedger,
        text: Box<dyn TextSource>,
        clock: C,
    ) -> Self {
        let theme: &'static Theme = Box::leak(Box::new(theme));
        let menu = Menu::new(theme, &config);
        Self {
            screen: AppScreen::Menu,
            session: TestSession::new(TestConfig::Sentence, clock.clone()),
            ledger,
            config,
            menu,
            theme,
            last_result: None,
            previous_best: None,
            stats_filter: ModeFilter::All,
            confirm_clear: false,
            status: None,
            should_quit: false,
            text,
            clock,
        }
    }

    /// Whether the tick source should be running.
    pub fn wants_ticks(&self) -> bool {
        self.screen == AppScreen::Test && self.session.is_running()
    }

    pub fn start_test(&mut self, config: TestConfig) {
        self.session = TestSession::new(config, self.clock.clone());
        self.load_target();
        self.last_result = None;
        self.previous_best = None;
        self.status = None;
        self.screen = AppScreen::Test;
    }

    fn load_target(&mut self) {
        let target = generator::build_target(
            self.text.as_mut(),
            self.session.config(),
            self.config.timed_stream_words,
        );
        self.session.start(&target);
    }

    pub fn retry(&mut self) {
        let config = *self.session.config();
        self.start_test(config);
    }

    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::Menu;
        self.confirm_clear = false;
    }

    pub fn go_to_stats(&mut self) {
        self.screen = AppScreen::Stats;
        self.confirm_clear = false;
    }

    pub fn best_for_current(&self) -> Option<&ScoreEntry> {
        self.ledger.best_for_config(self.session.config())
    }

    pub fn viewport(&self, available_width: usize) -> Viewport {
        self.config.viewport(available_width)
    }

    pub fn render_model(&self, available_width: usize) -> RenderModel {
        self.session.render(self.viewport(available_width))
    }

    pub fn on_tick(&mut self) {
        if !self.wants_ticks() {
            return;
        }
        let transition = self.session.tick();
        self.apply_transition(transition);
    }

    fn apply_transition(&mut self, transition: Transition) {
        match transition {
            Transition::Unchanged | Transition::Updated => {}
            Transition::Abort => {
                tracing::debug!(config = %self.session.config().label(), "run aborted");
                self.go_to_menu();
            }
            Transition::Regenerate => self.load_target(),
            Transition::Finished(result) => self.record(result),
        }
    }

    fn record(&mut self, result: RunResult) {
        self.previous_best = self.best_for_current().cloned();
        let entry = ScoreEntry::from_result(result.clone(), self.clock.utc_now());
        self.ledger.append(entry);
        self.last_result = Some(result);
        self.screen = AppScreen::Result;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.screen {
            AppScreen::Menu => self.handle_menu_key(key),
            AppScreen::Test => {
                let transition = self.session.apply_key(session_key(&key));
                self.apply_transition(transition);
            }
            AppScreen::Result => self.handle_result_key(key),
            AppScreen::Stats => self.handle_stats_key(key),
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('1') => self.activate(MenuAction::Sentence),
            KeyCode::Char('2') => self.activate(MenuAction::Timed),
            KeyCode::Char('3') => self.activate(MenuAction::Words),
            KeyCode::Char('s') => self.activate(MenuAction::Stats),
            KeyCode::Up | KeyCode::Char('k') => self.menu.prev(),
            KeyCode::Down | KeyCode::Char('j') => self.menu.next(),
            KeyCode::Left | KeyCode::Char('h') => self.menu.cycle_preset(false),
            KeyCode::Right | KeyCode::Char('l') => self.menu.cycle_preset(true),
            KeyCode::Enter => self.activate(self.menu.selected_action()),
            _ => {}
        }
    }

    fn activate(&mut self, action: MenuAction) {
        match action {
            MenuAction::Stats => self.go_to_stats(),
            MenuAction::Quit => self.should_quit = true,
            _ => {
                if let Some(config) = self.menu.config_for(action) {
                    self.start_test(config);
                }
            }
        }
    }

    fn handle_result_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') | KeyCode::Enter => self.retry(),
            KeyCode::Char('s') => self.go_to_stats(),
            KeyCode::Char('q') | KeyCode::Esc => self.go_to_menu(),
            _ => {}
        }
    }

    fn handle_stats_key(&mut self, key: KeyEvent) {
        if self.confirm_clear {
            if key.code == KeyCode::Char('y') {
                self.clear_history();
            }
            self.confirm_clear = false;
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.go_to_menu(),
            KeyCode::Tab => self.stats_filter = self.stats_filter.next(),
            KeyCode::Char('x') if !self.ledger.is_empty() => self.confirm_clear = true,
            _ => {}
        }
    }

    fn clear_history(&mut self) {
        match self.ledger.clear() {
            Ok(()) => self.status = Some("History cleared".to_string()),
            Err(err) => {
                tracing::warn!(error = %err, "failed to clear score history");
                self.status = Some(format!("Could not clear history: {err}"));
            }
        }
    }
}
