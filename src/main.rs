mod app;
mod event;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use keypace::config::Config;
use keypace::generator::PracticeText;
use keypace::logging;
use keypace::session::TestConfig;
use keypace::store::json_store::{self, JsonStore};
use keypace::store::{MemoryStore, ScoreLedger, ScoreStore};

use app::{App, AppScreen};
use event::{AppEvent, EventHandler};
use ui::components::dashboard::Dashboard;
use ui::components::stats_dashboard::StatsDashboard;
use ui::components::stats_sidebar::StatsSidebar;
use ui::components::typing_area::TypingArea;
use ui::layout::{AppLayout, pack_hint_lines};
use ui::theme::Theme;

#[derive(Parser)]
#[command(name = "keypace", version, about = "Terminal typing test with sentence, timed and fixed-length runs")]
struct Cli {
    #[arg(long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, conflicts_with_all = ["time", "words"], help = "Start a sentence run right away")]
    sentence: bool,

    #[arg(short, long, value_name = "SECS", conflicts_with = "words", help = "Start a timed run of SECS seconds")]
    time: Option<u32>,

    #[arg(short, long, value_name = "N", help = "Start a run of N words")]
    words: Option<usize>,

    #[arg(long, value_name = "PATH", help = "Directory for score history and logs")]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Print bundled theme names and exit")]
    list_themes: bool,
}

impl Cli {
    fn quick_start(&self) -> Option<TestConfig> {
        if self.sentence {
            Some(TestConfig::Sentence)
        } else if let Some(secs) = self.time {
            TestConfig::timed(f64::from(secs))
        } else if let Some(n) = self.words {
            TestConfig::fixed(n)
        } else {
            None
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_themes {
        let mut names = Theme::available_themes();
        names.sort();
        for name in names {
            println!("{name}");
        }
        return Ok(());
    }

    let mut config = Config::load().unwrap_or_default();
    config.validate();
    if let Some(ref theme) = cli.theme {
        config.theme = theme.clone();
    }

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(json_store::default_data_dir);
    logging::init(&data_dir.join("keypace.log"))?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), data_dir = %data_dir.display(), "starting keypace");

    let store: Box<dyn ScoreStore> = match JsonStore::with_base_dir(data_dir) {
        Ok(store) => Box::new(store),
        Err(err) => {
            tracing::warn!(error = %err, "data directory unavailable, scores kept in memory only");
            Box::new(MemoryStore::new())
        }
    };
    let ledger = ScoreLedger::open(store);

    let theme = match Theme::load(&config.theme) {
        Some(theme) => {
            if cli.theme.is_some() {
                if let Err(err) = config.save() {
                    tracing::warn!(error = %err, "could not save config");
                }
            }
            theme
        }
        None => {
            tracing::warn!(theme = %config.theme, "unknown theme, using default");
            Theme::default()
        }
    };

    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    let mut app = App::new(
        config,
        theme,
        ledger,
        Box::new(PracticeText::new()),
        keypace::session::SystemClock,
    );
    if let Some(test_config) = cli.quick_start() {
        app.start_test(test_config);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(tick_rate);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = ?err, "terminal loop failed");
        eprintln!("Error: {err:?}");
    }
    tracing::info!("exiting");

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => app.handle_key(key),
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize => {}
        }
        events.ticks().set_armed(app.wants_ticks());

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Test => render_test(frame, app),
        AppScreen::Result => render_result(frame, app),
        AppScreen::Stats => render_stats(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect, info: &str) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " keypace ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info.to_string(),
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: Rect, hints: &[&str]) {
    let colors = &app.theme.colors;
    let lines: Vec<Line> = pack_hint_lines(hints, area.width as usize)
        .into_iter()
        .take(area.height as usize)
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_pending()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let summary = app.ledger.summary(keypace::store::ModeFilter::All);
    let info = match &app.status {
        Some(status) => format!(" {status}"),
        None if summary.count > 0 => format!(
            " {} runs | best {:.0} WPM | avg {:.0} WPM",
            summary.count, summary.max_wpm, summary.avg_wpm
        ),
        None => " no runs yet".to_string(),
    };
    render_header(frame, app, layout[0], &info);

    let menu_area = ui::layout::centered_rect(50, 80, layout[1]);
    frame.render_widget(&app.menu, menu_area);

    render_footer(
        frame,
        app,
        layout[2],
        &["[1-3] Start", "[←/→] Preset", "[s] Stats", "[q] Quit"],
    );
}

fn render_test(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let app_layout = AppLayout::new(area);
    let metrics = app.session.metrics();
    let label = app.session.config().label();

    if app_layout.tier.show_sidebar() {
        render_header(frame, app, app_layout.header, &format!(" {label}"));
    } else {
        let mut info = format!(
            " {label} | WPM: {:.0} | Acc: {:.1}%",
            metrics.wpm, metrics.accuracy
        );
        if let Some(remaining) = metrics.remaining_secs {
            info.push_str(&format!(
                " | {}",
                ui::components::stats_sidebar::format_clock(remaining, true)
            ));
        }
        render_header(frame, app, app_layout.header, &info);
    }

    // Room for the block borders and the separator cell after a full line.
    let text_width = app_layout.main.width.saturating_sub(3) as usize;
    let model = app.render_model(text_width);
    let windowed = app.session.config().is_windowed();

    let typing_area = if windowed {
        let height = app.viewport(text_width).visible_lines as u16 + 2;
        let top = app_layout.main.y + app_layout.main.height.saturating_sub(height) / 2;
        Rect::new(app_layout.main.x, top, app_layout.main.width, height.min(app_layout.main.height))
    } else {
        app_layout.main
    };
    frame.render_widget(TypingArea::new(&model, "Typing", !windowed, app.theme), typing_area);

    if let Some(sidebar) = app_layout.sidebar {
        frame.render_widget(
            StatsSidebar::new(&metrics, app.best_for_current(), app.theme),
            sidebar,
        );
    }

    if app.session.is_stream_exhausted() {
        let warn = Paragraph::new(Line::from(Span::styled(
            " Out of words, waiting for the timer",
            Style::default().fg(colors.warning()),
        )));
        frame.render_widget(warn, app_layout.footer);
    } else {
        render_footer(
            frame,
            app,
            app_layout.footer,
            &["[Esc] Menu", "[Tab] New text", "[Backspace] Erase"],
        );
    }
}

fn render_result(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    if let Some(ref result) = app.last_result {
        let centered = ui::layout::centered_rect(60, 60, area);
        let label = app.session.config().label();
        let dashboard = Dashboard::new(result, &label, app.previous_best.as_ref(), app.theme);
        frame.render_widget(dashboard, centered);
    }
}

fn render_stats(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let info = app.status.as_deref().map(|s| format!(" {s}")).unwrap_or_default();
    render_header(frame, app, layout[0], &info);

    let dashboard = StatsDashboard::new(
        &app.ledger,
        app.stats_filter,
        app.config.trend_limit,
        app.config.recent_limit,
        app.confirm_clear,
        app.theme,
    );
    frame.render_widget(dashboard, layout[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_quick_start() {
        let cli = Cli::parse_from(["keypace", "--time", "30"]);
        assert_eq!(
            cli.quick_start(),
            Some(TestConfig::WordsTimed { duration_secs: 30.0 })
        );

        let cli = Cli::parse_from(["keypace", "--words", "50"]);
        assert_eq!(
            cli.quick_start(),
            Some(TestConfig::WordsFixed { word_count: 50 })
        );

        let cli = Cli::parse_from(["keypace", "--sentence"]);
        assert_eq!(cli.quick_start(), Some(TestConfig::Sentence));

        let cli = Cli::parse_from(["keypace"]);
        assert_eq!(cli.quick_start(), None);
    }

    #[test]
    fn test_cli_rejects_zero_and_conflicts() {
        let cli = Cli::parse_from(["keypace", "--words", "0"]);
        assert_eq!(cli.quick_start(), None);
        assert!(Cli::try_parse_from(["keypace", "--sentence", "--time", "15"]).is_err());
        assert!(Cli::try_parse_from(["keypace", "--time", "15", "--words", "10"]).is_err());
    }
}
