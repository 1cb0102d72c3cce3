use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use keypace::config::Config;
use keypace::session::mode::TestConfig;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Sentence,
    Timed,
    Words,
    Stats,
    Quit,
}

const ACTIONS: [MenuAction; 5] = [
    MenuAction::Sentence,
    MenuAction::Timed,
    MenuAction::Words,
    MenuAction::Stats,
    MenuAction::Quit,
];

pub struct MenuItem {
    pub key: String,
    pub label: String,
    pub description: String,
}

pub struct Menu<'a> {
    pub selected: usize,
    durations: Vec<u32>,
    duration_idx: usize,
    word_counts: Vec<usize>,
    word_idx: usize,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(theme: &'a Theme, config: &Config) -> Self {
        Self {
            selected: 0,
            durations: config.durations.clone(),
            duration_idx: 0,
            word_counts: config.word_counts.clone(),
            word_idx: 0,
            theme,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % ACTIONS.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = ACTIONS.len() - 1;
        }
    }

    pub fn selected_action(&self) -> MenuAction {
        ACTIONS[self.selected.min(ACTIONS.len() - 1)]
    }

    /// Left/right on the timed or words row steps through its presets.
    pub fn cycle_preset(&mut self, forward: bool) {
        match self.selected_action() {
            MenuAction::Timed => {
                self.duration_idx = step(self.duration_idx, self.durations.len(), forward)
            }
            MenuAction::Words => self.word_idx = step(self.word_idx, self.word_counts.len(), forward),
            _ => {}
        }
    }

    pub fn duration(&self) -> u32 {
        self.durations.get(self.duration_idx).copied().unwrap_or(30)
    }

    pub fn word_count(&self) -> usize {
        self.word_counts.get(self.word_idx).copied().unwrap_or(25)
    }

    /// Run configuration behind an action, if it starts one.
    pub fn config_for(&self, action: MenuAction) -> Option<TestConfig> {
        match action {
            MenuAction::Sentence => Some(TestConfig::Sentence),
            MenuAction::Timed => TestConfig::timed(f64::from(self.duration())),
            MenuAction::Words => TestConfig::fixed(self.word_count()),
            MenuAction::Stats | MenuAction::Quit => None,
        }
    }

    pub fn items(&self) -> Vec<MenuItem> {
        ACTIONS
            .iter()
            .enumerate()
            .map(|(i, action)| {
                let (label, description) = match action {
                    MenuAction::Sentence => (
                        "Sentence".to_string(),
                        "Type one sentence, punctuation included".to_string(),
                    ),
                    MenuAction::Timed => (
                        format!("Timed  < {}s >", self.duration()),
                        "As many words as you can before time runs out".to_string(),
                    ),
                    MenuAction::Words => (
                        format!("Words  < {} >", self.word_count()),
                        "A fixed number of words, as fast as you can".to_string(),
                    ),
                    MenuAction::Stats => (
                        "Statistics".to_string(),
                        "Best scores, averages and recent runs".to_string(),
                    ),
                    MenuAction::Quit => ("Quit".to_string(), String::new()),
                };
                let key = match action {
                    MenuAction::Stats => "s".to_string(),
                    MenuAction::Quit => "q".to_string(),
                    _ => (i + 1).to_string(),
                };
                MenuItem {
                    key,
                    label,
                    description,
                }
            })
            .collect()
    }
}

fn step(idx: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "keypace",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Terminal Typing Test",
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
        ];

        let title = Paragraph::new(title_lines).alignment(Alignment::Center);
        title.render(layout[0], buf);

        let items = self.items();
        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(items.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
            .split(layout[2]);

        for (i, item) in items.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(" {indicator} [{key}] {label}", key = item.key, label = item.label);
            let desc_text = format!("     {}", item.description);

            let lines = vec![
                Line::from(Span::styled(
                    &*label_text,
                    Style::default()
                        .fg(if is_selected {
                            colors.accent()
                        } else {
                            colors.fg()
                        })
                        .add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                )),
                Line::from(Span::styled(
                    &*desc_text,
                    Style::default().fg(colors.text_pending()),
                )),
            ];

            let p = Paragraph::new(lines);
            if i < menu_layout.len() {
                p.render(menu_layout[i], buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(theme: &Theme) -> Menu<'_> {
        Menu::new(theme, &Config::default())
    }

    #[test]
    fn test_navigation_wraps() {
        let theme = Theme::default();
        let mut m = menu(&theme);
        m.prev();
        assert_eq!(m.selected_action(), MenuAction::Quit);
        m.next();
        assert_eq!(m.selected_action(), MenuAction::Sentence);
    }

    #[test]
    fn test_cycle_presets_on_selected_row() {
        let theme = Theme::default();
        let mut m = menu(&theme);
        m.next();
        assert_eq!(m.selected_action(), MenuAction::Timed);
        assert_eq!(m.duration(), 15);
        m.cycle_preset(true);
        assert_eq!(m.duration(), 30);
        m.cycle_preset(false);
        m.cycle_preset(false);
        assert_eq!(m.duration(), 60);
        assert_eq!(m.word_count(), 25, "words preset untouched");
    }

    #[test]
    fn test_config_for_actions() {
        let theme = Theme::default();
        let m = menu(&theme);
        assert_eq!(m.config_for(MenuAction::Sentence), Some(TestConfig::Sentence));
        assert_eq!(
            m.config_for(MenuAction::Timed),
            Some(TestConfig::WordsTimed { duration_secs: 15.0 })
        );
        assert_eq!(
            m.config_for(MenuAction::Words),
            Some(TestConfig::WordsFixed { word_count: 25 })
        );
        assert_eq!(m.config_for(MenuAction::Stats), None);
    }

    #[test]
    fn test_items_show_current_presets() {
        let theme = Theme::default();
        let m = menu(&theme);
        let items = m.items();
        assert_eq!(items.len(), 5);
        assert_eq!(items[1].label, "Timed  < 15s >");
        assert_eq!(items[3].key, "s");
    }
}
