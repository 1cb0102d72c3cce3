use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use keypace::session::result::{RunResult, ScoreEntry};
use crate::ui::theme::Theme;

/// Result screen for a finished run.
pub struct Dashboard<'a> {
    pub result: &'a RunResult,
    pub config_label: &'a str,
    /// Best score for this configuration before the run was recorded.
    pub previous_best: Option<&'a ScoreEntry>,
    pub theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(
        result: &'a RunResult,
        config_label: &'a str,
        previous_best: Option<&'a ScoreEntry>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            result,
            config_label,
            previous_best,
            theme,
        }
    }

    pub fn is_new_best(&self) -> bool {
        is_new_best(self.result, self.previous_best)
    }
}

/// A first run for a configuration counts as a new best.
pub fn is_new_best(result: &RunResult, previous_best: Option<&ScoreEntry>) -> bool {
    previous_best.is_none_or(|best| result.wpm > best.wpm)
}

/// Summary of the previous best: speed, accuracy, time and when it was set.
pub fn previous_best_text(previous_best: Option<&ScoreEntry>) -> String {
    match previous_best {
        Some(best) => format!(
            "{:.0} WPM  {:.1}%  {:.1}s  {}",
            best.wpm,
            best.accuracy,
            best.elapsed_secs,
            best.created_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
        ),
        None => "first run of this kind".to_string(),
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.config_label))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let mut title_spans = vec![Span::styled(
            "Results",
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )];
        if self.is_new_best() {
            title_spans.push(Span::styled(
                "  New best!",
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            ));
        }
        Paragraph::new(Line::from(title_spans))
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let wpm_line = Line::from(vec![
            Span::styled("  Speed:    ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{:.0} WPM", self.result.wpm),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(wpm_line).render(layout[1], buf);

        let acc_line = Line::from(vec![
            Span::styled("  Accuracy: ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{:.1}%", self.result.accuracy),
                Style::default()
                    .fg(colors.accuracy(self.result.accuracy))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "  ({}/{} correct)",
                    self.result.correct_count, self.result.typed_count
                ),
                Style::default().fg(colors.text_pending()),
            ),
        ]);
        Paragraph::new(acc_line).render(layout[2], buf);

        let time_line = Line::from(vec![
            Span::styled("  Time:     ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{:.1}s", self.result.elapsed_secs),
                Style::default().fg(colors.fg()),
            ),
        ]);
        Paragraph::new(time_line).render(layout[3], buf);

        let best_text = previous_best_text(self.previous_best);
        let best_line = Line::from(vec![
            Span::styled("  Previous: ", Style::default().fg(colors.fg())),
            Span::styled(best_text, Style::default().fg(colors.text_pending())),
        ]);
        Paragraph::new(best_line).render(layout[4], buf);

        let help = Paragraph::new(Line::from(vec![
            Span::styled("  [r/Enter] Retry  ", Style::default().fg(colors.accent())),
            Span::styled("[s] Stats  ", Style::default().fg(colors.accent())),
            Span::styled("[q/Esc] Menu", Style::default().fg(colors.accent())),
        ]));
        help.render(layout[6], buf);
    }
}
