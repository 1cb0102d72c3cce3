use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use keypace::session::mode::Mode;
use keypace::session::result::ScoreEntry;
use keypace::store::ledger::{ModeFilter, ScoreLedger, Summary};
use crate::ui::components::chart::WpmChart;
use crate::ui::theme::Theme;

pub struct StatsDashboard<'a> {
    pub ledger: &'a ScoreLedger,
    pub filter: ModeFilter,
    pub trend_limit: usize,
    pub recent_limit: usize,
    pub confirm_clear: bool,
    pub theme: &'a Theme,
}

impl<'a> StatsDashboard<'a> {
    pub fn new(
        ledger: &'a ScoreLedger,
        filter: ModeFilter,
        trend_limit: usize,
        recent_limit: usize,
        confirm_clear: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            ledger,
            filter,
            trend_limit,
            recent_limit,
            confirm_clear,
            theme,
        }
    }
}

fn config_text(entry: &ScoreEntry) -> String {
    match entry.config() {
        Some(config) => config.label(),
        None => entry.mode.as_str().to_string(),
    }
}

impl Widget for StatsDashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Statistics ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(self.recent_limit.min(10) as u16 + 4),
                Constraint::Length(1),
            ])
            .split(inner);

        let filters = [
            ModeFilter::All,
            ModeFilter::Only(Mode::Sentence),
            ModeFilter::Only(Mode::Words),
        ];
        let tab_spans: Vec<Span> = filters
            .iter()
            .flat_map(|&f| {
                let style = if f == self.filter {
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(colors.text_pending())
                };
                vec![Span::styled(format!(" {} ", f.label()), style), Span::raw("  ")]
            })
            .collect();
        Paragraph::new(Line::from(tab_spans)).render(layout[0], buf);

        let summary = self.ledger.summary(self.filter);
        if summary.count == 0 {
            Paragraph::new(Line::from(Span::styled(
                "  No runs recorded yet. Start typing!",
                Style::default().fg(colors.text_pending()),
            )))
            .render(layout[1], buf);
        } else {
            self.render_summary(&summary, layout[1], buf);
            let trend = self.ledger.trend(self.filter, self.trend_limit);
            WpmChart::new(&trend, self.theme).render(layout[2], buf);
            self.render_recent(layout[3], buf);
        }

        let footer = Paragraph::new(Line::from(Span::styled(
            "  [Esc/q] Back  [Tab] Filter  [x] Clear history",
            Style::default().fg(colors.accent()),
        )));
        footer.render(layout[4], buf);

        if self.confirm_clear {
            let dialog_width = 40u16.min(area.width);
            let dialog_height = 5u16.min(area.height);
            let dialog_x = area.x + area.width.saturating_sub(dialog_width) / 2;
            let dialog_y = area.y + area.height.saturating_sub(dialog_height) / 2;
            let dialog_area = Rect::new(dialog_x, dialog_y, dialog_width, dialog_height);

            Clear.render(dialog_area, buf);
            let dialog = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("  Delete all {} runs? (y/n)  ", self.ledger.len()),
                    Style::default().fg(colors.fg()),
                )),
            ])
            .style(Style::default().bg(colors.bg()))
            .block(
                Block::bordered()
                    .title(" Confirm ")
                    .border_style(Style::default().fg(colors.error()))
                    .style(Style::default().bg(colors.bg())),
            );
            dialog.render(dialog_area, buf);
        }
    }
}

impl StatsDashboard<'_> {
    fn render_summary(&self, summary: &Summary, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let value = Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD);

        let lines = vec![Line::from(vec![
            Span::styled("  Runs: ", Style::default().fg(colors.fg())),
            Span::styled(summary.count.to_string(), value),
            Span::styled("   Avg WPM: ", Style::default().fg(colors.fg())),
            Span::styled(format!("{:.1}", summary.avg_wpm), value),
            Span::styled("   Best WPM: ", Style::default().fg(colors.fg())),
            Span::styled(format!("{:.1}", summary.max_wpm), value),
            Span::styled("   Avg Acc: ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{:.1}%", summary.avg_accuracy),
                Style::default()
                    .fg(colors.accuracy(summary.avg_accuracy))
                    .add_modifier(Modifier::BOLD),
            ),
        ])];

        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title(" Summary ")
                    .border_style(Style::default().fg(colors.border())),
            )
            .render(area, buf);
    }

    fn render_recent(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let table_block = Block::bordered()
            .title(Line::from(Span::styled(
                " Recent Runs ",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )))
            .border_style(Style::default().fg(colors.border()));
        let table_inner = table_block.inner(area);
        table_block.render(area, buf);

        let header = Line::from(vec![Span::styled(
            "     WPM    Acc%    Time  Date         Test",
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )]);
        let mut lines = vec![header];

        let rows = table_inner.height.saturating_sub(1) as usize;
        for entry in self
            .ledger
            .recent(self.filter, self.recent_limit)
            .into_iter()
            .take(rows)
        {
            let date_str = entry
                .created_at
                .with_timezone(&chrono::Local)
                .format("%m/%d %H:%M")
                .to_string();
            let row = format!(
                "  {wpm:>6.0}  {acc:>6.1}%  {time:>5.1}s  {date_str}  {test}",
                wpm = entry.wpm,
                acc = entry.accuracy,
                time = entry.elapsed_secs,
                test = config_text(entry),
            );
            lines.push(Line::from(Span::styled(
                row,
                Style::default().fg(colors.accuracy(entry.accuracy)),
            )));
        }

        Paragraph::new(lines).render(table_inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use keypace::session::mode::TestConfig;
    use keypace::session::result::RunResult;

    fn entry(config: TestConfig, wpm: f64) -> ScoreEntry {
        let mut r = RunResult::from_run(&config, &['a'], &['a'], 1.0);
        r.wpm = wpm;
        ScoreEntry::from_result(r, Utc::now())
    }

    #[test]
    fn test_config_text_uses_label() {
        let e = entry(TestConfig::WordsFixed { word_count: 50 }, 10.0);
        assert_eq!(config_text(&e), "Words · 50");
    }

    #[test]
    fn test_renders_empty_and_populated_ledger() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 100, 40);

        let empty = ScoreLedger::in_memory();
        let mut buf = Buffer::empty(area);
        StatsDashboard::new(&empty, ModeFilter::All, 50, 20, false, &theme).render(area, &mut buf);

        let mut ledger = ScoreLedger::in_memory();
        ledger.append(entry(TestConfig::Sentence, 42.0));
        ledger.append(entry(TestConfig::WordsTimed { duration_secs: 30.0 }, 55.0));
        let mut buf = Buffer::empty(area);
        StatsDashboard::new(&ledger, ModeFilter::All, 50, 20, true, &theme).render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Delete all 2 runs?"));
    }
}
