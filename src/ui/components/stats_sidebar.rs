use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use keypace::engine::LiveMetrics;
use keypace::session::result::ScoreEntry;
use crate::ui::theme::Theme;

pub struct StatsSidebar<'a> {
    metrics: &'a LiveMetrics,
    best: Option<&'a ScoreEntry>,
    theme: &'a Theme,
}

impl<'a> StatsSidebar<'a> {
    pub fn new(metrics: &'a LiveMetrics, best: Option<&'a ScoreEntry>, theme: &'a Theme) -> Self {
        Self {
            metrics,
            best,
            theme,
        }
    }
}

/// Seconds as `m:ss`, rounding a countdown up so it never shows 0:00 early.
pub fn format_clock(secs: f64, round_up: bool) -> String {
    let secs = secs.max(0.0);
    let whole = (if round_up { secs.ceil() } else { secs.floor() }) as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

impl Widget for StatsSidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let m = self.metrics;

        let label = |text: &'static str| Span::styled(text, Style::default().fg(colors.fg()));

        let mut lines = vec![
            Line::from(vec![
                label("WPM:      "),
                Span::styled(
                    format!("{:.0}", m.wpm),
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                label("Accuracy: "),
                Span::styled(
                    format!("{:.1}%", m.accuracy),
                    Style::default().fg(colors.accuracy(m.accuracy)),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                label("Time:     "),
                Span::styled(
                    format_clock(m.elapsed_secs, false),
                    Style::default().fg(colors.fg()),
                ),
            ]),
        ];

        if let Some(remaining) = m.remaining_secs {
            let color = if remaining <= 5.0 {
                colors.warning()
            } else {
                colors.fg()
            };
            lines.push(Line::from(vec![
                label("Left:     "),
                Span::styled(
                    format_clock(remaining, true),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            label("Correct:  "),
            Span::styled(
                format!("{}/{}", m.correct_count, m.typed_count),
                Style::default().fg(colors.success()),
            ),
        ]));

        lines.push(Line::from(""));
        let best_text = match self.best {
            Some(best) => format!("{:.0} WPM  {:.1}%", best.wpm, best.accuracy),
            None => "none yet".to_string(),
        };
        lines.push(Line::from(vec![
            label("Best:     "),
            Span::styled(best_text, Style::default().fg(colors.text_pending())),
        ]));

        let block = Block::bordered()
            .title(" Stats ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
