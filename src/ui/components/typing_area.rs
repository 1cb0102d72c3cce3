use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use keypace::engine::render::{CharState, RenderChar, RenderModel};
use crate::ui::theme::{Theme, ThemeColors};

pub struct TypingArea<'a> {
    model: &'a RenderModel,
    title: &'a str,
    /// Windowed models are already cut to width; full targets wrap here.
    wrap: bool,
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(model: &'a RenderModel, title: &'a str, wrap: bool, theme: &'a Theme) -> Self {
        Self {
            model,
            title,
            wrap,
            theme,
        }
    }
}

fn char_style(c: &RenderChar, colors: &ThemeColors) -> Style {
    if c.is_caret {
        return Style::default()
            .fg(colors.text_cursor_fg())
            .bg(colors.text_cursor_bg());
    }
    match c.state {
        CharState::Neutral => Style::default().fg(colors.text_pending()),
        CharState::Correct => Style::default().fg(colors.text_correct()),
        CharState::Incorrect => Style::default()
            .fg(colors.text_incorrect())
            .bg(colors.text_incorrect_bg())
            .add_modifier(Modifier::UNDERLINED),
    }
}

/// One styled span per character, plus a caret cell after the last line once
/// the target is fully typed.
fn build_lines(model: &RenderModel, colors: &ThemeColors) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = model
        .lines
        .iter()
        .map(|line| {
            Line::from(
                line.chars
                    .iter()
                    .map(|c| Span::styled(c.ch.to_string(), char_style(c, colors)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    if model.trailing_caret {
        let caret = Span::styled(
            " ",
            Style::default()
                .fg(colors.text_cursor_fg())
                .bg(colors.text_cursor_bg()),
        );
        match lines.last_mut() {
            Some(last) => last.spans.push(caret),
            None => lines.push(Line::from(caret)),
        }
    }
    lines
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let lines = build_lines(self.model, colors);

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        let mut paragraph = Paragraph::new(lines).block(block);
        if self.wrap {
            paragraph = paragraph.wrap(Wrap { trim: false });
        }

        paragraph.render(area, buf);
    }
}
