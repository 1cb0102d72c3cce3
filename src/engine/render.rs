use crate::engine::window::{self, LineSpan, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharState {
    Neutral,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderChar {
    pub ch: char,
    pub index: usize,
    pub state: CharState,
    pub is_caret: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderLine {
    pub span: LineSpan,
    pub chars: Vec<RenderChar>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderModel {
    pub lines: Vec<RenderLine>,
    /// Caret drawn after the last character once the whole target is typed.
    pub trailing_caret: bool,
}

impl RenderModel {
    pub fn chars(&self) -> impl Iterator<Item = &RenderChar> {
        self.lines.iter().flat_map(|line| line.chars.iter())
    }

    pub fn caret(&self) -> Option<&RenderChar> {
        self.chars().find(|c| c.is_caret)
    }
}

pub fn classify(target: &[char], typed: &[char], index: usize) -> RenderChar {
    let ch = target[index];
    let state = match typed.get(index) {
        None => CharState::Neutral,
        Some(&t) if t == ch => CharState::Correct,
        Some(_) => CharState::Incorrect,
    };
    RenderChar {
        ch,
        index,
        state,
        is_caret: index == typed.len() && typed.len() < target.len(),
    }
}

fn trailing_caret(target: &[char], typed: &[char]) -> bool {
    !target.is_empty() && typed.len() >= target.len()
}

/// Whole target as one line; the caller wraps it for display.
pub fn render_full(target: &[char], typed: &[char]) -> RenderModel {
    let span = LineSpan {
        start: 0,
        end: target.len(),
    };
    let chars = (0..target.len())
        .map(|i| classify(target, typed, i))
        .collect();
    RenderModel {
        lines: vec![RenderLine { span, chars }],
        trailing_caret: trailing_caret(target, typed),
    }
}

/// Only the lines around the caret. Each line also carries its separating
/// space, if any, so the caret stays visible between words.
pub fn render_windowed(target: &[char], typed: &[char], viewport: Viewport) -> RenderModel {
    let lines = window::wrap_lines(target, viewport.width);
    let current = window::caret_line(&lines, typed.len());
    let range = window::visible_range(lines.len(), current, viewport.visible_lines);

    let lines = lines[range]
        .iter()
        .map(|&span| {
            let end = if span.end < target.len() && target[span.end] == ' ' {
                span.end + 1
            } else {
                span.end
            };
            let chars = (span.start..end)
                .map(|i| classify(target, typed, i))
                .collect();
            RenderLine { span, chars }
        })
        .collect();

    RenderModel {
        lines,
        trailing_caret: trailing_caret(target, typed),
    }
}
