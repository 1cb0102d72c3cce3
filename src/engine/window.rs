use std::ops::Range;

/// Half-open `[start, end)` range of character indices into the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Width budget and line count of the scrolling region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub visible_lines: usize,
}

impl Viewport {
    /// Even line counts are rounded up so the caret line can sit in the middle.
    pub fn new(width: usize, visible_lines: usize) -> Self {
        let visible_lines = visible_lines.max(1);
        let visible_lines = if visible_lines % 2 == 0 {
            visible_lines + 1
        } else {
            visible_lines
        };
        Self {
            width: width.max(1),
            visible_lines,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(60, 3)
    }
}

/// Splits on every single space, so runs of spaces yield empty words.
pub fn word_spans(target: &[char]) -> Vec<LineSpan> {
    let mut spans = Vec::new();
    let mut start = 0;
    for (i, &ch) in target.iter().enumerate() {
        if ch == ' ' {
            spans.push(LineSpan { start, end: i });
            start = i + 1;
        }
    }
    spans.push(LineSpan {
        start,
        end: target.len(),
    });
    spans
}

/// Greedy word packing. A line only exceeds `width` when a single word does.
pub fn wrap_lines(target: &[char], width: usize) -> Vec<LineSpan> {
    let words = word_spans(target);
    let mut lines = Vec::new();
    let mut current = words[0];

    for word in &words[1..] {
        if word.end - current.start > width {
            lines.push(current);
            current = *word;
        } else {
            current.end = word.end;
        }
    }
    lines.push(current);
    lines
}

/// The caret may sit on a line's separating space (index `end`) and still
/// belong to it. A caret beyond all content belongs to the last line.
pub fn caret_line(lines: &[LineSpan], caret: usize) -> usize {
    lines
        .iter()
        .position(|line| caret <= line.end)
        .unwrap_or_else(|| lines.len().saturating_sub(1))
}

/// Window of `visible` lines centered on `caret_line`, shifted back near the end.
pub fn visible_range(line_count: usize, caret_line: usize, visible: usize) -> Range<usize> {
    let mut first = caret_line.saturating_sub(visible / 2);
    if first + visible > line_count {
        first = line_count.saturating_sub(visible);
    }
    first..(first + visible).min(line_count)
}
