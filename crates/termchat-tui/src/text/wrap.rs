//! Text wrapping for styled lines.
//!
//! Break points come from `textwrap`; span styles are carried over to the
//! wrapped rows afterwards. Widths are display widths, not char counts.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use textwrap::core::Word;
use textwrap::{Options, WordSeparator, WrapAlgorithm};
use unicode_width::UnicodeWidthStr;

/// Wrap each line to fit within `width` columns, keeping span styles.
pub fn wrap_lines(lines: Vec<Line<'static>>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return lines;
    }
    lines
        .into_iter()
        .flat_map(|line| wrap_line(line, width))
        .collect()
}

/// Wrap one styled line for display.
///
/// Whitespace at a break is dropped and words wider than `width` are split.
pub fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 || line.width() <= width {
        return vec![line];
    }
    let options = Options::new(width)
        .break_words(true)
        .word_separator(WordSeparator::AsciiSpace)
        .wrap_algorithm(WrapAlgorithm::FirstFit);
    restyle(&line, options)
}

/// Wrap one line of an editable draft.
///
/// Every space takes a column of its own, so whitespace runs wrap onto
/// further rows the way they do in a textarea instead of collapsing.
pub fn wrap_draft_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 || line.width() <= width {
        return vec![line];
    }
    let options = Options::new(width)
        .break_words(true)
        .word_separator(WordSeparator::Custom(split_spaces))
        .wrap_algorithm(WrapAlgorithm::FirstFit)
        .preserve_trailing_space(true);
    restyle(&line, options)
}

/// Words and single spaces, none of them carrying trailing whitespace.
fn split_spaces(line: &str) -> Box<dyn Iterator<Item = Word<'_>> + '_> {
    let mut rest = line;
    Box::new(std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = if rest.starts_with(' ') {
            1
        } else {
            rest.find(' ').unwrap_or(rest.len())
        };
        let (word, tail) = rest.split_at(end);
        rest = tail;
        Some(Word {
            word,
            whitespace: "",
            penalty: "",
            width: word.width(),
        })
    }))
}

fn restyle(line: &Line<'static>, options: Options<'_>) -> Vec<Line<'static>> {
    let styled: Vec<(char, Style)> = line
        .spans
        .iter()
        .flat_map(|span| span.content.chars().map(move |ch| (ch, span.style)))
        .collect();
    let plain: String = styled.iter().map(|(ch, _)| ch).collect();

    let mut rows = Vec::new();
    let mut next = 0;
    for row in textwrap::wrap(&plain, options) {
        // Spaces swallowed at the previous break.
        if !row.starts_with(' ') {
            while styled.get(next).is_some_and(|(ch, _)| *ch == ' ') {
                next += 1;
            }
        }
        let end = (next + row.chars().count()).min(styled.len());
        rows.push(Line::from(merge_spans(&styled[next..end])).style(line.style));
        next = end;
    }
    rows
}

fn merge_spans(chars: &[(char, Style)]) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    for &(ch, style) in chars {
        match spans.last_mut() {
            Some(span) if span.style == style => span.content.to_mut().push(ch),
            _ => spans.push(Span::styled(ch.to_string(), style)),
        }
    }
    spans
}
