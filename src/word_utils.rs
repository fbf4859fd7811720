use crate::paragraph::{find_inline_text_by_char_index, NodeGroupItem, StaticTextNode};

// All offsets in this module are char offsets into the text.

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || ('\u{0300}'..='\u{036f}').contains(&c)
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Word membership of `buf[idx]`. An apostrophe counts as part of a word only
/// when it sits between two word characters, as in "don't".
fn is_word_at(buf: &[char], idx: usize) -> bool {
    let c = buf[idx];
    if is_word_char(c) {
        return true;
    }
    is_apostrophe(c)
        && idx > 0
        && idx + 1 < buf.len()
        && is_word_char(buf[idx - 1])
        && is_word_char(buf[idx + 1])
}

fn is_word_start_at(buf: &[char], idx: usize) -> bool {
    is_word_at(buf, idx) && (idx == 0 || !is_word_at(buf, idx - 1))
}

fn is_word_end_at(buf: &[char], idx: usize) -> bool {
    is_word_at(buf, idx) && (idx + 1 == buf.len() || !is_word_at(buf, idx + 1))
}

fn scan_word_start(buf: &[char], from: usize) -> Option<usize> {
    (from..buf.len()).find(|&idx| is_word_start_at(buf, idx))
}

fn scan_word_end(buf: &[char], from: usize) -> Option<usize> {
    (from..buf.len())
        .find(|&idx| is_word_end_at(buf, idx))
        .map(|idx| idx + 1)
}

fn hinted_word_start(node: &StaticTextNode, start_char: usize, char_index: usize) -> Option<usize> {
    let hit = find_inline_text_by_char_index(node, char_index.saturating_sub(start_char))?;
    let base = start_char.saturating_add(hit.start_in_parent);

    let start = hit
        .child
        .word_starts
        .iter()
        .map(|start| base.saturating_add(*start))
        .find(|&start| start >= char_index)
        // Off the edge of this inline box: the next one starts a new word.
        .unwrap_or_else(|| base.saturating_add(hit.child.len()));
    Some(start)
}

fn hinted_word_end(node: &StaticTextNode, start_char: usize, char_index: usize) -> Option<usize> {
    let hit = find_inline_text_by_char_index(
        node,
        char_index.saturating_add(1).saturating_sub(start_char),
    )?;
    let base = start_char.saturating_add(hit.start_in_parent);

    hit.child
        .word_ends
        .iter()
        .map(|end| base.saturating_add(*end))
        .find(|&end| end > char_index)
}

fn word_start_in(buf: &[char], char_index: usize, group: Option<&NodeGroupItem>) -> Option<usize> {
    let char_index = char_index.min(buf.len());
    match group.and_then(|g| g.inline_text().map(|node| (node, g.start_char))) {
        Some((node, start_char)) => {
            hinted_word_start(node, start_char, char_index).map(|start| start.min(buf.len()))
        }
        None => scan_word_start(buf, char_index),
    }
}

fn word_end_in(buf: &[char], char_index: usize, group: Option<&NodeGroupItem>) -> Option<usize> {
    let char_index = char_index.min(buf.len());
    match group.and_then(|g| g.inline_text().map(|node| (node, g.start_char))) {
        Some((node, start_char)) => {
            hinted_word_end(node, start_char, char_index).map(|end| end.min(buf.len()))
        }
        None => scan_word_end(buf, char_index),
    }
}

/// Offset of the next word start at or after `char_index`.
///
/// When `group` carries inline text children, their `word_starts` hints are
/// authoritative. Otherwise `text` is scanned directly, and quotes or other
/// punctuation before a word are skipped. Returns the text length when no
/// further word starts.
pub fn next_word_start(text: &str, char_index: usize, group: Option<&NodeGroupItem>) -> usize {
    let buf: Vec<char> = text.chars().collect();
    word_start_in(&buf, char_index, group).unwrap_or(buf.len())
}

/// Offset just past the end of the next word ending after `char_index`.
///
/// The result is strictly greater than `char_index` unless `char_index` is
/// already at the end of the text.
pub fn next_word_end(text: &str, char_index: usize, group: Option<&NodeGroupItem>) -> usize {
    let buf: Vec<char> = text.chars().collect();
    word_end_in(&buf, char_index, group).unwrap_or(buf.len())
}

/// Offset of the last word start strictly before `char_index`, or 0.
pub fn previous_word_start(text: &str, char_index: usize) -> usize {
    let buf: Vec<char> = text.chars().collect();
    let char_index = char_index.min(buf.len());
    (0..char_index)
        .rev()
        .find(|&idx| is_word_start_at(&buf, idx))
        .unwrap_or(0)
}

/// Successive word starts of `text`, in increasing order.
pub fn word_starts<'a>(text: &str, group: Option<&'a NodeGroupItem>) -> WordBoundaries<'a> {
    WordBoundaries::new(text, group, Boundary::Start)
}

/// Successive word ends of `text`, in increasing order.
pub fn word_ends<'a>(text: &str, group: Option<&'a NodeGroupItem>) -> WordBoundaries<'a> {
    WordBoundaries::new(text, group, Boundary::End)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Start,
    End,
}

#[derive(Debug, Clone)]
pub struct WordBoundaries<'a> {
    buf: Vec<char>,
    group: Option<&'a NodeGroupItem>,
    boundary: Boundary,
    cursor: usize,
    done: bool,
}

impl<'a> WordBoundaries<'a> {
    fn new(text: &str, group: Option<&'a NodeGroupItem>, boundary: Boundary) -> Self {
        Self {
            buf: text.chars().collect(),
            group,
            boundary,
            cursor: 0,
            done: false,
        }
    }
}

impl Iterator for WordBoundaries<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }

        let found = match self.boundary {
            Boundary::Start => word_start_in(&self.buf, self.cursor, self.group)
                .filter(|&start| start < self.buf.len()),
            Boundary::End => word_end_in(&self.buf, self.cursor, self.group)
                .filter(|&end| end > self.cursor),
        };

        let Some(offset) = found else {
            self.done = true;
            return None;
        };

        self.cursor = match self.boundary {
            Boundary::Start => offset + 1,
            Boundary::End => offset,
        };
        if self.cursor >= self.buf.len() {
            self.done = true;
        }
        Some(offset)
    }
}
