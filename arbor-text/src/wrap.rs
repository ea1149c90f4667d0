//! Greedy line wrapping

/// Width used by callers that have no preference
pub const DEFAULT_WIDTH: usize = 80;

/// Wrap `text` so no line is longer than `width` characters.
///
/// Each input line is wrapped on its own, so existing line breaks are kept.
/// Runs of whitespace collapse to a single space, words longer than `width`
/// are split across lines, and lines that are empty or whitespace only are
/// dropped. The result is joined with `\n`. A `width` of zero is treated as 1.
pub fn wrap(text: &str, width: usize) -> String {
    let width = width.max(1);
    let mut lines = Vec::new();
    for line in text.lines() {
        wrap_line(line, width, &mut lines);
    }
    lines.join("\n")
}

fn wrap_line(line: &str, width: usize, out: &mut Vec<String>) {
    let mut current = String::new();
    let mut cur_len = 0;

    for word in line.split_whitespace() {
        let word_len = word.chars().count();
        let sep = usize::from(cur_len > 0);

        if cur_len + sep + word_len <= width {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(word);
            cur_len += sep + word_len;
            continue;
        }

        if word_len <= width {
            out.push(std::mem::take(&mut current));
            current.push_str(word);
            cur_len = word_len;
            continue;
        }

        // Word longer than a whole line: top up the current line, then cut
        let mut rest = word;
        if cur_len > 0 {
            let space_left = width.saturating_sub(cur_len + 1);
            if space_left > 0 {
                let (head, tail) = split_at_char(rest, space_left);
                current.push(' ');
                current.push_str(head);
                rest = tail;
            }
            out.push(std::mem::take(&mut current));
        }
        while rest.chars().count() > width {
            let (head, tail) = split_at_char(rest, width);
            out.push(head.to_string());
            rest = tail;
        }
        current.push_str(rest);
        cur_len = rest.chars().count();
    }

    if cur_len > 0 {
        out.push(current);
    }
}

fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, ""),
    }
}
