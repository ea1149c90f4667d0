//! Padding helpers: spaces around delimiters, banner strings

/// Characters that count as existing padding for [`pad_around`]
pub const DEFAULT_WHITESPACE: &str = " \t";

/// Put `pad_char` on both sides of every occurrence of each character in
/// `targets`.
///
/// A side is left alone when it is the start or end of the string, or when
/// the neighbouring character is already in `whitespace`. Repeated target
/// characters are handled once.
pub fn pad_around(text: &str, targets: &str, whitespace: &str, pad_char: char) -> String {
    let mut chars: Vec<char> = text.chars().collect();

    let mut seen: Vec<char> = Vec::new();
    for target in targets.chars() {
        if seen.contains(&target) {
            continue;
        }
        seen.push(target);

        let mut i = 0;
        while i < chars.len() {
            if chars[i] != target {
                i += 1;
                continue;
            }

            let pad_before = i > 0 && !whitespace.contains(chars[i - 1]);
            let pad_after = i + 1 < chars.len() && !whitespace.contains(chars[i + 1]);

            if pad_after {
                chars.insert(i + 1, pad_char);
            }
            if pad_before {
                chars.insert(i, pad_char);
                i += 1;
            }
            // skip the target and any pad just inserted after it
            i += 1 + usize::from(pad_after);
        }
    }

    chars.into_iter().collect()
}

/// Grow `text` to `width` characters with `border`.
///
/// With `pad`, one space goes on each side of `text` first. Border characters
/// are then added alternately in front and behind, front first, until the
/// width is reached. Text already at or beyond `width` only gets the padding.
pub fn banner(text: &str, width: usize, border: char, pad: bool) -> String {
    let core = if pad {
        format!(" {} ", text)
    } else {
        text.to_string()
    };

    let len = core.chars().count();
    let missing = width.saturating_sub(len);
    let front = missing.div_ceil(2);
    let back = missing / 2;

    let mut out = String::with_capacity(core.len() + missing * border.len_utf8());
    out.extend(std::iter::repeat(border).take(front));
    out.push_str(&core);
    out.extend(std::iter::repeat(border).take(back));
    out
}
