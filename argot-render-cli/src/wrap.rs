use crate::table::visible_width;

/// Word-wraps `text` to `width` columns. The first line starts after
/// `indent` spaces, continuation lines after `indent + hanging`. A word wider
/// than the available space gets a line of its own.
pub fn wrap(text: &str, width: usize, indent: usize, hanging: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    wrap_words(&words, width, indent, hanging)
}

/// Like [`wrap`], but never breaks inside one of the given pieces.
pub fn wrap_words<S: AsRef<str>>(words: &[S], width: usize, indent: usize, hanging: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = " ".repeat(indent);
    let mut line_width = indent;
    let mut empty = true;

    for word in words {
        let word = word.as_ref();
        let word_width = visible_width(word);
        if !empty && line_width + 1 + word_width > width {
            lines.push(line);
            line = " ".repeat(indent + hanging);
            line_width = indent + hanging;
            empty = true;
        }

        if !empty {
            line.push(' ');
            line_width += 1;
        }
        line.push_str(word);
        line_width += word_width;
        empty = false;
    }

    if !empty {
        lines.push(line);
    }
    lines
}
