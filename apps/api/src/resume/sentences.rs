use unicode_segmentation::UnicodeSegmentation;

/// Sentence spans of `text` in order (UAX #29 boundaries), trimmed, blanks skipped.
/// Line breaks always end a sentence, which suits résumé layouts.
///
/// A boundary right after a dotted abbreviation or an initial ("B.S.", "Ph.D.", "J.") is
/// not a sentence end, so "Earned a B.S. Computer Science degree." stays whole.
pub fn sentences(text: &str) -> impl Iterator<Item = &str> {
    let mut spans = Vec::new();
    let mut start = None;

    for (offset, span) in text.split_sentence_bound_indices() {
        let from = *start.get_or_insert(offset);
        if ends_in_abbreviation(span) {
            continue;
        }
        spans.push(&text[from..offset + span.len()]);
        start = None;
    }
    if let Some(from) = start {
        spans.push(&text[from..]);
    }

    spans
        .into_iter()
        .map(str::trim)
        .filter(|sentence| sentence.chars().any(char::is_alphanumeric))
}

fn ends_in_abbreviation(span: &str) -> bool {
    let body = span.trim_end();
    let trailing = &span[body.len()..];
    if trailing.contains('\n') {
        return false;
    }
    // No space after the stop: the boundary fell inside a word such as "Ph.D".
    if trailing.is_empty() {
        return true;
    }

    let Some(stem) = body
        .rsplit(char::is_whitespace)
        .next()
        .and_then(|word| word.strip_suffix('.'))
    else {
        return false;
    };

    let mut chars = stem.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_uppercase(),
        (Some(_), Some(_)) => stem.contains('.'),
        _ => false,
    }
}
