//! Section discovery: a header alias, the rest of its line, then a body running to the next blank line.

use regex::Regex;

/// How a section body is cut into candidate items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSplit {
    /// One item per line.
    Lines,
    /// Lines, further cut on commas and bullet markers.
    Delimited,
}

impl ItemSplit {
    fn is_separator(&self, c: char) -> bool {
        match self {
            ItemSplit::Lines => c == '\n',
            ItemSplit::Delimited => matches!(c, '\n' | ',' | '•'),
        }
    }
}

/// A located section. Both slices borrow from the searched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    pub header: &'a str,
    pub body: &'a str,
}

impl<'a> Section<'a> {
    pub fn items(&self, split: ItemSplit) -> impl Iterator<Item = &'a str> + 'a {
        self.body
            .split(move |c: char| split.is_separator(c))
            .map(str::trim)
            .filter(|item| !item.is_empty())
    }
}

/// Compiles the header pattern for a set of aliases.
///
/// Case-insensitive with `.` spanning newlines: the alias, the remainder of its line,
/// then the shortest body that ends at a blank line or at the end of the text.
pub fn section_pattern(aliases: &[&str]) -> Result<Regex, regex::Error> {
    let alternation = aliases
        .iter()
        .map(|alias| regex::escape(alias))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?is)({alternation}).*?\n(.*?)(?:\n\n|\z)"))
}

/// Every non-overlapping section in `text`, left to right.
/// A header phrase may legitimately appear more than once, so callers get all of them.
pub fn locate<'a>(text: &'a str, pattern: &Regex) -> Vec<Section<'a>> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            Some(Section {
                header: caps.get(1)?.as_str(),
                body: caps.get(2)?.as_str(),
            })
        })
        .collect()
}
