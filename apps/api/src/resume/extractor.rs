//! Pulls the items of one category out of résumé text.
//!
//! Sections headed by one of the category's phrases are read first. Only a résumé with no
//! such section is searched as a whole: for known skill terms, for sentences with trigger
//! words, or for dated job entries.
//!
//! Extraction never fails. A category with nothing to report yields an empty list.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::resume::catalog::{Catalog, CompiledCategory, Keyword, KeywordFallback, Strategy};
use crate::resume::sections::locate;
use crate::resume::sentences::sentences;

/// Outcome of the section lookup for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionLookup {
    /// At least one section header matched. The items may still be empty.
    Found(Vec<String>),
    NotFound,
}

pub fn lookup_sections(text: &str, category: &CompiledCategory) -> SectionLookup {
    let sections = locate(text, &category.section);
    if sections.is_empty() {
        return SectionLookup::NotFound;
    }

    let items = sections
        .iter()
        .inspect(|section| trace!(header = section.header, "Section header matched"))
        .flat_map(|section| section.items(category.spec.split))
        .map(String::from)
        .collect();
    SectionLookup::Found(items)
}

/// Reads the sections of `category` in `text`, or searches the whole text when there are none.
pub fn extract_category(text: &str, category: &CompiledCategory, catalog: &Catalog) -> Vec<String> {
    let name = category.spec.category.as_str();

    let (source, items) = match lookup_sections(text, category) {
        SectionLookup::Found(items) => ("section", items),
        SectionLookup::NotFound => {
            let items = match category.spec.strategy {
                Strategy::SectionAndKeyword(KeywordFallback::KnownTerms(_)) => {
                    known_terms(text, &category.keywords)
                }
                Strategy::SectionAndKeyword(KeywordFallback::TriggerSentences(_)) => {
                    trigger_sentences(text, &category.keywords)
                }
                Strategy::DateRangeScan => dated_entries(text, catalog),
            };
            ("full text", items)
        }
    };

    let items = match category.spec.strategy {
        Strategy::SectionAndKeyword(_) => dedup_preserving_order(items),
        Strategy::DateRangeScan => items,
    };

    debug!(category = name, source, count = items.len(), "Category extracted");
    items
}

/// Surface form of every known term that occurs in `text`, in table order.
fn known_terms(text: &str, keywords: &[Keyword]) -> Vec<String> {
    keywords
        .iter()
        .filter_map(|kw| kw.find(text))
        .map(String::from)
        .collect()
}

/// Every sentence that contains a trigger keyword. A sentence is recorded once,
/// on its first matching keyword.
fn trigger_sentences(text: &str, keywords: &[Keyword]) -> Vec<String> {
    sentences(text)
        .filter(|sentence| keywords.iter().any(|kw| kw.is_match(sentence)))
        .map(String::from)
        .collect()
}

/// One entry per dated range: the line holding the range, then the following text
/// up to the next blank line.
fn dated_entries(text: &str, catalog: &Catalog) -> Vec<String> {
    let mut entries = Vec::new();

    for m in catalog.date_range.find_iter(text) {
        let line_start = text[..m.start()].rfind('\n').map_or(0, |i| i + 1);
        let line_end = text[m.end()..]
            .find('\n')
            .map_or(text.len(), |i| m.end() + i);

        let line = text[line_start..line_end].trim();
        if line.is_empty() {
            continue;
        }

        let rest = &text[line_end..];
        let description = rest.find("\n\n").map_or(rest, |i| &rest[..i]).trim();

        if description.is_empty() {
            entries.push(line.to_string());
        } else {
            entries.push(format!("{line}\n{description}"));
        }
    }

    entries
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
