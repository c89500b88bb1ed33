//! Résumé categories and the patterns used to find them.
//!
//! Each category is described by a `CategorySpec`: the header phrases that open its section,
//! how a section body is cut into items, and how to search the rest of the text when the
//! résumé has no such section.
//! The specs are compiled into regexes exactly once per process (`Catalog::global`)
//! and shared read-only afterwards.

use once_cell::sync::OnceCell;
use regex::Regex;
use tracing::info;

use crate::resume::sections::{section_pattern, ItemSplit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Education,
    Skills,
    Experience,
    Certifications,
    Achievements,
    Qualifications,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Education,
        Category::Skills,
        Category::Experience,
        Category::Certifications,
        Category::Achievements,
        Category::Qualifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Education => "education",
            Category::Skills => "skills",
            Category::Experience => "experience",
            Category::Certifications => "certifications",
            Category::Achievements => "achievements",
            Category::Qualifications => "qualifications",
        }
    }
}

/// What to do when no section header is found.
#[derive(Debug, Clone, Copy)]
pub enum KeywordFallback {
    /// Search the whole text for known terms and record each matched surface form.
    KnownTerms(&'static [&'static str]),
    /// Record every sentence that contains at least one trigger keyword.
    TriggerSentences(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    /// Section lookup, then keyword fallback. Results are deduplicated.
    SectionAndKeyword(KeywordFallback),
    /// Section lookup, then a scan for dated ranges. Entries are kept as found.
    DateRangeScan,
}

#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    pub category: Category,
    pub aliases: &'static [&'static str],
    pub split: ItemSplit,
    pub strategy: Strategy,
}

// ────────────────────────────────────────────────────────────────────────────
// Keyword tables
// ────────────────────────────────────────────────────────────────────────────

const EDUCATION_KEYWORDS: &[&str] = &[
    "education",
    "academic background",
    "degree",
    "university",
    "college",
    "school",
    "b.tech",
    "b.e",
    "m.tech",
    "m.e",
    "bachelor",
    "master",
    "phd",
    "doctorate",
    "post-graduate",
    "undergraduate",
    "graduate",
];

const TECH_SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "c++",
    "c#",
    "ruby",
    "php",
    "html",
    "css",
    "react",
    "angular",
    "vue",
    "node.js",
    "express",
    "django",
    "flask",
    "spring",
    "sql",
    "nosql",
    "mongodb",
    "postgresql",
    "mysql",
    "oracle",
    "firebase",
    "aws",
    "azure",
    "gcp",
    "cloud",
    "docker",
    "kubernetes",
    "jenkins",
    "git",
    "ci/cd",
    "agile",
    "scrum",
    "machine learning",
    "data science",
    "ai",
    "nlp",
    "computer vision",
    "deep learning",
    "tensorflow",
    "pytorch",
    "keras",
    "tableau",
    "power bi",
    "data visualization",
    "excel",
    "statistics",
    "blockchain",
    "ethereum",
    "solidity",
    "smart contracts",
];

const CERTIFICATION_KEYWORDS: &[&str] = &[
    "certified",
    "certificate",
    "certification",
    "licensed",
    "accredited",
    "diploma",
];

const ACHIEVEMENT_KEYWORDS: &[&str] = &[
    "award",
    "honor",
    "achieve",
    "accomplishment",
    "recognition",
    "scholarship",
    "fellowship",
    "grant",
    "prize",
    "medal",
    "winner",
    "recipient",
    "honored",
    "recognized",
    "selected",
];

const QUALIFICATION_KEYWORDS: &[&str] = &[
    "qualified",
    "proficient",
    "license",
    "permitted",
    "authorized",
    "accredited",
    "certified",
];

/// "QUALIFICATIONS" is an education alias as well as its own category; both
/// categories pick up such a section.
pub const CATEGORY_SPECS: [CategorySpec; 6] = [
    CategorySpec {
        category: Category::Education,
        aliases: &["EDUCATION", "ACADEMIC BACKGROUND", "QUALIFICATIONS"],
        split: ItemSplit::Lines,
        strategy: Strategy::SectionAndKeyword(KeywordFallback::TriggerSentences(
            EDUCATION_KEYWORDS,
        )),
    },
    CategorySpec {
        category: Category::Skills,
        aliases: &["SKILLS", "TECHNICAL SKILLS", "TECHNOLOGIES", "COMPETENCIES"],
        split: ItemSplit::Delimited,
        strategy: Strategy::SectionAndKeyword(KeywordFallback::KnownTerms(TECH_SKILLS)),
    },
    CategorySpec {
        category: Category::Experience,
        aliases: &[
            "EXPERIENCE",
            "WORK EXPERIENCE",
            "EMPLOYMENT",
            "PROFESSIONAL EXPERIENCE",
        ],
        split: ItemSplit::Lines,
        strategy: Strategy::DateRangeScan,
    },
    CategorySpec {
        category: Category::Certifications,
        aliases: &["CERTIFICATIONS", "CERTIFICATES", "PROFESSIONAL DEVELOPMENT"],
        split: ItemSplit::Lines,
        strategy: Strategy::SectionAndKeyword(KeywordFallback::TriggerSentences(
            CERTIFICATION_KEYWORDS,
        )),
    },
    CategorySpec {
        category: Category::Achievements,
        aliases: &["ACHIEVEMENTS", "ACCOMPLISHMENTS", "AWARDS", "HONORS"],
        split: ItemSplit::Lines,
        strategy: Strategy::SectionAndKeyword(KeywordFallback::TriggerSentences(
            ACHIEVEMENT_KEYWORDS,
        )),
    },
    CategorySpec {
        category: Category::Qualifications,
        aliases: &["QUALIFICATIONS", "PROFESSIONAL QUALIFICATIONS"],
        split: ItemSplit::Lines,
        strategy: Strategy::SectionAndKeyword(KeywordFallback::TriggerSentences(
            QUALIFICATION_KEYWORDS,
        )),
    },
];

const MONTHS: &str = "Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec|January|February|March|April|June|July|August|September|October|November|December";

// ────────────────────────────────────────────────────────────────────────────
// Compiled form
// ────────────────────────────────────────────────────────────────────────────

/// A keyword compiled for whole-word, case-insensitive search.
/// Group 1 is the surface form as written in the text.
#[derive(Debug)]
pub struct Keyword {
    pub pattern: Regex,
}

impl Keyword {
    /// Word boundaries are expressed as "non-word char or text edge" on both sides,
    /// so terms that end in symbols (`c++`, `c#`) still match as whole words.
    pub fn compile(term: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r"(?i)(?:^|\W)({})(?:\W|$)",
            regex::escape(term)
        ))?;
        Ok(Keyword { pattern })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// First occurrence in `text`, as written there.
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

#[derive(Debug)]
pub struct CompiledCategory {
    pub spec: CategorySpec,
    pub section: Regex,
    pub keywords: Vec<Keyword>,
}

#[derive(Debug)]
pub struct Catalog {
    pub categories: Vec<CompiledCategory>,
    pub date_range: Regex,
}

static CATALOG: OnceCell<Catalog> = OnceCell::new();

impl Catalog {
    pub fn compile(specs: &[CategorySpec]) -> Result<Self, regex::Error> {
        let categories = specs
            .iter()
            .map(|spec| -> Result<CompiledCategory, regex::Error> {
                let keywords = match spec.strategy {
                    Strategy::SectionAndKeyword(
                        KeywordFallback::KnownTerms(terms)
                        | KeywordFallback::TriggerSentences(terms),
                    ) => terms
                        .iter()
                        .map(|term| Keyword::compile(term))
                        .collect::<Result<Vec<_>, _>>()?,
                    Strategy::DateRangeScan => Vec::new(),
                };
                Ok(CompiledCategory {
                    spec: *spec,
                    section: section_pattern(spec.aliases)?,
                    keywords,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let date_range = Regex::new(&format!(
            r"(?i)\b({MONTHS})\s+\d{{4}}\s*[-–—]\s*(({MONTHS})\s+\d{{4}}|Present|Current)"
        ))?;

        Ok(Catalog {
            categories,
            date_range,
        })
    }

    /// Process-wide catalog, compiled on first call and read-only afterwards.
    /// Call once at startup so a bad pattern stops the process before it serves traffic.
    pub fn global() -> Result<&'static Catalog, regex::Error> {
        CATALOG.get_or_try_init(|| {
            let catalog = Catalog::compile(&CATEGORY_SPECS)?;
            info!(
                "Compiled extraction catalog: {} categories, {} keywords",
                catalog.categories.len(),
                catalog
                    .categories
                    .iter()
                    .map(|c| c.keywords.len())
                    .sum::<usize>()
            );
            Ok(catalog)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_category_once() {
        let catalog = Catalog::global().unwrap();
        let categories: Vec<_> = catalog.categories.iter().map(|c| c.spec.category).collect();
        assert_eq!(categories, Category::ALL.to_vec());
    }

    #[test]
    fn test_global_catalog_is_memoized() {
        let first = Catalog::global().unwrap() as *const Catalog;
        let second = Catalog::global().unwrap() as *const Catalog;
        assert_eq!(first, second);
    }

    #[test]
    fn test_keyword_is_whole_word_and_case_insensitive() {
        let kw = Keyword::compile("java").unwrap();
        assert_eq!(kw.find("Skilled in JAVA and Go"), Some("JAVA"));
        assert!(!kw.is_match("Wrote JavaScript daily"));
    }

    #[test]
    fn test_keyword_with_symbols_matches() {
        let cpp = Keyword::compile("c++").unwrap();
        assert_eq!(cpp.find("Languages: C++, Rust"), Some("C++"));
        let node = Keyword::compile("node.js").unwrap();
        assert_eq!(node.find("node.js"), Some("node.js"));
        assert!(!node.is_match("nodexjs"));
    }

    #[test]
    fn test_date_range_pattern() {
        let catalog = Catalog::global().unwrap();
        assert!(catalog.date_range.is_match("June 2019 - Present"));
        assert!(catalog.date_range.is_match("Jan 2018 – Dec 2020"));
        assert!(catalog.date_range.is_match("september 2015—current"));
        assert!(!catalog.date_range.is_match("2019 - 2020"));
        assert!(!catalog.date_range.is_match("June 2019"));
    }

    #[test]
    fn test_category_names() {
        let names: Vec<_> = Category::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "education",
                "skills",
                "experience",
                "certifications",
                "achievements",
                "qualifications"
            ]
        );
    }
}
