use serde::{Deserialize, Serialize};

use crate::resume::catalog::Category;

/// The structured result of parsing one résumé.
///
/// All six fields are always serialized, empty or not, so consumers can rely on the keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    pub education: Vec<String>,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub certifications: Vec<String>,
    pub achievements: Vec<String>,
    pub qualifications: Vec<String>,
}

impl ExtractionRecord {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Education => &self.education,
            Category::Skills => &self.skills,
            Category::Experience => &self.experience,
            Category::Certifications => &self.certifications,
            Category::Achievements => &self.achievements,
            Category::Qualifications => &self.qualifications,
        }
    }

    pub fn set(&mut self, category: Category, items: Vec<String>) {
        let slot = match category {
            Category::Education => &mut self.education,
            Category::Skills => &mut self.skills,
            Category::Experience => &mut self.experience,
            Category::Certifications => &mut self.certifications,
            Category::Achievements => &mut self.achievements,
            Category::Qualifications => &mut self.qualifications,
        };
        *slot = items;
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.get(*c).is_empty())
    }

    pub fn total_items(&self) -> usize {
        Category::ALL.iter().map(|c| self.get(*c).len()).sum()
    }
}
