//! Static career catalog entries.

use serde::Serialize;

/// A career in the browsable catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Career {
    pub title: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub skills: &'static [&'static str],
    pub salary_range: &'static str,
    pub growth_rate: &'static str,
    pub work_style: &'static str,
    pub education: &'static str,
}

impl Career {
    /// Case-insensitive substring match over title, description and skills.
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .skills
                .iter()
                .any(|skill| skill.to_lowercase().contains(needle))
    }
}
