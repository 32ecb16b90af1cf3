use std::fmt;

use serde::{Deserialize, Serialize};

/// Bucketed years of professional experience, as offered by the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "0-2")]
    Entry,
    #[serde(rename = "3-5")]
    Mid,
    #[serde(rename = "6-9")]
    Senior,
    #[serde(rename = "10+")]
    Principal,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Entry,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
        ExperienceLevel::Principal,
    ];

    /// The form value for this bucket, e.g. `"3-5"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "0-2",
            ExperienceLevel::Mid => "3-5",
            ExperienceLevel::Senior => "6-9",
            ExperienceLevel::Principal => "10+",
        }
    }

    /// Human-readable tier used inside generation prompts.
    pub fn describe(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "0-2 years (entry level)",
            ExperienceLevel::Mid => "3-5 years (mid level)",
            ExperienceLevel::Senior => "6-9 years (senior)",
            ExperienceLevel::Principal => "10+ years (staff / principal)",
        }
    }

    /// Parses a form selection. Placeholders ("", "Select...") and unknown values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|level| level.as_str() == raw)
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw profile form exactly as the candidate submitted it. Every field may be blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub experience: String,
    pub desired_position: String,
    /// Free text, comma separated: "Python, SQL, React".
    pub tech_stack: String,
}

/// A validated candidate profile. Immutable for the rest of the interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub experience: ExperienceLevel,
    pub desired_position: String,
    pub tech_stack: Vec<String>,
}

impl CandidateProfile {
    /// The declared stack re-joined for prompts.
    pub fn stack_text(&self) -> String {
        self.tech_stack.join(", ")
    }
}

/// Splits the free-text stack field on commas, trimming and dropping empty tokens.
pub fn split_tech_stack(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
