//! Volunteer skill tags.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum skill tag length.
pub const SKILL_MAX: usize = 64;

/// Validation errors for skill tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillValidationError {
    Empty,
    TooLong { max: usize },
}

impl fmt::Display for SkillValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "skill must not be empty"),
            Self::TooLong { max } => write!(f, "skill must be at most {max} characters"),
        }
    }
}

impl std::error::Error for SkillValidationError {}

/// A single trimmed, non-empty skill tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Skill(String);

impl Skill {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, SkillValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SkillValidationError::Empty);
        }
        if trimmed.chars().count() > SKILL_MAX {
            return Err(SkillValidationError::TooLong { max: SKILL_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Skill {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Skill> for String {
    fn from(value: Skill) -> Self {
        value.0
    }
}

impl TryFrom<String> for Skill {
    type Error = SkillValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A user's skills, deduplicated and kept in lexical order.
///
/// # Examples
/// ```
/// use volunteer_hub::domain::SkillSet;
///
/// let skills = SkillSet::parse(["Teaching", " First Aid ", "Teaching"]).expect("valid skills");
/// assert_eq!(skills.names(), vec!["First Aid", "Teaching"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<Skill>);

impl SkillSet {
    /// Validate every entry, collapsing duplicates.
    pub fn parse<I, S>(raw: I) -> Result<Self, SkillValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .map(Skill::new)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Skill names in lexical order.
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|skill| skill.0.clone()).collect()
    }
}

impl FromIterator<Skill> for SkillSet {
    fn from_iter<T: IntoIterator<Item = Skill>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", SkillValidationError::Empty)]
    #[case("   ", SkillValidationError::Empty)]
    fn blank_skills_are_rejected(#[case] raw: &str, #[case] expected: SkillValidationError) {
        assert_eq!(Skill::new(raw), Err(expected));
    }

    #[rstest]
    fn overlong_skills_are_rejected() {
        let raw = "k".repeat(SKILL_MAX + 1);
        assert_eq!(
            Skill::new(raw),
            Err(SkillValidationError::TooLong { max: SKILL_MAX })
        );
    }

    #[rstest]
    fn parse_fails_on_the_first_invalid_entry() {
        let result = SkillSet::parse(["Cooking", " "]);
        assert_eq!(result, Err(SkillValidationError::Empty));
    }

    #[rstest]
    fn duplicates_collapse_after_trimming() {
        let skills = SkillSet::parse(["Cooking", "Cooking ", "Driving"]).expect("valid");
        assert_eq!(skills.len(), 2);
        assert_eq!(skills.names(), vec!["Cooking", "Driving"]);
    }

    #[rstest]
    fn serialises_as_a_sorted_list() {
        let skills = SkillSet::parse(["b", "a"]).expect("valid");
        let value = serde_json::to_value(&skills).expect("serialises");
        assert_eq!(value, serde_json::json!(["a", "b"]));
    }
}
