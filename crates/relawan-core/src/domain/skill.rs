//! Skill domain entity

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A volunteering competency tag, e.g. `#Evakuasi`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: i32,
    pub name: String,
}

/// Parses a comma-separated list of skill ids (`"1, 2,3"`). Surrounding
/// brackets are tolerated; duplicates are collapsed, first occurrence wins.
pub fn parse_skill_ids(raw: &str) -> Result<Vec<i32>, DomainError> {
    let raw = raw.trim().trim_start_matches('[').trim_end_matches(']').trim();
    if raw.is_empty() {
        return Err(DomainError::InvalidSkillFormat(
            "Skills must be a non-empty string of comma-separated IDs".to_string(),
        ));
    }

    let mut ids = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        let id: i32 = part.parse().map_err(|_| {
            DomainError::InvalidSkillFormat(format!(
                "'{}' is not an integer; expected a comma-separated list of integers",
                part
            ))
        })?;
        if id <= 0 {
            return Err(DomainError::InvalidSkillFormat(format!("'{}' is not a valid skill id", id)));
        }
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}
