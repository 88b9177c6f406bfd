//! Draft storage key conventions.
//!
//! Pure string functions with no storage dependency. These define the canonical
//! names under which in-progress assessments are kept in a key/value store.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::condition::Condition;

pub const DRAFT_PREFIX: &str = "sehati:assessment:draft:";

const TAG_PREFIX: &str = "anon-";

pub fn draft(condition: Condition) -> String {
    format!("{DRAFT_PREFIX}{condition}")
}

pub fn tagged_draft(condition: Condition, tag: &AnonymousTag) -> String {
    format!("{DRAFT_PREFIX}{condition}:{tag}")
}

/// Pseudo-anonymous per-browser identifier used to salt draft keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AnonymousTag(String);

impl AnonymousTag {
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(format!("{TAG_PREFIX}{}", &hex[..12]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AnonymousTag {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let valid = value
            .strip_prefix(TAG_PREFIX)
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric()));
        if valid {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidTag(value))
        }
    }
}

impl From<AnonymousTag> for String {
    fn from(tag: AnonymousTag) -> Self {
        tag.0
    }
}

impl fmt::Display for AnonymousTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one stored draft: always scoped to a condition, optionally
/// salted with an anonymous tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DraftKey {
    pub condition: Condition,
    pub tag: Option<AnonymousTag>,
}

impl DraftKey {
    pub fn new(condition: Condition) -> Self {
        Self { condition, tag: None }
    }

    pub fn tagged(condition: Condition, tag: AnonymousTag) -> Self {
        Self {
            condition,
            tag: Some(tag),
        }
    }

    pub fn storage_key(&self) -> String {
        match &self.tag {
            Some(tag) => tagged_draft(self.condition, tag),
            None => draft(self.condition),
        }
    }
}

impl fmt::Display for DraftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}
