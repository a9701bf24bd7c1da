use super::Timestamp;
use crate::dto::{ItemId, MissingIdError};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawActivityLogEntry")]
pub struct ActivityLogEntry {
    pub id: ItemId,
    pub message: Option<String>,
    pub action: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawActivityLogEntry {
    #[serde(default)]
    id: Option<ItemId>,
    #[serde(default, rename = "_id")]
    legacy_id: Option<ItemId>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    created_at: Timestamp,
}

impl TryFrom<RawActivityLogEntry> for ActivityLogEntry {
    type Error = MissingIdError;

    fn try_from(raw: RawActivityLogEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.id.or(raw.legacy_id).ok_or(MissingIdError)?,
            message: raw.message,
            action: raw.action,
            created_at: raw.created_at,
        })
    }
}

impl ActivityLogEntry {
    ///
    /// Message shown in the feed. When API did not send one
    /// it is derived from action code e.g. `REVIEW_APPROVED` -> `Review approved`.
    ///
    pub fn display_message(&self) -> String {
        if let Some(message) = self.message.as_deref().filter(|m| !m.trim().is_empty()) {
            return message.to_string();
        }

        match self.action.as_deref().map(humanize_action) {
            Some(message) if !message.is_empty() => message,
            _ => "Activity".to_string(),
        }
    }
}

fn humanize_action(action: &str) -> String {
    let words = action
        .split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");

    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
