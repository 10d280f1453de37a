//! Drag Session Configuration

use serde::{Deserialize, Serialize};

use crate::domain::DomainResult;

/// What an explicit cancel does with group changes made while hovering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CancelPolicy {
    /// Restore the membership the option had when the drag started
    #[default]
    Rollback,
    /// Keep the membership of the last hovered zone
    KeepPreview,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DragConfig {
    pub cancel_policy: CancelPolicy,
    /// Apply group changes while hovering instead of on drop
    pub eager_preview: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            cancel_policy: CancelPolicy::Rollback,
            eager_preview: true,
        }
    }
}

impl DragConfig {
    pub fn from_json(json: &str) -> DomainResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = DragConfig::from_json("{}").unwrap();
        assert_eq!(config, DragConfig::default());
    }

    #[test]
    fn test_parse_config() {
        let config =
            DragConfig::from_json(r#"{"cancelPolicy": "keepPreview", "eagerPreview": false}"#)
                .unwrap();
        assert_eq!(config.cancel_policy, CancelPolicy::KeepPreview);
        assert!(!config.eager_preview);
    }
}
