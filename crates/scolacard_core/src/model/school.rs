//! School configuration singleton.
//!
//! # Responsibility
//! - Hold the establishment identity printed on every card.
//!
//! # Invariants
//! - Exactly one `SchoolInfo` exists per roster database; it is
//!   edited in place and persisted alongside the student collection.

use serde::{Deserialize, Serialize};

/// Establishment identity shown in the card header and footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolInfo {
    /// Establishment display name, uppercased by the card header.
    pub name: String,
    /// Logo reference (URL or data URI).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Head-of-school signature image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_url: Option<String>,
    /// Official stamp image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stamp_url: Option<String>,
}

impl Default for SchoolInfo {
    /// Seed configuration used until staff edit their own.
    fn default() -> Self {
        Self {
            name: "ÉCOLE NATIONALE DU TOGO".to_string(),
            logo_url: Some("https://picsum.photos/seed/togo-logo/200/200".to_string()),
            signature_url: None,
            stamp_url: None,
        }
    }
}
