//! Core domain types for the Leadflow pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LeadflowError;

// ---------------------------------------------------------------------------
// LeadId
// ---------------------------------------------------------------------------

/// Identifier of a lead record.
///
/// Ids are assigned by the external CRUD store and treated as opaque strings
/// here (`"L1"`, `"L-1042"`, ...); the board never generates one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(pub String);

impl LeadId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LeadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // pad() keeps width specifiers working in table output.
        f.pad(&self.0)
    }
}

impl From<&str> for LeadId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for LeadId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ---------------------------------------------------------------------------
// StageId
// ---------------------------------------------------------------------------

/// The closed, ordered set of pipeline stages.
///
/// Declaration order is board order; [`StageId::ALL`] is the canonical list
/// used for rendering order and drop-target validation. A lead's `status` is
/// always one of these, which makes the single-column invariant a property of
/// the type system rather than of runtime checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageId {
    New,
    Contacted,
    Qualified,
    ProposalSent,
    FollowUp,
    ClosedWon,
    ClosedLost,
}

impl StageId {
    /// All stages in board order.
    pub const ALL: [StageId; 7] = [
        StageId::New,
        StageId::Contacted,
        StageId::Qualified,
        StageId::ProposalSent,
        StageId::FollowUp,
        StageId::ClosedWon,
        StageId::ClosedLost,
    ];

    /// The wire/serde string for this stage (kebab-case).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::ProposalSent => "proposal-sent",
            Self::FollowUp => "follow-up",
            Self::ClosedWon => "closed-won",
            Self::ClosedLost => "closed-lost",
        }
    }

    /// Zero-based position in board order.
    pub fn index(&self) -> usize {
        match self {
            Self::New => 0,
            Self::Contacted => 1,
            Self::Qualified => 2,
            Self::ProposalSent => 3,
            Self::FollowUp => 4,
            Self::ClosedWon => 5,
            Self::ClosedLost => 6,
        }
    }

    /// The next stage in board order, if any.
    pub fn next(&self) -> Option<StageId> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// The previous stage in board order, if any.
    pub fn prev(&self) -> Option<StageId> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

impl std::fmt::Display for StageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for StageId {
    type Err = LeadflowError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|stage| stage.as_str() == s)
            .copied()
            .ok_or_else(|| LeadflowError::validation(format!("unknown stage '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Lead
// ---------------------------------------------------------------------------

/// A sales lead, as exchanged with the external CRUD screens.
///
/// The board subsystem only ever rewrites `status` (and the paired
/// `updated_at`); every other field is owned by the CRUD side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Unique identifier.
    pub id: LeadId,
    /// Current pipeline stage; the sole source of column membership.
    pub status: StageId,
    /// Contact or company display name.
    pub name: String,
    /// Company, if distinct from the contact name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Estimated deal value in whole currency units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// When the lead was created (by the CRUD side).
    pub created_at: DateTime<Utc>,
    /// When the lead was last touched (CRUD edit or stage move).
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Create a lead with the given id, name, and stage; contact fields empty
    /// and timestamps set to now.
    pub fn new(id: impl Into<LeadId>, name: impl Into<String>, status: StageId) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            status,
            name: name.into(),
            company: None,
            email: None,
            phone: None,
            value: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy of this lead moved to `status`, with `updated_at` refreshed.
    pub fn with_status(&self, status: StageId) -> Self {
        let mut lead = self.clone();
        lead.status = status;
        lead.updated_at = Utc::now();
        lead
    }
}

// ---------------------------------------------------------------------------
// Money formatting
// ---------------------------------------------------------------------------

/// Format a deal value like `$12,500` for cards and table output.
pub fn format_usd(value: f64) -> String {
    let whole = value.round() as i64;
    let mut out = String::new();
    for (i, digit) in whole.abs().to_string().chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    let grouped: String = out.chars().rev().collect();
    if whole < 0 { format!("-${grouped}") } else { format!("${grouped}") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_order_is_the_board_order() {
        let ids: Vec<&str> = StageId::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "new",
                "contacted",
                "qualified",
                "proposal-sent",
                "follow-up",
                "closed-won",
                "closed-lost"
            ]
        );
    }

    #[test]
    fn stage_serde_uses_kebab_case() {
        let json = serde_json::to_string(&StageId::ProposalSent).expect("serialize");
        assert_eq!(json, "\"proposal-sent\"");

        let parsed: StageId = serde_json::from_str("\"closed-won\"").expect("deserialize");
        assert_eq!(parsed, StageId::ClosedWon);
    }

    #[test]
    fn stage_from_str_roundtrip() {
        for stage in StageId::ALL {
            let parsed: StageId = stage.as_str().parse().expect("parse stage");
            assert_eq!(parsed, stage);
        }
        assert!("archived".parse::<StageId>().is_err());
    }

    #[test]
    fn stage_neighbors_follow_board_order() {
        assert_eq!(StageId::New.prev(), None);
        assert_eq!(StageId::New.next(), Some(StageId::Contacted));
        assert_eq!(StageId::ClosedLost.next(), None);
        assert_eq!(StageId::ClosedLost.prev(), Some(StageId::ClosedWon));
    }

    #[test]
    fn lead_serialization_roundtrip() {
        let mut lead = Lead::new("L1", "Acme Corp", StageId::New);
        lead.value = Some(12_500.0);

        let json = serde_json::to_string(&lead).expect("serialize");
        // Empty contact fields are omitted entirely.
        assert!(!json.contains("company"));
        assert!(json.contains("\"status\":\"new\""));

        let parsed: Lead = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, lead);
    }

    #[test]
    fn lead_fixture_validates() {
        let fixture =
            std::fs::read_to_string("../../../fixtures/json/leads.fixture.json")
                .expect("read fixture");
        let parsed: Vec<Lead> =
            serde_json::from_str(&fixture).expect("deserialize fixture leads");
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].id.as_str(), "L1");
        assert_eq!(parsed[0].status, StageId::New);
        assert_eq!(parsed[1].value, Some(56_000.0));
        // Sparse records only carry the required fields.
        assert_eq!(parsed[2].status, StageId::FollowUp);
        assert!(parsed[2].company.is_none());
    }

    #[test]
    fn usd_formatting_groups_thousands() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(950.0), "$950");
        assert_eq!(format_usd(12_500.0), "$12,500");
        assert_eq!(format_usd(1_234_567.0), "$1,234,567");
        assert_eq!(format_usd(-4_200.0), "-$4,200");
    }
}
