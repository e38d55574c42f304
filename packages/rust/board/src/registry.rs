//! The fixed pipeline-stage registry.
//!
//! The set of columns is closed and ordered. It is defined once here and
//! never mutated at runtime; everything else (rendering order, drop-target
//! validation, grouping) derives from it.

use leadflow_shared::StageId;

/// Display metadata for one pipeline column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageColumn {
    /// The stage this column represents.
    pub stage: StageId,
    /// Header title shown above the column.
    pub title: &'static str,
    /// One-line subtitle shown under the title.
    pub description: &'static str,
}

/// All pipeline columns in board order.
const COLUMNS: [StageColumn; 7] = [
    StageColumn {
        stage: StageId::New,
        title: "New",
        description: "Fresh, untouched leads",
    },
    StageColumn {
        stage: StageId::Contacted,
        title: "Contacted",
        description: "Outreach has begun",
    },
    StageColumn {
        stage: StageId::Qualified,
        title: "Qualified",
        description: "Fit and budget confirmed",
    },
    StageColumn {
        stage: StageId::ProposalSent,
        title: "Proposal Sent",
        description: "Awaiting a decision",
    },
    StageColumn {
        stage: StageId::FollowUp,
        title: "Follow Up",
        description: "Needs another touch",
    },
    StageColumn {
        stage: StageId::ClosedWon,
        title: "Closed Won",
        description: "Deal signed",
    },
    StageColumn {
        stage: StageId::ClosedLost,
        title: "Closed Lost",
        description: "Opportunity ended",
    },
];

/// Return all columns in board order.
pub fn columns() -> &'static [StageColumn] {
    &COLUMNS
}

/// Return the ordered stage ids, for rendering order and drop-target validation.
pub fn stage_ids() -> impl Iterator<Item = StageId> {
    COLUMNS.iter().map(|c| c.stage)
}

/// Look up the column for a stage.
pub fn column(stage: StageId) -> &'static StageColumn {
    // COLUMNS covers every StageId variant, checked by the exhaustiveness test.
    &COLUMNS[stage.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_cover_every_stage_in_order() {
        let ids: Vec<StageId> = stage_ids().collect();
        assert_eq!(ids, StageId::ALL.to_vec());
        for stage in StageId::ALL {
            assert_eq!(column(stage).stage, stage);
        }
    }

    #[test]
    fn column_titles() {
        assert_eq!(column(StageId::New).title, "New");
        assert_eq!(column(StageId::ProposalSent).title, "Proposal Sent");
        assert_eq!(column(StageId::ClosedLost).title, "Closed Lost");
    }
}
