//! Drop-target resolution at gesture release.
//!
//! Resolution is point-in-region on the release position, not overlap of
//! the dragged card's box with columns. A card wider than the column gutter
//! can overlap two columns at once; the single release point cannot, so
//! the outcome is always zero or one columns and highlight state never
//! oscillates at a seam.

use leadflow_shared::StageId;

use crate::geometry::{Point, Region};

/// One column's rendered rectangle, registered by the render layer each
/// frame so hit testing matches what is on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropTarget {
    pub stage: StageId,
    pub area: Region,
}

impl DropTarget {
    pub fn new(stage: StageId, area: Region) -> Self {
        Self { stage, area }
    }
}

/// The stage whose region contains `point`, or `None` when the point lies
/// outside every registered target (released off the board). Targets are
/// scanned in the order given; first containing region wins.
pub fn resolve_stage(point: Point, targets: &[DropTarget]) -> Option<StageId> {
    targets
        .iter()
        .find(|target| target.area.contains(point))
        .map(|target| target.stage)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_strip() -> Vec<DropTarget> {
        // Seven 20-wide columns side by side.
        StageId::ALL
            .iter()
            .enumerate()
            .map(|(i, stage)| {
                DropTarget::new(*stage, Region::new(i as f32 * 20.0, 0.0, 20.0, 100.0))
            })
            .collect()
    }

    #[test]
    fn resolves_the_containing_column() {
        let targets = column_strip();
        assert_eq!(
            resolve_stage(Point::new(5.0, 50.0), &targets),
            Some(StageId::New)
        );
        assert_eq!(
            resolve_stage(Point::new(45.0, 10.0), &targets),
            Some(StageId::Qualified)
        );
        assert_eq!(
            resolve_stage(Point::new(139.0, 99.0), &targets),
            Some(StageId::ClosedLost)
        );
    }

    #[test]
    fn outside_every_column_is_none() {
        let targets = column_strip();
        assert_eq!(resolve_stage(Point::new(200.0, 50.0), &targets), None);
        assert_eq!(resolve_stage(Point::new(50.0, 120.0), &targets), None);
        assert_eq!(resolve_stage(Point::new(-1.0, 50.0), &targets), None);
    }

    #[test]
    fn column_seam_resolves_to_exactly_one() {
        let targets = column_strip();
        // x = 20 is the seam between the first two columns.
        assert_eq!(
            resolve_stage(Point::new(20.0, 50.0), &targets),
            Some(StageId::Contacted)
        );
    }

    #[test]
    fn overlapping_targets_resolve_to_the_first_in_order() {
        // Both regions contain x in [10, 20).
        let targets = vec![
            DropTarget::new(StageId::New, Region::new(0.0, 0.0, 20.0, 100.0)),
            DropTarget::new(StageId::Contacted, Region::new(10.0, 0.0, 20.0, 100.0)),
        ];
        let shared = Point::new(15.0, 50.0);
        assert_eq!(resolve_stage(shared, &targets), Some(StageId::New));

        let reversed: Vec<DropTarget> = targets.into_iter().rev().collect();
        assert_eq!(resolve_stage(shared, &reversed), Some(StageId::Contacted));
    }

    #[test]
    fn no_targets_is_none() {
        assert_eq!(resolve_stage(Point::new(5.0, 5.0), &[]), None);
    }
}
