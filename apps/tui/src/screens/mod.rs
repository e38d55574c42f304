//! TUI screen definitions.
//!
//! Each screen corresponds to a tab in the TUI and encapsulates its
//! own state and rendering logic.

mod courses;
mod documents;
mod leads;
mod pipeline;
mod profiles;

use std::fmt;

pub(crate) use courses::CoursesScreen;
pub(crate) use documents::DocumentsScreen;
pub(crate) use leads::LeadsScreen;
pub(crate) use pipeline::PipelineScreen;
pub(crate) use profiles::ProfilesScreen;

/// Screen identifiers, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScreenId {
    Pipeline,
    Leads,
    Documents,
    Courses,
    Profiles,
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pipeline => write!(f, "Pipeline"),
            Self::Leads => write!(f, "Leads"),
            Self::Documents => write!(f, "Documents"),
            Self::Courses => write!(f, "Courses"),
            Self::Profiles => write!(f, "Profiles"),
        }
    }
}
