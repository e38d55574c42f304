//! Lead data source: the built-in demo dataset and the JSON lead file.
//!
//! The lead file is the hand-off point with the CRUD side. We read the whole
//! collection at startup and write the whole collection back after a stage
//! change; per-record patching is the remote service's job, not the file's.

use std::path::Path;

use leadflow_shared::{Lead, LeadflowError, Result, StageId};
use tracing::debug;

/// Built-in demo dataset, used when no lead file is configured.
pub fn sample_leads() -> Vec<Lead> {
    fn lead(
        id: &str,
        name: &str,
        company: &str,
        email: &str,
        value: f64,
        status: StageId,
    ) -> Lead {
        let mut lead = Lead::new(id, name, status);
        lead.company = Some(company.to_string());
        lead.email = Some(email.to_string());
        lead.value = Some(value);
        lead
    }

    vec![
        lead("L1", "Dana Whitfield", "Acme Corp", "dana@acme.example", 12_500.0, StageId::New),
        lead("L2", "Marcus Chen", "Globex", "m.chen@globex.example", 8_200.0, StageId::New),
        lead("L3", "Priya Nair", "Initech", "priya@initech.example", 21_000.0, StageId::Contacted),
        lead("L4", "Tom Aldridge", "Umbrella Ltd", "tom@umbrella.example", 4_750.0, StageId::Contacted),
        lead("L5", "Sofia Reyes", "Stark Industries", "sreyes@stark.example", 56_000.0, StageId::Qualified),
        lead("L6", "Jonas Weber", "Wayne Enterprises", "jweber@wayne.example", 18_300.0, StageId::Qualified),
        lead("L7", "Amara Okafor", "Tyrell Corp", "amara@tyrell.example", 32_400.0, StageId::ProposalSent),
        lead("L8", "Henrik Larsen", "Cyberdyne", "henrik@cyberdyne.example", 9_900.0, StageId::FollowUp),
        lead("L9", "Yuki Tanaka", "Soylent Co", "yuki@soylent.example", 14_100.0, StageId::FollowUp),
        lead("L10", "Claire Dubois", "Massive Dynamic", "claire@massive.example", 44_000.0, StageId::ClosedWon),
        lead("L11", "Omar Haddad", "Hooli", "omar@hooli.example", 7_600.0, StageId::ClosedLost),
    ]
}

/// Load leads from a JSON file written by [`save_leads`] or by the CRUD side.
pub fn load_leads(path: &Path) -> Result<Vec<Lead>> {
    let content = std::fs::read_to_string(path).map_err(|e| LeadflowError::io(path, e))?;

    let leads: Vec<Lead> = serde_json::from_str(&content).map_err(|e| {
        LeadflowError::data(format!("failed to parse {}: {e}", path.display()))
    })?;

    debug!(count = leads.len(), path = %path.display(), "loaded leads");
    Ok(leads)
}

/// Write the full lead collection to a JSON file.
///
/// Writes to a temp file in the target directory and renames it into place,
/// so a reader never observes a half-written collection.
pub fn save_leads<'a>(path: &Path, leads: impl IntoIterator<Item = &'a Lead>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| LeadflowError::io(parent, e))?;
        }
    }

    let leads: Vec<&Lead> = leads.into_iter().collect();
    let json = serde_json::to_string_pretty(&leads)
        .map_err(|e| LeadflowError::data(format!("failed to serialize leads: {e}")))?;

    let temp = path.with_extension("json.tmp");
    std::fs::write(&temp, json).map_err(|e| LeadflowError::io(&temp, e))?;
    std::fs::rename(&temp, path).map_err(|e| LeadflowError::io(path, e))?;

    debug!(count = leads.len(), path = %path.display(), "saved leads");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_dataset_spans_the_pipeline() {
        let leads = sample_leads();
        assert!(!leads.is_empty());

        // Ids are unique.
        let mut ids: Vec<&str> = leads.iter().map(|l| l.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), leads.len());

        // At least the working stages are populated.
        for stage in [StageId::New, StageId::Contacted, StageId::Qualified] {
            assert!(leads.iter().any(|l| l.status == stage));
        }
    }

    #[test]
    fn lead_file_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("leads.json");

        let leads = sample_leads();
        save_leads(&path, &leads).expect("save");

        let loaded = load_leads(&path).expect("load");
        assert_eq!(loaded, leads);
    }

    #[test]
    fn save_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested/dir/leads.json");

        save_leads(&path, &sample_leads()).expect("save");
        assert!(path.exists());
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("leads.json");
        std::fs::write(&path, "{ not json }").expect("write");

        let err = load_leads(&path).expect_err("should fail");
        assert!(matches!(err, LeadflowError::Data(_)));
    }

    #[test]
    fn load_reports_missing_file_as_io() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.json");

        let err = load_leads(&path).expect_err("should fail");
        assert!(matches!(err, LeadflowError::Io { .. }));
    }
}
