//! Record kinds for the non-pipeline console screens.
//!
//! Documents, training courses, and team profiles are owned by their own
//! CRUD screens; the console only lists them. They carry no board coupling
//! and no stage field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored document with version tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub category: String,
    pub version: String,
    pub owner: String,
    pub updated_at: DateTime<Utc>,
}

/// A training course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub category: String,
    pub lessons: u32,
    pub duration_mins: u32,
    pub published: bool,
}

/// A customer- or team-member profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProfile {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: String,
    pub active: bool,
}

/// Demo documents for the documents screen.
pub fn sample_documents() -> Vec<Document> {
    fn doc(id: &str, title: &str, category: &str, version: &str, owner: &str) -> Document {
        Document {
            id: id.to_string(),
            title: title.to_string(),
            category: category.to_string(),
            version: version.to_string(),
            owner: owner.to_string(),
            updated_at: Utc::now(),
        }
    }

    vec![
        doc("D1", "Sales Playbook", "Process", "3.2", "Dana Whitfield"),
        doc("D2", "Pricing Sheet Q3", "Pricing", "1.0", "Marcus Chen"),
        doc("D3", "Onboarding Checklist", "Process", "2.1", "Priya Nair"),
        doc("D4", "Master Service Agreement", "Legal", "5.0", "Claire Dubois"),
        doc("D5", "Discovery Call Script", "Enablement", "1.4", "Sofia Reyes"),
    ]
}

/// Demo courses for the training screen.
pub fn sample_courses() -> Vec<Course> {
    fn course(
        id: &str,
        title: &str,
        category: &str,
        lessons: u32,
        duration_mins: u32,
        published: bool,
    ) -> Course {
        Course {
            id: id.to_string(),
            title: title.to_string(),
            category: category.to_string(),
            lessons,
            duration_mins,
            published,
        }
    }

    vec![
        course("C1", "Pipeline Fundamentals", "Sales", 8, 120, true),
        course("C2", "Objection Handling", "Sales", 6, 90, true),
        course("C3", "Negotiation Basics", "Sales", 10, 150, true),
        course("C4", "CRM Hygiene", "Operations", 4, 45, false),
    ]
}

/// Demo profiles for the team screen.
pub fn sample_profiles() -> Vec<TeamProfile> {
    fn profile(id: &str, name: &str, role: &str, email: &str, active: bool) -> TeamProfile {
        TeamProfile {
            id: id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            email: email.to_string(),
            active,
        }
    }

    vec![
        profile("P1", "Dana Whitfield", "Account Executive", "dana@leadflow.example", true),
        profile("P2", "Marcus Chen", "SDR", "marcus@leadflow.example", true),
        profile("P3", "Priya Nair", "Sales Manager", "priya@leadflow.example", true),
        profile("P4", "Tom Aldridge", "Solutions Engineer", "tom@leadflow.example", false),
    ]
}
