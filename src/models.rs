use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Coursework,
    Society,
    Event,
}

impl ActivityCategory {
    pub const CYCLE: [ActivityCategory; 3] = [
        ActivityCategory::Coursework,
        ActivityCategory::Society,
        ActivityCategory::Event,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActivityCategory::Coursework => "Coursework",
            ActivityCategory::Society => "Society",
            ActivityCategory::Event => "Event",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Registered,
    Attended,
    Cancelled,
}

impl std::str::FromStr for EventStatus {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "registered" => Ok(EventStatus::Registered),
            "attended" => Ok(EventStatus::Attended),
            "cancelled" | "canceled" => Ok(EventStatus::Cancelled),
            other => Err(anyhow::anyhow!("unknown registration status '{other}'")),
        }
    }
}

/// A completed activity, owned by the student who performed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub category: ActivityCategory,
    #[serde(default)]
    pub sdg_goals: Vec<u8>,
    pub points: u32,
    pub date: NaiveDate,
}

/// Catalog entry students can register for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableActivity {
    pub id: String,
    pub title: String,
    pub category: ActivityCategory,
    #[serde(default)]
    pub sdg_goals: Vec<u8>,
    pub points: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub organizer: String,
    pub location: String,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub enrolled: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub overall_rating: f64,
    #[serde(default)]
    pub content_rating: f64,
    #[serde(default)]
    pub organization_rating: f64,
    #[serde(default)]
    pub engagement_rating: f64,
    #[serde(default)]
    pub impact_rating: f64,
    #[serde(default)]
    pub highlights: String,
    #[serde(default)]
    pub improvements: String,
    #[serde(default)]
    pub would_recommend: bool,
    pub submitted_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredEvent {
    pub activity_id: String,
    pub status: EventStatus,
    pub registered_date: NaiveDate,
    #[serde(default)]
    pub attended_date: Option<NaiveDate>,
    #[serde(default)]
    pub feedback: Option<Feedback>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub faculty: String,
    pub total_points: u32,
    #[serde(default)]
    pub weekly_points: Option<u32>,
    #[serde(default)]
    pub monthly_points: Option<u32>,
    #[serde(default)]
    pub completed_activities: Vec<Activity>,
    #[serde(default)]
    pub registered_events: Vec<RegisteredEvent>,
}

/// One entry of the completed-activity population, tagged with its owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRecord {
    pub student_id: String,
    pub faculty: String,
    pub activity: Activity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SdgStat {
    pub goal: u8,
    pub name: String,
    pub participants: usize,
    pub activity_count: usize,
    pub total_points: u64,
    pub faculty_breakdown: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventStat {
    pub event_id: String,
    pub title: String,
    pub organizer: String,
    pub sdg_goals: Vec<u8>,
    pub capacity: Option<u32>,
    pub enrolled: Option<u32>,
    pub registered: usize,
    pub attended: usize,
    pub cancelled: usize,
    pub favorite_count: usize,
    pub attendance_rate: f64,
    pub average_rating: f64,
}

impl EventStat {
    pub fn total_registrations(&self) -> usize {
        self.registered + self.attended + self.cancelled
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacultyStat {
    pub faculty: String,
    pub total_students: usize,
    pub total_points: u64,
    pub total_activities: usize,
    pub average_points: f64,
    pub average_activities: f64,
    pub sdg_participation: BTreeMap<u8, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOverview {
    pub total_students: usize,
    pub total_activities: usize,
    pub total_points: u64,
    pub weekly_points: u64,
    pub monthly_points: u64,
    pub total_registered: usize,
    pub total_attended: usize,
    pub average_engagement: f64,
    pub most_active_faculty: String,
    pub top_sdgs: Vec<String>,
}
