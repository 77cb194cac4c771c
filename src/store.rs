use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fixtures;
use crate::models::{AvailableActivity, EventStatus, Feedback, RegisteredEvent, Student};

pub const DATA_ENV_VAR: &str = "SDG_TRACKER_DATA";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub activity_id: String,
    pub student_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoriteSource {
    /// Activity ids the current user has marked.
    #[serde(default)]
    pub current_user: Vec<String>,
    #[serde(default)]
    pub others: Vec<FavoriteEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub students: Vec<Student>,
    pub current_user: Student,
    pub catalog: Vec<AvailableActivity>,
    #[serde(default)]
    pub favorites: FavoriteSource,
}

/// Locally persisted edits layered over the base dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overrides {
    #[serde(default)]
    pub catalog: Option<Vec<AvailableActivity>>,
    #[serde(default)]
    pub current_user: Option<Student>,
    #[serde(default)]
    pub favorites: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct FavoriteIndex {
    by_activity: HashMap<String, BTreeSet<String>>,
}

impl FavoriteIndex {
    pub fn build(current_user_id: &str, source: &FavoriteSource) -> Self {
        let mut by_activity: HashMap<String, BTreeSet<String>> = HashMap::new();

        for activity_id in &source.current_user {
            by_activity
                .entry(activity_id.clone())
                .or_default()
                .insert(current_user_id.to_string());
        }

        for entry in &source.others {
            by_activity
                .entry(entry.activity_id.clone())
                .or_default()
                .insert(entry.student_id.clone());
        }

        Self { by_activity }
    }

    pub fn count(&self, activity_id: &str) -> usize {
        self.by_activity.get(activity_id).map_or(0, |s| s.len())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    File(PathBuf),
    Fixtures,
}

pub fn resolve_data_source(cli_path: Option<PathBuf>) -> DataSource {
    cli_path
        .or_else(|| std::env::var(DATA_ENV_VAR).ok().map(PathBuf::from))
        .map(DataSource::File)
        .unwrap_or(DataSource::Fixtures)
}

pub fn load(source: &DataSource) -> anyhow::Result<Dataset> {
    match source {
        DataSource::File(path) => load_dataset(path),
        DataSource::Fixtures => Ok(fixtures::dataset()),
    }
}

pub fn load_dataset(path: &Path) -> anyhow::Result<Dataset> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse dataset {}", path.display()))
}

pub fn save_dataset(path: &Path, dataset: &Dataset) -> anyhow::Result<()> {
    let raw = serde_json::to_string_pretty(dataset)?;
    std::fs::write(path, raw)
        .with_context(|| format!("failed to write dataset {}", path.display()))?;
    Ok(())
}

/// A missing overrides file means nothing has been edited locally.
pub fn load_overrides(path: &Path) -> anyhow::Result<Overrides> {
    if !path.exists() {
        return Ok(Overrides::default());
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read overrides {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse overrides {}", path.display()))
}

pub fn apply_overrides(dataset: &mut Dataset, overrides: Overrides) {
    if let Some(edited) = overrides.catalog {
        for entry in edited {
            match dataset.catalog.iter_mut().find(|c| c.id == entry.id) {
                Some(existing) => *existing = entry,
                None => dataset.catalog.push(entry),
            }
        }
    }

    if let Some(current_user) = overrides.current_user {
        dataset.current_user = current_user;
    }

    if let Some(favorites) = overrides.favorites {
        dataset.favorites.current_user = favorites;
    }
}

pub fn import_registrations_csv(dataset: &mut Dataset, csv_path: &Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        student_id: String,
        activity_id: String,
        status: String,
        registered_date: NaiveDate,
        attended_date: Option<NaiveDate>,
        overall_rating: Option<f64>,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let status: EventStatus = row.status.parse()?;

        let student = if dataset.current_user.id == row.student_id {
            Some(&mut dataset.current_user)
        } else {
            dataset.students.iter_mut().find(|s| s.id == row.student_id)
        };
        let Some(student) = student else {
            continue;
        };

        if student
            .registered_events
            .iter()
            .any(|r| r.activity_id == row.activity_id)
        {
            continue;
        }

        let attended_date = match status {
            EventStatus::Attended => row.attended_date,
            _ => None,
        };
        let feedback = match (status, row.overall_rating) {
            (EventStatus::Attended, Some(rating)) => Some(Feedback {
                overall_rating: rating,
                content_rating: rating,
                organization_rating: rating,
                engagement_rating: rating,
                impact_rating: rating,
                highlights: String::new(),
                improvements: String::new(),
                would_recommend: rating >= 4.0,
                submitted_date: attended_date.unwrap_or(row.registered_date),
            }),
            _ => None,
        };

        student.registered_events.push(RegisteredEvent {
            activity_id: row.activity_id,
            status,
            registered_date: row.registered_date,
            attended_date,
            feedback,
        });
        inserted += 1;
    }

    Ok(inserted)
}
