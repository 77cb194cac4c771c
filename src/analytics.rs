use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use rand::Rng;

use crate::backfill;
use crate::models::{
    Activity, ActivityCategory, ActivityRecord, AvailableActivity, DashboardOverview, EventStat,
    EventStatus, FacultyStat, RegisteredEvent, SdgStat, Student,
};
use crate::sdg;
use crate::store::{Dataset, FavoriteIndex};

pub const NO_FACULTY: &str = "N/A";
const TOP_SDG_LIMIT: usize = 3;

#[derive(Debug, Clone)]
pub struct AnalyticsSnapshot {
    pub sdg_stats: Vec<SdgStat>,
    pub event_stats: Vec<EventStat>,
    pub faculty_stats: Vec<FacultyStat>,
    pub overview: DashboardOverview,
}

/// Runs every aggregator over one dataset, sharing a single backfilled population.
pub fn run<R: Rng + ?Sized>(dataset: &Dataset, rng: &mut R, today: NaiveDate) -> AnalyticsSnapshot {
    let population = activity_population(
        &dataset.students,
        &dataset.current_user,
        &dataset.catalog,
        rng,
        today,
    );
    let registrations = all_registrations(&dataset.students, &dataset.current_user);
    let favorites = FavoriteIndex::build(&dataset.current_user.id, &dataset.favorites);

    AnalyticsSnapshot {
        sdg_stats: compute_sdg_stats(&population, &dataset.catalog),
        event_stats: compute_event_stats(&dataset.catalog, &registrations, &favorites),
        faculty_stats: compute_faculty_stats(&dataset.students, &dataset.current_user, &population),
        overview: compute_dashboard_overview(
            &dataset.students,
            &dataset.current_user,
            &dataset.catalog,
            &registrations,
            &population,
        ),
    }
}

/// Collects every completed activity: the current user's own, the current
/// user's attended events, then every other student's. Students that only
/// carry a point total are backfilled first.
pub fn activity_population<R: Rng + ?Sized>(
    students: &[Student],
    current_user: &Student,
    catalog: &[AvailableActivity],
    rng: &mut R,
    today: NaiveDate,
) -> Vec<ActivityRecord> {
    let mut merged = current_user.clone();
    merged
        .completed_activities
        .extend(attended_event_activities(current_user, catalog));
    let merged = backfill::backfill_student(&merged, rng, today);

    let mut population = owned_records(&merged);
    for student in students.iter().filter(|s| s.id != current_user.id) {
        let filled = backfill::backfill_student(student, rng, today);
        population.extend(owned_records(&filled));
    }

    population
}

fn attended_event_activities(student: &Student, catalog: &[AvailableActivity]) -> Vec<Activity> {
    let completed: HashSet<&str> = student
        .completed_activities
        .iter()
        .map(|a| a.id.as_str())
        .collect();

    student
        .registered_events
        .iter()
        .filter(|r| r.status == EventStatus::Attended)
        .filter(|r| !completed.contains(r.activity_id.as_str()))
        .filter_map(|r| {
            let entry = catalog.iter().find(|c| c.id == r.activity_id)?;
            Some(Activity {
                id: entry.id.clone(),
                title: entry.title.clone(),
                category: ActivityCategory::Event,
                sdg_goals: entry.sdg_goals.clone(),
                points: entry.points,
                date: r.attended_date.unwrap_or(entry.start_date),
            })
        })
        .collect()
}

fn owned_records(student: &Student) -> Vec<ActivityRecord> {
    student
        .completed_activities
        .iter()
        .map(|activity| ActivityRecord {
            student_id: student.id.clone(),
            faculty: student.faculty.clone(),
            activity: activity.clone(),
        })
        .collect()
}

/// Registrations of the current user followed by everyone else's.
pub fn all_registrations(students: &[Student], current_user: &Student) -> Vec<RegisteredEvent> {
    current_user
        .registered_events
        .iter()
        .chain(
            students
                .iter()
                .filter(|s| s.id != current_user.id)
                .flat_map(|s| s.registered_events.iter()),
        )
        .cloned()
        .collect()
}

pub fn compute_sdg_stats(population: &[ActivityRecord], catalog: &[AvailableActivity]) -> Vec<SdgStat> {
    let mut stats: Vec<SdgStat> = sdg::all_goals()
        .map(|goal| SdgStat {
            goal,
            name: sdg::goal_name(goal).to_string(),
            participants: 0,
            activity_count: 0,
            total_points: 0,
            faculty_breakdown: BTreeMap::new(),
        })
        .collect();

    for record in population {
        for &goal in &record.activity.sdg_goals {
            if !sdg::is_valid_goal(goal) {
                continue;
            }
            let stat = &mut stats[(goal - 1) as usize];
            stat.participants += 1;
            stat.activity_count += 1;
            stat.total_points += u64::from(record.activity.points);
            *stat.faculty_breakdown.entry(record.faculty.clone()).or_insert(0) += 1;
        }
    }

    // Catalog entries count towards activity_count on top of participation.
    for entry in catalog {
        for &goal in &entry.sdg_goals {
            if sdg::is_valid_goal(goal) {
                stats[(goal - 1) as usize].activity_count += 1;
            }
        }
    }

    stats.sort_by(|a, b| b.participants.cmp(&a.participants));
    stats
}

pub fn compute_event_stats(
    catalog: &[AvailableActivity],
    registrations: &[RegisteredEvent],
    favorites: &FavoriteIndex,
) -> Vec<EventStat> {
    let mut stats: Vec<EventStat> = Vec::new();
    let mut ratings: Vec<Vec<f64>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in catalog.iter().filter(|c| c.category == ActivityCategory::Event) {
        index.insert(entry.id.as_str(), stats.len());
        stats.push(EventStat {
            event_id: entry.id.clone(),
            title: entry.title.clone(),
            organizer: entry.organizer.clone(),
            sdg_goals: entry.sdg_goals.clone(),
            capacity: entry.capacity,
            enrolled: entry.enrolled,
            registered: 0,
            attended: 0,
            cancelled: 0,
            favorite_count: favorites.count(&entry.id),
            attendance_rate: 0.0,
            average_rating: 0.0,
        });
        ratings.push(Vec::new());
    }

    for registration in registrations {
        let Some(&slot) = index.get(registration.activity_id.as_str()) else {
            continue;
        };
        let stat = &mut stats[slot];

        match registration.status {
            EventStatus::Registered => stat.registered += 1,
            EventStatus::Cancelled => stat.cancelled += 1,
            EventStatus::Attended => {
                stat.attended += 1;
                if let Some(feedback) = &registration.feedback {
                    ratings[slot].push(feedback.overall_rating);
                }
            }
        }
    }

    for (stat, event_ratings) in stats.iter_mut().zip(ratings.iter()) {
        stat.attendance_rate = percentage(stat.attended, stat.total_registrations());
        stat.average_rating = if event_ratings.is_empty() {
            0.0
        } else {
            event_ratings.iter().sum::<f64>() / event_ratings.len() as f64
        };
    }

    stats
}

pub fn compute_faculty_stats(
    students: &[Student],
    current_user: &Student,
    population: &[ActivityRecord],
) -> Vec<FacultyStat> {
    let mut stats: Vec<FacultyStat> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut seen_ids: HashSet<&str> = HashSet::new();

    for student in std::iter::once(current_user).chain(students.iter()) {
        if !seen_ids.insert(student.id.as_str()) {
            continue;
        }

        let slot = *index.entry(student.faculty.clone()).or_insert_with(|| {
            stats.push(FacultyStat {
                faculty: student.faculty.clone(),
                total_students: 0,
                total_points: 0,
                total_activities: 0,
                average_points: 0.0,
                average_activities: 0.0,
                sdg_participation: BTreeMap::new(),
            });
            stats.len() - 1
        });
        stats[slot].total_students += 1;
    }

    for record in population {
        let Some(&slot) = index.get(&record.faculty) else {
            continue;
        };
        let stat = &mut stats[slot];
        stat.total_points += u64::from(record.activity.points);
        stat.total_activities += 1;
        for &goal in &record.activity.sdg_goals {
            *stat.sdg_participation.entry(goal).or_insert(0) += 1;
        }
    }

    for stat in stats.iter_mut() {
        stat.average_points = ratio(stat.total_points as f64, stat.total_students);
        stat.average_activities = ratio(stat.total_activities as f64, stat.total_students);
    }

    stats.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    stats
}

/// Top-level dashboard figures.
///
/// `total_students` is the bulk list length plus one for the current user,
/// whether or not the bulk list already contains them. Weekly and monthly
/// sums follow the same rule.
pub fn compute_dashboard_overview(
    students: &[Student],
    current_user: &Student,
    catalog: &[AvailableActivity],
    registrations: &[RegisteredEvent],
    population: &[ActivityRecord],
) -> DashboardOverview {
    let sdg_stats = compute_sdg_stats(population, catalog);
    let faculty_stats = compute_faculty_stats(students, current_user, population);

    let total_students = students.len() + 1;
    let everyone = || students.iter().chain(std::iter::once(current_user));
    let weekly_points: u64 = everyone()
        .map(|s| u64::from(s.weekly_points.unwrap_or(0)))
        .sum();
    let monthly_points: u64 = everyone()
        .map(|s| u64::from(s.monthly_points.unwrap_or(0)))
        .sum();

    let count_status = |status: EventStatus| {
        registrations.iter().filter(|r| r.status == status).count()
    };

    DashboardOverview {
        total_students,
        total_activities: catalog.len(),
        total_points: population
            .iter()
            .map(|r| u64::from(r.activity.points))
            .sum(),
        weekly_points,
        monthly_points,
        total_registered: count_status(EventStatus::Registered),
        total_attended: count_status(EventStatus::Attended),
        average_engagement: round_one_decimal(ratio(population.len() as f64, total_students)),
        most_active_faculty: faculty_stats
            .first()
            .map(|f| f.faculty.clone())
            .unwrap_or_else(|| NO_FACULTY.to_string()),
        top_sdgs: sdg_stats
            .iter()
            .take(TOP_SDG_LIMIT)
            .map(|s| s.name.clone())
            .collect(),
    }
}

fn ratio(numerator: f64, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / denominator as f64
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    ratio(part as f64, whole) * 100.0
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
