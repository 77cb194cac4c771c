use chrono::NaiveDate;

use crate::models::{
    Activity, ActivityCategory, AvailableActivity, EventStatus, Feedback, RegisteredEvent, Student,
};
use crate::store::{Dataset, FavoriteEntry, FavoriteSource};

fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).unwrap_or_default()
}

fn activity(
    id: &str,
    title: &str,
    category: ActivityCategory,
    sdg_goals: &[u8],
    points: u32,
    date: NaiveDate,
) -> Activity {
    Activity {
        id: id.to_string(),
        title: title.to_string(),
        category,
        sdg_goals: sdg_goals.to_vec(),
        points,
        date,
    }
}

fn registration(activity_id: &str, status: EventStatus, registered_date: NaiveDate) -> RegisteredEvent {
    RegisteredEvent {
        activity_id: activity_id.to_string(),
        status,
        registered_date,
        attended_date: None,
        feedback: None,
    }
}

fn attended(activity_id: &str, registered_date: NaiveDate, attended_date: NaiveDate, rating: f64) -> RegisteredEvent {
    RegisteredEvent {
        activity_id: activity_id.to_string(),
        status: EventStatus::Attended,
        registered_date,
        attended_date: Some(attended_date),
        feedback: Some(Feedback {
            overall_rating: rating,
            content_rating: rating,
            organization_rating: (rating - 0.5).max(1.0),
            engagement_rating: rating,
            impact_rating: rating,
            highlights: "Practical sessions and good speakers".to_string(),
            improvements: "More time for questions".to_string(),
            would_recommend: rating >= 4.0,
            submitted_date: attended_date,
        }),
    }
}

#[allow(clippy::too_many_arguments)]
fn student(
    id: &str,
    name: &str,
    faculty: &str,
    total_points: u32,
    weekly_points: Option<u32>,
    monthly_points: Option<u32>,
    completed_activities: Vec<Activity>,
    registered_events: Vec<RegisteredEvent>,
) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        faculty: faculty.to_string(),
        total_points,
        weekly_points,
        monthly_points,
        completed_activities,
        registered_events,
    }
}

#[allow(clippy::too_many_arguments)]
fn catalog_entry(
    id: &str,
    title: &str,
    category: ActivityCategory,
    sdg_goals: &[u8],
    points: u32,
    dates: (NaiveDate, NaiveDate),
    organizer: &str,
    location: &str,
    seats: Option<(u32, u32)>,
) -> AvailableActivity {
    AvailableActivity {
        id: id.to_string(),
        title: title.to_string(),
        category,
        sdg_goals: sdg_goals.to_vec(),
        points,
        start_date: dates.0,
        end_date: dates.1,
        organizer: organizer.to_string(),
        location: location.to_string(),
        capacity: seats.map(|(capacity, _)| capacity),
        enrolled: seats.map(|(_, enrolled)| enrolled),
    }
}

pub fn catalog() -> Vec<AvailableActivity> {
    use ActivityCategory::*;

    vec![
        catalog_entry(
            "cw-sustainable-design",
            "Sustainable Design Studio",
            Coursework,
            &[9, 11, 12],
            150,
            (day(1, 12), day(4, 30)),
            "School of Engineering",
            "Design Lab 2",
            None,
        ),
        catalog_entry(
            "soc-green-society",
            "Green Society Weekly Meetup",
            Society,
            &[13, 15],
            100,
            (day(1, 5), day(6, 30)),
            "Green Society",
            "Student Union Room 4",
            None,
        ),
        catalog_entry(
            "soc-food-bank",
            "Campus Food Bank Volunteering",
            Society,
            &[1, 2],
            120,
            (day(2, 1), day(5, 31)),
            "Community Action Society",
            "Food Bank Depot",
            Some((30, 18)),
        ),
        catalog_entry(
            "ev-climate-summit",
            "Student Climate Summit",
            Event,
            &[13, 17],
            200,
            (day(3, 14), day(3, 14)),
            "Sustainability Office",
            "Great Hall",
            Some((150, 96)),
        ),
        catalog_entry(
            "ev-ocean-talk",
            "Ocean Plastics Talk",
            Event,
            &[14],
            80,
            (day(3, 20), day(3, 20)),
            "Marine Biology Society",
            "Lecture Theatre B",
            Some((60, 41)),
        ),
        catalog_entry(
            "ev-food-drive",
            "Spring Food Drive",
            Event,
            &[2, 12],
            100,
            (day(4, 2), day(4, 3)),
            "Community Action Society",
            "Library Foyer",
            Some((80, 23)),
        ),
        catalog_entry(
            "ev-health-fair",
            "Wellbeing and Health Fair",
            Event,
            &[3],
            120,
            (day(4, 18), day(4, 18)),
            "Student Health Services",
            "Sports Centre",
            Some((200, 134)),
        ),
    ]
}

pub fn current_user() -> Student {
    use ActivityCategory::*;

    student(
        "u-current",
        "Alex Morgan",
        "Engineering",
        850,
        Some(60),
        Some(240),
        vec![
            activity("a-100", "Sustainable Design Studio", Coursework, &[9, 11], 300, day(2, 10)),
            activity("a-101", "Green Society Weekly Meetup", Society, &[13], 250, day(2, 17)),
            activity("a-102", "Campus Food Bank Volunteering", Society, &[1, 2], 100, day(3, 2)),
        ],
        vec![
            attended("ev-climate-summit", day(2, 20), day(3, 14), 5.0),
            registration("ev-ocean-talk", EventStatus::Registered, day(3, 1)),
            registration("ev-food-drive", EventStatus::Cancelled, day(3, 5)),
        ],
    )
}

pub fn students() -> Vec<Student> {
    use ActivityCategory::*;

    vec![
        student(
            "s-001",
            "Priya Shah",
            "Science",
            1200,
            Some(80),
            Some(310),
            vec![
                activity("a-200", "Ocean Plastics Talk", Event, &[14], 400, day(1, 22)),
                activity("a-201", "Green Society Weekly Meetup", Society, &[13, 15], 350, day(2, 5)),
                activity("a-202", "Water Quality Lab Report", Coursework, &[6], 450, day(2, 26)),
            ],
            vec![
                attended("ev-climate-summit", day(2, 18), day(3, 14), 4.0),
                registration("ev-ocean-talk", EventStatus::Registered, day(3, 2)),
            ],
        ),
        student(
            "s-002",
            "Daniel Okafor",
            "Business",
            640,
            Some(40),
            Some(150),
            Vec::new(),
            vec![registration("ev-food-drive", EventStatus::Registered, day(3, 10))],
        ),
        student(
            "s-003",
            "Mei Lin",
            "Arts & Humanities",
            980,
            None,
            Some(200),
            vec![
                activity("a-300", "Community Mural Project", Society, &[11, 16], 480, day(1, 30)),
                activity("a-301", "Gender and Media Essay", Coursework, &[5], 500, day(2, 21)),
            ],
            vec![attended("ev-health-fair", day(3, 20), day(4, 18), 3.5)],
        ),
        student(
            "s-004",
            "Tom Fischer",
            "Engineering",
            510,
            Some(30),
            None,
            Vec::new(),
            vec![
                registration("ev-climate-summit", EventStatus::Cancelled, day(2, 25)),
                registration("ev-health-fair", EventStatus::Registered, day(3, 28)),
            ],
        ),
        student(
            "s-005",
            "Sara Haddad",
            "Medicine",
            1500,
            Some(95),
            Some(420),
            vec![
                activity("a-500", "Wellbeing and Health Fair", Event, &[3], 700, day(1, 18)),
                activity("a-501", "Public Health Seminar Series", Coursework, &[3, 10], 800, day(2, 14)),
            ],
            vec![
                attended("ev-health-fair", day(3, 15), day(4, 18), 5.0),
                attended("ev-climate-summit", day(2, 19), day(3, 14), 4.5),
            ],
        ),
        student(
            "s-006",
            "Luca Romano",
            "Science",
            0,
            None,
            None,
            Vec::new(),
            vec![registration("ev-ocean-talk", EventStatus::Registered, day(3, 4))],
        ),
        student(
            "s-007",
            "Aisha Bello",
            "Business",
            720,
            Some(50),
            Some(190),
            vec![
                activity("a-700", "Social Enterprise Pitch", Coursework, &[8, 9], 420, day(2, 3)),
                activity("a-701", "Campus Food Bank Volunteering", Society, &[1, 2], 300, day(2, 24)),
            ],
            vec![registration("ev-food-drive", EventStatus::Registered, day(3, 9))],
        ),
    ]
}

pub fn favorites() -> FavoriteSource {
    let others = [
        ("ev-climate-summit", "s-001"),
        ("ev-climate-summit", "s-005"),
        ("ev-ocean-talk", "s-001"),
        ("ev-ocean-talk", "s-006"),
        ("ev-health-fair", "s-003"),
        ("ev-health-fair", "s-005"),
        ("ev-food-drive", "s-007"),
    ];

    FavoriteSource {
        current_user: vec!["ev-climate-summit".to_string()],
        others: others
            .into_iter()
            .map(|(activity_id, student_id)| FavoriteEntry {
                activity_id: activity_id.to_string(),
                student_id: student_id.to_string(),
            })
            .collect(),
    }
}

pub fn dataset() -> Dataset {
    Dataset {
        students: students(),
        current_user: current_user(),
        catalog: catalog(),
        favorites: favorites(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn student_ids_are_unique_and_exclude_current_user() {
        let dataset = dataset();
        let ids: HashSet<&str> = dataset.students.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), dataset.students.len());
        assert!(!ids.contains(dataset.current_user.id.as_str()));
    }

    #[test]
    fn registrations_reference_catalog_events() {
        let dataset = dataset();
        let event_ids: HashSet<&str> = dataset
            .catalog
            .iter()
            .filter(|c| c.category == ActivityCategory::Event)
            .map(|c| c.id.as_str())
            .collect();

        for student in dataset.students.iter().chain(std::iter::once(&dataset.current_user)) {
            for registration in &student.registered_events {
                assert!(event_ids.contains(registration.activity_id.as_str()));
                assert_eq!(
                    registration.attended_date.is_some(),
                    registration.status == EventStatus::Attended
                );
            }
        }
    }
}
