use std::fmt::Write;

use chrono::NaiveDate;

use crate::analytics::AnalyticsSnapshot;
use crate::models::EventStat;

fn format_goals(goals: &[u8]) -> String {
    if goals.is_empty() {
        return "none".to_string();
    }
    goals
        .iter()
        .map(|g| format!("SDG {g}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_seats(stat: &EventStat) -> String {
    match (stat.enrolled, stat.capacity) {
        (Some(enrolled), Some(capacity)) => format!("{enrolled}/{capacity} seats"),
        (None, Some(capacity)) => format!("{capacity} seats"),
        _ => "open capacity".to_string(),
    }
}

pub fn build_report(snapshot: &AnalyticsSnapshot, generated_on: NaiveDate) -> String {
    let overview = &snapshot.overview;
    let mut output = String::new();

    let _ = writeln!(output, "# SDG Engagement Report");
    let _ = writeln!(output, "Generated on {generated_on}");
    let _ = writeln!(output);
    let _ = writeln!(output, "## Overview");
    let _ = writeln!(output, "- Students tracked: {}", overview.total_students);
    let _ = writeln!(output, "- Catalog activities: {}", overview.total_activities);
    let _ = writeln!(
        output,
        "- Points earned: {} total, {} this week, {} this month",
        overview.total_points, overview.weekly_points, overview.monthly_points
    );
    let _ = writeln!(
        output,
        "- Event registrations: {} open, {} attended",
        overview.total_registered, overview.total_attended
    );
    let _ = writeln!(
        output,
        "- Average engagement: {:.1} activities per student",
        overview.average_engagement
    );
    let _ = writeln!(output, "- Most active faculty: {}", overview.most_active_faculty);
    let _ = writeln!(output, "- Top goals: {}", overview.top_sdgs.join(", "));

    let _ = writeln!(output);
    let _ = writeln!(output, "## SDG Participation");

    let active_goals: Vec<_> = snapshot
        .sdg_stats
        .iter()
        .filter(|s| s.participants > 0)
        .collect();
    if active_goals.is_empty() {
        let _ = writeln!(output, "No SDG participation recorded.");
    } else {
        for stat in active_goals {
            let _ = writeln!(
                output,
                "- SDG {} {}: {} participants, {} activities, {} points",
                stat.goal, stat.name, stat.participants, stat.activity_count, stat.total_points
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Faculty Comparison");

    if snapshot.faculty_stats.is_empty() {
        let _ = writeln!(output, "No faculties recorded.");
    } else {
        for stat in snapshot.faculty_stats.iter() {
            let _ = writeln!(
                output,
                "- {}: {} students, {} points (avg {:.1}), {} activities (avg {:.1})",
                stat.faculty,
                stat.total_students,
                stat.total_points,
                stat.average_points,
                stat.total_activities,
                stat.average_activities
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Event Performance");

    if snapshot.event_stats.is_empty() {
        let _ = writeln!(output, "No events recorded.");
    } else {
        for stat in snapshot.event_stats.iter() {
            let _ = writeln!(
                output,
                "- {} ({}; {}; {}): {} registered, {} attended, {} cancelled, \
                 attendance {:.1}%, rating {:.1}, {} favorites",
                stat.title,
                stat.organizer,
                format_goals(&stat.sdg_goals),
                format_seats(stat),
                stat.registered,
                stat.attended,
                stat.cancelled,
                stat.attendance_rate,
                stat.average_rating,
                stat.favorite_count
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics;
    use crate::fixtures;
    use crate::models::{DashboardOverview, Student};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()
    }

    #[test]
    fn report_lists_every_section() {
        let snapshot = analytics::run(&fixtures::dataset(), &mut StdRng::seed_from_u64(5), today());
        let report = build_report(&snapshot, today());

        assert!(report.starts_with("# SDG Engagement Report"));
        assert!(report.contains("Generated on 2026-05-01"));
        assert!(report.contains("## Faculty Comparison"));
        assert!(report.contains("Student Climate Summit (Sustainability Office; SDG 13, SDG 17; 96/150 seats)"));
        assert!(report.contains("- Students tracked: 8"));
    }

    #[test]
    fn empty_snapshot_prints_placeholders() {
        let current_user = Student {
            id: "me".to_string(),
            name: "Solo".to_string(),
            faculty: "Eng".to_string(),
            total_points: 0,
            weekly_points: None,
            monthly_points: None,
            completed_activities: Vec::new(),
            registered_events: Vec::new(),
        };
        let snapshot = AnalyticsSnapshot {
            sdg_stats: analytics::compute_sdg_stats(&[], &[]),
            event_stats: Vec::new(),
            faculty_stats: Vec::new(),
            overview: DashboardOverview {
                most_active_faculty: analytics::NO_FACULTY.to_string(),
                ..analytics::compute_dashboard_overview(&[], &current_user, &[], &[], &[])
            },
        };

        let report = build_report(&snapshot, today());
        assert!(report.contains("No SDG participation recorded."));
        assert!(report.contains("No faculties recorded."));
        assert!(report.contains("No events recorded."));
        assert!(report.contains("Most active faculty: N/A"));
    }

    #[test]
    fn seats_fall_back_when_unknown() {
        let snapshot = analytics::run(&fixtures::dataset(), &mut StdRng::seed_from_u64(5), today());
        let mut stat = snapshot.event_stats[0].clone();
        stat.capacity = None;
        stat.enrolled = None;
        assert_eq!(format_seats(&stat), "open capacity");
        assert_eq!(format_goals(&[]), "none");
    }
}
