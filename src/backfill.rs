use chrono::{Duration, NaiveDate};
use rand::Rng;
use uuid::Uuid;

use crate::models::{Activity, ActivityCategory, Student};
use crate::sdg::SDG_COUNT;

const POINTS_PER_SYNTHETIC_ACTIVITY: u32 = 250;
const SYNTHETIC_WINDOW_DAYS: i64 = 90;

pub fn needs_backfill(student: &Student) -> bool {
    student.total_points > 0 && student.completed_activities.is_empty()
}

pub fn synthetic_activity_count(total_points: u32) -> u32 {
    (total_points / POINTS_PER_SYNTHETIC_ACTIVITY).max(1)
}

/// Builds stand-in activities for a student that only carries a point total.
///
/// Categories cycle coursework, society, event. The points of the generated
/// activities always sum to `total_points`. Goals, dates and ids come from
/// `rng`, so a seeded generator reproduces the same output.
pub fn synthesize_activities<R: Rng + ?Sized>(
    student: &Student,
    rng: &mut R,
    today: NaiveDate,
) -> Vec<Activity> {
    let count = synthetic_activity_count(student.total_points);
    let base = student.total_points / count;
    let remainder = student.total_points % count;

    (0..count)
        .map(|index| {
            let category = ActivityCategory::CYCLE[(index % 3) as usize];
            let points = base + u32::from(index < remainder);
            let days_ago = rng.gen_range(0..SYNTHETIC_WINDOW_DAYS);

            Activity {
                id: Uuid::from_bytes(rng.gen::<[u8; 16]>()).to_string(),
                title: format!("{} activity {}", category.label(), index + 1),
                category,
                sdg_goals: random_goals(rng),
                points,
                date: today - Duration::days(days_ago),
            }
        })
        .collect()
}

/// Returns a copy of `student` with synthesized activities when it needs them.
pub fn backfill_student<R: Rng + ?Sized>(
    student: &Student,
    rng: &mut R,
    today: NaiveDate,
) -> Student {
    let mut filled = student.clone();
    if needs_backfill(student) {
        filled.completed_activities = synthesize_activities(student, rng, today);
    }
    filled
}

fn random_goals<R: Rng + ?Sized>(rng: &mut R) -> Vec<u8> {
    let picks = rng.gen_range(1..=2);
    let mut goals: Vec<u8> = (0..picks).map(|_| rng.gen_range(1..=SDG_COUNT)).collect();
    goals.sort_unstable();
    goals.dedup();
    goals
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn points_only_student(total_points: u32) -> Student {
        Student {
            id: "s-points".to_string(),
            name: "Points Only".to_string(),
            faculty: "Engineering".to_string(),
            total_points,
            weekly_points: None,
            monthly_points: None,
            completed_activities: Vec::new(),
            registered_events: Vec::new(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn count_follows_point_total_with_minimum_one() {
        assert_eq!(synthetic_activity_count(0), 1);
        assert_eq!(synthetic_activity_count(120), 1);
        assert_eq!(synthetic_activity_count(250), 1);
        assert_eq!(synthetic_activity_count(1010), 4);
    }

    #[test]
    fn synthesized_points_sum_to_total() {
        let student = points_only_student(1010);
        let mut rng = StdRng::seed_from_u64(7);
        let activities = synthesize_activities(&student, &mut rng, today());

        assert_eq!(activities.len(), 4);
        let sum: u32 = activities.iter().map(|a| a.points).sum();
        assert_eq!(sum, 1010);
        assert_eq!(activities[0].points, 253);
        assert_eq!(activities[3].points, 252);
    }

    #[test]
    fn categories_cycle_in_order() {
        let student = points_only_student(1250);
        let mut rng = StdRng::seed_from_u64(11);
        let categories: Vec<ActivityCategory> = synthesize_activities(&student, &mut rng, today())
            .into_iter()
            .map(|a| a.category)
            .collect();

        assert_eq!(
            categories,
            vec![
                ActivityCategory::Coursework,
                ActivityCategory::Society,
                ActivityCategory::Event,
                ActivityCategory::Coursework,
                ActivityCategory::Society,
            ]
        );
    }

    #[test]
    fn goals_and_dates_stay_in_range() {
        let student = points_only_student(5000);
        let mut rng = StdRng::seed_from_u64(3);
        for activity in synthesize_activities(&student, &mut rng, today()) {
            assert!(!activity.sdg_goals.is_empty() && activity.sdg_goals.len() <= 2);
            assert!(activity.sdg_goals.iter().all(|g| (1..=17).contains(g)));
            assert!(activity.sdg_goals.windows(2).all(|w| w[0] < w[1]));
            assert!(activity.date <= today());
            assert!(activity.date > today() - Duration::days(SYNTHETIC_WINDOW_DAYS));
        }
    }

    #[test]
    fn same_seed_reproduces_output() {
        let student = points_only_student(900);
        let first = synthesize_activities(&student, &mut StdRng::seed_from_u64(42), today());
        let second = synthesize_activities(&student, &mut StdRng::seed_from_u64(42), today());
        assert_eq!(first, second);
    }

    #[test]
    fn students_with_activities_are_left_alone() {
        let mut student = points_only_student(300);
        student.completed_activities.push(Activity {
            id: "a1".to_string(),
            title: "Beach clean-up".to_string(),
            category: ActivityCategory::Event,
            sdg_goals: vec![14],
            points: 300,
            date: today(),
        });
        let mut rng = StdRng::seed_from_u64(1);

        assert!(!needs_backfill(&student));
        assert_eq!(backfill_student(&student, &mut rng, today()), student);
        assert!(!needs_backfill(&points_only_student(0)));
    }
}
