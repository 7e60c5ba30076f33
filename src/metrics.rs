//! Derived metrics engine
//!
//! Pure functions over the row list: completion percentage, per-owner
//! progress, status/priority distributions, and goal pacing. Nothing here
//! mutates the plan; callers recompute after every state change. The pacing
//! calculation takes "today" as an explicit parameter so it stays
//! deterministic under test.

use chrono::NaiveDate;
use strum::IntoEnumIterator;

use crate::plan::{parse_date, Goal, Header, Row};
use crate::types::{Priority, Status};

/// Display label substituted for a blank owner field in grouping and
/// filtering.
pub const UNASSIGNED_OWNER: &str = "(unassigned)";

/// Normalized owner label for a row: trimmed, with the unassigned sentinel
/// for blank values.
pub fn owner_label(owner: &str) -> &str {
    let trimmed = owner.trim();
    if trimmed.is_empty() {
        UNASSIGNED_OWNER
    } else {
        trimmed
    }
}

/// Overall completion percentage: round(100 * done / total).
///
/// An empty list yields 0; the result is always in 0..=100.
pub fn completion_percent(rows: &[Row]) -> u8 {
    let total = rows.len().max(1);
    let done = rows.iter().filter(|r| r.status == Status::Done).count();
    ((done as f64 / total as f64) * 100.0).round() as u8
}

/// Per-owner progress entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerProgress {
    pub name: String,
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
}

/// Group rows by owner (unassigned sentinel for blanks) and compute each
/// group's completion. Groups appear in first-seen row order.
pub fn progress_by_owner(rows: &[Row]) -> Vec<OwnerProgress> {
    let mut groups: Vec<(String, usize, usize)> = Vec::new();
    for row in rows {
        let label = owner_label(&row.owner);
        let done = usize::from(row.status == Status::Done);
        match groups.iter_mut().find(|(name, _, _)| name == label) {
            Some((_, completed, total)) => {
                *completed += done;
                *total += 1;
            }
            None => groups.push((label.to_string(), done, 1)),
        }
    }
    groups
        .into_iter()
        .map(|(name, completed, total)| OwnerProgress {
            name,
            completed,
            total,
            percent: ((completed as f64 / total.max(1) as f64) * 100.0).round() as u8,
        })
        .collect()
}

/// Tally rows per status in fixed enum order, omitting zero counts.
pub fn counts_by_status(rows: &[Row]) -> Vec<(Status, usize)> {
    Status::iter()
        .map(|status| (status, rows.iter().filter(|r| r.status == status).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

/// Tally rows per priority in fixed enum order, omitting zero counts.
pub fn counts_by_priority(rows: &[Row]) -> Vec<(Priority, usize)> {
    Priority::iter()
        .map(|priority| {
            (
                priority,
                rows.iter().filter(|r| r.priority == priority).count(),
            )
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}

/// Distinct trimmed owner labels (including the unassigned sentinel) in
/// first-seen order.
pub fn unique_owners(rows: &[Row]) -> Vec<String> {
    let mut owners: Vec<String> = Vec::new();
    for row in rows {
        let label = owner_label(&row.owner);
        if !owners.iter().any(|o| o == label) {
            owners.push(label.to_string());
        }
    }
    owners
}

/// Time-based pacing window between the start date and the target date.
#[derive(Debug, Clone, PartialEq)]
pub struct PacingWindow {
    pub total_days: i64,
    pub days_elapsed: i64,
    pub days_remaining: i64,
    /// Expected completion percentage at "today" on a linear schedule.
    pub expected_today: u8,
    /// Whether actual completion meets or beats the expected percentage.
    pub on_pace: bool,
    /// Percent per day still required to hit the target by the target date.
    pub required_daily_rate: f64,
}

/// Goal pacing result. The window is absent when either date is missing or
/// invalid, or when the target date is not strictly after the start date
/// (same-day start/target intentionally yields no pacing output).
#[derive(Debug, Clone, PartialEq)]
pub struct GoalPacing {
    /// Target percentage clamped into [0, 100].
    pub target: f64,
    pub window: Option<PacingWindow>,
}

/// Compute goal pacing against a linear schedule.
///
/// `today` is clamped into the [start, target] date range before the
/// elapsed/remaining split.
pub fn goal_pacing(header: &Header, goal: &Goal, completion: u8, today: NaiveDate) -> GoalPacing {
    let target = goal.clamped_target();

    let window = match (parse_date(&header.start_date), parse_date(&goal.target_date)) {
        (Some(start), Some(end)) if end > start => {
            let total_days = (end - start).num_days();
            let clamped_today = today.clamp(start, end);
            let days_elapsed = (clamped_today - start).num_days();
            let days_remaining = (total_days - days_elapsed).max(0);
            let expected_today =
                ((days_elapsed as f64 / total_days as f64) * target).round() as u8;
            let on_pace = completion >= expected_today;
            let required_daily_rate = if days_remaining > 0 {
                ((target - f64::from(completion)) / days_remaining as f64).max(0.0)
            } else {
                0.0
            };
            Some(PacingWindow {
                total_days,
                days_elapsed,
                days_remaining,
                expected_today,
                on_pace,
                required_daily_rate,
            })
        }
        _ => None,
    };

    GoalPacing { target, window }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Plan;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn plan_with_statuses(statuses: &[Status]) -> Plan {
        let mut plan = Plan::with_blank_rows(statuses.len());
        for (row, status) in plan.rows.iter_mut().zip(statuses) {
            row.status = *status;
        }
        plan
    }

    #[test]
    fn test_completion_percent_empty_list_is_zero() {
        assert_eq!(completion_percent(&[]), 0);
    }

    #[test]
    fn test_completion_percent_two_of_five() {
        let plan = plan_with_statuses(&[
            Status::Done,
            Status::Done,
            Status::NotStarted,
            Status::InProgress,
            Status::Late,
        ]);
        assert_eq!(completion_percent(&plan.rows), 40);
    }

    #[test]
    fn test_completion_percent_rounds() {
        // 2 done of 6 rows: round(200/6) = 33
        let mut plan = plan_with_statuses(&[
            Status::Done,
            Status::Done,
            Status::NotStarted,
            Status::InProgress,
            Status::Late,
        ]);
        plan.add_row();
        assert_eq!(completion_percent(&plan.rows), 33);
    }

    #[test]
    fn test_progress_by_owner_groups_and_sentinel() {
        let mut plan = Plan::with_blank_rows(4);
        plan.rows[0].owner = "Ana".to_string();
        plan.rows[0].status = Status::Done;
        plan.rows[1].owner = " Ana ".to_string();
        plan.rows[2].owner = String::new();
        plan.rows[3].owner = "   ".to_string();

        let progress = progress_by_owner(&plan.rows);
        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0].name, "Ana");
        assert_eq!(progress[0].completed, 1);
        assert_eq!(progress[0].total, 2);
        assert_eq!(progress[0].percent, 50);
        assert_eq!(progress[1].name, UNASSIGNED_OWNER);
        assert_eq!(progress[1].total, 2);
        assert_eq!(progress[1].percent, 0);
    }

    #[test]
    fn test_counts_by_status_omits_zero_and_keeps_order() {
        let plan = plan_with_statuses(&[Status::Late, Status::Done, Status::Late]);
        let counts = counts_by_status(&plan.rows);
        assert_eq!(counts, vec![(Status::Done, 1), (Status::Late, 2)]);
    }

    #[test]
    fn test_counts_by_priority_omits_zero() {
        let mut plan = Plan::with_blank_rows(3);
        plan.rows[0].priority = Priority::High;
        let counts = counts_by_priority(&plan.rows);
        assert_eq!(counts, vec![(Priority::High, 1), (Priority::Medium, 2)]);
    }

    #[test]
    fn test_unique_owners_first_seen_order() {
        let mut plan = Plan::with_blank_rows(4);
        plan.rows[0].owner = "Bruno".to_string();
        plan.rows[1].owner = String::new();
        plan.rows[2].owner = "Ana".to_string();
        plan.rows[3].owner = "Bruno ".to_string();
        assert_eq!(
            unique_owners(&plan.rows),
            vec!["Bruno".to_string(), UNASSIGNED_OWNER.to_string(), "Ana".to_string()]
        );
    }

    fn pacing_inputs(start: &str, target_date: &str, target: f64) -> (Header, Goal) {
        let header = Header {
            start_date: start.to_string(),
            ..Header::default()
        };
        let goal = Goal {
            target_percent: target,
            target_date: target_date.to_string(),
        };
        (header, goal)
    }

    #[test]
    fn test_pacing_absent_without_dates() {
        let (header, goal) = pacing_inputs("", "", 80.0);
        let pacing = goal_pacing(&header, &goal, 40, date("2024-01-15"));
        assert_eq!(pacing.target, 80.0);
        assert!(pacing.window.is_none());
    }

    #[test]
    fn test_pacing_absent_when_target_not_after_start() {
        let (header, goal) = pacing_inputs("2024-01-31", "2024-01-01", 80.0);
        let pacing = goal_pacing(&header, &goal, 40, date("2024-01-15"));
        assert!(pacing.window.is_none());

        // Same-day start/target is excluded as well
        let (header, goal) = pacing_inputs("2024-01-01", "2024-01-01", 80.0);
        let pacing = goal_pacing(&header, &goal, 40, date("2024-01-01"));
        assert!(pacing.window.is_none());
    }

    #[test]
    fn test_pacing_midway() {
        // 30-day window, 14 days in, target 80:
        // expected = round(14/30 * 80) = 37
        let (header, goal) = pacing_inputs("2024-01-01", "2024-01-31", 80.0);
        let pacing = goal_pacing(&header, &goal, 40, date("2024-01-15"));
        let window = pacing.window.expect("window should be present");
        assert_eq!(window.total_days, 30);
        assert_eq!(window.days_elapsed, 14);
        assert_eq!(window.days_remaining, 16);
        assert_eq!(window.expected_today, 37);
        assert!(window.on_pace);
        assert!((window.required_daily_rate - (80.0 - 40.0) / 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_pacing_behind_schedule() {
        let (header, goal) = pacing_inputs("2024-01-01", "2024-01-31", 80.0);
        let pacing = goal_pacing(&header, &goal, 10, date("2024-01-21"));
        let window = pacing.window.unwrap();
        // expected = round(20/30 * 80) = 53
        assert_eq!(window.expected_today, 53);
        assert!(!window.on_pace);
    }

    #[test]
    fn test_pacing_clamps_today_into_window() {
        let (header, goal) = pacing_inputs("2024-01-01", "2024-01-31", 80.0);

        // Before the window: elapsed 0, nothing expected yet
        let before = goal_pacing(&header, &goal, 0, date("2023-12-01"));
        let window = before.window.unwrap();
        assert_eq!(window.days_elapsed, 0);
        assert_eq!(window.expected_today, 0);
        assert!(window.on_pace);

        // After the window: fully elapsed, no remaining days, zero rate
        let after = goal_pacing(&header, &goal, 50, date("2024-06-01"));
        let window = after.window.unwrap();
        assert_eq!(window.days_elapsed, 30);
        assert_eq!(window.days_remaining, 0);
        assert_eq!(window.expected_today, 80);
        assert_eq!(window.required_daily_rate, 0.0);
    }

    #[test]
    fn test_pacing_clamps_out_of_range_target() {
        let (header, goal) = pacing_inputs("2024-01-01", "2024-01-31", 250.0);
        let pacing = goal_pacing(&header, &goal, 100, date("2024-01-31"));
        assert_eq!(pacing.target, 100.0);
        assert_eq!(pacing.window.unwrap().expected_today, 100);
    }

    #[test]
    fn test_pacing_required_rate_never_negative() {
        // Already past the target percentage
        let (header, goal) = pacing_inputs("2024-01-01", "2024-01-31", 50.0);
        let pacing = goal_pacing(&header, &goal, 90, date("2024-01-15"));
        assert_eq!(pacing.window.unwrap().required_daily_rate, 0.0);
    }
}
