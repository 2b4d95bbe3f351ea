//! Dashboard aggregates over ledger collections.

use serde::Serialize;

use crate::records::{AttendanceRecord, Badge, Event, EventStatus};

/// Number of events shown in the recent check-ins chart.
const RECENT_EVENTS: usize = 6;

/// Characters kept from an event name in the recent chart.
const SHORT_NAME_LEN: usize = 10;

/// Attendance score counts this many records as 100%.
const SCORE_FULL_AT: u64 = 10;

/// Longest streak reported.
const MAX_STREAK: usize = 7;

/// Event counts per lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    /// Active events.
    pub active: usize,
    /// Upcoming events.
    pub upcoming: usize,
    /// Expired events.
    pub expired: usize,
}

/// One bar of the recent check-ins chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentEvent {
    /// Event name cut to ten characters.
    pub name: String,
    /// Check-ins recorded for the event.
    pub check_ins: u32,
}

/// Instructor dashboard figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructorSummary {
    /// Number of events.
    pub total_events: usize,
    /// Number of active events.
    pub active_events: usize,
    /// Check-ins across all events.
    pub total_check_ins: u64,
    /// Check-ins over enrolment, as a rounded percentage.
    pub average_attendance_pct: u32,
    /// Events per status.
    pub by_status: StatusBreakdown,
    /// The last six events.
    pub recent: Vec<RecentEvent>,
}

impl InstructorSummary {
    /// Summarize `events`.
    #[must_use]
    pub fn from_events(events: &[Event]) -> Self {
        let mut by_status = StatusBreakdown::default();
        for event in events {
            match event.status {
                EventStatus::Active => by_status.active += 1,
                EventStatus::Upcoming => by_status.upcoming += 1,
                EventStatus::Expired => by_status.expired += 1,
            }
        }

        let total_check_ins: u64 = events.iter().map(|e| u64::from(e.check_ins)).sum();
        let total_enrolled: u64 = events.iter().map(|e| u64::from(e.enrolled)).sum();

        let recent = events[events.len().saturating_sub(RECENT_EVENTS)..]
            .iter()
            .map(|e| RecentEvent {
                name: e.name.chars().take(SHORT_NAME_LEN).collect(),
                check_ins: e.check_ins,
            })
            .collect();

        Self {
            total_events: events.len(),
            active_events: by_status.active,
            total_check_ins,
            average_attendance_pct: rounded_pct(total_check_ins, total_enrolled),
            by_status,
            recent,
        }
    }
}

/// Student dashboard figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentSummary {
    /// Number of attendance records.
    pub total_verified: usize,
    /// Streak length, capped at seven.
    pub streak: usize,
    /// Score out of 100; ten records is a full score.
    pub attendance_score: u32,
    /// Distinct course codes in first-seen order.
    pub courses: Vec<String>,
    /// Unlocked badges.
    pub badges_earned: usize,
}

impl StudentSummary {
    /// Summarize `records` and `badges`.
    #[must_use]
    pub fn from_records(records: &[AttendanceRecord], badges: &[Badge]) -> Self {
        let mut courses: Vec<String> = Vec::new();
        for code in records.iter().filter_map(|r| r.course_code.as_deref()) {
            if !code.is_empty() && !courses.iter().any(|c| c == code) {
                courses.push(code.to_string());
            }
        }

        let count = records.len();
        let score = rounded_pct(
            u64::try_from(count).unwrap_or(u64::MAX),
            SCORE_FULL_AT,
        );
        Self {
            total_verified: count,
            streak: count.min(MAX_STREAK),
            attendance_score: score.min(100),
            courses,
            badges_earned: badges.iter().filter(|b| b.unlocked).count(),
        }
    }
}

/// Records for `course`, or all records when no course is given.
#[must_use]
pub fn filter_by_course<'a>(
    records: &'a [AttendanceRecord],
    course: Option<&str>,
) -> Vec<&'a AttendanceRecord> {
    records
        .iter()
        .filter(|r| course.map_or(true, |c| r.course_code.as_deref() == Some(c)))
        .collect()
}

/// `round(part / whole * 100)`, or 0 when `whole` is 0.
fn rounded_pct(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    // Round half up in integer arithmetic.
    let pct = part.saturating_mul(200).saturating_add(whole) / whole.saturating_mul(2);
    u32::try_from(pct).unwrap_or(u32::MAX)
}
