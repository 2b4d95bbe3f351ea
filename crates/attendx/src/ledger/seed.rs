//! Demonstration data written on first access.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use super::ids;
use crate::records::{AttendanceRecord, Badge, Event, EventStatus, VerificationStatus};

struct SeedEvent {
    id: &'static str,
    name: &'static str,
    course_code: &'static str,
    description: &'static str,
    date: &'static str,
    time: &'static str,
    end_time: &'static str,
    location: &'static str,
    lat: f64,
    lng: f64,
    duration: u32,
    app_id: &'static str,
    status: EventStatus,
    check_ins: u32,
    enrolled: u32,
    age_days: i64,
    instructor: &'static str,
}

const EVENTS: &[SeedEvent] = &[
    SeedEvent {
        id: "EVT001",
        name: "Algorithms & Data Structures",
        course_code: "CS301",
        description: "Advanced sorting and graph algorithms",
        date: "2026-02-19",
        time: "10:00",
        end_time: "11:30",
        location: "Room 302, CS Building",
        lat: 37.7749,
        lng: -122.4194,
        duration: 90,
        app_id: "4821937",
        status: EventStatus::Active,
        check_ins: 32,
        enrolled: 45,
        age_days: 0,
        instructor: "Dr. Sarah Chen",
    },
    SeedEvent {
        id: "EVT002",
        name: "Calculus II",
        course_code: "MATH201",
        description: "Integration techniques and applications",
        date: "2026-02-20",
        time: "14:00",
        end_time: "15:30",
        location: "Lecture Hall A",
        lat: 37.7751,
        lng: -122.4180,
        duration: 90,
        app_id: "7293104",
        status: EventStatus::Upcoming,
        check_ins: 0,
        enrolled: 60,
        age_days: 0,
        instructor: "Prof. James Miller",
    },
    SeedEvent {
        id: "EVT003",
        name: "Entrepreneurship 101",
        course_code: "BUS101",
        description: "Startup ideation and pitch practice",
        date: "2026-02-17",
        time: "09:00",
        end_time: "10:00",
        location: "Innovation Hub",
        lat: 37.7745,
        lng: -122.4200,
        duration: 60,
        app_id: "5610283",
        status: EventStatus::Expired,
        check_ins: 28,
        enrolled: 35,
        age_days: 2,
        instructor: "Dr. Lisa Park",
    },
];

/// `(event index, date, age in days, block number, distance)`
const RECORDS: &[(usize, &str, i64, u64, u32)] = &[
    (0, "2026-02-19", 0, 48_291_034, 47),
    (2, "2026-02-17", 2, 48_288_921, 23),
    (0, "2026-02-18", 1, 48_290_012, 31),
    (2, "2026-02-15", 4, 48_285_103, 55),
    (1, "2026-02-14", 5, 48_283_920, 12),
    (0, "2026-02-13", 6, 48_282_001, 44),
    (2, "2026-02-12", 7, 48_280_103, 67),
    (1, "2026-02-11", 8, 48_278_421, 29),
];

/// `(id, name, emoji, description, unlocked days ago)`
const BADGES: &[(&str, &str, &str, &str, Option<i64>)] = &[
    ("first", "First Attendance", "🥇", "Recorded your first attendance", Some(8)),
    ("streak7", "7-Day Streak", "🔥", "Attended 7 days in a row", Some(1)),
    ("perfect", "Perfect Month", "💯", "100% attendance for a full month", None),
    ("courses10", "10 Courses", "🎓", "Attended 10 different courses", None),
    ("early", "Early Bird", "⚡", "First to check in to an event", Some(3)),
    ("privacy", "Privacy Champion", "🛡️", "All data stays anonymous", Some(8)),
    ("veteran", "Chain Veteran", "⛓️", "50+ on-chain records", None),
];

/// The three fixed demo events, `EVT001` through `EVT003`.
pub fn events(now: DateTime<Utc>) -> Vec<Event> {
    EVENTS
        .iter()
        .map(|e| Event {
            id: e.id.to_string(),
            name: e.name.to_string(),
            course_code: Some(e.course_code.to_string()),
            description: Some(e.description.to_string()),
            date: e.date.to_string(),
            time: e.time.to_string(),
            end_time: Some(e.end_time.to_string()),
            location: e.location.to_string(),
            lat: e.lat,
            lng: e.lng,
            duration: e.duration,
            app_id: e.app_id.to_string(),
            status: e.status,
            check_ins: e.check_ins,
            enrolled: e.enrolled,
            created_at: now - Duration::days(e.age_days),
            instructor: Some(e.instructor.to_string()),
        })
        .collect()
}

/// Eight verified check-ins spread over the demo events.
///
/// Proof hashes and transaction ids are drawn fresh from `rng`.
pub fn attendance<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> Vec<AttendanceRecord> {
    RECORDS
        .iter()
        .map(|&(event, date, age_days, block, distance)| {
            let e = &EVENTS[event];
            AttendanceRecord {
                event_id: e.id.to_string(),
                event_name: e.name.to_string(),
                course_code: Some(e.course_code.to_string()),
                instructor: Some(e.instructor.to_string()),
                date: date.to_string(),
                proof_hash: ids::proof_hash(rng),
                txn_id: ids::txn_id(rng),
                timestamp: now - Duration::days(age_days),
                status: VerificationStatus::Verified,
                block_number: Some(block),
                distance: Some(distance),
            }
        })
        .collect()
}

/// The seven achievement badges with their fixed unlock flags.
pub fn badges(now: DateTime<Utc>) -> Vec<Badge> {
    BADGES
        .iter()
        .map(|&(id, name, emoji, description, unlocked)| Badge {
            id: id.to_string(),
            name: name.to_string(),
            emoji: emoji.to_string(),
            description: description.to_string(),
            unlocked: unlocked.is_some(),
            unlocked_at: unlocked.map(|days| now - Duration::days(days)),
        })
        .collect()
}
