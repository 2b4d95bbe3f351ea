//! Record types kept by the ledger.
//!
//! These are serialized with camelCase field names; the JSON shape is the
//! persisted layout and must stay stable across reloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an event.
///
/// Set at creation and never transitioned automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Open for check-in.
    Active,
    /// Scheduled in the future.
    Upcoming,
    /// Finished.
    Expired,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Upcoming => write!(f, "upcoming"),
            Self::Expired => write!(f, "expired"),
        }
    }
}

/// A trackable class or session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Eight-character identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Course code such as `CS301`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Scheduled date, `YYYY-MM-DD`.
    pub date: String,
    /// Start time, `HH:MM`.
    pub time: String,
    /// End time, `HH:MM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Venue label.
    pub location: String,
    /// Venue latitude.
    pub lat: f64,
    /// Venue longitude.
    pub lng: f64,
    /// Duration in minutes.
    pub duration: u32,
    /// Stand-in for a deployed contract id.
    pub app_id: String,
    /// Lifecycle status.
    pub status: EventStatus,
    /// Number of recorded check-ins.
    pub check_ins: u32,
    /// Number of enrolled participants.
    pub enrolled: u32,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
    /// Instructor name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
}

/// Caller-supplied fields for a new event.
///
/// Identifiers, status, counters, and creation time are assigned by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    /// Display name.
    pub name: String,
    /// Course code.
    #[serde(default)]
    pub course_code: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Scheduled date, `YYYY-MM-DD`.
    pub date: String,
    /// Start time, `HH:MM`.
    pub time: String,
    /// End time, `HH:MM`.
    #[serde(default)]
    pub end_time: Option<String>,
    /// Venue label.
    pub location: String,
    /// Venue latitude.
    pub lat: f64,
    /// Venue longitude.
    pub lng: f64,
    /// Duration in minutes.
    pub duration: u32,
    /// Instructor name.
    #[serde(default)]
    pub instructor: Option<String>,
}

/// Verification status of an attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Proof accepted.
    Verified,
    /// Awaiting confirmation.
    Pending,
    /// Proof rejected.
    Failed,
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Verified => write!(f, "verified"),
            Self::Pending => write!(f, "pending"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// A single logged check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Referenced event id. Not validated against the event collection.
    pub event_id: String,
    /// Event name at check-in time.
    pub event_name: String,
    /// Course code, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    /// Instructor name, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    /// Check-in date.
    pub date: String,
    /// Simulated proof commitment (random hex).
    pub proof_hash: String,
    /// Simulated transaction id.
    pub txn_id: String,
    /// When the check-in was recorded.
    pub timestamp: DateTime<Utc>,
    /// Verification status.
    pub status: VerificationStatus,
    /// Simulated block the proof landed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    /// Distance from the venue in metres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
}

/// An achievement badge. Unlock flags are seed data only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    /// Identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Emoji shown with the badge.
    pub emoji: String,
    /// Description.
    pub description: String,
    /// Whether the badge is unlocked.
    pub unlocked: bool,
    /// When the badge was unlocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// Role selected during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Checks in to events.
    Student,
    /// Creates and runs events.
    Instructor,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Instructor => write!(f, "instructor"),
        }
    }
}

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Default dark theme.
    #[default]
    Dark,
    /// Darker variant.
    Darker,
    /// Pure black.
    Oled,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dark => write!(f, "dark"),
            Self::Darker => write!(f, "darker"),
            Self::Oled => write!(f, "oled"),
        }
    }
}

/// Animation intensity preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationIntensity {
    /// All animations.
    #[default]
    Full,
    /// Fewer animations.
    Reduced,
    /// Essentially none.
    Minimal,
}

impl std::fmt::Display for AnimationIntensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Reduced => write!(f, "reduced"),
            Self::Minimal => write!(f, "minimal"),
        }
    }
}

/// User preferences and role.
///
/// Fields missing from stored data fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    /// Selected role, if onboarding finished.
    pub role: Option<Role>,
    /// Display name.
    pub display_name: String,
    /// Institution name.
    pub institution: String,
    /// Color theme.
    pub theme: Theme,
    /// Accent color name.
    pub accent_color: String,
    /// Animation intensity.
    pub animation_intensity: AnimationIntensity,
    /// Show attendance on a public profile.
    pub show_attendance_publicly: bool,
    /// Let instructors see the wallet address.
    pub allow_instructor_see_wallet: bool,
    /// Opt in to anonymous analytics.
    pub participate_analytics: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            role: None,
            display_name: String::new(),
            institution: String::new(),
            theme: Theme::Dark,
            accent_color: "mint".to_string(),
            animation_intensity: AnimationIntensity::Full,
            show_attendance_publicly: false,
            allow_instructor_see_wallet: false,
            participate_analytics: true,
        }
    }
}

/// A partial settings update. `None` leaves the stored field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    /// New role; `Some(None)` clears it.
    pub role: Option<Option<Role>>,
    /// New display name.
    pub display_name: Option<String>,
    /// New institution.
    pub institution: Option<String>,
    /// New theme.
    pub theme: Option<Theme>,
    /// New accent color.
    pub accent_color: Option<String>,
    /// New animation intensity.
    pub animation_intensity: Option<AnimationIntensity>,
    /// New public-attendance flag.
    pub show_attendance_publicly: Option<bool>,
    /// New wallet-visibility flag.
    pub allow_instructor_see_wallet: Option<bool>,
    /// New analytics flag.
    pub participate_analytics: Option<bool>,
}

impl SettingsUpdate {
    /// An update that only sets the role.
    #[must_use]
    pub fn role(role: Role) -> Self {
        Self {
            role: Some(Some(role)),
            ..Self::default()
        }
    }

    /// Whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl UserSettings {
    /// Shallow-merge `update` over these settings.
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(display_name) = update.display_name {
            self.display_name = display_name;
        }
        if let Some(institution) = update.institution {
            self.institution = institution;
        }
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(accent_color) = update.accent_color {
            self.accent_color = accent_color;
        }
        if let Some(animation_intensity) = update.animation_intensity {
            self.animation_intensity = animation_intensity;
        }
        if let Some(flag) = update.show_attendance_publicly {
            self.show_attendance_publicly = flag;
        }
        if let Some(flag) = update.allow_instructor_see_wallet {
            self.allow_instructor_see_wallet = flag;
        }
        if let Some(flag) = update.participate_analytics {
            self.participate_analytics = flag;
        }
    }
}
