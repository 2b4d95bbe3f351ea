//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::records::{AnimationIntensity, EventStatus, NewEvent, Role, SettingsUpdate, Theme};

/// Event commands.
#[derive(Debug, Subcommand)]
pub enum EventsCommand {
    /// List events
    List {
        /// Only show events with this status
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show one event
    Show {
        /// Event identifier
        id: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Create a new event
    Create(CreateEventArgs),
}

/// Arguments for creating an event.
#[derive(Debug, Args)]
pub struct CreateEventArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Course code, e.g. CS301
    #[arg(long)]
    pub course_code: Option<String>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,

    /// Date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Start time (HH:MM)
    #[arg(long)]
    pub time: String,

    /// End time (HH:MM)
    #[arg(long)]
    pub end_time: Option<String>,

    /// Venue label
    #[arg(long)]
    pub location: String,

    /// Venue latitude
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Venue longitude
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,

    /// Duration in minutes
    #[arg(long, default_value = "60")]
    pub duration: u32,

    /// Instructor name
    #[arg(long)]
    pub instructor: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl From<&CreateEventArgs> for NewEvent {
    fn from(args: &CreateEventArgs) -> Self {
        Self {
            name: args.name.clone(),
            course_code: args.course_code.clone(),
            description: args.description.clone(),
            date: args.date.clone(),
            time: args.time.clone(),
            end_time: args.end_time.clone(),
            location: args.location.clone(),
            lat: args.lat,
            lng: args.lng,
            duration: args.duration,
            instructor: args.instructor.clone(),
        }
    }
}

/// Attendance commands.
#[derive(Debug, Subcommand)]
pub enum AttendanceCommand {
    /// List attendance records
    List {
        /// Only show records for this course code
        #[arg(long)]
        course: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Check in to an event
    Submit {
        /// Event identifier
        #[arg(required_unless_present = "latest")]
        event_id: Option<String>,

        /// Check in to the most recently created event, as a QR scan would
        #[arg(long, conflicts_with_all = ["event_id", "name"])]
        latest: bool,

        /// Event name to record; skips the event lookup
        #[arg(long)]
        name: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Badge command arguments.
#[derive(Debug, Args)]
pub struct BadgesCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Wallet commands.
#[derive(Debug, Subcommand)]
pub enum WalletCommand {
    /// Show the connected wallet
    Show,
    /// Connect a demo wallet
    Connect,
    /// Disconnect the wallet
    Disconnect,
}

/// Role commands.
#[derive(Debug, Subcommand)]
pub enum RoleCommand {
    /// Show the selected role
    Show,
    /// Select a role
    Set {
        /// Role to select
        #[arg(value_enum)]
        role: RoleArg,
    },
}

/// Settings commands.
#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show current settings
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Update settings; omitted fields keep their value
    Set(SetSettingsArgs),
}

/// Arguments for a partial settings update.
#[derive(Debug, Default, Args)]
pub struct SetSettingsArgs {
    /// Display name
    #[arg(long)]
    pub display_name: Option<String>,

    /// Institution
    #[arg(long)]
    pub institution: Option<String>,

    /// Color theme
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,

    /// Accent color name
    #[arg(long)]
    pub accent_color: Option<String>,

    /// Animation intensity
    #[arg(long, value_enum)]
    pub animation: Option<AnimationArg>,

    /// Show attendance publicly
    #[arg(long)]
    pub show_attendance_publicly: Option<bool>,

    /// Let instructors see the wallet address
    #[arg(long)]
    pub allow_instructor_see_wallet: Option<bool>,

    /// Participate in anonymous analytics
    #[arg(long)]
    pub participate_analytics: Option<bool>,
}

impl SetSettingsArgs {
    /// The update these arguments describe, or `None` if no field was given.
    #[must_use]
    pub fn into_update(self) -> Option<SettingsUpdate> {
        let update = SettingsUpdate::from(self);
        (!update.is_empty()).then_some(update)
    }
}

impl From<SetSettingsArgs> for SettingsUpdate {
    fn from(args: SetSettingsArgs) -> Self {
        Self {
            role: None,
            display_name: args.display_name,
            institution: args.institution,
            theme: args.theme.map(Into::into),
            accent_color: args.accent_color,
            animation_intensity: args.animation.map(Into::into),
            show_attendance_publicly: args.show_attendance_publicly,
            allow_instructor_see_wallet: args.allow_instructor_see_wallet,
            participate_analytics: args.participate_analytics,
        }
    }
}

/// Dashboard summary commands.
#[derive(Debug, Subcommand)]
pub enum SummaryCommand {
    /// Event and check-in totals
    Instructor {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Personal attendance totals
    Student {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Event status argument for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Open for check-in
    Active,
    /// Scheduled
    Upcoming,
    /// Finished
    Expired,
}

impl From<StatusArg> for EventStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => Self::Active,
            StatusArg::Upcoming => Self::Upcoming,
            StatusArg::Expired => Self::Expired,
        }
    }
}

/// Role argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    /// Student
    Student,
    /// Instructor
    Instructor,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Student => Self::Student,
            RoleArg::Instructor => Self::Instructor,
        }
    }
}

/// Theme argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    /// Dark
    Dark,
    /// Darker
    Darker,
    /// OLED black
    Oled,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => Self::Dark,
            ThemeArg::Darker => Self::Darker,
            ThemeArg::Oled => Self::Oled,
        }
    }
}

/// Animation intensity argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnimationArg {
    /// All animations
    Full,
    /// Fewer animations
    Reduced,
    /// Almost none
    Minimal,
}

impl From<AnimationArg> for AnimationIntensity {
    fn from(arg: AnimationArg) -> Self {
        match arg {
            AnimationArg::Full => Self::Full,
            AnimationArg::Reduced => Self::Reduced,
            AnimationArg::Minimal => Self::Minimal,
        }
    }
}
