//! `attendx` - CLI for the attendance ledger
//!
//! This binary opens the local ledger named by the configuration and runs a
//! single command against it.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use attendx::cli::{
    error_hint, AttendanceCommand, Cli, Command, ConfigCommand, EventsCommand, RoleCommand,
    SettingsCommand, SummaryCommand, WalletCommand,
};
use attendx::summary::{filter_by_course, InstructorSummary, StudentSummary};
use attendx::{
    block_height, init_logging, Config, Error, EventStatus, Ledger, NewEvent, Role, Storage,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    match cli.command {
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
        Command::BlockHeight => {
            println!("{}", block_height());
            Ok(())
        }
        command => run_ledger_command(&config, command),
    }
}

fn run_ledger_command(config: &Config, command: Command) -> anyhow::Result<()> {
    let db_path = config.database_path();
    let store = Storage::open(&db_path)
        .with_context(|| format!("failed to open ledger at {}", db_path.display()))?;
    let mut ledger = Ledger::new(store);

    let result = match command {
        Command::Events(cmd) => handle_events(&mut ledger, cmd),
        Command::Attendance(cmd) => handle_attendance(&mut ledger, cmd),
        Command::Badges(cmd) => handle_badges(&ledger, cmd.json),
        Command::Wallet(cmd) => handle_wallet(&mut ledger, &cmd),
        Command::Role(cmd) => handle_role(&ledger, cmd),
        Command::Settings(cmd) => handle_settings(&ledger, cmd),
        Command::Summary(cmd) => handle_summary(&ledger, &cmd),
        Command::Status(cmd) => handle_status(config, &ledger, cmd.json),
        Command::Config(_) | Command::BlockHeight => Ok(()),
    };

    if let Err(err) = &result {
        if let Some(hint) = err.downcast_ref::<Error>().and_then(error_hint) {
            eprintln!("{hint}");
        }
    }
    result
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn handle_events(ledger: &mut Ledger, cmd: EventsCommand) -> anyhow::Result<()> {
    match cmd {
        EventsCommand::List { status, json } => {
            let mut events = ledger.list_events();
            if let Some(status) = status {
                let status = EventStatus::from(status);
                events.retain(|e| e.status == status);
            }
            if json {
                return print_json(&events);
            }
            if events.is_empty() {
                println!("No events.");
            }
            for event in &events {
                println!(
                    "{:<8}  {:<9}  {} {}  {:>3}/{:<3}  {}",
                    event.id,
                    event.status,
                    event.date,
                    event.time,
                    event.check_ins,
                    event.enrolled,
                    event.name
                );
            }
        }
        EventsCommand::Show { id, json } => {
            let event = ledger.find_event(&id).ok_or_else(|| Error::event_not_found(&id))?;
            if json {
                return print_json(&event);
            }
            println!("{}", event.name);
            println!("{}", "-".repeat(event.name.chars().count()));
            println!("Id:          {}", event.id);
            if let Some(code) = &event.course_code {
                println!("Course:      {code}");
            }
            if let Some(instructor) = &event.instructor {
                println!("Instructor:  {instructor}");
            }
            match &event.end_time {
                Some(end) => println!("When:        {} {}-{}", event.date, event.time, end),
                None => println!("When:        {} {}", event.date, event.time),
            }
            println!("Duration:    {} min", event.duration);
            println!(
                "Location:    {} ({:.4}, {:.4})",
                event.location, event.lat, event.lng
            );
            println!("Status:      {}", event.status);
            println!("Check-ins:   {}/{}", event.check_ins, event.enrolled);
            println!("App id:      {}", event.app_id);
            if let Some(description) = &event.description {
                println!();
                println!("{description}");
            }
        }
        EventsCommand::Create(args) => {
            let event = ledger.create_event(NewEvent::from(&args))?;
            if args.json {
                return print_json(&event);
            }
            println!("Created event {} ({})", event.id, event.name);
            println!("  App id:   {}", event.app_id);
            println!("  Enrolled: {}", event.enrolled);
        }
    }
    Ok(())
}

fn handle_attendance(ledger: &mut Ledger, cmd: AttendanceCommand) -> anyhow::Result<()> {
    match cmd {
        AttendanceCommand::List { course, json } => {
            let records = ledger.list_attendance();
            let records = filter_by_course(&records, course.as_deref());
            if json {
                return print_json(&records);
            }
            if records.is_empty() {
                println!("No attendance records.");
            }
            for record in records {
                println!(
                    "{}  {:<8}  {:<8}  {}  {}",
                    record.date,
                    record.course_code.as_deref().unwrap_or("-"),
                    record.status,
                    record.txn_id,
                    record.event_name
                );
            }
        }
        AttendanceCommand::Submit {
            event_id,
            latest,
            name,
            json,
        } => {
            let (event_id, name) = match (event_id, name) {
                (Some(id), Some(name)) => (id, name),
                (Some(id), None) => {
                    let event = ledger
                        .find_event(&id)
                        .ok_or_else(|| Error::event_not_found(&id))?;
                    (event.id, event.name)
                }
                (None, _) if latest => {
                    let Some(event) = ledger.latest_event() else {
                        anyhow::bail!("no events to check in to");
                    };
                    (event.id, event.name)
                }
                (None, _) => anyhow::bail!("an event id or --latest is required"),
            };
            let submission = ledger.submit_attendance(&event_id, &name)?;
            if json {
                return print_json(&submission.record);
            }
            println!("Checked in to {}", submission.record.event_name);
            println!("  Transaction: {}", submission.txn_id);
            println!("  Proof:       {}", submission.record.proof_hash);
            if let Some(block) = submission.record.block_number {
                println!("  Block:       {block}");
            }
        }
    }
    Ok(())
}

fn handle_badges(ledger: &Ledger, json: bool) -> anyhow::Result<()> {
    let badges = ledger.list_badges();
    if json {
        return print_json(&badges);
    }
    for badge in &badges {
        let mark = if badge.unlocked { "x" } else { " " };
        println!(
            "[{mark}] {} {:<18} {}",
            badge.emoji, badge.name, badge.description
        );
    }
    Ok(())
}

fn handle_wallet(ledger: &mut Ledger, cmd: &WalletCommand) -> anyhow::Result<()> {
    match cmd {
        WalletCommand::Show => match ledger.wallet() {
            Some(address) => println!("{address}"),
            None => println!("No wallet connected."),
        },
        WalletCommand::Connect => {
            let address = ledger.connect_wallet()?;
            println!("Connected {address}");
        }
        WalletCommand::Disconnect => {
            ledger.disconnect_wallet()?;
            println!("Wallet disconnected.");
        }
    }
    Ok(())
}

fn handle_role(ledger: &Ledger, cmd: RoleCommand) -> anyhow::Result<()> {
    match cmd {
        RoleCommand::Show => match ledger.role() {
            Some(role) => println!("{role}"),
            None => println!("No role selected."),
        },
        RoleCommand::Set { role } => {
            let role = Role::from(role);
            ledger.set_role(role)?;
            println!("Role set to {role}");
        }
    }
    Ok(())
}

fn handle_settings(ledger: &Ledger, cmd: SettingsCommand) -> anyhow::Result<()> {
    let settings = match cmd {
        SettingsCommand::Show { json: true } => return print_json(&ledger.settings()),
        SettingsCommand::Show { json: false } => ledger.settings(),
        SettingsCommand::Set(args) => match args.into_update() {
            Some(update) => ledger.save_settings(update)?,
            None => {
                println!("No settings given; nothing changed.");
                return Ok(());
            }
        },
    };

    println!("Settings");
    println!("========");
    println!(
        "  Role:                 {}",
        settings
            .role
            .map_or_else(|| "-".to_string(), |r| r.to_string())
    );
    println!("  Display name:         {}", settings.display_name);
    println!("  Institution:          {}", settings.institution);
    println!("  Theme:                {}", settings.theme);
    println!("  Accent color:         {}", settings.accent_color);
    println!("  Animation:            {}", settings.animation_intensity);
    println!(
        "  Public attendance:    {}",
        settings.show_attendance_publicly
    );
    println!(
        "  Instructor sees wallet: {}",
        settings.allow_instructor_see_wallet
    );
    println!("  Analytics:            {}", settings.participate_analytics);
    Ok(())
}

fn handle_summary(ledger: &Ledger, cmd: &SummaryCommand) -> anyhow::Result<()> {
    match *cmd {
        SummaryCommand::Instructor { json } => {
            let summary = InstructorSummary::from_events(&ledger.list_events());
            if json {
                return print_json(&summary);
            }
            println!("Events:          {}", summary.total_events);
            println!("Active:          {}", summary.active_events);
            println!("Check-ins:       {}", summary.total_check_ins);
            println!("Avg attendance:  {}%", summary.average_attendance_pct);
            println!(
                "By status:       {} active, {} upcoming, {} expired",
                summary.by_status.active, summary.by_status.upcoming, summary.by_status.expired
            );
            for recent in &summary.recent {
                println!("  {:<10}  {}", recent.name, recent.check_ins);
            }
        }
        SummaryCommand::Student { json } => {
            let summary =
                StudentSummary::from_records(&ledger.list_attendance(), &ledger.list_badges());
            if json {
                return print_json(&summary);
            }
            println!("Verified:        {}", summary.total_verified);
            println!("Streak:          {}", summary.streak);
            println!("Score:           {}", summary.attendance_score);
            println!("Courses:         {}", summary.courses.join(", "));
            println!("Badges earned:   {}", summary.badges_earned);
        }
    }
    Ok(())
}

fn handle_status(config: &Config, ledger: &Ledger, json: bool) -> anyhow::Result<()> {
    let stats = ledger.store().stats()?;
    let seeded = ledger.is_seeded()?;
    let height = block_height();

    if json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "seeded": seeded,
            "keys": ledger.store().keys()?,
            "last_write": stats.last_write,
            "db_size_bytes": stats.db_size_bytes,
            "wallet": ledger.wallet(),
            "role": ledger.role(),
            "block_height": height,
        });
        return print_json(&status);
    }

    println!("attendx status");
    println!("--------------");
    println!("Database:      {}", config.database_path().display());
    println!("Seeded:        {seeded}");
    println!("Keys:          {}", stats.total_keys);
    if let Some(role) = ledger.role() {
        println!("Role:          {role}");
    }
    if let Some(last) = stats.last_write {
        println!("Last write:    {}", last.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    println!("Size:          {} bytes", stats.db_size_bytes);
    println!(
        "Wallet:        {}",
        ledger.wallet().unwrap_or_else(|| "not connected".to_string())
    );
    println!("Block height:  {height}");
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                return print_json(config);
            }
            println!("Current Configuration");
            println!("=====================");
            println!();
            println!("[Storage]");
            println!("  Database path:  {}", config.database_path().display());
            println!();
            println!("[Chain]");
            println!("  Algod server:   {}", config.chain.algod_server);
            println!("  App id:         {}", config.chain.app_id);
            println!("  Hash salt:      {}", config.chain.hash_salt);
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
