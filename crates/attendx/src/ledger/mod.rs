//! The local attendance ledger.
//!
//! [`Ledger`] owns a [`Storage`] handle and keeps each record collection as a
//! JSON document under a fixed key. It is constructed once and passed to
//! whatever needs it; construction seeds the demo data if the store has never
//! been seeded.
//!
//! Reads never fail: a missing, unreadable, or unparsable value is replaced
//! by an empty collection (or default settings) and logged. Writes return
//! their errors.
//!
//! Nothing here talks to a chain. Proof hashes, transaction ids, and block
//! numbers are random stand-ins; the real check-in call lives in
//! [`crate::onchain`] and is never invoked from this module.

pub mod ids;
pub mod seed;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::records::{
    AttendanceRecord, Badge, Event, EventStatus, NewEvent, Role, SettingsUpdate, UserSettings,
    VerificationStatus,
};
use crate::storage::Storage;

/// Sentinel set once the demo data has been written.
pub const SEEDED_KEY: &str = "attendx_seeded";
/// Event collection.
pub const EVENTS_KEY: &str = "attendx_events";
/// Attendance record collection.
pub const ATTENDANCE_KEY: &str = "attendx_attendance";
/// Badge collection.
pub const BADGES_KEY: &str = "attendx_badges";
/// Settings object.
pub const SETTINGS_KEY: &str = "attendx_settings";
/// Connected wallet address, stored as a raw string.
pub const WALLET_KEY: &str = "attendx_wallet";

/// Block height at [`BLOCK_EPOCH_MS`].
pub const BLOCK_HEIGHT_BASE: u64 = 48_291_000;
/// 2026-02-19T00:00:00Z in Unix milliseconds.
pub const BLOCK_EPOCH_MS: i64 = 1_771_459_200_000;
/// Simulated time between blocks.
pub const BLOCK_INTERVAL_MS: i64 = 4_000;

/// Simulated chain height at `now`.
///
/// Clamped to [`BLOCK_HEIGHT_BASE`] before the epoch.
#[must_use]
pub fn block_height_at(now: DateTime<Utc>) -> u64 {
    let elapsed = (now.timestamp_millis() - BLOCK_EPOCH_MS).div_euclid(BLOCK_INTERVAL_MS);
    BLOCK_HEIGHT_BASE + u64::try_from(elapsed).unwrap_or(0)
}

/// Simulated chain height right now.
#[must_use]
pub fn block_height() -> u64 {
    block_height_at(Utc::now())
}

/// Result of a mock attendance submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// The appended record.
    pub record: AttendanceRecord,
    /// The record's transaction id.
    pub txn_id: String,
}

/// Storage-backed ledger of events, attendance, badges, and settings.
#[derive(Debug)]
pub struct Ledger<R = StdRng> {
    store: Storage,
    rng: R,
}

impl Ledger<StdRng> {
    /// Open a ledger over `store` with an entropy-seeded RNG.
    #[must_use]
    pub fn new(store: Storage) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }
}

impl<R: Rng> Ledger<R> {
    /// Open a ledger over `store` drawing identifiers from `rng`.
    ///
    /// Seeds the demo data if absent. A seeding failure is logged and the
    /// ledger is returned anyway; its collections then read as empty.
    pub fn with_rng(store: Storage, rng: R) -> Self {
        let mut ledger = Self { store, rng };
        if let Err(e) = ledger.seed_if_absent() {
            warn!("Failed to seed demo data: {}", e);
        }
        ledger
    }

    /// The underlying storage.
    #[must_use]
    pub fn store(&self) -> &Storage {
        &self.store
    }

    /// Whether the seed sentinel is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the sentinel cannot be read.
    pub fn is_seeded(&self) -> Result<bool> {
        self.store.contains(SEEDED_KEY)
    }

    /// Write the demo events, attendance records, and badges unless the
    /// sentinel is already set. Returns `true` if it seeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the sentinel cannot be read or a write fails.
    pub fn seed_if_absent(&mut self) -> Result<bool> {
        if self.is_seeded()? {
            debug!("Ledger already seeded");
            return Ok(false);
        }

        let now = Utc::now();
        let events = seed::events(now);
        let records = seed::attendance(now, &mut self.rng);
        let badges = seed::badges(now);

        self.save(EVENTS_KEY, &events)?;
        self.save(ATTENDANCE_KEY, &records)?;
        self.save(BADGES_KEY, &badges)?;
        self.store.set(SEEDED_KEY, "true")?;

        info!(
            "Seeded {} events, {} attendance records, {} badges",
            events.len(),
            records.len(),
            badges.len()
        );
        Ok(true)
    }

    /// All events in creation order.
    #[must_use]
    pub fn list_events(&self) -> Vec<Event> {
        self.load(EVENTS_KEY).unwrap_or_default()
    }

    /// The event with the given id, if any.
    #[must_use]
    pub fn find_event(&self, id: &str) -> Option<Event> {
        self.list_events().into_iter().find(|e| e.id == id)
    }

    /// The most recently created event, if any.
    #[must_use]
    pub fn latest_event(&self) -> Option<Event> {
        self.list_events().pop()
    }

    /// Create and persist a new event.
    ///
    /// The event gets a random id and app id, status `active`, no check-ins,
    /// and a random enrolment count in `[20, 60)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated collection cannot be written.
    pub fn create_event(&mut self, new: NewEvent) -> Result<Event> {
        let mut events = self.list_events();
        let event = Event {
            id: ids::event_id(&mut self.rng),
            name: new.name,
            course_code: new.course_code,
            description: new.description,
            date: new.date,
            time: new.time,
            end_time: new.end_time,
            location: new.location,
            lat: new.lat,
            lng: new.lng,
            duration: new.duration,
            app_id: ids::app_id(&mut self.rng),
            status: EventStatus::Active,
            check_ins: 0,
            enrolled: ids::enrolled(&mut self.rng),
            created_at: Utc::now(),
            instructor: new.instructor,
        };
        events.push(event.clone());
        self.save(EVENTS_KEY, &events)?;

        info!("Created event {} ({})", event.id, event.name);
        Ok(event)
    }

    /// All attendance records in submission order.
    #[must_use]
    pub fn list_attendance(&self) -> Vec<AttendanceRecord> {
        self.load(ATTENDANCE_KEY).unwrap_or_default()
    }

    /// Record a mock check-in.
    ///
    /// Appends a `verified` record with a random proof hash, transaction id,
    /// block number, and distance, then bumps the referenced event's
    /// check-in count. The event id is not validated: if no such event
    /// exists the record is still written and no event changes.
    ///
    /// # Errors
    ///
    /// Returns an error if either collection cannot be written.
    pub fn submit_attendance(&mut self, event_id: &str, event_name: &str) -> Result<Submission> {
        let mut records = self.list_attendance();
        let now = Utc::now();
        let txn_id = ids::txn_id(&mut self.rng);
        let record = AttendanceRecord {
            event_id: event_id.to_string(),
            event_name: event_name.to_string(),
            course_code: None,
            instructor: None,
            date: now.date_naive().to_string(),
            proof_hash: ids::proof_hash(&mut self.rng),
            txn_id: txn_id.clone(),
            timestamp: now,
            status: VerificationStatus::Verified,
            block_number: Some(ids::block_number(&mut self.rng)),
            distance: Some(ids::distance(&mut self.rng)),
        };
        records.push(record.clone());
        self.save(ATTENDANCE_KEY, &records)?;

        let mut events = self.list_events();
        if let Some(event) = events.iter_mut().find(|e| e.id == event_id) {
            event.check_ins = event.check_ins.saturating_add(1);
            let check_ins = event.check_ins;
            self.save(EVENTS_KEY, &events)?;
            debug!("Event {} now has {} check-ins", event_id, check_ins);
        } else {
            debug!("No event {} to credit; record kept", event_id);
        }

        info!("Recorded attendance for {} as {}", event_id, txn_id);
        Ok(Submission { record, txn_id })
    }

    /// All badges. Unlock flags never change after seeding.
    #[must_use]
    pub fn list_badges(&self) -> Vec<Badge> {
        self.load(BADGES_KEY).unwrap_or_default()
    }

    /// The connected wallet address, if any.
    #[must_use]
    pub fn wallet(&self) -> Option<String> {
        match self.store.get(WALLET_KEY) {
            Ok(addr) => addr,
            Err(e) => {
                warn!("Failed to read wallet address: {}", e);
                None
            }
        }
    }

    /// Store and return a freshly generated fake wallet address.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be written.
    pub fn connect_wallet(&mut self) -> Result<String> {
        let addr = ids::wallet_address(&mut self.rng);
        self.store.set(WALLET_KEY, &addr)?;
        info!("Connected wallet {}", addr);
        Ok(addr)
    }

    /// Forget the connected wallet address.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be removed.
    pub fn disconnect_wallet(&self) -> Result<()> {
        if self.store.remove(WALLET_KEY)? {
            info!("Disconnected wallet");
        }
        Ok(())
    }

    /// Current settings, or defaults if none are stored.
    #[must_use]
    pub fn settings(&self) -> UserSettings {
        self.load(SETTINGS_KEY).unwrap_or_default()
    }

    /// Merge `update` over the stored settings and persist the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    pub fn save_settings(&self, update: SettingsUpdate) -> Result<UserSettings> {
        let mut settings = self.settings();
        settings.apply(update);
        self.save(SETTINGS_KEY, &settings)?;
        Ok(settings)
    }

    /// The selected role.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.settings().role
    }

    /// Select a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    pub fn set_role(&self, role: Role) -> Result<()> {
        self.save_settings(SettingsUpdate::role(role))?;
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.store.get(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Ignoring unparsable value under {}: {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read {}: {}", key, e);
                None
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::records::Theme;

    fn test_ledger() -> Ledger<StdRng> {
        let store = Storage::open_in_memory().expect("failed to create test storage");
        Ledger::with_rng(store, StdRng::seed_from_u64(42))
    }

    fn new_event(name: &str) -> NewEvent {
        NewEvent {
            name: name.to_string(),
            course_code: Some("CS410".to_string()),
            description: None,
            date: "2026-03-02".to_string(),
            time: "13:00".to_string(),
            end_time: Some("14:00".to_string()),
            location: "Room 12".to_string(),
            lat: 37.77,
            lng: -122.41,
            duration: 60,
            instructor: Some("Dr. Ada Byron".to_string()),
        }
    }

    fn snapshot(ledger: &Ledger<StdRng>) -> Vec<Option<String>> {
        [SEEDED_KEY, EVENTS_KEY, ATTENDANCE_KEY, BADGES_KEY, SETTINGS_KEY]
            .iter()
            .map(|k| ledger.store().get(k).unwrap())
            .collect()
    }

    #[test]
    fn test_fresh_ledger_is_seeded() {
        let ledger = test_ledger();
        assert!(ledger.is_seeded().unwrap());

        let ids: Vec<String> = ledger.list_events().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["EVT001", "EVT002", "EVT003"]);
        assert_eq!(ledger.list_attendance().len(), 8);
        assert_eq!(ledger.list_badges().len(), 7);
    }

    #[test]
    fn test_missing_sentinel_reseeds() {
        let mut ledger = test_ledger();
        assert!(ledger.store().remove(SEEDED_KEY).unwrap());
        assert!(!ledger.is_seeded().unwrap());

        assert!(ledger.seed_if_absent().unwrap());
        assert!(ledger.is_seeded().unwrap());
    }

    #[test]
    fn test_seed_is_idempotent() {
        let mut ledger = test_ledger();
        let before = snapshot(&ledger);

        assert!(!ledger.seed_if_absent().unwrap());
        assert!(!ledger.seed_if_absent().unwrap());

        assert_eq!(snapshot(&ledger), before);
    }

    #[test]
    fn test_seed_does_not_touch_settings() {
        let ledger = test_ledger();
        assert!(ledger.store().get(SETTINGS_KEY).unwrap().is_none());
        assert_eq!(ledger.settings(), UserSettings::default());
    }

    #[test]
    fn test_reopen_does_not_reseed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");

        let (events, records) = {
            let mut ledger = Ledger::new(Storage::open(&path).unwrap());
            ledger.submit_attendance("EVT002", "Calculus II").unwrap();
            (ledger.list_events(), ledger.list_attendance())
        };

        let reopened = Ledger::new(Storage::open(&path).unwrap());
        assert_eq!(reopened.list_events(), events);
        assert_eq!(reopened.list_attendance(), records);
        assert_eq!(reopened.list_attendance().len(), 9);
    }

    #[test]
    fn test_unparsable_collection_reads_empty() {
        crate::logging::init_test_logging();
        let ledger = test_ledger();
        ledger.store().set(EVENTS_KEY, "{not json").unwrap();
        ledger.store().set(BADGES_KEY, "42").unwrap();

        assert!(ledger.list_events().is_empty());
        assert!(ledger.list_badges().is_empty());
        assert_eq!(ledger.list_attendance().len(), 8);
    }

    #[test]
    fn test_unparsable_settings_read_default() {
        let ledger = test_ledger();
        ledger.store().set(SETTINGS_KEY, "[]").unwrap();
        assert_eq!(ledger.settings(), UserSettings::default());
    }

    #[test]
    fn test_missing_collections_read_empty() {
        let ledger = test_ledger();
        ledger.store().remove(ATTENDANCE_KEY).unwrap();
        ledger.store().remove(BADGES_KEY).unwrap();

        assert!(ledger.list_attendance().is_empty());
        assert!(ledger.list_badges().is_empty());
    }

    #[test]
    fn test_create_event_assigns_fields() {
        let mut ledger = test_ledger();
        let event = ledger.create_event(new_event("Compilers")).unwrap();

        assert_eq!(event.id.len(), 8);
        assert!(event
            .id
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        assert_eq!(event.app_id.len(), 7);
        assert_eq!(event.status, EventStatus::Active);
        assert_eq!(event.check_ins, 0);
        assert!((20..60).contains(&event.enrolled));
        assert_eq!(event.name, "Compilers");
        assert_eq!(event.instructor.as_deref(), Some("Dr. Ada Byron"));
    }

    #[test]
    fn test_create_event_counters_hold_for_many_inputs() {
        let mut ledger = test_ledger();
        for i in 0..50 {
            let event = ledger.create_event(new_event(&format!("Session {i}"))).unwrap();
            assert_eq!(event.check_ins, 0);
            assert!((20..60).contains(&event.enrolled));
        }
        assert_eq!(ledger.list_events().len(), 53);
    }

    #[test]
    fn test_create_event_appends_and_persists() {
        let mut ledger = test_ledger();
        let event = ledger.create_event(new_event("Compilers")).unwrap();

        let events = ledger.list_events();
        assert_eq!(events.len(), 4);
        assert_eq!(events.last(), Some(&event));
        assert_eq!(ledger.find_event(&event.id), Some(event));
    }

    #[test]
    fn test_submit_attendance_scenario() {
        let mut ledger = test_ledger();
        let before = ledger.find_event("EVT001").unwrap();
        assert_eq!(before.check_ins, 32);

        let submission = ledger
            .submit_attendance("EVT001", "Algorithms & Data Structures")
            .unwrap();

        let records = ledger.list_attendance();
        assert_eq!(records.len(), 9);
        let last = records.last().unwrap();
        assert_eq!(last, &submission.record);
        assert_eq!(last.event_id, "EVT001");
        assert_eq!(last.status, VerificationStatus::Verified);
        assert_eq!(last.txn_id, submission.txn_id);

        assert_eq!(ledger.find_event("EVT001").unwrap().check_ins, 33);
        assert_eq!(ledger.find_event("EVT002").unwrap().check_ins, 0);
    }

    #[test]
    fn test_submit_attendance_record_shape() {
        let mut ledger = test_ledger();
        let Submission { record, txn_id } =
            ledger.submit_attendance("EVT002", "Calculus II").unwrap();

        assert!(txn_id.starts_with("TX"));
        assert_eq!(txn_id.len(), 54);
        assert!(record.proof_hash.starts_with("0x"));
        assert_eq!(record.proof_hash.len(), 66);
        let block = record.block_number.unwrap();
        assert!((48_290_000..48_300_000).contains(&block));
        assert!((10..90).contains(&record.distance.unwrap()));
        assert_eq!(record.date, record.timestamp.date_naive().to_string());
    }

    #[test]
    fn test_submit_attendance_unknown_event() {
        let mut ledger = test_ledger();
        let events_before = ledger.list_events();

        let submission = ledger.submit_attendance("NOPE0000", "Ghost Lecture").unwrap();

        let records = ledger.list_attendance();
        assert_eq!(records.len(), 9);
        assert_eq!(records.last().unwrap().event_id, "NOPE0000");
        assert_eq!(submission.record.event_name, "Ghost Lecture");
        assert_eq!(ledger.list_events(), events_before);
    }

    #[test]
    fn test_submit_attendance_saturates_check_in_count() {
        let mut ledger = test_ledger();
        let mut events = ledger.list_events();
        events[0].check_ins = u32::MAX;
        ledger
            .store()
            .set(EVENTS_KEY, &serde_json::to_string(&events).unwrap())
            .unwrap();

        ledger
            .submit_attendance("EVT001", "Algorithms & Data Structures")
            .unwrap();

        assert_eq!(ledger.find_event("EVT001").unwrap().check_ins, u32::MAX);
        assert_eq!(ledger.list_attendance().len(), 9);
    }

    #[test]
    fn test_latest_event_tracks_creation() {
        let mut ledger = test_ledger();
        assert_eq!(ledger.latest_event().unwrap().id, "EVT003");

        let created = ledger.create_event(new_event("Compilers")).unwrap();
        assert_eq!(ledger.latest_event().unwrap(), created);

        ledger.store().set(EVENTS_KEY, "[]").unwrap();
        assert!(ledger.latest_event().is_none());
    }

    #[test]
    fn test_submit_twice_counts_twice() {
        let mut ledger = test_ledger();
        ledger.submit_attendance("EVT003", "Entrepreneurship 101").unwrap();
        ledger.submit_attendance("EVT003", "Entrepreneurship 101").unwrap();

        assert_eq!(ledger.find_event("EVT003").unwrap().check_ins, 30);
        assert_eq!(ledger.list_attendance().len(), 10);
    }

    #[test]
    fn test_wallet_connect_disconnect() {
        let mut ledger = test_ledger();
        assert!(ledger.wallet().is_none());

        let addr = ledger.connect_wallet().unwrap();
        assert!(addr.starts_with("ALGO"));
        assert!(addr.ends_with("...X7F2"));
        assert_eq!(ledger.wallet(), Some(addr));

        ledger.disconnect_wallet().unwrap();
        assert!(ledger.wallet().is_none());
        ledger.disconnect_wallet().unwrap();
    }

    #[test]
    fn test_wallet_stored_raw() {
        let mut ledger = test_ledger();
        let addr = ledger.connect_wallet().unwrap();
        assert_eq!(ledger.store().get(WALLET_KEY).unwrap(), Some(addr));
    }

    #[test]
    fn test_role_roundtrip() {
        let ledger = test_ledger();
        assert!(ledger.role().is_none());

        ledger.set_role(Role::Instructor).unwrap();
        assert_eq!(ledger.role(), Some(Role::Instructor));

        ledger.set_role(Role::Student).unwrap();
        assert_eq!(ledger.role(), Some(Role::Student));
    }

    #[test]
    fn test_settings_merge_last_write_wins() {
        let ledger = test_ledger();
        ledger
            .save_settings(SettingsUpdate {
                display_name: Some("Ada".to_string()),
                institution: Some("State U".to_string()),
                ..SettingsUpdate::default()
            })
            .unwrap();
        ledger.set_role(Role::Student).unwrap();
        ledger
            .save_settings(SettingsUpdate {
                display_name: Some("Ada L.".to_string()),
                theme: Some(Theme::Darker),
                participate_analytics: Some(false),
                ..SettingsUpdate::default()
            })
            .unwrap();

        let settings = ledger.settings();
        assert_eq!(settings.display_name, "Ada L.");
        assert_eq!(settings.institution, "State U");
        assert_eq!(settings.role, Some(Role::Student));
        assert_eq!(settings.theme, Theme::Darker);
        assert!(!settings.participate_analytics);
        assert_eq!(settings.accent_color, "mint");
    }

    #[test]
    fn test_empty_settings_update_persists_defaults() {
        let ledger = test_ledger();
        let saved = ledger.save_settings(SettingsUpdate::default()).unwrap();
        assert_eq!(saved, UserSettings::default());
        assert!(ledger.store().get(SETTINGS_KEY).unwrap().is_some());
    }

    #[test]
    fn test_block_height_at_epoch() {
        let epoch = Utc.with_ymd_and_hms(2026, 2, 19, 0, 0, 0).unwrap();
        assert_eq!(epoch.timestamp_millis(), BLOCK_EPOCH_MS);
        assert_eq!(block_height_at(epoch), BLOCK_HEIGHT_BASE);
    }

    #[test]
    fn test_block_height_before_epoch_clamps() {
        let before = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(block_height_at(before), BLOCK_HEIGHT_BASE);
    }

    #[test]
    fn test_block_height_advances_every_interval() {
        let epoch = Utc.with_ymd_and_hms(2026, 2, 19, 0, 0, 0).unwrap();
        assert_eq!(
            block_height_at(epoch + chrono::Duration::milliseconds(3_999)),
            BLOCK_HEIGHT_BASE
        );
        assert_eq!(
            block_height_at(epoch + chrono::Duration::seconds(4)),
            BLOCK_HEIGHT_BASE + 1
        );
        assert_eq!(
            block_height_at(epoch + chrono::Duration::hours(1)),
            BLOCK_HEIGHT_BASE + 900
        );
    }

    #[test]
    fn test_block_height_is_pure_and_monotonic() {
        let t = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(block_height_at(t), block_height_at(t));

        let mut last = 0;
        for step in 0..200 {
            let h = block_height_at(t + chrono::Duration::milliseconds(step * 1_337));
            assert!(h >= last);
            last = h;
        }
        assert!(block_height() >= BLOCK_HEIGHT_BASE);
    }
}
