//! Synthetic identifiers and demo values.
//!
//! Everything here is drawn from a caller-supplied RNG with no uniqueness
//! check against stored records. The id spaces are large enough for a demo
//! ledger; a collision would produce two records with the same id and go
//! unnoticed.

use std::ops::Range;

use rand::Rng;

const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const BASE32: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
const HEX: &[u8] = b"0123456789abcdef";

/// Length of an event identifier.
pub const EVENT_ID_LEN: usize = 8;

/// Number of random characters in a transaction id after the `TX` prefix.
pub const TXN_ID_BODY_LEN: usize = 52;

/// Number of hex digits in a proof hash after the `0x` prefix.
pub const PROOF_HASH_HEX_LEN: usize = 64;

/// Range of synthetic application ids (always seven digits).
pub const APP_ID_RANGE: Range<u32> = 1_000_000..10_000_000;

/// Range of enrolment counts for new events.
pub const ENROLLED_RANGE: Range<u32> = 20..60;

/// First simulated block number handed to new attendance records.
pub const BLOCK_NUMBER_BASE: u64 = 48_290_000;

/// Spread of simulated block numbers above [`BLOCK_NUMBER_BASE`].
pub const BLOCK_NUMBER_SPREAD: u64 = 10_000;

/// Range of simulated distances from the venue, in metres.
pub const DISTANCE_RANGE: Range<u32> = 10..90;

fn draw<R: Rng + ?Sized>(rng: &mut R, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .map(|_| char::from(alphabet[rng.gen_range(0..alphabet.len())]))
        .collect()
}

/// Eight uppercase base-36 characters.
pub fn event_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    draw(rng, BASE36, EVENT_ID_LEN)
}

/// Seven-digit numeric application id.
pub fn app_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(APP_ID_RANGE).to_string()
}

/// `TX` followed by 52 base-32 characters.
pub fn txn_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("TX{}", draw(rng, BASE32, TXN_ID_BODY_LEN))
}

/// `0x` followed by 64 lowercase hex digits.
pub fn proof_hash<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("0x{}", draw(rng, HEX, PROOF_HASH_HEX_LEN))
}

/// Fake wallet address in the fixed `ALGO<8 chars>...X7F2` shape.
pub fn wallet_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("ALGO{}...X7F2", draw(rng, BASE32, 8))
}

/// Enrolment count for a new event.
pub fn enrolled<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(ENROLLED_RANGE)
}

/// Block number for a new attendance record.
pub fn block_number<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    BLOCK_NUMBER_BASE + rng.gen_range(0..BLOCK_NUMBER_SPREAD)
}

/// Distance from the venue for a new attendance record.
pub fn distance<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(DISTANCE_RANGE)
}
