//! `SQLite` schema for the ledger's key-value backend.

/// Table holding one serialized value per storage key.
pub const CREATE_ENTRIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS entries (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// Table for backend bookkeeping such as the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// Statements applied by schema version 1.
pub const V1_STATEMENTS: &[&str] = &[CREATE_ENTRIES_TABLE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_table_columns() {
        assert!(CREATE_ENTRIES_TABLE.contains("key TEXT PRIMARY KEY"));
        assert!(CREATE_ENTRIES_TABLE.contains("value TEXT NOT NULL"));
        assert!(CREATE_ENTRIES_TABLE.contains("updated_at TEXT NOT NULL"));
    }

    #[test]
    fn test_metadata_table_structure() {
        assert!(CREATE_METADATA_TABLE.contains("key TEXT PRIMARY KEY"));
        assert!(CREATE_METADATA_TABLE.contains("value TEXT NOT NULL"));
    }
}
