/// Both tables are append-only, nothing is ever updated or deleted.
/// Idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS forecast (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    local_time        DATETIME NOT NULL,
    fetched_at        DATETIME NOT NULL,
    temperature_c     REAL,
    humidity_pct      REAL,
    precipitation_mm  REAL,
    condition_text    TEXT
);

CREATE TABLE IF NOT EXISTS decision_log (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    decided_at  DATETIME NOT NULL,
    decision    TEXT NOT NULL,   -- 'ERROR' | 'TUNDA' | 'IRIGASI_EKSTRA' | 'IRIGASI_NORMAL'
    reason      TEXT
);
";
