mod schema;

use chrono::NaiveDateTime;
use log::{debug, info};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};
use crate::config::StorageParameters;
use crate::errors::StorageError;
use crate::manager_storage::schema::SCHEMA;
use crate::models::decision::{Decision, DecisionRecord};
use crate::models::forecast::{ForecastPoint, ForecastRecord};

impl ToSql for Decision {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Decision {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?
            .parse::<Decision>()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// Append-only SQLite store for forecasts and irrigation decisions.
///
/// Every operation opens its own connection and closes it when done, and every write
/// runs in a transaction of its own. Tables are created on first use.
pub struct Store {
    db_path: String,
}

impl Store {
    /// Returns a Store for the database file given in the parameters, the file is
    /// not touched until the first operation.
    ///
    /// # Arguments
    ///
    /// * 'params' - storage parameters holding the database path
    pub fn new(params: &StorageParameters) -> Store {
        Store { db_path: params.db_path.clone() }
    }

    /// Creates the tables if not already there
    pub fn init_schema(&self) -> Result<(), StorageError> {
        info!("Opening database: {}", self.db_path);
        let _ = self.connect()?;
        info!("Database ready");

        Ok(())
    }

    /// Saves a batch of forecast points, all stamped with the same fetch time.
    /// Either all points are saved or none.
    ///
    /// # Arguments
    ///
    /// * 'points' - forecast points to save
    /// * 'fetched_at' - time the batch was fetched
    pub fn save_forecast_batch(&self, points: &[ForecastPoint], fetched_at: NaiveDateTime) -> Result<usize, StorageError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO forecast (local_time, fetched_at, temperature_c, humidity_pct, precipitation_mm, condition_text)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)")?;

            for p in points {
                stmt.execute(params![
                    p.local_time,
                    fetched_at,
                    p.temperature_c,
                    p.humidity_pct,
                    p.precipitation_mm,
                    p.condition_text,
                ])?;
            }
        }
        tx.commit()?;

        info!("Saved {} forecast points to database", points.len());
        Ok(points.len())
    }

    /// Saves one irrigation decision and returns its row id
    ///
    /// # Arguments
    ///
    /// * 'decision' - the decision
    /// * 'reason' - explanation of the decision
    /// * 'decided_at' - time of the decision
    pub fn save_decision(&self, decision: Decision, reason: &str, decided_at: NaiveDateTime) -> Result<i64, StorageError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO decision_log (decided_at, decision, reason) VALUES (?1, ?2, ?3)",
            params![decided_at, decision, reason])?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        info!("Saved decision: {} (reason: {})", decision, reason);
        Ok(id)
    }

    /// Loads all saved forecast records in insertion order
    pub fn load_forecasts(&self) -> Result<Vec<ForecastRecord>, StorageError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, local_time, fetched_at, temperature_c, humidity_pct, precipitation_mm, condition_text
             FROM forecast ORDER BY id")?;

        let records = stmt
            .query_map([], |row| {
                Ok(ForecastRecord {
                    id: row.get(0)?,
                    fetched_at: row.get(2)?,
                    point: ForecastPoint {
                        local_time: row.get(1)?,
                        temperature_c: row.get(3)?,
                        humidity_pct: row.get(4)?,
                        precipitation_mm: row.get(5)?,
                        condition_text: row.get(6)?,
                    },
                })
            })?
            .collect::<Result<Vec<ForecastRecord>, rusqlite::Error>>()?;

        debug!("Loaded {} forecast records", records.len());
        Ok(records)
    }

    /// Loads all saved decisions in insertion order
    pub fn load_decisions(&self) -> Result<Vec<DecisionRecord>, StorageError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, decided_at, decision, reason FROM decision_log ORDER BY id")?;

        let records = stmt
            .query_map([], decision_from_row)?
            .collect::<Result<Vec<DecisionRecord>, rusqlite::Error>>()?;

        Ok(records)
    }

    /// Returns the most recently saved decision, if any
    pub fn latest_decision(&self) -> Result<Option<DecisionRecord>, StorageError> {
        let conn = self.connect()?;
        let record = conn
            .query_row(
                "SELECT id, decided_at, decision, reason FROM decision_log ORDER BY id DESC LIMIT 1",
                [],
                decision_from_row)
            .optional()?;

        Ok(record)
    }

    fn connect(&self) -> Result<Connection, StorageError> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch(SCHEMA)?;

        Ok(conn)
    }
}

fn decision_from_row(row: &Row<'_>) -> rusqlite::Result<DecisionRecord> {
    Ok(DecisionRecord {
        id: row.get(0)?,
        decided_at: row.get(1)?,
        decision: row.get(2)?,
        reason: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    })
}
