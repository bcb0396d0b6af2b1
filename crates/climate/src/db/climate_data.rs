use async_trait::async_trait;
use log::{debug, info};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    FromRow,
};
use std::{collections::BTreeSet, time::Duration};
use time::Date;

use crate::dates::{self, format_date};

pub const DEFAULT_OBSERVATION_TABLE: &str = "measurement";
pub const DEFAULT_STATION_TABLE: &str = "station";

const OBSERVATION_COLUMNS: [&str; 4] = ["station", "date", "prcp", "tobs"];
const STATION_COLUMNS: [&str; 5] = ["station", "name", "latitude", "longitude", "elevation"];

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Invalid date in dataset: {0}")]
    Date(#[from] dates::Error),
    #[error("Dataset not found: {0}")]
    NotFound(String),
    #[error("Dataset schema mismatch: {0}")]
    Schema(String),
    #[error("Dataset contains no observations")]
    Empty,
}

/// A single precipitation/temperature reading at a station on a date
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Observation {
    pub station: String,
    /// Observation date, `YYYY-MM-DD`
    pub date: String,
    /// Precipitation, missing readings are null
    pub prcp: Option<f64>,
    /// Temperature at observation time, missing readings are null
    pub tobs: Option<f64>,
}

/// Table names for the observation and station collections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    pub observation: String,
    pub station: String,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            observation: DEFAULT_OBSERVATION_TABLE.to_string(),
            station: DEFAULT_STATION_TABLE.to_string(),
        }
    }
}

impl Tables {
    /// Table names are interpolated into SQL, so only plain identifiers are accepted
    pub fn validate(&self) -> Result<(), Error> {
        for name in [&self.observation, &self.station] {
            if !is_identifier(name) {
                return Err(Error::Schema(format!(
                    "'{}' is not a valid table name",
                    name
                )));
            }
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[async_trait]
pub trait ClimateData: Sync + Send {
    async fn all_dates(&self) -> Result<Vec<String>, Error>;
    /// Observations with `start <= date`, and `date <= end` when an end is given
    async fn observations_in_range(
        &self,
        start: Date,
        end: Option<Date>,
    ) -> Result<Vec<Observation>, Error>;
    async fn observations_for_station(
        &self,
        station_id: &str,
        start: Date,
        end: Date,
    ) -> Result<Vec<Observation>, Error>;
    async fn count_by_station(&self, station_id: &str) -> Result<i64, Error>;
    async fn all_station_ids(&self) -> Result<BTreeSet<String>, Error>;
}

pub struct ClimateAccess {
    pool: SqlitePool,
    tables: Tables,
}

impl ClimateAccess {
    /// Opens a read-only pool on an existing dataset and checks its schema
    pub async fn new(path: &str, tables: Tables) -> Result<Self, Error> {
        tables.validate()?;
        if !climate_core::is_file(path) {
            return Err(Error::NotFound(path.to_string()));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(false)
            .read_only(true)
            .pragma("busy_timeout", "5000");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        let access = Self { pool, tables };
        access.verify_schema().await?;
        info!("SQLite dataset opened read-only at: {}", path);

        Ok(access)
    }

    pub async fn verify_schema(&self) -> Result<(), Error> {
        self.verify_table(&self.tables.observation, &OBSERVATION_COLUMNS)
            .await?;
        self.verify_table(&self.tables.station, &STATION_COLUMNS)
            .await
    }

    async fn verify_table(&self, table: &str, expected: &[&str]) -> Result<(), Error> {
        let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?)")
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        if columns.is_empty() {
            return Err(Error::Schema(format!("table '{}' does not exist", table)));
        }

        let missing: Vec<&str> = expected
            .iter()
            .copied()
            .filter(|column| !columns.iter().any(|c| c.eq_ignore_ascii_case(column)))
            .collect();
        if !missing.is_empty() {
            return Err(Error::Schema(format!(
                "table '{}' is missing columns: {}",
                table,
                missing.join(", ")
            )));
        }

        debug!("table '{}' has columns: {}", table, columns.join(", "));
        Ok(())
    }

    fn select_observations(&self) -> String {
        format!(
            "SELECT station, date, CAST(prcp AS REAL) AS prcp, CAST(tobs AS REAL) AS tobs FROM {}",
            self.tables.observation
        )
    }
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn all_dates(&self) -> Result<Vec<String>, Error> {
        let sql = format!("SELECT date FROM {}", self.tables.observation);
        let dates: Vec<String> = sqlx::query_scalar(&sql).fetch_all(&self.pool).await?;
        Ok(dates)
    }

    async fn observations_in_range(
        &self,
        start: Date,
        end: Option<Date>,
    ) -> Result<Vec<Observation>, Error> {
        let start = format_date(start)?;
        let observations = match end {
            Some(end) => {
                let sql = format!(
                    "{} WHERE date >= ? AND date <= ? ORDER BY date, station",
                    self.select_observations()
                );
                sqlx::query_as::<_, Observation>(&sql)
                    .bind(start)
                    .bind(format_date(end)?)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "{} WHERE date >= ? ORDER BY date, station",
                    self.select_observations()
                );
                sqlx::query_as::<_, Observation>(&sql)
                    .bind(start)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(observations)
    }

    async fn observations_for_station(
        &self,
        station_id: &str,
        start: Date,
        end: Date,
    ) -> Result<Vec<Observation>, Error> {
        let sql = format!(
            "{} WHERE station = ? AND date >= ? AND date <= ? ORDER BY date",
            self.select_observations()
        );
        let observations = sqlx::query_as::<_, Observation>(&sql)
            .bind(station_id)
            .bind(format_date(start)?)
            .bind(format_date(end)?)
            .fetch_all(&self.pool)
            .await?;
        Ok(observations)
    }

    async fn count_by_station(&self, station_id: &str) -> Result<i64, Error> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE station = ?",
            self.tables.observation
        );
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(station_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn all_station_ids(&self) -> Result<BTreeSet<String>, Error> {
        let sql = format!("SELECT DISTINCT station FROM {}", self.tables.observation);
        let ids: Vec<String> = sqlx::query_scalar(&sql).fetch_all(&self.pool).await?;
        Ok(ids.into_iter().collect())
    }
}
