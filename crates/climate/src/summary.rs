//! Dataset-wide values computed once at startup and shared by every request.

use log::{debug, info};
use std::collections::BTreeSet;
use time::Date;

use crate::{
    dates::{parse_date, year_before},
    db::{ClimateData, Error},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ClimateSummary {
    /// Latest observation date in the dataset
    pub most_recent_date: Date,
    /// Start of the trailing year window, 365 calendar days before `most_recent_date`
    pub cutoff_date: Date,
    /// Distinct station ids with at least one observation
    pub station_ids: BTreeSet<String>,
    /// Station with the most observations
    pub active_station: String,
}

impl ClimateSummary {
    pub async fn compute(climate_db: &dyn ClimateData) -> Result<Self, Error> {
        let dates = climate_db.all_dates().await?;
        let latest = dates.iter().max().ok_or(Error::Empty)?;
        let most_recent_date = parse_date(latest)?;
        let cutoff_date = year_before(most_recent_date)?;

        let station_ids = climate_db.all_station_ids().await?;
        let mut counts = Vec::with_capacity(station_ids.len());
        for station_id in &station_ids {
            let count = climate_db.count_by_station(station_id).await?;
            debug!("station {} has {} observations", station_id, count);
            counts.push((station_id.as_str(), count));
        }
        let active_station = most_active_station(&counts)
            .ok_or(Error::Empty)?
            .to_string();

        info!(
            "dataset spans up to {}, year window starts {}, {} stations, most active {}",
            most_recent_date,
            cutoff_date,
            station_ids.len(),
            active_station
        );

        Ok(Self {
            most_recent_date,
            cutoff_date,
            station_ids,
            active_station,
        })
    }
}

/// Highest count wins, ties go to the lowest station id
pub fn most_active_station<'a>(counts: &[(&'a str, i64)]) -> Option<&'a str> {
    counts
        .iter()
        .max_by(|(a_id, a_count), (b_id, b_count)| a_count.cmp(b_count).then(b_id.cmp(a_id)))
        .map(|(id, _)| *id)
}
