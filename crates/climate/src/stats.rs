use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("insufficient data: no temperature observations in the requested range")]
pub struct InsufficientData;

/// Min, max and mean of a set of temperature observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemperatureSummary {
    pub lowest: f64,
    pub highest: f64,
    pub average: f64,
}

impl TemperatureSummary {
    pub fn from_values(values: &[f64]) -> Result<Self, InsufficientData> {
        let (first, rest) = values.split_first().ok_or(InsufficientData)?;

        let (lowest, highest, sum) = rest.iter().fold(
            (*first, *first, *first),
            |(lowest, highest, sum), value| (lowest.min(*value), highest.max(*value), sum + value),
        );

        Ok(Self {
            lowest,
            highest,
            average: sum / values.len() as f64,
        })
    }
}
