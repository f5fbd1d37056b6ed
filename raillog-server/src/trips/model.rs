//! Trip record types and validation.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::TrainNumber;

use super::error::TripError;

/// Smallest accepted mileage and price.
const MIN_AMOUNT: Decimal = dec!(0.1);

/// Largest accepted mileage and price.
const MAX_AMOUNT: Decimal = dec!(50000);

/// A trip as submitted by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTripRecord {
    /// Train number, e.g. "G1", "D3202", "K123"
    pub train_number: String,
    pub travel_date: NaiveDate,
    /// Train-set or locomotive, e.g. "CR400AF-2018", "HXD3C-0451"
    #[serde(default)]
    pub rolling_stock: Option<String>,
    pub from_station: String,
    pub to_station: String,
    #[serde(default)]
    pub departure_time: Option<NaiveTime>,
    #[serde(default)]
    pub arrival_time: Option<NaiveTime>,
    /// Distance travelled, one decimal place
    pub mileage_km: Decimal,
    #[serde(default)]
    pub seat_type: Option<String>,
    /// e.g. "05车 12A"
    #[serde(default)]
    pub seat_number: Option<String>,
    /// Fare, two decimal places
    pub price: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewTripRecord {
    /// Validate the record and normalize it for storage.
    ///
    /// The train number is upper-cased and checked against the passenger
    /// format, station names and optional text are trimmed (blank optional
    /// text becomes `None`), mileage is rounded to one place and price to two.
    pub fn validate(mut self) -> Result<Self, TripError> {
        let number = TrainNumber::parse_strict(&self.train_number)
            .map_err(|_| TripError::InvalidTrainNumber(self.train_number.trim().to_string()))?;
        self.train_number = number.as_str().to_string();

        self.from_station = required(&self.from_station, "from station")?;
        self.to_station = required(&self.to_station, "to station")?;

        self.mileage_km = in_range(self.mileage_km.round_dp(1), "mileage")?;
        self.price = in_range(self.price.round_dp(2), "price")?;

        self.rolling_stock = optional(self.rolling_stock);
        self.seat_type = optional(self.seat_type);
        self.seat_number = optional(self.seat_number);
        self.notes = optional(self.notes);

        Ok(self)
    }
}

/// A stored trip, owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    pub id: u64,
    pub user_id: String,
    #[serde(flatten)]
    pub trip: NewTripRecord,
    pub created_at: DateTime<Utc>,
}

fn required(value: &str, field: &'static str) -> Result<String, TripError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TripError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn in_range(value: Decimal, field: &'static str) -> Result<Decimal, TripError> {
    if value < MIN_AMOUNT || value > MAX_AMOUNT {
        return Err(TripError::OutOfRange {
            field,
            min: MIN_AMOUNT,
            max: MAX_AMOUNT,
        });
    }
    Ok(value)
}
