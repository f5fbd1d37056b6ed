//! Rolling-stock lookup query.

use chrono::NaiveDate;

use super::{DomainError, TrainNumber};

/// A request to find which train-set operated a service on a given day.
///
/// The train number and date together are the whole lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrainQuery {
    pub train_number: TrainNumber,
    pub date: NaiveDate,
}

impl TrainQuery {
    /// Build a query from a raw train number, normalizing it.
    ///
    /// Fails with `DomainError::BlankTrainNumber` if the number is blank.
    pub fn new(train_number: &str, date: NaiveDate) -> Result<Self, DomainError> {
        Ok(Self {
            train_number: TrainNumber::parse(train_number)?,
            date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn normalizes_train_number() {
        let query = TrainQuery::new(" g1 ", date()).unwrap();
        assert_eq!(query.train_number.as_str(), "G1");
        assert_eq!(query.date, date());
    }

    #[test]
    fn blank_train_number_rejected() {
        assert_eq!(
            TrainQuery::new("", date()),
            Err(DomainError::BlankTrainNumber)
        );
    }
}
