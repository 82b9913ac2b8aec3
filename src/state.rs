use crate::errors::DataError;
use crate::models::Dataset;
use chrono::NaiveDate;
use std::sync::Arc;

/// Request state: the dataset is never mutated after startup, so no lock.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub bounds: (NaiveDate, NaiveDate),
}

impl AppState {
    pub fn new(dataset: Dataset) -> Result<Self, DataError> {
        let bounds = dataset
            .date_bounds()
            .ok_or_else(|| DataError::Empty("daily dataset".to_string()))?;
        Ok(Self {
            dataset: Arc::new(dataset),
            bounds,
        })
    }
}
