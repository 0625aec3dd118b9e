//! Aggregate statistics over numeric columns.

use crate::error::ChartStatsError;

use ndarray::Array1;

/// Descriptive statistics of one numeric column.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnStatistics {
    pub total: u64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (one delta degree of freedom)
    pub std_dev: f64,
    pub min: u64,
    pub max: u64,
}

impl ColumnStatistics {
    /// Compute statistics of a column.
    ///
    /// Every statistic must be finite. At least two values are therefore required, since the
    /// sample standard deviation of a single value is undefined.
    ///
    /// # Arguments
    ///
    /// * `column`: Column name, used in errors
    /// * `values`: Column values
    pub fn compute(column: &'static str, values: &[u64]) -> Result<Self, ChartStatsError> {
        let (Some(min), Some(max)) = (values.iter().min(), values.iter().max()) else {
            return Err(ChartStatsError::EmptyDataset { operation: column });
        };
        let array: Array1<f64> = values.iter().map(|&value| value as f64).collect();
        let mean = array.mean().unwrap_or(f64::NAN);
        let std_dev = if values.len() > 1 {
            array.std(1.0)
        } else {
            f64::NAN
        };
        Ok(ColumnStatistics {
            total: total(column, values.iter().copied())?,
            mean: finite(column, "mean", mean)?,
            median: finite(column, "median", median(values))?,
            std_dev: finite(column, "standard deviation", std_dev)?,
            min: *min,
            max: *max,
        })
    }
}

/// Sum of the values, or an error if it does not fit in a `u64`.
pub fn total<I>(column: &'static str, values: I) -> Result<u64, ChartStatsError>
where
    I: IntoIterator<Item = u64>,
{
    values
        .into_iter()
        .try_fold(0u64, |sum, value| sum.checked_add(value))
        .ok_or(ChartStatsError::NonFiniteStatistic {
            column,
            statistic: "total",
        })
}

/// Return `value`, or an error if it is NaN or infinite.
pub fn finite(
    column: &'static str,
    statistic: &'static str,
    value: f64,
) -> Result<f64, ChartStatsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ChartStatsError::NonFiniteStatistic { column, statistic })
    }
}

/// Median of the values: the middle value, or the mean of the two middle values.
///
/// Returns NaN when there are no values.
pub fn median(values: &[u64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    match sorted.len() {
        0 => f64::NAN,
        len if len % 2 == 1 => sorted[mid] as f64,
        _ => (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0,
    }
}

/// Arithmetic mean of the values. Returns NaN when there are no values.
pub fn mean(values: &[f64]) -> f64 {
    Array1::from_iter(values.iter().copied())
        .mean()
        .unwrap_or(f64::NAN)
}

/// Integer mean of the values, truncated towards zero. Returns zero when there are no values.
pub fn truncated_mean(total: u64, count: usize) -> u64 {
    match count {
        0 => 0,
        count => total / count as u64,
    }
}

/// Round to two decimal places, with ties going to the even neighbour.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
