use crate::error::ChartStatsError;
use crate::table::Table;

use serde::Serialize;

/// Trait for queries over the song table.
///
/// This forms the contract between the API layer and operations. Operations are pure: the
/// result depends only on the table and the parameters.
pub trait Operation {
    /// Name used in logs and traces
    const NAME: &'static str;

    /// Parameters extracted from the request
    type Params: std::fmt::Debug;

    /// Serialisable result
    type Output: Serialize;

    /// Execute the operation.
    ///
    /// # Arguments
    ///
    /// * `table`: Table to query
    /// * `params`: Operation parameters
    fn execute(table: &Table, params: Self::Params) -> Result<Self::Output, ChartStatsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::Song;

    struct TestOp {}

    impl Operation for TestOp {
        const NAME: &'static str = "test";
        type Params = usize;
        type Output = String;

        fn execute(table: &Table, params: usize) -> Result<String, ChartStatsError> {
            table
                .songs()
                .get(params)
                .map(|song| song.title.clone())
                .ok_or(ChartStatsError::EmptyDataset {
                    operation: Self::NAME,
                })
        }
    }

    #[test]
    fn operation_execute() {
        let table = Table::from_songs(vec![Song::new("A", "B", "2024-01-01", 1, 1, 1)]);
        assert_eq!(TestOp::execute(&table, 0).unwrap(), "A");
        assert!(TestOp::execute(&table, 1).is_err());
    }
}
