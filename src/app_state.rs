use crate::cli::CommandLineArgs;
use crate::metrics;
use crate::table::Table;

use std::sync::Arc;

/// Shared application state passed to each request handler.
pub struct AppState {
    /// Command line arguments.
    pub args: CommandLineArgs,

    /// Song table, loaded once at start-up and never modified.
    pub table: Table,
}

impl AppState {
    /// Create and return an [AppState], loading the table from the configured data file.
    pub fn new(args: &CommandLineArgs) -> Self {
        Self::with_table(args, Table::load(&args.data_file))
    }

    /// Create and return an [AppState] holding an already loaded table.
    pub fn with_table(args: &CommandLineArgs, table: Table) -> Self {
        metrics::DATASET_SONGS.set(table.len() as i64);
        Self {
            args: args.clone(),
            table,
        }
    }
}

/// AppState wrapped in an Atomic Reference Count (Arc) to allow multiple references.
pub type SharedAppState = Arc<AppState>;
