//! Utility functions for the CLI

pub mod table;

pub use table::{add_table_row, create_table};
