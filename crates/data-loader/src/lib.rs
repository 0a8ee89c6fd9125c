//! # Data Loader Crate
//!
//! This crate reads insurance charge tables from CSV and normalizes them
//! into typed records.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (RawTable, Record, Table) and column names
//! - **parser**: Read CSV into a RawTable; numeric cell coercion
//! - **normalize**: Header normalization, schema check, row coercion policy
//! - **source**: Resolve which file to read (explicit, env override, fallback)
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{NumericCoercion, SourceResolver, Table};
//!
//! let path = SourceResolver::from_env().with_explicit(upload).resolve()?;
//! let table = Table::load(&path, NumericCoercion::DropRow)?;
//!
//! println!("{} records over columns {:?}", table.len(), table.columns());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod normalize;
pub mod source;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use normalize::{normalize, NumericCoercion};
pub use source::{SourceResolver, DEFAULT_INPUT_FILE, PATH_ENV_VAR};
pub use types::{is_missing, RawTable, Record, Table, REQUIRED_COLUMNS, SMOKER_YES};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("insurance.csv");
        std::fs::write(
            &path,
            "age,sex,bmi,children,smoker,region,charges\n\
             19,female,27.9,0,yes,southwest,16884.924\n\
             18,male,33.77,1,no,southeast,1725.5523\n",
        )
        .unwrap();

        let table = Table::load(&path, NumericCoercion::DropRow).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.records()[0].is_smoker());
        assert!(!table.records()[1].is_smoker());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Table::load(&dir.path().join("none.csv"), NumericCoercion::DropRow).unwrap_err();
        assert!(matches!(err, DataLoadError::Io(_) | DataLoadError::Csv(_)));
    }

    #[test]
    fn test_empty_file_fails_schema_check() {
        let err = Table::from_csv_bytes(b"", NumericCoercion::DropRow).unwrap_err();
        assert!(matches!(err, DataLoadError::Schema { .. }));
    }
}
