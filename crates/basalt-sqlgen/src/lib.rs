//! SQL synthesis for the Basalt administration client.
//!
//! `basalt-sqlgen` turns structured, in-memory descriptions of what the
//! user wants into dialect-correct SQL text. It never executes anything:
//! the output is handed to the host for review and submission.
//!
//! Two cooperating subsystems live here:
//!
//! - **Schema alteration** - [`changes`] diffs an edited
//!   [`TableDescription`](basalt_schema::TableDescription) against the
//!   fetched original, and [`dialect`] renders the resulting change set
//!   as ALTER/COMMENT statements for Postgres, MySQL, or SQL Server.
//! - **Ad-hoc CRUD** - [`crud`] derives SELECT/INSERT/UPDATE/DELETE
//!   templates from the columns and rows of the last executed query.
//!
//! Every operation is a synchronous pure function over caller-owned
//! snapshots; worst case cost is proportional to the number of edited
//! columns.
//!
//! # Example
//!
//! ```rust
//! use basalt_sqlgen::prelude::*;
//!
//! let original = TableDescription::new("public", "users")
//!     .column(ColumnDescription::new("id", "bigint").not_null().primary_key())
//!     .column(ColumnDescription::new("email", "varchar(255)"));
//! let edited = TableDescription::new("public", "users")
//!     .column(ColumnDescription::new("id", "bigint").not_null().primary_key())
//!     .column(ColumnDescription::new("email", "varchar(255)").not_null());
//!
//! let ddl = DdlGenerator::new(Dialect::Postgres).generate(&original, &edited);
//! assert_eq!(
//!     ddl.script(),
//!     "ALTER TABLE public.users ALTER COLUMN email SET NOT NULL;"
//! );
//! ```

pub mod changes;
pub mod crud;
pub mod dialect;
pub mod error;

/// Prelude for convenient imports.
pub mod prelude {
    pub use basalt_schema::{
        ColumnDescription, ConstraintDescription, Dialect, IndexDescription, TableDescription,
        TriggerDescription,
    };

    pub use crate::changes::{
        diff_column, diff_table, ChangeRecord, ChangedField, ColumnChanges, TableChanges,
    };
    pub use crate::crud::{CrudAction, ResultRow, FALLBACK_TABLE};
    pub use crate::dialect::{
        ColumnFailure, DdlGenerator, GeneratedDdl, NO_CHANGES_PLACEHOLDER,
    };
    pub use crate::error::{Result, SqlGenError};
}
