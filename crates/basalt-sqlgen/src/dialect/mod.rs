//! Dialect-specific DDL emission.
//!
//! Each supported grammar lives in its own module; dispatch is a closed
//! `match` on [`Dialect`], so an unhandled dialect is a compile error, not
//! a silent fallthrough. Emission does no I/O: the output is statement
//! text for review, handed to the host for display and submission.

mod mysql;
mod postgres;
mod sqlserver;

use tracing::debug;

use basalt_schema::{is_character_type, ColumnDescription, Dialect, TableDescription};

use crate::changes::{diff_table, ChangeRecord, ColumnChanges, TableChanges};
use crate::error::{Result, SqlGenError};

/// Placeholder the host shows when a diff produced no statements.
pub const NO_CHANGES_PLACEHOLDER: &str = "-- no schema changes detected";

/// A column whose statement block was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFailure {
    /// Column name.
    pub column: String,
    /// Why generation was refused.
    pub error: SqlGenError,
}

/// The result of one emission pass.
///
/// Statements are ordered: table comment first, then one block per edited
/// column in declaration order, each column's comment statement directly
/// after its primary alteration. A failed column contributes no
/// statements; its failure is recorded here and the remaining columns are
/// unaffected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedDdl {
    /// Emitted statements, each terminated with a semicolon.
    pub statements: Vec<String>,
    /// Columns whose generation was refused.
    pub failures: Vec<ColumnFailure>,
}

impl GeneratedDdl {
    /// Returns true when nothing was emitted and nothing failed.
    #[must_use]
    pub fn is_no_op(&self) -> bool {
        self.statements.is_empty() && self.failures.is_empty()
    }

    /// Joins the statements into a preview script, separated by blank
    /// lines.
    #[must_use]
    pub fn script(&self) -> String {
        self.statements.join("\n\n")
    }

    /// Like [`Self::script`], but renders the no-op state as the
    /// informational placeholder.
    #[must_use]
    pub fn preview(&self) -> String {
        if self.is_no_op() {
            NO_CHANGES_PLACEHOLDER.to_string()
        } else {
            self.script()
        }
    }
}

/// Emits schema-alteration DDL for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct DdlGenerator {
    dialect: Dialect,
}

impl DdlGenerator {
    /// Creates a generator for the given dialect.
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Returns the target dialect.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Diffs the edited description against the original and emits the
    /// alteration statements.
    #[must_use]
    pub fn generate(
        &self,
        original: &TableDescription,
        edited: &TableDescription,
    ) -> GeneratedDdl {
        let changes = diff_table(original, edited);
        self.generate_from_changes(edited, &changes)
    }

    /// Emits alteration statements from an already-computed change set.
    ///
    /// `table` must be the edited description: statements that restate a
    /// column (MySQL `MODIFY`, SQL Server `ALTER COLUMN`) render its
    /// current type from here even when the type itself did not change.
    #[must_use]
    pub fn generate_from_changes(
        &self,
        table: &TableDescription,
        changes: &TableChanges,
    ) -> GeneratedDdl {
        debug!(
            dialect = %self.dialect.name(),
            table = %table.name,
            records = changes.record_count(),
            "generating ddl"
        );

        let mut output = GeneratedDdl::default();
        if let Some(record) = &changes.comment {
            output.statements.push(self.table_comment_sql(table, record));
        }
        for column_changes in &changes.columns {
            let Some(column) = table.get_column(&column_changes.column) else {
                continue;
            };
            match self.column_statements(table, column, column_changes) {
                Ok(statements) => output.statements.extend(statements),
                Err(error) => output.failures.push(ColumnFailure {
                    column: column_changes.column.clone(),
                    error,
                }),
            }
        }
        output
    }

    fn table_comment_sql(&self, table: &TableDescription, record: &ChangeRecord) -> String {
        match self.dialect {
            Dialect::Postgres => postgres::table_comment_sql(table, record),
            Dialect::MySql => mysql::table_comment_sql(table, record),
            Dialect::SqlServer => sqlserver::table_comment_sql(table, record),
        }
    }

    fn column_statements(
        &self,
        table: &TableDescription,
        column: &ColumnDescription,
        changes: &ColumnChanges,
    ) -> Result<Vec<String>> {
        match self.dialect {
            Dialect::Postgres => postgres::column_statements(table, column, changes),
            Dialect::MySql => mysql::column_statements(table, column, changes),
            Dialect::SqlServer => sqlserver::column_statements(table, column, changes),
        }
    }
}

/// Validates a length entry. The one defined emission failure: the check
/// runs before any text is produced for the column.
fn checked_length(column: &str, raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(length) if length >= 1 => Ok(length),
        _ => Err(SqlGenError::InvalidLength {
            column: column.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Renders a column's type for DDL. The length clause appears only for
/// character-family base types; a stray length on any other type is
/// ignored without validation.
fn column_type_sql(column: &ColumnDescription) -> Result<String> {
    let (base, length) = column.decomposed();
    if is_character_type(&base) {
        if let Some(raw) = length {
            let length = checked_length(&column.name, &raw)?;
            return Ok(format!("{}({})", base, length));
        }
    }
    Ok(base)
}

/// The edited text of a record, with absent treated as empty.
fn new_text(record: &ChangeRecord) -> &str {
    record.new.as_deref().unwrap_or("")
}

/// The original text of a record, with absent treated as empty.
fn old_text(record: &ChangeRecord) -> &str {
    record.old.as_deref().unwrap_or("")
}

/// The edited text of a record, trimmed, with empty collapsed to `None`.
/// Used for default values, where an emptied entry means "drop".
fn new_value(record: &ChangeRecord) -> Option<&str> {
    record
        .new
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
