//! Ad-hoc CRUD statement synthesis from a fetched result set.
//!
//! Given the column list and rows of the last query, this derives a
//! SELECT/INSERT/UPDATE/DELETE template the user can refine in the
//! editor. The output is a starting point, not finished SQL, so every
//! heuristic here degrades instead of failing: an unrecoverable table
//! name becomes a placeholder, never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use basalt_schema::format_scalar;

use crate::error::{Result, SqlGenError};

/// One fetched row: column name to scalar value. Column order is carried
/// by the column list the query executor returns alongside the rows.
pub type ResultRow = serde_json::Map<String, Value>;

/// Placeholder used when no table name can be recovered from the query.
pub const FALLBACK_TABLE: &str = "table_name";

/// Matches the first `FROM <token>` in free query text. Deliberately not
/// a SQL parser: with joins or multiple FROM clauses the first match
/// wins, and the user edits the result anyway.
static FROM_TABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bfrom\s+([^\s;,()]+)").expect("pattern is well formed"));

/// The statement kinds that can be derived from a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrudAction {
    /// SELECT with a WHERE template from the first row.
    Select,
    /// INSERT with one VALUES tuple per row.
    Insert,
    /// UPDATE setting every column to the first row's values.
    Update,
    /// DELETE with a WHERE template from the first row.
    Delete,
}

/// Recovers the target table name from the last executed query.
#[must_use]
pub fn table_from_query(query: &str) -> Option<&str> {
    FROM_TABLE
        .captures(query)
        .and_then(|captures| captures.get(1))
        .map(|token| token.as_str())
}

/// Derives a statement of the requested kind from the result set.
///
/// # Errors
///
/// Returns [`SqlGenError::EmptyResultSet`] when `rows` is empty; every
/// template needs at least the first row to work from.
pub fn generate(
    action: CrudAction,
    columns: &[String],
    rows: &[ResultRow],
    last_query: &str,
) -> Result<String> {
    let first = rows.first().ok_or(SqlGenError::EmptyResultSet)?;
    let table = table_from_query(last_query).unwrap_or(FALLBACK_TABLE);
    debug!(
        action = ?action,
        table = %table,
        rows = rows.len(),
        "generating statement from result set"
    );

    Ok(match action {
        CrudAction::Select => select_sql(columns, first, table),
        CrudAction::Insert => insert_sql(columns, rows, table),
        CrudAction::Update => update_sql(columns, first, table),
        CrudAction::Delete => delete_sql(columns, first, table),
    })
}

/// Equality conditions over every non-null column of the row. Null and
/// absent columns are omitted, never rendered as `IS NULL`.
fn conditions(columns: &[String], row: &ResultRow) -> Vec<String> {
    columns
        .iter()
        .filter_map(|column| {
            let value = row.get(column)?;
            if value.is_null() {
                return None;
            }
            Some(format!("{} = {}", column, format_scalar(value)))
        })
        .collect()
}

fn where_clause(conditions: &[String]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!("\nWHERE {}", conditions.join("\n  AND "))
    }
}

fn scalar(row: &ResultRow, column: &str) -> String {
    format_scalar(row.get(column).unwrap_or(&Value::Null))
}

fn select_sql(columns: &[String], row: &ResultRow, table: &str) -> String {
    format!(
        "SELECT {}\nFROM {}{}",
        columns.join(", "),
        table,
        where_clause(&conditions(columns, row))
    )
}

fn delete_sql(columns: &[String], row: &ResultRow, table: &str) -> String {
    format!(
        "DELETE FROM {}{}",
        table,
        where_clause(&conditions(columns, row))
    )
}

fn insert_sql(columns: &[String], rows: &[ResultRow], table: &str) -> String {
    let tuples: Vec<String> = rows
        .iter()
        .map(|row| {
            let values: Vec<String> = columns.iter().map(|c| scalar(row, c)).collect();
            format!("    ({})", values.join(", "))
        })
        .collect();
    format!(
        "INSERT INTO {} ({})\nVALUES\n{}",
        table,
        columns.join(", "),
        tuples.join(",\n")
    )
}

/// Full "set to current row values" template: every column appears in the
/// SET list. The WHERE keys on the first column whose name contains `id`
/// (case-insensitive), falling back to the first column.
fn update_sql(columns: &[String], row: &ResultRow, table: &str) -> String {
    let assignments: Vec<String> = columns
        .iter()
        .map(|c| format!("    {} = {}", c, scalar(row, c)))
        .collect();
    let key = columns
        .iter()
        .find(|c| c.to_ascii_lowercase().contains("id"))
        .or_else(|| columns.first());
    let where_part = key.map_or_else(String::new, |k| {
        format!("\nWHERE {} = {}", k, scalar(row, k))
    });
    format!(
        "UPDATE {}\nSET\n{}{}",
        table,
        assignments.join(",\n"),
        where_part
    )
}
