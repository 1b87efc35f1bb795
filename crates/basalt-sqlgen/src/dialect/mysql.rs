//! MySQL DDL grammar.
//!
//! `MODIFY COLUMN` restates the whole column, so every change for a
//! column rides in one statement and the rendered type always reflects
//! the edited description, changed or not. MySQL is the only dialect
//! with an inline comment clause; a comment-only change still emits its
//! own minimal `MODIFY COLUMN`.

use basalt_schema::{quote_text, ColumnDescription, TableDescription};

use crate::changes::{ChangeRecord, ChangedField, ColumnChanges};
use crate::error::Result;

use super::{column_type_sql, new_text, new_value};

pub(super) fn table_comment_sql(table: &TableDescription, record: &ChangeRecord) -> String {
    format!(
        "ALTER TABLE {} COMMENT = {};",
        table.qualified_name(),
        quote_text(new_text(record))
    )
}

pub(super) fn column_statements(
    table: &TableDescription,
    column: &ColumnDescription,
    changes: &ColumnChanges,
) -> Result<Vec<String>> {
    let mut statement = format!(
        "ALTER TABLE {} MODIFY COLUMN {} {}",
        table.qualified_name(),
        column.name,
        column_type_sql(column)?
    );

    for record in &changes.records {
        match record.field {
            // Already restated ahead of the clause list.
            ChangedField::DataType | ChangedField::Length => {}
            ChangedField::NotNull => {
                statement.push(' ');
                statement.push_str(if column.not_null { "NOT NULL" } else { "NULL" });
            }
            ChangedField::DefaultValue => {
                // MODIFY without a DEFAULT clause resets the default, so
                // a cleared entry needs no clause at all.
                if let Some(value) = new_value(record) {
                    statement.push_str(" DEFAULT ");
                    statement.push_str(value);
                }
            }
            ChangedField::Comment => {
                statement.push_str(" COMMENT ");
                statement.push_str(&quote_text(new_text(record)));
            }
        }
    }

    statement.push(';');
    Ok(vec![statement])
}
