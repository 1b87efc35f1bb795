//! SQL Server DDL grammar.
//!
//! Type, length, and nullability combine into one `ALTER COLUMN`;
//! default alteration is left to the user because SQL Server binds
//! defaults through named constraints. Comments are extended properties
//! and always need their own `EXEC` call with explicit schema, table,
//! and column coordinates.

use basalt_schema::{escape_text, ColumnDescription, TableDescription};
use tracing::warn;

use crate::changes::{ChangeRecord, ChangedField, ColumnChanges};
use crate::error::Result;

use super::{column_type_sql, new_text, old_text};

pub(super) fn table_comment_sql(table: &TableDescription, record: &ChangeRecord) -> String {
    extended_property_sql(table, None, record)
}

pub(super) fn column_statements(
    table: &TableDescription,
    column: &ColumnDescription,
    changes: &ColumnChanges,
) -> Result<Vec<String>> {
    let mut alter = false;
    let mut nullability = None;
    let mut comment = None;

    for record in &changes.records {
        match record.field {
            ChangedField::DataType | ChangedField::Length => alter = true,
            ChangedField::NotNull => {
                alter = true;
                nullability = Some(if column.not_null { "NOT NULL" } else { "NULL" });
            }
            ChangedField::DefaultValue => {
                warn!(
                    column = %column.name,
                    "default alteration is not supported for sqlserver; skipping"
                );
            }
            ChangedField::Comment => comment = Some(record),
        }
    }

    let mut statements = Vec::new();
    if alter {
        let mut statement = format!(
            "ALTER TABLE {} ALTER COLUMN {} {}",
            table.qualified_name(),
            column.name,
            column_type_sql(column)?
        );
        if let Some(keyword) = nullability {
            statement.push(' ');
            statement.push_str(keyword);
        }
        statement.push(';');
        statements.push(statement);
    }
    if let Some(record) = comment {
        statements.push(extended_property_sql(table, Some(&column.name), record));
    }
    Ok(statements)
}

/// Renders the extended-property call for a table or column comment.
///
/// A comment that did not exist before uses `sp_addextendedproperty`;
/// updating an existing one uses `sp_updateextendedproperty`.
fn extended_property_sql(
    table: &TableDescription,
    column: Option<&str>,
    record: &ChangeRecord,
) -> String {
    let procedure = if old_text(record).is_empty() {
        "sp_addextendedproperty"
    } else {
        "sp_updateextendedproperty"
    };
    let mut sql = format!(
        "EXEC {} @name = N'MS_Description', @value = N'{}', \
         @level0type = N'SCHEMA', @level0name = {}, \
         @level1type = N'TABLE', @level1name = {}",
        procedure,
        escape_text(new_text(record)),
        table.schema,
        table.name
    );
    if let Some(column) = column {
        sql.push_str(", @level2type = N'COLUMN', @level2name = ");
        sql.push_str(column);
    }
    sql.push(';');
    sql
}

#[cfg(test)]
mod tests {
    use basalt_schema::Dialect;

    use crate::dialect::{DdlGenerator, GeneratedDdl};
    use crate::error::SqlGenError;

    use super::*;

    fn generate(original: &TableDescription, edited: &TableDescription) -> GeneratedDdl {
        DdlGenerator::new(Dialect::SqlServer).generate(original, edited)
    }

    #[test]
    fn test_comment_only_change_updates_extended_property() {
        let original = TableDescription::new("s", "t")
            .column(ColumnDescription::new("notes", "nvarchar(400)").comment("old"));
        let edited = TableDescription::new("s", "t")
            .column(ColumnDescription::new("notes", "nvarchar(400)").comment("new"));

        let ddl = generate(&original, &edited);
        assert_eq!(ddl.statements.len(), 1);
        let statement = &ddl.statements[0];
        assert!(statement.starts_with("EXEC sp_updateextendedproperty"));
        assert!(statement.contains("@level1name = t"));
        assert!(statement.contains("@level2name = notes"));
        assert!(!statement.contains("ALTER TABLE"));
    }

    #[test]
    fn test_first_comment_uses_add_procedure() {
        let original = TableDescription::new("s", "t")
            .column(ColumnDescription::new("notes", "nvarchar(400)"));
        let edited = TableDescription::new("s", "t")
            .column(ColumnDescription::new("notes", "nvarchar(400)").comment("it's new"));

        let ddl = generate(&original, &edited);
        assert_eq!(
            ddl.statements,
            vec![
                "EXEC sp_addextendedproperty @name = N'MS_Description', \
                 @value = N'it''s new', @level0type = N'SCHEMA', @level0name = s, \
                 @level1type = N'TABLE', @level1name = t, \
                 @level2type = N'COLUMN', @level2name = notes;"
            ]
        );
    }

    #[test]
    fn test_type_and_nullability_combine() {
        let original = TableDescription::new("s", "t")
            .column(ColumnDescription::new("name", "varchar(64)"));
        let edited = TableDescription::new("s", "t")
            .column(ColumnDescription::new("name", "varchar").length("128").not_null());

        let ddl = generate(&original, &edited);
        assert_eq!(
            ddl.statements,
            vec!["ALTER TABLE s.t ALTER COLUMN name varchar(128) NOT NULL;"]
        );
    }

    #[test]
    fn test_nullability_only_restates_the_type() {
        let original = TableDescription::new("s", "t")
            .column(ColumnDescription::new("name", "varchar(64)").not_null());
        let edited = TableDescription::new("s", "t")
            .column(ColumnDescription::new("name", "varchar(64)"));

        let ddl = generate(&original, &edited);
        assert_eq!(
            ddl.statements,
            vec!["ALTER TABLE s.t ALTER COLUMN name varchar(64) NULL;"]
        );
    }

    #[test]
    fn test_type_only_change_omits_nullability() {
        let original = TableDescription::new("s", "t")
            .column(ColumnDescription::new("qty", "integer"));
        let edited = TableDescription::new("s", "t")
            .column(ColumnDescription::new("qty", "bigint"));

        let ddl = generate(&original, &edited);
        assert_eq!(
            ddl.statements,
            vec!["ALTER TABLE s.t ALTER COLUMN qty bigint;"]
        );
    }

    #[test]
    fn test_default_change_is_skipped_without_failure() {
        let original = TableDescription::new("s", "t")
            .column(ColumnDescription::new("qty", "integer"));
        let edited = TableDescription::new("s", "t")
            .column(ColumnDescription::new("qty", "integer").default_value("0"));

        let ddl = generate(&original, &edited);
        assert!(ddl.statements.is_empty());
        assert!(ddl.failures.is_empty());
    }

    #[test]
    fn test_table_comment_has_no_column_coordinate() {
        let original = TableDescription::new("s", "t").comment("old");
        let edited = TableDescription::new("s", "t").comment("new");

        let ddl = generate(&original, &edited);
        assert_eq!(ddl.statements.len(), 1);
        assert!(ddl.statements[0].starts_with("EXEC sp_updateextendedproperty"));
        assert!(ddl.statements[0].contains("@level1name = t"));
        assert!(!ddl.statements[0].contains("@level2"));
    }

    #[test]
    fn test_invalid_length_refuses_the_column() {
        let original = TableDescription::new("s", "t")
            .column(ColumnDescription::new("name", "varchar(64)"));
        let edited = TableDescription::new("s", "t")
            .column(ColumnDescription::new("name", "varchar").length("-1"));

        let ddl = generate(&original, &edited);
        assert!(ddl.statements.is_empty());
        assert_eq!(
            ddl.failures[0].error,
            SqlGenError::InvalidLength {
                column: "name".to_string(),
                value: "-1".to_string(),
            }
        );
    }
}
