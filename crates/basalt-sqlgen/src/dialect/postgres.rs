//! PostgreSQL DDL grammar.
//!
//! Column-level clauses for one column are comma-joined into a single
//! `ALTER TABLE`. Postgres has no inline comment clause, so comments
//! always get their own `COMMENT ON` statement.

use basalt_schema::{quote_text, ColumnDescription, TableDescription};

use crate::changes::{ChangeRecord, ChangedField, ColumnChanges};
use crate::error::Result;

use super::{new_text, new_value};

pub(super) fn table_comment_sql(table: &TableDescription, record: &ChangeRecord) -> String {
    format!(
        "COMMENT ON TABLE {} IS {};",
        table.qualified_name(),
        quote_text(new_text(record))
    )
}

pub(super) fn column_statements(
    table: &TableDescription,
    column: &ColumnDescription,
    changes: &ColumnChanges,
) -> Result<Vec<String>> {
    let mut clauses = Vec::new();
    let mut comment = None;

    for record in &changes.records {
        match record.field {
            ChangedField::DataType | ChangedField::Length => {
                clauses.push(format!(
                    "ALTER COLUMN {} TYPE {}",
                    column.name,
                    type_sql(column)?
                ));
            }
            ChangedField::NotNull => {
                let verb = if column.not_null { "SET" } else { "DROP" };
                clauses.push(format!("ALTER COLUMN {} {} NOT NULL", column.name, verb));
            }
            ChangedField::DefaultValue => {
                let clause = match new_value(record) {
                    Some(value) => {
                        format!("ALTER COLUMN {} SET DEFAULT {}", column.name, value)
                    }
                    None => format!("ALTER COLUMN {} DROP DEFAULT", column.name),
                };
                clauses.push(clause);
            }
            ChangedField::Comment => comment = Some(record),
        }
    }

    let mut statements = Vec::new();
    if !clauses.is_empty() {
        statements.push(format!(
            "ALTER TABLE {} {};",
            table.qualified_name(),
            clauses.join(", ")
        ));
    }
    if let Some(record) = comment {
        statements.push(format!(
            "COMMENT ON COLUMN {}.{} IS {};",
            table.qualified_name(),
            column.name,
            quote_text(new_text(record))
        ));
    }
    Ok(statements)
}

/// Renders a column type for `ALTER COLUMN ... TYPE`.
///
/// `text` always carries the default collation and never a length, even
/// when a stray length is set.
fn type_sql(column: &ColumnDescription) -> Result<String> {
    let (base, _) = column.decomposed();
    if base.eq_ignore_ascii_case("text") {
        return Ok(format!("{} COLLATE \"default\"", base));
    }
    super::column_type_sql(column)
}

#[cfg(test)]
mod tests {
    use basalt_schema::Dialect;

    use crate::changes::diff_table;
    use crate::dialect::{DdlGenerator, GeneratedDdl};
    use crate::error::SqlGenError;

    use super::*;

    fn generate(original: &TableDescription, edited: &TableDescription) -> GeneratedDdl {
        DdlGenerator::new(Dialect::Postgres).generate(original, edited)
    }

    #[test]
    fn test_not_null_and_default_join_into_one_statement() {
        let original = TableDescription::new("s", "t")
            .column(ColumnDescription::new("price", "numeric"));
        let edited = TableDescription::new("s", "t")
            .column(ColumnDescription::new("price", "numeric").not_null().default_value("0"));

        let ddl = generate(&original, &edited);
        assert_eq!(
            ddl.statements,
            vec![
                "ALTER TABLE s.t ALTER COLUMN price SET NOT NULL, \
                 ALTER COLUMN price SET DEFAULT 0;"
            ]
        );
        assert!(ddl.failures.is_empty());
    }

    #[test]
    fn test_single_change_emits_no_extra_clauses() {
        let original = TableDescription::new("s", "t")
            .column(ColumnDescription::new("price", "numeric").not_null());
        let edited = TableDescription::new("s", "t")
            .column(ColumnDescription::new("price", "bigint").not_null());

        let ddl = generate(&original, &edited);
        assert_eq!(
            ddl.statements,
            vec!["ALTER TABLE s.t ALTER COLUMN price TYPE bigint;"]
        );
    }

    #[test]
    fn test_type_change_renders_character_length() {
        let original = TableDescription::new("s", "t")
            .column(ColumnDescription::new("name", "text"));
        let edited = TableDescription::new("s", "t")
            .column(ColumnDescription::new("name", "varchar").length("120"));

        let ddl = generate(&original, &edited);
        assert_eq!(
            ddl.statements,
            vec!["ALTER TABLE s.t ALTER COLUMN name TYPE varchar(120);"]
        );
    }

    #[test]
    fn test_text_type_gets_collation_and_no_length() {
        let original = TableDescription::new("s", "t")
            .column(ColumnDescription::new("body", "varchar(64)"));
        // The stale length entry stays behind when the user switches the
        // type to text; it must be suppressed, not rendered.
        let edited = TableDescription::new("s", "t")
            .column(ColumnDescription::new("body", "text").length("64"));

        let ddl = generate(&original, &edited);
        assert_eq!(
            ddl.statements,
            vec!["ALTER TABLE s.t ALTER COLUMN body TYPE text COLLATE \"default\";"]
        );
    }

    #[test]
    fn test_drop_not_null_and_drop_default() {
        let original = TableDescription::new("s", "t")
            .column(ColumnDescription::new("qty", "integer").not_null().default_value("1"));
        let edited = TableDescription::new("s", "t")
            .column(ColumnDescription::new("qty", "integer"));

        let ddl = generate(&original, &edited);
        assert_eq!(
            ddl.statements,
            vec![
                "ALTER TABLE s.t ALTER COLUMN qty DROP NOT NULL, \
                 ALTER COLUMN qty DROP DEFAULT;"
            ]
        );
    }

    #[test]
    fn test_default_expression_is_not_escaped() {
        let original = TableDescription::new("s", "t")
            .column(ColumnDescription::new("created", "timestamp"));
        let edited = TableDescription::new("s", "t").column(
            ColumnDescription::new("created", "timestamp").default_value("nextval('ticks')"),
        );

        let ddl = generate(&original, &edited);
        assert_eq!(
            ddl.statements,
            vec!["ALTER TABLE s.t ALTER COLUMN created SET DEFAULT nextval('ticks');"]
        );
    }

    #[test]
    fn test_comment_needs_its_own_statement() {
        let original = TableDescription::new("s", "t")
            .column(ColumnDescription::new("email", "varchar(255)"));
        let edited = TableDescription::new("s", "t").column(
            ColumnDescription::new("email", "varchar(255)")
                .not_null()
                .comment("contact's email"),
        );

        let ddl = generate(&original, &edited);
        assert_eq!(
            ddl.statements,
            vec![
                "ALTER TABLE s.t ALTER COLUMN email SET NOT NULL;".to_string(),
                "COMMENT ON COLUMN s.t.email IS 'contact''s email';".to_string(),
            ]
        );
    }

    #[test]
    fn test_table_comment_comes_first() {
        let original = TableDescription::new("s", "t")
            .column(ColumnDescription::new("id", "bigint"));
        let edited = TableDescription::new("s", "t")
            .comment("accounts")
            .column(ColumnDescription::new("id", "bigint").not_null());

        let ddl = generate(&original, &edited);
        assert_eq!(ddl.statements.len(), 2);
        assert_eq!(ddl.statements[0], "COMMENT ON TABLE s.t IS 'accounts';");
        assert_eq!(
            ddl.statements[1],
            "ALTER TABLE s.t ALTER COLUMN id SET NOT NULL;"
        );
    }

    #[test]
    fn test_invalid_length_refuses_only_that_column() {
        let original = TableDescription::new("s", "t")
            .column(ColumnDescription::new("name", "varchar(64)"))
            .column(ColumnDescription::new("age", "integer"));
        let edited = TableDescription::new("s", "t")
            .column(ColumnDescription::new("name", "varchar").length("abc"))
            .column(ColumnDescription::new("age", "integer").not_null());

        let ddl = generate(&original, &edited);
        assert_eq!(
            ddl.statements,
            vec!["ALTER TABLE s.t ALTER COLUMN age SET NOT NULL;"]
        );
        assert_eq!(ddl.failures.len(), 1);
        assert_eq!(ddl.failures[0].column, "name");
        assert_eq!(
            ddl.failures[0].error,
            SqlGenError::InvalidLength {
                column: "name".to_string(),
                value: "abc".to_string(),
            }
        );
    }

    #[test]
    fn test_negative_length_is_refused() {
        let original = TableDescription::new("s", "t")
            .column(ColumnDescription::new("name", "varchar(64)"));
        let edited = TableDescription::new("s", "t")
            .column(ColumnDescription::new("name", "varchar").length("-1"));

        let ddl = generate(&original, &edited);
        assert!(ddl.statements.is_empty());
        assert!(matches!(
            ddl.failures[0].error,
            SqlGenError::InvalidLength { .. }
        ));
    }

    #[test]
    fn test_changed_changes_diff_roundtrip() {
        // generate() and generate_from_changes() agree.
        let original = TableDescription::new("s", "t")
            .column(ColumnDescription::new("price", "numeric"));
        let edited = TableDescription::new("s", "t")
            .column(ColumnDescription::new("price", "numeric").not_null());

        let changes = diff_table(&original, &edited);
        let direct = DdlGenerator::new(Dialect::Postgres).generate_from_changes(&edited, &changes);
        assert_eq!(generate(&original, &edited), direct);
    }
}
