//! Change detection between an original and an edited description.
//!
//! Diffing takes two immutable snapshots and returns a pure value; it is
//! recomputed on every edit event and discarded on save or cancel. A
//! change record exists only when the edited value strictly differs from
//! the original, so re-selecting an identical value never produces one.

use serde::{Deserialize, Serialize};
use tracing::debug;

use basalt_schema::{ColumnDescription, TableDescription};

/// The column field a change record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangedField {
    /// Base data type (possibly with a new length).
    DataType,
    /// Length only, base type unchanged.
    Length,
    /// NOT NULL flag.
    NotNull,
    /// Default value or expression.
    DefaultValue,
    /// Column or table comment.
    Comment,
}

impl ChangedField {
    /// Returns a human-readable field label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::DataType => "data type",
            Self::Length => "length",
            Self::NotNull => "nullability",
            Self::DefaultValue => "default value",
            Self::Comment => "comment",
        }
    }
}

/// One detected difference between the original and edited state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Column the change belongs to (the table name for a table-level
    /// comment change).
    pub column: String,
    /// Which field changed.
    pub field: ChangedField,
    /// Original value as text.
    pub old: Option<String>,
    /// Edited value as text.
    pub new: Option<String>,
}

impl ChangeRecord {
    /// Creates a change record.
    #[must_use]
    pub fn new(
        column: impl Into<String>,
        field: ChangedField,
        old: Option<String>,
        new: Option<String>,
    ) -> Self {
        Self {
            column: column.into(),
            field,
            old,
            new,
        }
    }

    /// Returns a human-readable description of this change.
    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "column '{}': {} changed from '{}' to '{}'",
            self.column,
            self.field.label(),
            self.old.as_deref().unwrap_or(""),
            self.new.as_deref().unwrap_or("")
        )
    }
}

/// All changes detected for a single column, in fixed field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnChanges {
    /// Column name.
    pub column: String,
    /// Detected records, ordered data type/length, nullability, default,
    /// comment.
    pub records: Vec<ChangeRecord>,
}

/// All changes detected for a table edit session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableChanges {
    /// Table-level comment change, if any.
    pub comment: Option<ChangeRecord>,
    /// Per-column changes in edited declaration order.
    pub columns: Vec<ColumnChanges>,
}

impl TableChanges {
    /// Returns true when nothing changed. A defined no-op state, not an
    /// error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comment.is_none() && self.columns.is_empty()
    }

    /// Returns the total number of change records.
    #[must_use]
    pub fn record_count(&self) -> usize {
        usize::from(self.comment.is_some())
            + self.columns.iter().map(|c| c.records.len()).sum::<usize>()
    }
}

/// Treats absent and empty text as the same value.
fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Canonicalizes a length for comparison: numeric texts compare by value,
/// anything else by trimmed text.
fn canonical_length(length: Option<&str>) -> Option<String> {
    let raw = length?.trim();
    if raw.is_empty() {
        return None;
    }
    Some(raw.parse::<u32>().map_or_else(|_| raw.to_string(), |n| n.to_string()))
}

/// Compares two column descriptions field by field.
///
/// Records come out in fixed order: the coalesced data type/length
/// comparison first, then nullability, default value, comment. The type
/// comparison works on decomposed (base, length) tuples, never on raw
/// composite strings.
#[must_use]
pub fn diff_column(original: &ColumnDescription, edited: &ColumnDescription) -> Vec<ChangeRecord> {
    let mut records = Vec::new();

    let (old_base, old_length) = original.decomposed();
    let (new_base, new_length) = edited.decomposed();
    if old_base != new_base {
        records.push(ChangeRecord::new(
            &edited.name,
            ChangedField::DataType,
            Some(original.type_display()),
            Some(edited.type_display()),
        ));
    } else if canonical_length(old_length.as_deref()) != canonical_length(new_length.as_deref()) {
        records.push(ChangeRecord::new(
            &edited.name,
            ChangedField::Length,
            old_length,
            new_length,
        ));
    }

    if original.not_null != edited.not_null {
        records.push(ChangeRecord::new(
            &edited.name,
            ChangedField::NotNull,
            Some(original.not_null.to_string()),
            Some(edited.not_null.to_string()),
        ));
    }

    if text(&original.default_value) != text(&edited.default_value) {
        records.push(ChangeRecord::new(
            &edited.name,
            ChangedField::DefaultValue,
            original.default_value.clone(),
            edited.default_value.clone(),
        ));
    }

    if text(&original.comment) != text(&edited.comment) {
        records.push(ChangeRecord::new(
            &edited.name,
            ChangedField::Comment,
            original.comment.clone(),
            edited.comment.clone(),
        ));
    }

    records
}

/// Compares two table descriptions.
///
/// Walks columns in edited declaration order, pairing by name; columns
/// present on only one side are skipped (adding and dropping columns is a
/// different tool's job). The table comment pair is compared the same way
/// as column comments.
#[must_use]
pub fn diff_table(original: &TableDescription, edited: &TableDescription) -> TableChanges {
    let comment = (text(&original.comment) != text(&edited.comment)).then(|| {
        ChangeRecord::new(
            &edited.name,
            ChangedField::Comment,
            original.comment.clone(),
            edited.comment.clone(),
        )
    });

    let mut columns = Vec::new();
    for column in &edited.columns {
        let Some(previous) = original.get_column(&column.name) else {
            continue;
        };
        let records = diff_column(previous, column);
        if !records.is_empty() {
            columns.push(ColumnChanges {
                column: column.name.clone(),
                records,
            });
        }
    }

    let detected = TableChanges { comment, columns };
    debug!(
        table = %edited.name,
        records = detected.record_count(),
        "diffed table description"
    );
    detected
}
