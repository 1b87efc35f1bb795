//! Table and column descriptions.
//!
//! A description is fetched once from the server and kept read-only as the
//! "original"; the editor works on a cloned copy. Both snapshots are plain
//! values, so diffing them is a pure function with no aliasing between the
//! original and edited state.

use serde::{Deserialize, Serialize};

use crate::types::parse_type;

/// Description of a single column.
///
/// `length` and `scale` are kept as the raw text shown in the editor: the
/// server reports them as part of a composite type string, the user edits
/// them as free text, and validation happens at emission time so a bad
/// entry surfaces as a field-level error instead of being silently lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescription {
    /// Column name, unique within its table.
    pub name: String,
    /// Base data type, without any length suffix.
    pub base_data_type: String,
    /// Length as entered in the editor.
    pub length: Option<String>,
    /// Scale as reported by the server. Display only.
    pub scale: Option<String>,
    /// Whether the column is NOT NULL.
    pub not_null: bool,
    /// Whether the column is part of the primary key. Display only.
    pub is_primary_key: bool,
    /// Default value or expression, as raw text.
    pub default_value: Option<String>,
    /// Column comment.
    pub comment: Option<String>,
}

impl ColumnDescription {
    /// Creates a column description from a name and a type string.
    ///
    /// A composite type like `varchar(255)` is decomposed into base type
    /// and length; anything unparsable is kept verbatim as the base type.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        let token = parse_type(&data_type.into());
        Self {
            name: name.into(),
            base_data_type: token.base,
            length: token.length.map(|n| n.to_string()),
            scale: None,
            not_null: false,
            is_primary_key: false,
            default_value: None,
            comment: None,
        }
    }

    /// Sets the length text.
    #[must_use]
    pub fn length(mut self, length: impl Into<String>) -> Self {
        self.length = Some(length.into());
        self
    }

    /// Sets the scale text.
    #[must_use]
    pub fn scale(mut self, scale: impl Into<String>) -> Self {
        self.scale = Some(scale.into());
        self
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Marks the column nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.not_null = false;
        self
    }

    /// Marks the column as part of the primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Sets the default value or expression.
    #[must_use]
    pub fn default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Sets the column comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Returns the effective (base, length) pair for comparison.
    ///
    /// The declared base type is run through the token parser so a fetched
    /// composite (`varchar(255)` with no explicit length) and an edited
    /// pair (`varchar` plus length `255`) decompose to the same tuple. An
    /// explicit length entry wins over one embedded in the type string.
    #[must_use]
    pub fn decomposed(&self) -> (String, Option<String>) {
        let token = parse_type(&self.base_data_type);
        let length = self
            .length
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .or_else(|| token.length.map(|n| n.to_string()));
        (token.base.trim().to_string(), length)
    }

    /// Renders the composite type for display, e.g. `varchar(255)`.
    #[must_use]
    pub fn type_display(&self) -> String {
        let (base, length) = self.decomposed();
        match length {
            Some(length) => format!("{}({})", base, length),
            None => base,
        }
    }
}

/// Read-only description of a table constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintDescription {
    /// Constraint name.
    pub name: String,
    /// Definition text as reported by the server.
    pub definition: String,
}

impl ConstraintDescription {
    /// Creates a constraint description.
    #[must_use]
    pub fn new(name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
        }
    }
}

/// Read-only description of an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDescription {
    /// Index name.
    pub name: String,
    /// Definition text as reported by the server.
    pub definition: String,
}

impl IndexDescription {
    /// Creates an index description.
    #[must_use]
    pub fn new(name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
        }
    }
}

/// Read-only description of a trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerDescription {
    /// Trigger name.
    pub name: String,
    /// Definition text as reported by the server.
    pub definition: String,
}

impl TriggerDescription {
    /// Creates a trigger description.
    #[must_use]
    pub fn new(name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
        }
    }
}

/// Complete description of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescription {
    /// Schema (or database) the table lives in.
    pub schema: String,
    /// Table name.
    pub name: String,
    /// Owner as reported by the server.
    pub owner: String,
    /// Tablespace as reported by the server.
    pub tablespace: String,
    /// Table comment.
    pub comment: Option<String>,
    /// Columns in declaration order.
    pub columns: Vec<ColumnDescription>,
    /// Constraints. Display only, never synthesized.
    pub constraints: Vec<ConstraintDescription>,
    /// Indexes. Display only, never synthesized.
    pub indexes: Vec<IndexDescription>,
    /// Triggers. Display only, never synthesized.
    pub triggers: Vec<TriggerDescription>,
}

impl TableDescription {
    /// Creates an empty table description.
    #[must_use]
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            owner: String::new(),
            tablespace: String::new(),
            comment: None,
            columns: Vec::new(),
            constraints: Vec::new(),
            indexes: Vec::new(),
            triggers: Vec::new(),
        }
    }

    /// Sets the owner.
    #[must_use]
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Sets the tablespace.
    #[must_use]
    pub fn tablespace(mut self, tablespace: impl Into<String>) -> Self {
        self.tablespace = tablespace.into();
        self
    }

    /// Sets the table comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Appends a column.
    #[must_use]
    pub fn column(mut self, column: ColumnDescription) -> Self {
        self.columns.push(column);
        self
    }

    /// Appends a constraint description.
    #[must_use]
    pub fn constraint(mut self, constraint: ConstraintDescription) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Appends an index description.
    #[must_use]
    pub fn index(mut self, index: IndexDescription) -> Self {
        self.indexes.push(index);
        self
    }

    /// Appends a trigger description.
    #[must_use]
    pub fn trigger(mut self, trigger: TriggerDescription) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Gets a column by name.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&ColumnDescription> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Gets a mutable column by name.
    #[must_use]
    pub fn get_column_mut(&mut self, name: &str) -> Option<&mut ColumnDescription> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Returns the schema-qualified table name.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.schema.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.schema, self.name)
        }
    }
}
