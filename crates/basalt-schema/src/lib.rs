//! Shared schema-description types for the Basalt database client.
//!
//! This crate holds the data model that the synthesis layer operates on:
//!
//! - **Descriptions** - read-only snapshots of tables and columns as
//!   fetched from the server, plus the editable copy the UI mutates
//! - **Dialect** - the closed set of SQL grammars Basalt can target
//! - **Type tokens** - tolerant decomposition of composite type strings
//!   like `varchar(255)` into base type and length
//! - **Values** - formatting and escaping of literal values into SQL text
//!
//! Nothing in this crate performs I/O or talks to a database; the host
//! application fetches descriptions and result rows, and `basalt-sqlgen`
//! turns them into statement text.

pub mod dialect;
pub mod table;
pub mod types;
pub mod value;

pub use dialect::Dialect;
pub use table::{
    ColumnDescription, ConstraintDescription, IndexDescription, TableDescription,
    TriggerDescription,
};
pub use types::{is_character_type, parse_type, TypeToken};
pub use value::{escape_text, format_scalar, quote_text};
