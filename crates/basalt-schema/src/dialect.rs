//! Supported SQL dialects.

use serde::{Deserialize, Serialize};

/// The SQL grammars Basalt can synthesize DDL for.
///
/// Schema-less stores are excluded by construction: a connection without a
/// dialect variant never reaches the DDL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    /// PostgreSQL.
    Postgres,
    /// MySQL / MariaDB.
    MySql,
    /// Microsoft SQL Server.
    SqlServer,
}

impl Dialect {
    /// Returns the dialect name as used in connection metadata.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::MySql => "mysql",
            Self::SqlServer => "sqlserver",
        }
    }

    /// Returns whether this dialect can alter a column default.
    ///
    /// SQL Server binds defaults through named constraints, so default
    /// alteration is left to the user there.
    #[must_use]
    pub fn supports_default_alter(self) -> bool {
        !matches!(self, Self::SqlServer)
    }

    /// Returns whether a column comment can ride along inside the column
    /// alteration statement instead of needing its own statement.
    #[must_use]
    pub fn supports_inline_comment(self) -> bool {
        matches!(self, Self::MySql)
    }
}
