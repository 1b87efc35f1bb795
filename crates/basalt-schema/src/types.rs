//! Composite type token parsing.
//!
//! Servers report column types as free strings (`varchar(255)`,
//! `timestamp with time zone`, vendor extensions). The editor only needs
//! to split off a trailing parenthesized length; everything else passes
//! through untouched so unknown types never block an edit.

use serde::{Deserialize, Serialize};

/// Base types that take a character length clause.
const CHARACTER_TYPES: [&str; 4] = ["varchar", "char", "character varying", "character"];

/// A decomposed composite type string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeToken {
    /// Base type name, trimmed when a length was split off.
    pub base: String,
    /// Parenthesized length, when present and a positive integer.
    pub length: Option<u32>,
}

/// Splits a composite type string into base type and optional length.
///
/// Only the `base(length)` shape with a trailing positive integer is
/// recognized; anything richer (`decimal(10,2)`, arrays, vendor syntax)
/// passes through unchanged with no length. This function never fails.
#[must_use]
pub fn parse_type(raw: &str) -> TypeToken {
    if let Some(stripped) = raw.trim().strip_suffix(')') {
        if let Some((base, length)) = stripped.rsplit_once('(') {
            if let Ok(length) = length.trim().parse::<u32>() {
                if length >= 1 {
                    return TypeToken {
                        base: base.trim().to_string(),
                        length: Some(length),
                    };
                }
            }
        }
    }
    TypeToken {
        base: raw.to_string(),
        length: None,
    }
}

/// Returns whether `base` belongs to the character family that carries a
/// length clause in rendered DDL.
#[must_use]
pub fn is_character_type(base: &str) -> bool {
    let base = base.trim();
    CHARACTER_TYPES.iter().any(|t| base.eq_ignore_ascii_case(t))
}
