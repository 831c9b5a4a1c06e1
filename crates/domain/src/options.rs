//! Select-input option rows.

use serde::Serialize;

/// One `{value, label}` row for a form select input.
///
/// `value` is the wire code, `label` the display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}
