//! Group-management status codes
//!
//! The node reports the outcome of every group or peer operation as a
//! hex-like code string. This module owns the canonical message for each code.
//! The table is built once on first use and only ever read afterwards.
//!
//! Codes are matched verbatim; `"0x0A"` and `"0xa"` are different codes.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Code meaning the node accepted the operation.
pub const SUCCESS_CODE: &str = "0x0";

/// Message reported when the call never produced an envelope.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";

/// Message for codes absent from the table.
pub const UNKNOWN_CODE_MESSAGE: &str = "";

const GROUP_CODES: &[(&str, &str)] = &[
    ("0x0", "success"),
    ("0x1", "internal error"),
    ("0x2", "group already exists"),
    ("0x3", "group is already running"),
    ("0x4", "group is already stopped"),
    ("0x5", "group is already deleted"),
    ("0x6", "group not found"),
    ("0x7", "group operation failed"),
    ("0x8", "invalid params"),
    ("0x9", "peers already exist"),
    ("0xa", "peers not exist"),
];

static GROUP_CODE_MESSAGES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| GROUP_CODES.iter().copied().collect());

/// Canonical message for `code`, or [`UNKNOWN_CODE_MESSAGE`] if unmapped.
pub fn resolve(code: &str) -> &'static str {
    GROUP_CODE_MESSAGES
        .get(code)
        .copied()
        .unwrap_or(UNKNOWN_CODE_MESSAGE)
}

pub fn is_success(code: &str) -> bool {
    code == SUCCESS_CODE
}

/// Every mapped `(code, message)` pair in ascending code order.
pub fn known_codes() -> impl Iterator<Item = (&'static str, &'static str)> {
    GROUP_CODES.iter().copied()
}
