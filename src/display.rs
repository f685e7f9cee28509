//! Text rendering for words
//!
//! Every renderer takes the raw word; the caller picks the interpretation.

use crate::ast::Word;

/// `0x` followed by the uppercase hex digits of the raw bits
pub fn format_hex(w: Word) -> String {
    format!("0x{:X}", w.bits())
}

/// `0b` followed by the bits from 63 down to 0, leading zeros suppressed.
/// At least the final bit is always printed.
pub fn format_binary(w: Word) -> String {
    let bits = w.bits();
    let first = (0..64).rev().find(|&i| bits >> i & 1 == 1).unwrap_or(0);

    let mut out = String::with_capacity(first + 3);
    out.push_str("0b");
    for i in (0..=first).rev() {
        out.push(if bits >> i & 1 == 1 { '1' } else { '0' });
    }
    out
}

/// Six fractional digits, matching C's `%f`
pub fn format_float(w: Word) -> String {
    let v = w.float();
    let sign = if v.is_sign_negative() { "-" } else { "" };
    if v.is_nan() {
        format!("{}nan", sign)
    } else if v.is_infinite() {
        format!("{}inf", sign)
    } else {
        format!("{:.6}", v)
    }
}

/// Final result rendering: always signed decimal
pub fn format_result(w: Word) -> String {
    w.to_string()
}
