//! Parsing of `id` and `id:scope` references.
//!
//! Tables and rows are addressed by a hexadecimal id with an optional scope
//! after a colon. A scope written as `^80` refers to the column atom `80`;
//! the caret is stripped and the number used as is.

/// Parses `text` as `id` or `id:scope`, returning `(id, scope)`.
///
/// A missing scope is returned as `0` so that callers can substitute their
/// default. Malformed numbers never fail; see [`parse_hex`].
///
/// # Examples
///
/// ```
/// use mork::address::parse_scope_id;
///
/// assert_eq!(parse_scope_id("1"), (1, 0));
/// assert_eq!(parse_scope_id("1F:^80"), (0x1F, 0x80));
/// assert_eq!(parse_scope_id("2:cards"), (2, 0xCA));
/// ```
#[must_use]
pub fn parse_scope_id(text: &str) -> (i32, i32) {
    match text.split_once(':') {
        Some((id, scope)) => {
            let scope = match scope.strip_prefix('^') {
                Some(rest) if !rest.is_empty() => rest,
                _ => scope,
            };
            (parse_hex(id), parse_hex(scope))
        }
        None => (parse_hex(text), 0),
    }
}

/// Best-effort hexadecimal parse.
///
/// Leading whitespace and one optional sign are accepted, then as many hex
/// digits as follow. Parsing stops at the first other character; text with
/// no digits yields `0`. The digits are read into 64 bits, saturating on
/// overflow, and the low 32 bits are kept as a signed id. So `-1` and
/// `FFFFFFFF` both give `-1`, and `123456789` gives `0x23456789`.
///
/// # Examples
///
/// ```
/// use mork::address::parse_hex;
///
/// assert_eq!(parse_hex("80"), 0x80);
/// assert_eq!(parse_hex("1a:zz"), 0x1A);
/// assert_eq!(parse_hex("zz"), 0);
/// assert_eq!(parse_hex("-2"), -2);
/// assert_eq!(parse_hex("123456789"), 0x2345_6789);
/// ```
#[must_use]
pub fn parse_hex(text: &str) -> i32 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: u64 = 0;
    for digit in digits.chars().map_while(|c| c.to_digit(16)) {
        value = value.saturating_mul(16).saturating_add(u64::from(digit));
    }
    let value = if negative { value.wrapping_neg() } else { value };

    #[allow(clippy::cast_possible_truncation)]
    let low = value as u32;
    low.cast_signed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", (1, 0))]
    #[case("80", (0x80, 0))]
    #[case("1:80", (1, 0x80))]
    #[case("1:^80", (1, 0x80))]
    #[case("-1:^80", (-1, 0x80))]
    #[case("A:^", (0xA, 0))]
    #[case("", (0, 0))]
    #[case(":", (0, 0))]
    #[case("xyz:80", (0, 0x80))]
    fn parse_scope_id_cases(#[case] text: &str, #[case] expected: (i32, i32)) {
        assert_eq!(parse_scope_id(text), expected);
    }

    #[test]
    fn only_one_caret_is_stripped() {
        assert_eq!(parse_scope_id("1:^^80"), (1, 0));
    }

    #[test]
    fn split_happens_at_first_colon() {
        assert_eq!(parse_scope_id("2:3:4"), (2, 3));
    }

    #[rstest]
    #[case("ffffffff", -1)]
    #[case("7fffffff", i32::MAX)]
    #[case("123456789", 0x2345_6789)]
    #[case("123456789abcdef", 0x89AB_CDEF_u32.cast_signed())]
    #[case("11112222333344445", -1)]
    #[case("  10", 0x10)]
    #[case("+10", 0x10)]
    #[case("-", 0)]
    fn parse_hex_edge_cases(#[case] text: &str, #[case] expected: i32) {
        assert_eq!(parse_hex(text), expected);
    }
}
