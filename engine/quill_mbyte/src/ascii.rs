//! ASCII-only character classes and case mapping.
//!
//! These ignore the locale on purpose: `isdigit()`-style library calls can
//! accept non-ASCII digits on some platforms and misbehave for values above
//! 255. All functions take decoded scalar values so they apply directly to
//! [`TextCursor::char_value`](crate::TextCursor::char_value); anything
//! outside ASCII is classified `false` and mapped to itself.

/// Space or tab. Unlike `char::is_whitespace`, excludes CR, LF and the rest.
#[inline]
pub const fn is_white(c: u32) -> bool {
    c == b' ' as u32 || c == b'\t' as u32
}

/// Space, tab, or NUL (end of a C-style line).
#[inline]
pub const fn is_white_or_nul(c: u32) -> bool {
    is_white(c) || c == 0
}

#[inline]
pub const fn is_digit(c: u32) -> bool {
    c.wrapping_sub(b'0' as u32) < 10
}

#[inline]
pub const fn is_lower(c: u32) -> bool {
    c.wrapping_sub(b'a' as u32) < 26
}

#[inline]
pub const fn is_upper(c: u32) -> bool {
    c.wrapping_sub(b'A' as u32) < 26
}

#[inline]
pub const fn is_alpha(c: u32) -> bool {
    is_upper(c) || is_lower(c)
}

#[inline]
pub const fn is_alnum(c: u32) -> bool {
    is_alpha(c) || is_digit(c)
}

#[inline]
pub const fn to_upper(c: u32) -> u32 {
    if is_lower(c) {
        c - (b'a' - b'A') as u32
    } else {
        c
    }
}

#[inline]
pub const fn to_lower(c: u32) -> u32 {
    if is_upper(c) {
        c + (b'a' - b'A') as u32
    } else {
        c
    }
}
