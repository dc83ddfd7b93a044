//! String helpers shared by the tree, the LaTeX codec and the compiler
//!
//! Atoms store letters in their mathematical-italic presentation form
//! (U+1D434 block, plus the Planck constant ℎ standing in for italic h).
//! Everything that leaves the tree as text goes through [`deitalify`].

const ITALIC_LOWER: u32 = 0x1d44e;
const ITALIC_UPPER: u32 = 0x1d434;
const ITALIC_GREEK_LOWER: u32 = 0x1d6fc;
const GREEK_LOWER: u32 = 0x3b1;
/// α through ς; upper-case Greek is not italicized.
const GREEK_ITALIC_SPAN: u32 = 18;

/// Presentation form of a single character.
pub fn italify_char(c: char) -> char {
    if c == 'h' {
        return 'ℎ';
    }
    let code = c as u32;
    let mapped = if c.is_ascii_lowercase() {
        code - 'a' as u32 + ITALIC_LOWER
    } else if c.is_ascii_uppercase() {
        code - 'A' as u32 + ITALIC_UPPER
    } else if (GREEK_LOWER..GREEK_LOWER + GREEK_ITALIC_SPAN).contains(&code) {
        code - GREEK_LOWER + ITALIC_GREEK_LOWER
    } else {
        return c;
    };
    char::from_u32(mapped).unwrap_or(c)
}

/// Inverse of [`italify_char`].
pub fn deitalify_char(c: char) -> char {
    if c == 'ℎ' {
        return 'h';
    }
    let code = c as u32;
    let mapped = if (ITALIC_LOWER..ITALIC_LOWER + 26).contains(&code) {
        code - ITALIC_LOWER + 'a' as u32
    } else if (ITALIC_UPPER..ITALIC_UPPER + 26).contains(&code) {
        code - ITALIC_UPPER + 'A' as u32
    } else if (ITALIC_GREEK_LOWER..ITALIC_GREEK_LOWER + GREEK_ITALIC_SPAN).contains(&code) {
        code - ITALIC_GREEK_LOWER + GREEK_LOWER
    } else {
        return c;
    };
    char::from_u32(mapped).unwrap_or(c)
}

pub fn italify(s: &str) -> String {
    s.chars().map(italify_char).collect()
}

pub fn deitalify(s: &str) -> String {
    s.chars().map(deitalify_char).collect()
}

/// Whether `name` is a digit or the decimal point, i.e. part of a number literal.
pub fn is_number_part(name: &str) -> bool {
    name == "." || (!name.is_empty() && name.chars().all(|c| c.is_ascii_digit()))
}

/// Give every bare integer literal an explicit fractional part (`3` → `3.0`).
///
/// A digit run is promoted only when it is not preceded by `.`, a digit, an
/// ASCII letter or `_` (so identifiers like `sum0` stay intact) and not
/// followed by `.` or a digit. Applying it twice is harmless.
pub fn ints_to_floats(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if !c.is_ascii_digit() {
            out.push(c);
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        out.extend(&chars[start..i]);
        let blocked_before = start > 0 && {
            let p = chars[start - 1];
            p == '.' || p == '_' || p.is_ascii_alphanumeric()
        };
        let blocked_after = chars.get(i).is_some_and(|&n| n == '.' || n.is_ascii_digit());
        if !blocked_before && !blocked_after {
            out.push_str(".0");
        }
    }
    out
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
