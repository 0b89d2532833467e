//! Pure input predicates applied before any store access.
//!
//! Both checks are deliberately shallow: the name check only looks for
//! Hangul code points and the email check only looks for a
//! `something@something.something` shape. Neither normalises its input.

use std::sync::OnceLock;

use regex::Regex;

/// Hangul compatibility consonants, compatibility vowels and precomposed
/// syllables.
const DISALLOWED_SCRIPT_PATTERN: &str = r"[\x{3131}-\x{314E}\x{314F}-\x{3163}\x{AC00}-\x{D7A3}]";

/// One character outside the ECMAScript whitespace set. Unicode `\S` differs
/// on U+0085 and U+FEFF.
macro_rules! non_whitespace {
    () => {
        r"[^\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]"
    };
}

/// Unanchored: any substring with this shape is enough.
const EMAIL_SHAPE_PATTERN: &str = concat!(
    non_whitespace!(),
    "+@",
    non_whitespace!(),
    r"+\.",
    non_whitespace!(),
    "+"
);

static DISALLOWED_SCRIPT_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_SHAPE_RE: OnceLock<Regex> = OnceLock::new();

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern)
        .unwrap_or_else(|error| panic!("validation regex {pattern:?} failed to compile: {error}"))
}

fn disallowed_script_regex() -> &'static Regex {
    DISALLOWED_SCRIPT_RE.get_or_init(|| compile(DISALLOWED_SCRIPT_PATTERN))
}

fn email_shape_regex() -> &'static Regex {
    EMAIL_SHAPE_RE.get_or_init(|| compile(EMAIL_SHAPE_PATTERN))
}

/// Return `true` when `text` contains a Hangul jamo or syllable.
///
/// Matches U+3131–U+314E, U+314F–U+3163 and U+AC00–U+D7A3. Conjoining jamo
/// (U+1100 block) are not matched, so a decomposed syllable passes.
///
/// # Examples
/// ```
/// use user_registry::domain::contains_disallowed_script;
///
/// assert!(contains_disallowed_script("철수"));
/// assert!(!contains_disallowed_script("Alice"));
/// ```
pub fn contains_disallowed_script(text: &str) -> bool {
    disallowed_script_regex().is_match(text)
}

/// Return `true` when `text` contains a `non-ws@non-ws.non-ws` run.
///
/// This is a shape check, not address validation: `a@b.c@d` passes.
///
/// # Examples
/// ```
/// use user_registry::domain::is_valid_email_shape;
///
/// assert!(is_valid_email_shape("a@b.com"));
/// assert!(!is_valid_email_shape("not-an-email"));
/// ```
pub fn is_valid_email_shape(text: &str) -> bool {
    email_shape_regex().is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("철수")]
    #[case("Alice 가")]
    #[case("\u{AC00}")]
    #[case("\u{D7A3}")]
    #[case("ㄱ")]
    #[case("x\u{314E}")]
    #[case("\u{314F}")]
    #[case("\u{3163}y")]
    fn hangul_is_disallowed(#[case] text: &str) {
        assert!(contains_disallowed_script(text));
    }

    #[rstest]
    #[case("")]
    #[case("Alice")]
    #[case("O'Brien-Smith 42")]
    #[case("Zoë")]
    #[case("山田")]
    #[case("\u{3130}")]
    #[case("\u{3164}")]
    #[case("\u{D7A4}")]
    // Conjoining jamo spelling of 가.
    #[case("\u{1100}\u{1161}")]
    fn other_text_is_allowed(#[case] text: &str) {
        assert!(!contains_disallowed_script(text));
    }

    #[rstest]
    #[case("a@b.com")]
    #[case("first.last@example.co.uk")]
    #[case("a@b.c@d")]
    #[case("  padded a@b.c  ")]
    #[case("x@y.z.")]
    #[case("@@@.@")]
    // NEL is not whitespace for this check.
    #[case("a@b.\u{85}")]
    fn email_shape_accepts(#[case] text: &str) {
        assert!(is_valid_email_shape(text));
    }

    #[rstest]
    #[case("")]
    #[case("not-an-email")]
    #[case("a@bcom")]
    #[case("ab.com")]
    #[case("a.b@com")]
    #[case("a @b.com")]
    #[case("a@b .com")]
    #[case("@b.com")]
    #[case("a@b.")]
    #[case("\u{FEFF}@b.c")]
    #[case("a@\u{3000}.c")]
    #[case("a@b.\u{A0}")]
    fn email_shape_rejects(#[case] text: &str) {
        assert!(!is_valid_email_shape(text));
    }
}
