use unicode_normalization::UnicodeNormalization;

/// Maximum characters kept for the beneficiary name.
pub const MAX_NAME_CHARS: usize = 25;

/// Maximum characters kept for the beneficiary city.
pub const MAX_CITY_CHARS: usize = 15;

/// Uppercases `input`, strips diacritics, then keeps the first `max_chars`
/// characters.
///
/// Truncation runs last because decomposition and mark removal change the
/// character count.
///
/// ```
/// use pixcode::normalize_display_text;
///
/// assert_eq!("JOAO DA SILVA", normalize_display_text("João da Silva", 25));
/// assert_eq!("SAO", normalize_display_text("São Paulo", 3));
/// ```
#[must_use]
pub fn normalize_display_text(input: &str, max_chars: usize) -> String {
    input
        .to_uppercase()
        .nfd()
        .filter(|character| !is_combining_diacritic(*character))
        .take(max_chars)
        .collect()
}

// Combining Diacritical Marks block.
fn is_combining_diacritic(character: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&character)
}
