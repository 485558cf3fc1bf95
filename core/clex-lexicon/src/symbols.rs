//! Single-character grammatical symbols (punctuators) of C.

pub const GRAMMATICAL_SYMBOLS: &[char] = &[
    '!', '"', '\\', '%', '^', '&', '*', '(',
    ')', '|', '[', ']', '{', '}', '-', '+',
    '=', '/', ',', '.', ':', ';', '?', '<',
    '>', '\'', '#', '~',
];

pub fn is_grammatical_symbol(c: char) -> bool {
    GRAMMATICAL_SYMBOLS.contains(&c)
}

/// True if `word` is exactly one grammatical symbol.
pub fn is_symbol_word(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if is_grammatical_symbol(c))
}
