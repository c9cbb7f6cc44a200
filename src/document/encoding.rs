//! Latin-1 transcoding for the built-in PDF fonts.
//!
//! The standard Type 1 fonts only cover a single-byte encoding, so every
//! character is mapped into the Latin-1 range before layout. Unsupported
//! characters never cause a failure; they are substituted according to a
//! [`SubstitutionPolicy`].

/// What to do with characters outside the Latin-1 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstitutionPolicy {
    /// Replace every unsupported character with the given character.
    Replace(char),
    /// Map common typographic characters to ASCII look-alikes first,
    /// then replace whatever is left.
    Transliterate(char),
}

impl Default for SubstitutionPolicy {
    fn default() -> Self {
        Self::Replace('?')
    }
}

impl SubstitutionPolicy {
    fn replacement(&self) -> char {
        match self {
            Self::Replace(c) | Self::Transliterate(c) => *c,
        }
    }
}

/// Transcode `text` so that every character is printable Latin-1.
///
/// Tabs become four spaces. Other control characters (including the C1
/// block 0x80..0x9F) count as unsupported.
pub fn to_latin1(text: &str, policy: SubstitutionPolicy) -> String {
    let replacement = policy.replacement();
    let mut out = String::with_capacity(text.len());

    for ch in text.chars() {
        if ch == '\t' {
            out.push_str("    ");
            continue;
        }
        if is_printable_latin1(ch) {
            out.push(ch);
            continue;
        }
        if let SubstitutionPolicy::Transliterate(_) = policy {
            if let Some(ascii) = transliterate(ch) {
                out.push_str(ascii);
                continue;
            }
        }
        out.push(replacement);
    }

    out
}

pub fn is_printable_latin1(ch: char) -> bool {
    let code = ch as u32;
    (0x20..0x7F).contains(&code) || (0xA0..=0xFF).contains(&code)
}

fn transliterate(ch: char) -> Option<&'static str> {
    let mapped = match ch {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => "'",
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => "\"",
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2212}' => "-",
        '\u{2014}' | '\u{2015}' => "--",
        '\u{2026}' => "...",
        '\u{2022}' | '\u{2023}' | '\u{2043}' => "\u{B7}",
        '\u{2002}' | '\u{2003}' | '\u{2009}' | '\u{200A}' | '\u{202F}' => " ",
        '\u{200B}' | '\u{FEFF}' => "",
        '\u{20B9}' => "Rs.",
        '\u{20AC}' => "EUR",
        '\u{2122}' => "TM",
        _ => return None,
    };
    Some(mapped)
}
