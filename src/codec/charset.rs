use std::fmt;

use hvalue_utils::macros::match_ignore_ascii_case_str;

/// A character set that encoded header values can be decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Charset {
    /// `utf-8`
    Utf8,
    /// `us-ascii`
    UsAscii,
    /// `iso-8859-1`, also known as `latin1`
    Iso8859_1,
    /// `iso-8859-15`, also known as `latin9`
    Iso8859_15,
    /// `utf-16`, byte order taken from a BOM and little endian without one
    Utf16,
    /// `utf-16le`
    Utf16Le,
    /// `utf-16be`
    Utf16Be,
}

impl Charset {
    /// Looks up a charset by one of its (ASCII case insensitive) names.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        match_ignore_ascii_case_str!(match (name) {
            "utf-8" | "utf8" => Some(Self::Utf8),
            "us-ascii" | "ascii" => Some(Self::UsAscii),
            "iso-8859-1" | "iso8859-1" | "latin1" => Some(Self::Iso8859_1),
            "iso-8859-15" | "iso8859-15" | "latin9" => Some(Self::Iso8859_15),
            "utf-16" | "utf16" | "unicode" => Some(Self::Utf16),
            "utf-16le" => Some(Self::Utf16Le),
            "utf-16be" | "unicodefffe" => Some(Self::Utf16Be),
            _ => None,
        })
    }

    /// The canonical name of this charset.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::UsAscii => "us-ascii",
            Self::Iso8859_1 => "iso-8859-1",
            Self::Iso8859_15 => "iso-8859-15",
            Self::Utf16 => "utf-16",
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
        }
    }

    /// Decodes `bytes`, replacing malformed sequences with U+FFFD.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::UsAscii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { b as char } else { '\u{FFFD}' })
                .collect(),
            Self::Iso8859_1 => bytes.iter().map(|&b| b as char).collect(),
            Self::Iso8859_15 => bytes.iter().map(|&b| latin9_char(b)).collect(),
            Self::Utf16 => match bytes {
                [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
                [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
                _ => decode_utf16(bytes, u16::from_le_bytes),
            },
            Self::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
            Self::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// ISO-8859-15 differs from ISO-8859-1 in eight positions.
fn latin9_char(b: u8) -> char {
    match b {
        0xA4 => '€',
        0xA6 => 'Š',
        0xA8 => 'š',
        0xB4 => 'Ž',
        0xB8 => 'ž',
        0xBC => 'Œ',
        0xBD => 'œ',
        0xBE => 'Ÿ',
        b => b as char,
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let chunks = bytes.chunks_exact(2);
    let trailing = !chunks.remainder().is_empty();
    let mut decoded: String =
        char::decode_utf16(chunks.map(|pair| unit([pair[0], pair[1]])))
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect();
    if trailing {
        decoded.push(char::REPLACEMENT_CHARACTER);
    }
    decoded
}
