//! Scanner for the header value grammar of RFC 7230 / RFC 2616.
//!
//! The scanner classifies a header value into tokens, quoted-strings and
//! single character separators. It never allocates: every [`Token`] is a
//! span into the scanned input. Linear white space between tokens is skipped.
//!
//! Most users want the typed values of this crate instead, the scanner is
//! exposed for those building their own header value types.

/// The classification of a scanned [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// One or more `tchar` characters.
    Token,
    /// A `"` delimited string, including its quotes.
    QuotedString,
    /// A single separator character such as `,` `;` `=` or `/`.
    Separator(u8),
    /// The input is exhausted.
    End,
    /// A character that is valid in no position, or an unterminated quoted-string.
    Invalid,
}

/// A classified span within the scanned input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    start: usize,
    len: usize,
}

impl Token {
    /// The classification of this token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Byte offset of the first character of this token.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Length in bytes of this token.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// `true` for [`TokenKind::End`] and [`TokenKind::Invalid`] tokens.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte offset right after the last character of this token.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }
}

/// `tchar`: any visible US-ASCII character except the separators.
#[must_use]
pub const fn is_token_byte(b: u8) -> bool {
    matches!(b, 0x21..=0x7e) && !is_separator_byte(b)
}

const fn is_separator_byte(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')'
            | b'<'
            | b'>'
            | b'@'
            | b','
            | b';'
            | b':'
            | b'\\'
            | b'"'
            | b'/'
            | b'['
            | b']'
            | b'?'
            | b'='
            | b'{'
            | b'}'
    )
}

const fn is_whitespace_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Scans the next token of `input`, starting at byte offset `start`.
///
/// Leading white space is skipped, the returned token starts at the
/// first character that is not white space.
#[must_use]
pub fn next_token(input: &str, start: usize) -> Token {
    let mut lexer = Lexer { input, pos: start };
    lexer.next_token()
}

/// `true` if `s` is a non-empty run of `tchar` characters.
#[must_use]
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_token_byte)
}

/// `true` if `s` is exactly one quoted-string, quotes included.
#[must_use]
pub fn is_quoted_string(s: &str) -> bool {
    scan_quoted(s.as_bytes(), 0) == Some(s.len())
}

/// `true` if `s` is exactly one (possibly nested) comment, parentheses included.
#[must_use]
pub fn is_comment(s: &str) -> bool {
    scan_comment(s.as_bytes(), 0) == Some(s.len())
}

/// Returns the end offset of the quoted-string starting at `start`.
fn scan_quoted(bytes: &[u8], start: usize) -> Option<usize> {
    if bytes.get(start) != Some(&b'"') {
        return None;
    }
    let mut i = start + 1;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'"' => return Some(i + 1),
            b'\\' => {
                // an escaped character must exist and cannot be a line break
                match bytes.get(i + 1) {
                    None | Some(b'\r' | b'\n') => return None,
                    Some(_) => i += 2,
                }
            }
            b'\r' | b'\n' => return None,
            _ => i += 1,
        }
    }
    None
}

/// Returns the end offset of the comment starting at `start`.
fn scan_comment(bytes: &[u8], start: usize) -> Option<usize> {
    if bytes.get(start) != Some(&b'(') {
        return None;
    }
    let mut depth = 1usize;
    let mut i = start + 1;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            b'\\' => i += 1,
            b'\r' | b'\n' => return None,
            _ => (),
        }
        i += 1;
    }
    None
}

/// A cursor over a single header value.
///
/// The lexer is [`Copy`]: look-ahead is done by scanning a copy
/// and only committing it once the look-ahead matched.
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a lexer positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// The complete input scanned by this lexer.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// Current byte offset within the input.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.input.as_bytes();
        while bytes.get(self.pos).copied().is_some_and(is_whitespace_byte) {
            self.pos += 1;
        }
    }

    /// Scans and consumes the next token.
    ///
    /// [`TokenKind::End`] and [`TokenKind::Invalid`] tokens consume nothing.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let start = self.pos;
        let bytes = self.input.as_bytes();

        let Some(&b) = bytes.get(start) else {
            return Token {
                kind: TokenKind::End,
                start,
                len: 0,
            };
        };

        let (kind, end) = if b == b'"' {
            match scan_quoted(bytes, start) {
                Some(end) => (TokenKind::QuotedString, end),
                None => (TokenKind::Invalid, start),
            }
        } else if is_token_byte(b) {
            let len = bytes[start..]
                .iter()
                .take_while(|b| is_token_byte(**b))
                .count();
            (TokenKind::Token, start + len)
        } else if is_separator_byte(b) {
            (TokenKind::Separator(b), start + 1)
        } else {
            (TokenKind::Invalid, start)
        };

        self.pos = end;
        Token {
            kind,
            start,
            len: end - start,
        }
    }

    /// The text spanned by `token`.
    #[must_use]
    pub fn text(&self, token: Token) -> &'a str {
        self.input.get(token.start..token.end()).unwrap_or_default()
    }

    /// `true` if only white space remains.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.input.as_bytes()[self.pos.min(self.input.len())..]
            .iter()
            .all(|b| is_whitespace_byte(*b))
    }

    /// Consumes `sep` if it is the next non white space character.
    pub fn eat(&mut self, sep: u8) -> bool {
        let mut ahead = *self;
        ahead.skip_whitespace();
        if ahead.input.as_bytes().get(ahead.pos) == Some(&sep) {
            self.pos = ahead.pos + 1;
            true
        } else {
            false
        }
    }

    /// `true` if `sep` is the next non white space character.
    #[must_use]
    pub fn peek_is(&self, sep: u8) -> bool {
        let mut ahead = *self;
        ahead.eat(sep)
    }

    fn read_kind(&mut self, kind: TokenKind) -> Option<&'a str> {
        let mut ahead = *self;
        let token = ahead.next_token();
        if token.kind == kind {
            *self = ahead;
            Some(self.text(token))
        } else {
            None
        }
    }

    /// Consumes the next token if it is a [`TokenKind::Token`].
    pub fn read_token(&mut self) -> Option<&'a str> {
        self.read_kind(TokenKind::Token)
    }

    /// Consumes the next token if it is a [`TokenKind::QuotedString`],
    /// the returned text includes the quotes.
    pub fn read_quoted_string(&mut self) -> Option<&'a str> {
        self.read_kind(TokenKind::QuotedString)
    }

    /// Consumes the next token if it is either a token or a quoted-string.
    pub fn read_token_or_quoted_string(&mut self) -> Option<&'a str> {
        self.read_token().or_else(|| self.read_quoted_string())
    }

    /// Consumes a run of ASCII digits, without regard for token boundaries.
    ///
    /// `0-499` yields `0`, leaving `-499` to be scanned.
    pub fn read_number(&mut self) -> Option<u64> {
        let mut ahead = *self;
        ahead.skip_whitespace();
        let start = ahead.pos;
        let len = ahead.input.as_bytes()[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if len == 0 {
            return None;
        }
        let n = ahead.input.get(start..start + len)?.parse().ok()?;
        self.pos = start + len;
        Some(n)
    }

    /// Consumes a comment, the returned text includes the outer parentheses.
    pub fn read_comment(&mut self) -> Option<&'a str> {
        let mut ahead = *self;
        ahead.skip_whitespace();
        let start = ahead.pos;
        let end = scan_comment(ahead.input.as_bytes(), start)?;
        self.pos = end;
        self.input.get(start..end)
    }

    /// Consumes all remaining input, trimmed of surrounding white space.
    pub fn rest(&mut self) -> &'a str {
        self.skip_whitespace();
        let rest = self.input.get(self.pos..).unwrap_or_default();
        self.pos = self.input.len();
        rest.trim_end_matches([' ', '\t', '\r', '\n'])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut kinds = Vec::new();
        loop {
            let token = lexer.next_token();
            kinds.push(token.kind());
            if token.is_empty() {
                return kinds;
            }
        }
    }

    #[test]
    fn test_scan_sequence() {
        assert_eq!(
            kinds(" text/html ; q=0.5"),
            vec![
                TokenKind::Token,
                TokenKind::Separator(b'/'),
                TokenKind::Token,
                TokenKind::Separator(b';'),
                TokenKind::Token,
                TokenKind::Separator(b'='),
                TokenKind::Token,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_next_token_offsets() {
        let token = next_token("  abc, d", 0);
        assert_eq!(token.kind(), TokenKind::Token);
        assert_eq!(token.start(), 2);
        assert_eq!(token.len(), 3);

        let token = next_token("  abc, d", token.end());
        assert_eq!(token.kind(), TokenKind::Separator(b','));

        let token = next_token("abc", 3);
        assert_eq!(token.kind(), TokenKind::End);
        assert!(token.is_empty());
    }

    #[test]
    fn test_quoted_string() {
        let mut lexer = Lexer::new(r#""a \"b\" c", x"#);
        let token = lexer.next_token();
        assert_eq!(token.kind(), TokenKind::QuotedString);
        assert_eq!(lexer.text(token), r#""a \"b\" c""#);
        assert!(lexer.eat(b','));
        assert_eq!(lexer.read_token(), Some("x"));
        assert!(lexer.is_end());
    }

    #[test]
    fn test_quoted_string_invalid() {
        assert_eq!(kinds(r#""abc"#), vec![TokenKind::Invalid]);
        assert_eq!(kinds("\"a\r\nb\""), vec![TokenKind::Invalid]);
        assert_eq!(kinds(r#""abc\"#), vec![TokenKind::Invalid]);
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(kinds("é"), vec![TokenKind::Invalid]);
        assert_eq!(kinds("a\u{1}"), vec![TokenKind::Token, TokenKind::Invalid]);
    }

    #[test]
    fn test_is_token() {
        assert!(is_token("no-cache"));
        assert!(is_token("!#$%&'*+-.^_`|~09azAZ"));
        assert!(!is_token(""));
        assert!(!is_token("a b"));
        assert!(!is_token("a/b"));
        assert!(!is_token("ä"));
    }

    #[test]
    fn test_is_quoted_string() {
        assert!(is_quoted_string(r#""""#));
        assert!(is_quoted_string(r#""a\"b""#));
        assert!(!is_quoted_string(r#""a" "#));
        assert!(!is_quoted_string(r#"a"#));
        assert!(!is_quoted_string(r#"""""#));
    }

    #[test]
    fn test_comments() {
        assert!(is_comment("()"));
        assert!(is_comment("(a (nested) comment)"));
        assert!(is_comment(r"(escaped \) paren)"));
        assert!(!is_comment("(unbalanced"));
        assert!(!is_comment("(a))"));
        assert!(!is_comment("a"));

        let mut lexer = Lexer::new("  ( lalala ) rest");
        assert_eq!(lexer.read_comment(), Some("( lalala )"));
        assert_eq!(lexer.read_token(), Some("rest"));
    }

    #[test]
    fn test_read_number() {
        let mut lexer = Lexer::new(" 0-499/1234");
        assert_eq!(lexer.read_number(), Some(0));
        assert!(lexer.eat(b'-'));
        assert_eq!(lexer.read_number(), Some(499));
        assert!(lexer.eat(b'/'));
        assert_eq!(lexer.read_number(), Some(1234));
        assert!(lexer.is_end());

        let mut lexer = Lexer::new("x1");
        assert_eq!(lexer.read_number(), None);
        assert_eq!(lexer.position(), 0);

        let mut lexer = Lexer::new("99999999999999999999999");
        assert_eq!(lexer.read_number(), None);
    }

    #[test]
    fn test_look_ahead_does_not_consume() {
        let mut lexer = Lexer::new("\"quoted\"");
        assert_eq!(lexer.read_token(), None);
        assert!(!lexer.peek_is(b';'));
        assert_eq!(lexer.read_quoted_string(), Some("\"quoted\""));
    }

    #[test]
    fn test_rest() {
        let mut lexer = Lexer::new("Basic   dXNlcjpwYXNz  \t");
        assert_eq!(lexer.read_token(), Some("Basic"));
        assert_eq!(lexer.rest(), "dXNlcjpwYXNz");
        assert!(lexer.is_end());
        assert_eq!(lexer.rest(), "");
    }

    #[quickcheck_macros::quickcheck]
    fn scanning_always_terminates(input: String) -> bool {
        let mut lexer = Lexer::new(&input);
        for _ in 0..=input.len() {
            if lexer.next_token().is_empty() {
                return true;
            }
        }
        false
    }
}
