//! Markup lexer - turns a template string into a flat token stream.
//!
//! The lexer is a total function: malformed markup never fails, it degrades
//! into best-effort tokens. An unterminated comment consumes the rest of the
//! document, an unterminated tag yields a token built from whatever was
//! accumulated, and the cursor is pinned at the input length on EOF.
//!
//! The token stream's consumer (the template compiler) lives upstream; this
//! module only produces the stream.

use super::token::{Attribute, AttributeMap, TagFlags, TagToken, Token};

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

/// Tokenize a markup string into an ordered token stream.
///
/// # Example
///
/// ```
/// use cinder_ui::compiler::{tokenize, Token};
///
/// let tokens = tokenize("<div class='a'>hi</div>");
/// assert_eq!(tokens.len(), 3);
/// assert!(matches!(&tokens[1], Token::Text { value } if value == "hi"));
/// ```
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut state = LexState {
        input,
        current: 0,
        tokens: Vec::new(),
    };
    state.run();
    state.tokens
}

/// Transient lexer state, owned by a single `tokenize` call.
///
/// `current` is a byte cursor that only moves forward and always sits on a
/// UTF-8 boundary: markers are ASCII and every other advance steps by a full
/// code point.
struct LexState<'src> {
    input: &'src str,
    current: usize,
    tokens: Vec<Token>,
}

impl LexState<'_> {
    fn run(&mut self) {
        let bytes = self.input.as_bytes();
        while self.current < bytes.len() {
            // Text until the next tag or comment opener
            if bytes[self.current] != b'<' {
                self.lex_text();
                continue;
            }

            // Comment opener?
            if self.input[self.current..].starts_with(COMMENT_START) {
                self.lex_comment();
                continue;
            }

            // Neither text nor comment: treat as a tag
            self.lex_tag();
        }
    }

    /// Next code point at `pos`, or `None` at (or past) end of input.
    fn peek(&self, pos: usize) -> Option<char> {
        self.input.get(pos..).and_then(|rest| rest.chars().next())
    }

    /// Find the nearest tag or comment opener at or after `from`.
    ///
    /// A tag opener is `<`, an optional `/`, then an ASCII letter; a comment
    /// opener is `<!--`. A `<` followed by anything else is plain text.
    fn find_opener(&self, from: usize) -> Option<usize> {
        let bytes = self.input.as_bytes();
        for pos in from..bytes.len() {
            if bytes[pos] != b'<' {
                continue;
            }
            if bytes[pos + 1..].starts_with(b"!--") {
                return Some(pos);
            }
            let mut name_at = pos + 1;
            if bytes.get(name_at) == Some(&b'/') {
                name_at += 1;
            }
            if bytes.get(name_at).is_some_and(u8::is_ascii_alphabetic) {
                return Some(pos);
            }
        }
        None
    }

    fn lex_text(&mut self) {
        let start = self.current;
        match self.find_opener(start) {
            None => {
                // Only text left
                self.tokens.push(Token::Text {
                    value: self.input[start..].to_string(),
                });
                self.current = self.input.len();
            }
            Some(end) if end != start => {
                self.tokens.push(Token::Text {
                    value: self.input[start..end].to_string(),
                });
                self.current = end;
            }
            // Zero-length span: the opener sits right at the cursor
            Some(_) => {}
        }
    }

    fn lex_comment(&mut self) {
        let start = self.current + COMMENT_START.len();
        match self.input[start..].find(COMMENT_END) {
            None => {
                // Unterminated: the rest of the document is the comment
                self.tokens.push(Token::Comment {
                    value: self.input[start..].to_string(),
                });
                self.current = self.input.len();
            }
            Some(rel) => {
                let end = start + rel;
                self.tokens.push(Token::Comment {
                    value: self.input[start..end].to_string(),
                });
                self.current = end + COMMENT_END.len();
            }
        }
    }

    fn lex_tag(&mut self) {
        let len = self.input.len();

        // `</` opens a closing tag
        let closing_start = self.peek(self.current + 1) == Some('/');
        self.current += if closing_start { 2 } else { 1 };

        let tag_index = self.lex_tag_name();
        self.lex_attributes(tag_index);

        // `/>` closes a self-closing tag
        let closing_end = self.peek(self.current) == Some('/');
        self.current = len.min(self.current + if closing_end { 2 } else { 1 });

        let Some(Token::Tag(tag)) = self.tokens.get_mut(tag_index) else {
            return;
        };
        if closing_start {
            tag.flags |= TagFlags::CLOSE_START;
        }
        if closing_end {
            tag.flags |= TagFlags::CLOSE_END;
        }
    }

    /// Scan the tag name and push the tag token shell.
    ///
    /// The shell is pushed before attributes are parsed so partially built
    /// tags still appear in document order. Returns the shell's index.
    fn lex_tag_name(&mut self) -> usize {
        let start = self.current;
        let mut current = self.current;
        while let Some(ch) = self.peek(current) {
            if ch == '/' || ch == '>' || ch == ' ' {
                break;
            }
            current += ch.len_utf8();
        }
        self.tokens.push(Token::Tag(TagToken::shell(
            self.input[start..current].to_string(),
        )));
        self.current = current;
        self.tokens.len() - 1
    }

    fn lex_attributes(&mut self, tag_index: usize) {
        let len = self.input.len();
        let mut current = self.current;
        let mut attributes = AttributeMap::new();

        while let Some(ch) = self.peek(current) {
            // End of the tag
            if ch == '>' || (ch == '/' && self.peek(current + 1) == Some('>')) {
                break;
            }

            // Skip whitespace between attributes
            if ch == ' ' {
                current += 1;
                continue;
            }

            // Attribute name, up to `=` or a terminator
            let name_start = current;
            let mut no_value = false;
            while let Some(ch) = self.peek(current) {
                if ch == '=' {
                    break;
                }
                if ch == ' ' || ch == '>' || (ch == '/' && self.peek(current + 1) == Some('>')) {
                    no_value = true;
                    break;
                }
                current += ch.len_utf8();
            }
            let raw_name = &self.input[name_start..current];

            if no_value {
                // Present without a value: recorded with an empty value;
                // valueless attributes are never colon-split
                attributes.insert(
                    raw_name.to_string(),
                    Attribute {
                        name: raw_name.to_string(),
                        value: String::new(),
                        arg: None,
                    },
                );
                continue;
            }

            // Step past the `=` (no-op when the name ran into EOF)
            current = len.min(current + 1);

            // Quoted values end at the matching quote, unquoted ones at a space
            let delimiter = match self.peek(current) {
                Some(quote @ ('\'' | '"')) => {
                    current += 1;
                    quote
                }
                _ => ' ',
            };

            let value_start = current;
            while let Some(ch) = self.peek(current) {
                if ch == delimiter {
                    break;
                }
                current += ch.len_utf8();
            }
            let value = self.input[value_start..current].to_string();

            // Step past the closing delimiter
            current = len.min(current + 1);

            // `name:arg` splits once; the map stays keyed by the raw name so
            // `v:foo` and `v:bar` occupy distinct entries
            let attribute = match raw_name.split_once(':') {
                Some((name, arg)) => Attribute {
                    name: name.to_string(),
                    value,
                    arg: Some(arg.to_string()),
                },
                None => Attribute {
                    name: raw_name.to_string(),
                    value,
                    arg: None,
                },
            };
            attributes.insert(raw_name.to_string(), attribute);
        }

        self.current = current;
        if let Some(Token::Tag(tag)) = self.tokens.get_mut(tag_index) {
            tag.attributes = attributes;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(tokens: &[Token], index: usize) -> &TagToken {
        match &tokens[index] {
            Token::Tag(tag) => tag,
            other => panic!("expected tag at {index}, got {other:?}"),
        }
    }

    #[test]
    fn test_text_only() {
        let tokens = tokenize("hello world");
        assert_eq!(
            tokens,
            vec![Token::Text {
                value: "hello world".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_angle_without_letter_is_text() {
        // `<` not followed by a letter (or `/` + letter) never opens a tag
        let tokens = tokenize("1 < 2");
        assert_eq!(
            tokens,
            vec![Token::Text {
                value: "1 < 2".to_string()
            }]
        );
    }

    #[test]
    fn test_self_closing_tag_with_attributes() {
        let tokens = tokenize("<name a=\"1\" b/>");
        assert_eq!(tokens.len(), 1);
        let tag = tag(&tokens, 0);
        assert_eq!(tag.name, "name");
        assert!(!tag.closing_start());
        assert!(tag.closing_end());
        assert_eq!(tag.attributes["a"].value, "1");
        assert_eq!(tag.attributes["b"].value, "");
        assert_eq!(tag.attributes["b"].arg, None);
    }

    #[test]
    fn test_attribute_argument_split() {
        let tokens = tokenize("<div v:bind=\"x\"></div>");
        let attr = &tag(&tokens, 0).attributes["v:bind"];
        assert_eq!(attr.name, "v");
        assert_eq!(attr.arg.as_deref(), Some("bind"));
        assert_eq!(attr.value, "x");
    }

    #[test]
    fn test_valueless_attribute_keeps_raw_name() {
        // No value means no colon split either
        let tokens = tokenize("<div v:bind>");
        let attr = &tag(&tokens, 0).attributes["v:bind"];
        assert_eq!(attr.name, "v:bind");
        assert_eq!(attr.arg, None);
    }

    #[test]
    fn test_colon_siblings_stay_distinct() {
        let tokens = tokenize("<div v:foo='1' v:bar='2'>");
        let attrs = &tag(&tokens, 0).attributes;
        assert_eq!(attrs["v:foo"].name, "v");
        assert_eq!(attrs["v:foo"].arg.as_deref(), Some("foo"));
        assert_eq!(attrs["v:bar"].name, "v");
        assert_eq!(attrs["v:bar"].arg.as_deref(), Some("bar"));
    }

    #[test]
    fn test_duplicate_attribute_last_wins() {
        let tokens = tokenize("<div a='1' a='2'>");
        let attrs = &tag(&tokens, 0).attributes;
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs["a"].value, "2");
    }

    #[test]
    fn test_unquoted_value_ends_at_space() {
        let tokens = tokenize("<a href=x y='2'>");
        let attrs = &tag(&tokens, 0).attributes;
        assert_eq!(attrs["href"].value, "x");
        assert_eq!(attrs["y"].value, "2");
    }

    #[test]
    fn test_unquoted_value_swallows_closer() {
        // Unquoted values terminate at spaces only, so with no space before
        // `>` the closer lands in the value and the tag runs to end of input
        let tokens = tokenize("<a href=x>");
        assert_eq!(tag(&tokens, 0).attributes["href"].value, "x>");
    }

    #[test]
    fn test_comment_between_text() {
        let tokens = tokenize("a<!--c-->b");
        assert_eq!(
            tokens,
            vec![
                Token::Text {
                    value: "a".to_string()
                },
                Token::Comment {
                    value: "c".to_string()
                },
                Token::Text {
                    value: "b".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_unterminated_comment_consumes_rest() {
        let tokens = tokenize("<!-- abc");
        assert_eq!(
            tokens,
            vec![Token::Comment {
                value: " abc".to_string()
            }]
        );
    }

    #[test]
    fn test_closing_tag() {
        let tokens = tokenize("</div>");
        let tag = tag(&tokens, 0);
        assert_eq!(tag.name, "div");
        assert!(tag.closing_start());
        assert!(!tag.closing_end());
    }

    #[test]
    fn test_malformed_tag_records_both_markers() {
        let tokens = tokenize("</br/>");
        let tag = tag(&tokens, 0);
        assert!(tag.closing_start());
        assert!(tag.closing_end());
    }

    #[test]
    fn test_empty_tag_name() {
        let tokens = tokenize("<>");
        assert_eq!(tag(&tokens, 0).name, "");
    }

    #[test]
    fn test_unterminated_tag_mid_attribute() {
        let tokens = tokenize("<div class=\"a");
        let tag = tag(&tokens, 0);
        assert_eq!(tag.name, "div");
        assert_eq!(tag.attributes["class"].value, "a");
    }

    #[test]
    fn test_unterminated_tag_mid_name() {
        let tokens = tokenize("<di");
        assert_eq!(tag(&tokens, 0).name, "di");
    }

    #[test]
    fn test_multibyte_content() {
        let tokens = tokenize("héllo <div å=\"ü\"/>wörld");
        assert_eq!(
            tokens[0],
            Token::Text {
                value: "héllo ".to_string()
            }
        );
        let tag = tag(&tokens, 1);
        assert_eq!(tag.attributes["å"].value, "ü");
        assert_eq!(
            tokens[2],
            Token::Text {
                value: "wörld".to_string()
            }
        );
    }

    #[test]
    fn test_end_to_end_sequence() {
        let tokens = tokenize("<div class='a'>hi<!--c--></div>");
        assert_eq!(tokens.len(), 4);

        let open = tag(&tokens, 0);
        assert_eq!(open.name, "div");
        assert_eq!(open.attributes["class"].value, "a");
        assert!(!open.closing_start());

        assert_eq!(
            tokens[1],
            Token::Text {
                value: "hi".to_string()
            }
        );
        assert_eq!(
            tokens[2],
            Token::Comment {
                value: "c".to_string()
            }
        );

        let close = tag(&tokens, 3);
        assert_eq!(close.name, "div");
        assert!(close.closing_start());
    }
}
