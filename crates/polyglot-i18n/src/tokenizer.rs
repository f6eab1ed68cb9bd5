//! Tokenizer for the restricted tag markup used in translations
//!
//! Recognized forms, tried in this order at every `<`:
//!
//! 1. paired tag `<b>text</b>`: content may not contain `<`, and the closing
//!    name matches the opening one case-insensitively;
//! 2. bare or self-closing tag `<br>`, `<br/>`, `<br />`;
//! 3. anything else, which stays literal text. A `<` that opens no tag is
//!    kept in the output rather than dropped.
//!
//! Tag names are ASCII letters only. Same-named nesting is not supported:
//! in `<b>a<b>b</b>c</b>` the inner pair matches, the outer opening tag
//! becomes a bare tag, and the trailing `</b>` stays text.

use serde::{Deserialize, Serialize};

/// Marker that `\n` and `/n` escapes turn into before scanning
pub const LINE_BREAK_TAG: &str = "<br>";

/// One segment of a parsed translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TranslationToken {
    /// Plain text run
    Text {
        /// The text
        content: String,
    },
    /// A tag with its inner text (empty for bare tags)
    Tag {
        /// Tag name as written in the opening tag
        #[serde(rename = "tag")]
        name: String,
        /// Inner text
        content: String,
    },
}

impl TranslationToken {
    /// Shorthand for a text token
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Shorthand for a tag token
    pub fn tag(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Tag {
            name: name.into(),
            content: content.into(),
        }
    }

    /// The token's text content
    pub fn content(&self) -> &str {
        match self {
            Self::Text { content } | Self::Tag { content, .. } => content,
        }
    }

    /// The tag name, if this is a tag
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::Tag { name, .. } => Some(name),
            Self::Text { .. } => None,
        }
    }
}

/// Replace the two-character escapes `\n` and `/n` with [`LINE_BREAK_TAG`]
pub fn expand_line_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if (c == '\\' || c == '/') && chars.peek() == Some(&'n') {
            chars.next();
            out.push_str(LINE_BREAK_TAG);
        } else {
            out.push(c);
        }
    }

    out
}

/// Expand line-break escapes, then tokenize
pub fn parse(text: &str) -> Vec<TranslationToken> {
    tokenize(&expand_line_breaks(text))
}

/// Split `text` into text and tag tokens.
///
/// Never returns an empty list: input that yields no tokens (the empty
/// string) comes back as a single text token.
pub fn tokenize(text: &str) -> Vec<TranslationToken> {
    let mut tokens = Scanner::new(text).run();
    if tokens.is_empty() {
        tokens.push(TranslationToken::text(text));
    }
    tokens
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    pending_text: String,
    tokens: Vec<TranslationToken>,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            pending_text: String::new(),
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<TranslationToken> {
        while self.pos < self.src.len() {
            let rest = &self.src[self.pos..];

            if rest.starts_with('<') {
                if let Some((token, consumed)) = paired_tag(rest).or_else(|| bare_tag(rest)) {
                    self.flush_text();
                    self.tokens.push(token);
                    self.pos += consumed;
                } else {
                    self.pending_text.push('<');
                    self.pos += 1;
                }
            } else {
                let run = rest.find('<').unwrap_or(rest.len());
                self.pending_text.push_str(&rest[..run]);
                self.pos += run;
            }
        }

        self.flush_text();
        self.tokens
    }

    fn flush_text(&mut self) {
        if !self.pending_text.is_empty() {
            let content = std::mem::take(&mut self.pending_text);
            self.tokens.push(TranslationToken::Text { content });
        }
    }
}

/// Length of the leading run of ASCII letters
fn name_len(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_alphabetic).count()
}

/// `<name>content</name>` at the start of `s`
fn paired_tag(s: &str) -> Option<(TranslationToken, usize)> {
    let after_lt = &s[1..];
    let len = name_len(after_lt);
    if len == 0 {
        return None;
    }
    let name = &after_lt[..len];
    let after_open = after_lt[len..].strip_prefix('>')?;

    let content_len = after_open.find('<').unwrap_or(after_open.len());
    let content = &after_open[..content_len];
    let closing = after_open[content_len..].strip_prefix("</")?;

    let close_len = name_len(closing);
    if !closing[..close_len].eq_ignore_ascii_case(name) {
        return None;
    }
    let tail = closing[close_len..].strip_prefix('>')?;

    let consumed = s.len() - tail.len();
    Some((TranslationToken::tag(name, content), consumed))
}

/// `<name>`, `<name/>` or `<name   />` at the start of `s`
fn bare_tag(s: &str) -> Option<(TranslationToken, usize)> {
    let after_lt = &s[1..];
    let len = name_len(after_lt);
    if len == 0 {
        return None;
    }
    let name = &after_lt[..len];

    let rest = after_lt[len..].trim_start();
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    let tail = rest.strip_prefix('>')?;

    let consumed = s.len() - tail.len();
    Some((TranslationToken::tag(name, ""), consumed))
}
