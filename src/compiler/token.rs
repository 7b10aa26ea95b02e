//! Token types produced by the lexer.
//!
//! Tokens form a closed variant so the consumer (the template compiler)
//! gets exhaustive-match safety: every token is text, a comment, or a tag.

use std::collections::HashMap;

use bitflags::bitflags;

bitflags! {
    /// Open/close markers observed on a tag.
    ///
    /// `CLOSE_START` is set when the tag opened with `</`, `CLOSE_END` when
    /// it ended with `/>`. Malformed input can set both; the lexer records
    /// what it saw rather than rejecting.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TagFlags: u8 {
        const CLOSE_START = 1 << 0;
        const CLOSE_END = 1 << 1;
    }
}

/// One parsed attribute of a tag.
///
/// When the raw attribute name contains a `:` (e.g. `v:bind`), the name is
/// split once: the part before the colon becomes [`Attribute::name`] and the
/// part after becomes [`Attribute::arg`]. Valueless attributes keep their raw
/// name unsplit and an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    pub arg: Option<String>,
}

/// Attribute map of a tag, keyed by the *raw, unsplit* attribute name.
///
/// Keying by the raw name is intentional: `v:foo` and `v:bar` occupy distinct
/// entries even though both report `name == "v"`. Keying by the post-split
/// name would silently collide them.
pub type AttributeMap = HashMap<String, Attribute>;

/// A tag token: name, attributes, and open/close markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagToken {
    pub name: String,
    pub attributes: AttributeMap,
    pub flags: TagFlags,
}

impl TagToken {
    pub(crate) fn shell(name: String) -> Self {
        Self {
            name,
            attributes: AttributeMap::new(),
            flags: TagFlags::empty(),
        }
    }

    /// True if the tag opened with `</`.
    pub fn closing_start(&self) -> bool {
        self.flags.contains(TagFlags::CLOSE_START)
    }

    /// True if the tag ended with `/>`.
    pub fn closing_end(&self) -> bool {
        self.flags.contains(TagFlags::CLOSE_END)
    }
}

/// One classified unit of a tokenized markup string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text { value: String },
    Comment { value: String },
    Tag(TagToken),
}
