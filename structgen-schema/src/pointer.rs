//! JSON pointers into a schema document.
//!
//! Only the structural keywords the transpiler walks are addressable:
//! `definitions`/`$defs`, `properties`, `items` and `additionalProperties`.
//! Pointers always render in canonical form, so two spellings that address
//! the same node compare equal.

use std::fmt;

/// One step of a pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// `definitions/<name>` (or `$defs/<name>`).
    Definition(String),
    /// `properties/<name>`.
    Property(String),
    /// `items`.
    Items,
    /// `additionalProperties`.
    AdditionalProperties,
}

/// A canonical pointer from a document root to one of its nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsonPointer {
    segments: Vec<Segment>,
}

impl JsonPointer {
    /// Returns the pointer to the document root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses the fragment part of a reference (the text after `#`).
    ///
    /// Returns `None` if the fragment does not follow the supported grammar.
    #[must_use]
    pub fn parse_fragment(fragment: &str) -> Option<Self> {
        if fragment.is_empty() || fragment == "/" {
            return Some(Self::root());
        }
        let rest = fragment.strip_prefix('/')?;
        let mut tokens = rest.split('/');
        let mut segments = Vec::new();

        while let Some(token) = tokens.next() {
            let segment = match token {
                "definitions" | "$defs" => Segment::Definition(unescape(tokens.next()?)),
                "properties" => Segment::Property(unescape(tokens.next()?)),
                "items" => Segment::Items,
                "additionalProperties" => Segment::AdditionalProperties,
                _ => return None,
            };
            segments.push(segment);
        }

        Some(Self { segments })
    }

    /// Returns a new pointer with `segment` appended.
    #[must_use]
    pub fn join(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Returns the segments from the root.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns true if this is the document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the nearest definition or property key on the path, so the
    /// items of `#/definitions/list` are keyed `list`.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|segment| match segment {
            Segment::Definition(name) | Segment::Property(name) => Some(name.as_str()),
            Segment::Items | Segment::AdditionalProperties => None,
        })
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#")?;
        for segment in &self.segments {
            match segment {
                Segment::Definition(name) => write!(f, "/definitions/{}", escape(name))?,
                Segment::Property(name) => write!(f, "/properties/{}", escape(name))?,
                Segment::Items => f.write_str("/items")?,
                Segment::AdditionalProperties => f.write_str("/additionalProperties")?,
            }
        }
        Ok(())
    }
}

fn escape(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn unescape(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}
