//! Dotted field paths used to locate binding errors.

use std::fmt;

/// Location of a field inside a nested target, e.g. `items[2].name`.
///
/// The empty path denotes the target itself and displays as `<root>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    /// The path of the binding target itself.
    pub fn root() -> Self {
        FieldPath(String::new())
    }

    /// Path of the field `tag` below this one.
    pub fn child(&self, tag: &str) -> Self {
        if self.0.is_empty() {
            FieldPath(tag.to_string())
        } else {
            FieldPath(format!("{}.{}", self.0, tag))
        }
    }

    /// Path of the sequence element `index` below this one.
    pub fn index(&self, index: usize) -> Self {
        FieldPath(format!("{}[{}]", self.0, index))
    }

    /// Returns `true` for the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A borrowed, not yet rendered [`FieldPath`].
///
/// The binder threads a `Trail` through nested records and sequences and only
/// renders it into a `FieldPath` when an error is raised.
#[derive(Debug, Clone, Copy)]
pub enum Trail<'a> {
    Root,
    Field(&'a Trail<'a>, &'a str),
    Index(&'a Trail<'a>, usize),
}

impl<'a> Trail<'a> {
    /// The field `tag` below this trail.
    pub fn child(&'a self, tag: &'a str) -> Trail<'a> {
        Trail::Field(self, tag)
    }

    /// The sequence element `index` below this trail.
    pub fn index(&'a self, index: usize) -> Trail<'a> {
        Trail::Index(self, index)
    }

    /// Renders the owned path.
    pub fn to_path(&self) -> FieldPath {
        let mut out = String::new();
        self.render(&mut out);
        FieldPath(out)
    }

    fn render(&self, out: &mut String) {
        match self {
            Trail::Root => {}
            Trail::Field(parent, tag) => {
                parent.render(out);
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(tag);
            }
            Trail::Index(parent, index) => {
                parent.render(out);
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
}

impl fmt::Display for Trail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_path(), f)
    }
}
