use serde::Serialize;

/// Module reference as written in source, before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawReference {
    /// The reference text (dotted name, specifier, or `/`-joined module path)
    pub text: String,
    /// Classification of the reference
    pub kind: ReferenceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// `import foo.bar` / `from 'react'` / `import "fmt"`
    AbsoluteModule,
    /// `from ..pkg import x` / `'./util'` / `use super::x` / `import "./x"`
    ///
    /// `level` counts leading dots for Python and is 0 elsewhere.
    RelativeModule { level: usize },
    /// `mod name;` (Rust)
    ModDeclaration,
}

impl RawReference {
    pub fn absolute(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ReferenceKind::AbsoluteModule,
        }
    }

    pub fn relative(text: impl Into<String>) -> Self {
        Self::relative_with_level(text, 0)
    }

    pub fn relative_with_level(text: impl Into<String>, level: usize) -> Self {
        Self {
            text: text.into(),
            kind: ReferenceKind::RelativeModule { level },
        }
    }

    pub fn mod_declaration(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ReferenceKind::ModDeclaration,
        }
    }

    /// Classify a path-like specifier: `.`- or `/`-led is relative.
    pub fn from_specifier(spec: &str) -> Self {
        if spec.starts_with('.') || spec.starts_with('/') {
            Self::relative(spec)
        } else {
            Self::absolute(spec)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specifier_classification() {
        assert_eq!(
            RawReference::from_specifier("./util").kind,
            ReferenceKind::RelativeModule { level: 0 }
        );
        assert_eq!(
            RawReference::from_specifier("/lib/x").kind,
            ReferenceKind::RelativeModule { level: 0 }
        );
        assert_eq!(
            RawReference::from_specifier("react").kind,
            ReferenceKind::AbsoluteModule
        );
    }
}
