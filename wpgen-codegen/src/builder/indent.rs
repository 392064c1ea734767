//! Indentation configuration for code generation.

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Tab character.
    Tab,
    /// Two spaces.
    TwoSpaces,
}

impl Indent {
    /// Tab indentation (WordPress PHP coding standards).
    pub const PHP: Self = Self::Tab;

    /// Two-space continuation lines in SQL scripts.
    pub const SQL: Self = Self::TwoSpaces;

    /// Convert to the string representation for one indent level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tab => "\t",
            Self::TwoSpaces => "  ",
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::PHP
    }
}
