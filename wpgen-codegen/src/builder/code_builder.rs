//! Code builder utility for generating properly indented code.

use super::Indent;

/// Fluent API for building code with proper indentation.
///
/// # Example
///
/// ```
/// use wpgen_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::php();
/// builder.push_block("function hello() {", "}", |b| {
///     b.push_line("return 'hi';");
/// });
///
/// assert_eq!(builder.build(), "function hello() {\n\treturn 'hi';\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with tab indentation (WordPress PHP).
    pub fn php() -> Self {
        Self::new(Indent::PHP)
    }

    /// Create a new CodeBuilder for flat SQL scripts.
    pub fn sql() -> Self {
        Self::new(Indent::SQL)
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        if !s.is_empty() {
            self.write_indent();
            self.buffer.push_str(s);
        }
        self.buffer.push('\n');
        self
    }

    /// Add one line per item, appending `separator` to all but the last.
    ///
    /// Items are written verbatim, so an embedded newline is not re-indented.
    pub fn push_separated<I, S>(&mut self, items: I, separator: &str) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut items = items.into_iter().peekable();
        while let Some(item) = items.next() {
            if items.peek().is_some() {
                self.push_line(&format!("{}{}", item.as_ref(), separator));
            } else {
                self.push_line(item.as_ref());
            }
        }
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add an indented block between a header and a closing line.
    pub fn push_block<F>(&mut self, header: &str, close: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.push_line(header).push_indent();
        f(self);
        self.push_dedent().push_line(close)
    }

    /// Add a `/** ... */` docblock, one ` * ` line per entry.
    ///
    /// Empty entries produce a bare ` *` separator line. A `*/` inside an
    /// entry is written as `*\/` so it cannot close the comment.
    pub fn push_docblock<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.push_line("/**");
        for line in lines {
            let line = line.as_ref();
            if line.is_empty() {
                self.push_line(" *");
            } else {
                self.push_line(&format!(" * {}", line.replace("*/", "*\\/")));
            }
        }
        self.push_line(" */")
    }

    /// Conditionally add content.
    pub fn when<F>(&mut self, condition: bool, f: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        if condition {
            f(self);
        }
        self
    }

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::php()
    }
}
