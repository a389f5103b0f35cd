//! Code writer with automatic indentation tracking.
//!
//! `CodeWriter` wraps any [`fmt::Write`] and indents every line according to
//! the number of live [`IndentGuard`]s. Guards share the level through an
//! `Rc<Cell<usize>>`, so holding one does not borrow the writer.
//!
//! ```
//! use abi_codegen::code_writer::CodeWriter;
//! use abi_codegen::cw_writeln;
//!
//! let mut output = String::new();
//! let mut w = CodeWriter::with_indent_spaces(&mut output, 2);
//!
//! w.jsdoc(&["Method that encodes calls to f".to_string()]).unwrap();
//! w.block("function f (...args)", |w| {
//!     cw_writeln!(w, "return {}", 42)
//! })
//! .unwrap();
//!
//! assert_eq!(
//!     output,
//!     "/** Method that encodes calls to f\n */\nfunction f (...args) {\n  return 42\n}\n"
//! );
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// A code writer that tracks indentation and knows a few C-like shapes
/// (braced blocks, line comments, JSDoc blocks).
pub struct CodeWriter<W> {
    writer: W,
    indent_level: Rc<Cell<usize>>,
    indent_string: String,
    at_line_start: Cell<bool>,
}

impl<W: fmt::Write> CodeWriter<W> {
    pub fn new(writer: W, indent_string: String) -> Self {
        Self {
            writer,
            indent_level: Rc::new(Cell::new(0)),
            indent_string,
            at_line_start: Cell::new(true),
        }
    }

    pub fn with_indent_spaces(writer: W, spaces: usize) -> Self {
        Self::new(writer, " ".repeat(spaces))
    }

    /// Write text without a newline. Adds indentation if at line start.
    pub fn write(&mut self, text: &str) -> fmt::Result {
        if text.is_empty() {
            return Ok(());
        }

        if self.at_line_start.get() && !text.trim().is_empty() {
            for _ in 0..self.indent_level.get() {
                self.writer.write_str(&self.indent_string)?;
            }
            self.at_line_start.set(false);
        }

        self.writer.write_str(text)
    }

    /// Write text followed by a newline.
    pub fn writeln(&mut self, text: &str) -> fmt::Result {
        self.write(text)?;
        self.writer.write_char('\n')?;
        self.at_line_start.set(true);
        Ok(())
    }

    /// Indentation increases while the returned guard is alive.
    pub fn indent(&mut self) -> IndentGuard {
        self.indent_level.set(self.indent_level.get() + 1);
        IndentGuard {
            indent_level: Rc::clone(&self.indent_level),
        }
    }

    /// Write `text` one line at a time, each prefixed with `comment_prefix`.
    pub fn doc_comment(&mut self, comment_prefix: &str, text: &str) -> fmt::Result {
        for line in text.lines() {
            if line.is_empty() {
                self.writeln(comment_prefix)?;
            } else {
                self.writeln(&format!("{comment_prefix} {line}"))?;
            }
        }
        Ok(())
    }

    /// Write a JSDoc block. The first line shares the `/**` opener, the
    /// rest get ` * ` and the block ends with ` */`.
    pub fn jsdoc(&mut self, lines: &[String]) -> fmt::Result {
        let mut lines = lines.iter();
        match lines.next() {
            Some(first) => self.writeln(&format!("/** {first}"))?,
            None => self.writeln("/**")?,
        }
        for line in lines {
            self.writeln(&format!(" * {line}"))?;
        }
        self.writeln(" */")
    }

    /// Write `header {`, the body one level deeper, then `}` + `closer`.
    pub fn block_with<F>(&mut self, header: &str, closer: &str, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.writeln(&format!("{header} {{"))?;
        {
            let _indent = self.indent();
            body(self)?;
        }
        self.writeln(&format!("}}{closer}"))
    }

    /// Write a complete braced block with a closure for the body.
    pub fn block<F>(&mut self, header: &str, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.block_with(header, "", body)
    }

    /// Use the `cw_writeln!` macro instead of calling this directly.
    #[doc(hidden)]
    pub fn writeln_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        let formatted = format!("{args}");
        self.writeln(&formatted)
    }
}

/// RAII guard that maintains indentation level.
pub struct IndentGuard {
    indent_level: Rc<Cell<usize>>,
}

impl Drop for IndentGuard {
    fn drop(&mut self) {
        let current = self.indent_level.get();
        self.indent_level.set(current.saturating_sub(1));
    }
}

/// Write formatted text with newline to a CodeWriter (like `std::writeln!`).
#[macro_export]
macro_rules! cw_writeln {
    ($writer:expr, $($arg:tt)*) => {
        $writer.writeln_fmt(format_args!($($arg)*))
    };
}
