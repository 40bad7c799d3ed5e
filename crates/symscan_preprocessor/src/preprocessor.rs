use std::fmt::Write;
use std::iter::Peekable;
use std::str::Chars;

use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreprocessOptions {
    /// Replace the contents of string and char literals with blanks, keeping the quotes.
    pub blank_literals: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            blank_literals: true,
        }
    }
}

/// Cleans `source` with the default options.
pub fn preprocess(source: &str) -> String {
    let mut output = String::with_capacity(source.len());
    // Writing into a `String` cannot fail.
    let _ = Preprocessor::new(source).write_to(&mut output);
    output
}

pub fn preprocess_into<W: Write>(
    source: &str,
    options: PreprocessOptions,
    sink: &mut W,
) -> std::fmt::Result {
    Preprocessor::new(source).with_options(options).write_to(sink)
}

pub struct Preprocessor<'src> {
    chars: Peekable<Chars<'src>>,
    options: PreprocessOptions,
    start_of_line: bool,
    blanked_lines: usize,
}

impl<'src> Preprocessor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            chars: source.chars().peekable(),
            options: PreprocessOptions::default(),
            start_of_line: true,
            blanked_lines: 0,
        }
    }

    pub fn with_options(mut self, options: PreprocessOptions) -> Self {
        self.options = options;
        self
    }

    pub fn write_to<W: Write>(mut self, sink: &mut W) -> std::fmt::Result {
        while let Some(ch) = self.chars.next() {
            if self.start_of_line && ch != '\n' {
                if is_blank(ch) {
                    sink.write_char(ch)?;
                    continue;
                }

                self.start_of_line = false;

                if ch == '#' {
                    self.blank_directive(sink)?;
                    continue;
                }
            }

            match ch {
                '"' | '\'' => self.literal(ch, sink)?,
                '/' if self.chars.peek() == Some(&'/') => self.line_comment(sink)?,
                '/' if self.chars.peek() == Some(&'*') => self.block_comment(sink)?,
                _ => {
                    sink.write_char(ch)?;
                    self.start_of_line = ch == '\n';
                }
            }
        }

        trace!("Blanked {} directive line(s)", self.blanked_lines);

        Ok(())
    }

    /// Blanks a directive up to its end of line, following backslash-newline continuations.
    fn blank_directive<W: Write>(&mut self, sink: &mut W) -> std::fmt::Result {
        sink.write_char(' ')?;
        self.blanked_lines += 1;

        while let Some(ch) = self.chars.next() {
            match ch {
                '\n' => {
                    sink.write_char('\n')?;
                    self.start_of_line = true;
                    return Ok(());
                }
                '\\' if self.chars.peek() == Some(&'\n') => {
                    self.chars.next();
                    sink.write_str(" \n")?;
                    self.blanked_lines += 1;
                }
                _ => sink.write_char(' ')?,
            }
        }

        Ok(())
    }

    fn literal<W: Write>(&mut self, quote: char, sink: &mut W) -> std::fmt::Result {
        sink.write_char(quote)?;

        while let Some(ch) = self.chars.next() {
            if ch == quote {
                sink.write_char(quote)?;
                return Ok(());
            }

            if ch == '\\' {
                let escaped = self.chars.next();
                if self.options.blank_literals {
                    sink.write_char(' ')?;
                    match escaped {
                        Some('\n') => sink.write_char('\n')?,
                        Some(_) => sink.write_char(' ')?,
                        None => {}
                    }
                } else {
                    sink.write_char('\\')?;
                    if let Some(escaped) = escaped {
                        sink.write_char(escaped)?;
                    }
                }
                continue;
            }

            if ch == '\n' || !self.options.blank_literals {
                sink.write_char(ch)?;
            } else {
                sink.write_char(' ')?;
            }
        }

        Ok(())
    }

    fn line_comment<W: Write>(&mut self, sink: &mut W) -> std::fmt::Result {
        sink.write_char(' ')?;

        while let Some(ch) = self.chars.next() {
            if ch == '\n' {
                sink.write_char('\n')?;
                self.start_of_line = true;
                return Ok(());
            }
            sink.write_char(' ')?;
        }

        Ok(())
    }

    fn block_comment<W: Write>(&mut self, sink: &mut W) -> std::fmt::Result {
        // Consume the `*` of the opener so `/*/` is not taken as a complete comment.
        self.chars.next();
        sink.write_str("  ")?;

        while let Some(ch) = self.chars.next() {
            if ch == '*' && self.chars.peek() == Some(&'/') {
                self.chars.next();
                sink.write_str("  ")?;
                return Ok(());
            }

            if ch == '\n' {
                sink.write_char('\n')?;
            } else {
                sink.write_char(' ')?;
            }
        }

        Ok(())
    }
}

fn is_blank(ch: char) -> bool {
    ch.is_whitespace() && ch != '\n'
}
