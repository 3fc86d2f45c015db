//! Low-level RTF control-word emission.
//!
//! An [`RtfSink`] wraps any byte-oriented `io::Write` and knows the three
//! things the RTF grammar cares about: control words (`\trowd`), control
//! words with a numeric parameter (`\cellx4800`), and escaped text. A control
//! word is terminated by the first non-alphanumeric byte that follows it, so
//! the sink tracks whether the previous emission was a control word and
//! inserts the single delimiting space only when plain text would otherwise
//! fuse into it.

use std::io::{self, Write};

use crate::color::{Color, ColorTable};

/// Sequential RTF token emitter over a borrowed byte sink.
pub struct RtfSink<'a, W: Write> {
    out: &'a mut W,
    colors: &'a ColorTable,
    last_was_control: bool,
}

impl<'a, W: Write> RtfSink<'a, W> {
    /// Wrap a byte sink together with the document color table.
    pub fn new(out: &'a mut W, colors: &'a ColorTable) -> Self {
        Self {
            out,
            colors,
            last_was_control: false,
        }
    }

    /// Emit a bare control word: `\word`.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures.
    pub fn control(&mut self, word: &str) -> io::Result<()> {
        write!(self.out, "\\{word}")?;
        self.last_was_control = true;
        Ok(())
    }

    /// Emit a control word with a numeric parameter: `\wordN`.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures.
    pub fn control_val(&mut self, word: &str, value: i32) -> io::Result<()> {
        write!(self.out, "\\{word}{value}")?;
        self.last_was_control = true;
        Ok(())
    }

    /// Open a `{` group.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures.
    pub fn group_open(&mut self) -> io::Result<()> {
        self.out.write_all(b"{")?;
        self.last_was_control = false;
        Ok(())
    }

    /// Close a `}` group.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures.
    pub fn group_close(&mut self) -> io::Result<()> {
        self.out.write_all(b"}")?;
        self.last_was_control = false;
        Ok(())
    }

    /// Emit escaped text content.
    ///
    /// `\ { }` are backslash-escaped, newline becomes `\line`, tab becomes
    /// `\tab`, Latin-1 bytes above ASCII use `\'hh`, anything else uses the
    /// `\uN?` Unicode escape with a `?` fallback character. Other control
    /// characters are dropped.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures.
    pub fn text(&mut self, text: &str) -> io::Result<()> {
        for ch in text.chars() {
            match ch {
                '\\' | '{' | '}' => {
                    write!(self.out, "\\{ch}")?;
                    self.last_was_control = false;
                }
                '\n' => self.control("line")?,
                '\t' => self.control("tab")?,
                '\r' => {}
                c if (c as u32) < 0x20 => {}
                c if c.is_ascii() => {
                    if self.last_was_control {
                        self.out.write_all(b" ")?;
                        self.last_was_control = false;
                    }
                    let mut buf = [0u8; 1];
                    buf[0] = c as u8;
                    self.out.write_all(&buf)?;
                }
                c if (c as u32) <= 0xFF => {
                    write!(self.out, "\\'{:02x}", c as u32)?;
                    self.last_was_control = false;
                }
                c => {
                    let v = c as u32;
                    if v <= 0xFFFF {
                        // RTF \u takes a signed 16-bit decimal; the trailing
                        // `?` is the fallback glyph for old readers.
                        write!(self.out, "\\u{}?", v as u16 as i16)?;
                    } else {
                        self.out.write_all(b"?")?;
                    }
                    self.last_was_control = false;
                }
            }
        }
        Ok(())
    }

    /// 1-based color-table index for a registered color, 0 (auto) otherwise.
    #[must_use]
    pub fn color_index(&self, color: Color) -> i32 {
        self.colors.index_of(color).map_or(0, |i| i as i32)
    }
}
