//! The reusable document writer: page geometry, content mapping, stream
//! lifecycle.
//!
//! An [`RtfWriter`] owns the byte sink for a document's lifetime. `open()`
//! starts a document, `add_table`/`add_paragraph` import content (colors
//! register into the document color table at import time), and `close()`
//! serializes the complete document header and body, then resets every piece
//! of internal state so the same writer instance can produce the next
//! document.

use std::fmt;
use std::io::{self, Write};

use crate::color::ColorTable;
use crate::mapper::{ContentMapper, RtfParagraph};
use crate::model::{HorizontalAlign, ParagraphModel, TableModel};
use crate::sink::RtfSink;
use crate::table::Table;
use crate::twips::Twips;

/// Page size and margins in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFormat {
    pub width: Twips,
    pub height: Twips,
    pub margin_left: Twips,
    pub margin_right: Twips,
    pub margin_top: Twips,
    pub margin_bottom: Twips,
}

impl Default for PageFormat {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageFormat {
    /// ISO A4 portrait with one-inch margins.
    #[must_use]
    pub const fn a4() -> Self {
        Self {
            width: 11_906,
            height: 16_838,
            margin_left: 1_440,
            margin_right: 1_440,
            margin_top: 1_440,
            margin_bottom: 1_440,
        }
    }

    /// US Letter portrait with one-inch margins.
    #[must_use]
    pub const fn letter() -> Self {
        Self {
            width: 12_240,
            height: 15_840,
            margin_left: 1_440,
            margin_right: 1_440,
            margin_top: 1_440,
            margin_bottom: 1_440,
        }
    }

    /// Set all four margins at once.
    #[must_use]
    pub const fn margins(mut self, margin: Twips) -> Self {
        self.margin_left = margin;
        self.margin_right = margin;
        self.margin_top = margin;
        self.margin_bottom = margin;
        self
    }

    #[must_use]
    pub const fn margin_left(mut self, margin: Twips) -> Self {
        self.margin_left = margin;
        self
    }

    #[must_use]
    pub const fn margin_right(mut self, margin: Twips) -> Self {
        self.margin_right = margin;
        self
    }

    /// Printable width between the side margins.
    #[must_use]
    pub const fn content_width(&self) -> Twips {
        self.width - self.margin_left - self.margin_right
    }
}

/// Document-level serialization settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterSettings {
    /// Re-emit each row's definition block after its cell contents, before
    /// `\row`. Some downstream consumers require the trailing redefinition.
    pub row_definition_after: bool,
}

impl WriterSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn row_definition_after(mut self, enabled: bool) -> Self {
        self.row_definition_after = enabled;
        self
    }
}

/// Shared state threaded through content import.
#[derive(Debug)]
pub struct ImportContext<'a> {
    pub page: &'a PageFormat,
    pub colors: &'a mut ColorTable,
    pub settings: &'a WriterSettings,
}

/// Error surface of the writer API.
#[derive(Debug)]
pub enum RtfError {
    Io(io::Error),
    /// `add_*` or `close` called before `open`.
    NotOpen,
    /// `open` called twice without an intervening `close`.
    AlreadyOpen,
}

impl fmt::Display for RtfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O failure while writing document: {err}"),
            Self::NotOpen => write!(f, "Writer is not open"),
            Self::AlreadyOpen => write!(f, "Writer is already open"),
        }
    }
}

impl std::error::Error for RtfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for RtfError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

enum DocElement {
    Paragraph(RtfParagraph),
    Table(Table),
}

/// Reusable RTF document writer over any byte sink.
pub struct RtfWriter<W: Write> {
    sink: W,
    page: PageFormat,
    settings: WriterSettings,
    mapper: ContentMapper,
    colors: ColorTable,
    elements: Vec<DocElement>,
    open: bool,
}

impl<W: Write> RtfWriter<W> {
    /// Create a writer with default A4 page geometry.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            page: PageFormat::default(),
            settings: WriterSettings::default(),
            mapper: ContentMapper::new(),
            colors: ColorTable::new(),
            elements: Vec::new(),
            open: false,
        }
    }

    #[must_use]
    pub fn with_page(mut self, page: PageFormat) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: WriterSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn page(&self) -> &PageFormat {
        &self.page
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Begin a new document.
    ///
    /// # Errors
    ///
    /// Returns [`RtfError::AlreadyOpen`] when a document is in progress.
    pub fn open(&mut self) -> Result<(), RtfError> {
        if self.open {
            return Err(RtfError::AlreadyOpen);
        }
        self.open = true;
        Ok(())
    }

    /// Import a source table into the pending document. Merge resolution
    /// runs here; serialization happens at `close`.
    ///
    /// # Errors
    ///
    /// Returns [`RtfError::NotOpen`] outside an open document.
    pub fn add_table(&mut self, model: &TableModel) -> Result<(), RtfError> {
        if !self.open {
            return Err(RtfError::NotOpen);
        }
        let mut ctx = ImportContext {
            page: &self.page,
            colors: &mut self.colors,
            settings: &self.settings,
        };
        let mut table = Table::from_model(model, &self.mapper, &mut ctx);
        table.resolve_merges();
        self.elements.push(DocElement::Table(table));
        Ok(())
    }

    /// Add a top-level paragraph to the pending document.
    ///
    /// # Errors
    ///
    /// Returns [`RtfError::NotOpen`] outside an open document.
    pub fn add_paragraph(&mut self, model: &ParagraphModel) -> Result<(), RtfError> {
        if !self.open {
            return Err(RtfError::NotOpen);
        }
        self.elements.push(DocElement::Paragraph(RtfParagraph::from_model(
            model,
            HorizontalAlign::Left,
            false,
            false,
        )));
        Ok(())
    }

    /// Serialize the pending document and reset for reuse.
    ///
    /// # Errors
    ///
    /// Returns [`RtfError::NotOpen`] outside an open document; I/O failures
    /// are fatal for the document and propagate to the caller.
    pub fn close(&mut self) -> Result<(), RtfError> {
        if !self.open {
            return Err(RtfError::NotOpen);
        }
        self.write_document()?;
        self.sink.flush().map_err(RtfError::Io)?;
        self.elements.clear();
        self.colors.reset();
        self.open = false;
        Ok(())
    }

    fn write_document(&mut self) -> io::Result<()> {
        self.sink.write_all(b"{\\rtf1\\ansi\\ansicpg1252\\deff0")?;
        self.sink
            .write_all(b"{\\fonttbl{\\f0\\froman Times New Roman;}}")?;
        self.colors.write(&mut self.sink)?;
        write!(
            self.sink,
            "\\paperw{}\\paperh{}\\margl{}\\margr{}\\margt{}\\margb{}",
            self.page.width,
            self.page.height,
            self.page.margin_left,
            self.page.margin_right,
            self.page.margin_top,
            self.page.margin_bottom,
        )?;
        let mut sink = RtfSink::new(&mut self.sink, &self.colors);
        for element in &self.elements {
            match element {
                DocElement::Paragraph(paragraph) => {
                    paragraph.write(&mut sink)?;
                    sink.control("par")?;
                }
                DocElement::Table(table) => table.write_content(&mut sink)?,
            }
        }
        self.sink.write_all(b"}")
    }

    /// Recover the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}
