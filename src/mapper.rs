//! Maps abstract content elements into emittable in-table elements.
//!
//! Cell content arrives as a loose list of [`Element`]s. Anything that is
//! not already a block (paragraph, list, nested table) is accumulated into an
//! inferred paragraph inheriting the cell's horizontal alignment. Every
//! resulting block maps to zero or more [`MappedElement`]s tagged as living
//! inside a table. An unsupported element kind is logged and skipped -
//! degraded output, never a document failure.

use std::io::{self, Write};

use smallvec::SmallVec;

use crate::model::{CellSource, Element, HorizontalAlign, ParagraphModel, TextRun};
use crate::sink::RtfSink;
use crate::table::Table;
use crate::writer::ImportContext;

/// A renderable paragraph: runs plus resolved paragraph properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtfParagraph {
    runs: Vec<TextRun>,
    align: HorizontalAlign,
    in_table: bool,
    keep_with_next: bool,
    bullet: bool,
}

impl RtfParagraph {
    pub(crate) fn from_model(
        model: &ParagraphModel,
        default_align: HorizontalAlign,
        in_table: bool,
        keep_with_next: bool,
    ) -> Self {
        Self {
            runs: model.runs.clone(),
            align: model.align.unwrap_or(default_align),
            in_table,
            keep_with_next,
            bullet: false,
        }
    }

    /// Paragraph inferred from loose inline runs.
    pub(crate) fn inferred(
        runs: Vec<TextRun>,
        align: HorizontalAlign,
        keep_with_next: bool,
    ) -> Self {
        Self {
            runs,
            align,
            in_table: true,
            keep_with_next,
            bullet: false,
        }
    }

    /// The default empty paragraph an empty cell emits.
    pub(crate) fn empty(in_table: bool, keep_with_next: bool) -> Self {
        Self {
            runs: Vec::new(),
            align: HorizontalAlign::Left,
            in_table,
            keep_with_next,
            bullet: false,
        }
    }

    fn bulleted(mut self) -> Self {
        self.bullet = true;
        self
    }

    /// Emit the paragraph: `\pard`, table/alignment/keep tags, then runs
    /// with their character-format toggles. No trailing `\par`; the caller
    /// decides paragraph separation.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures.
    pub(crate) fn write<W: Write>(&self, sink: &mut RtfSink<'_, W>) -> io::Result<()> {
        sink.control("pard")?;
        if self.in_table {
            sink.control("intbl")?;
        }
        sink.control(self.align.word())?;
        if self.keep_with_next {
            sink.control("keepn")?;
        }
        if self.bullet {
            sink.control("bullet")?;
            sink.text(" ")?;
        }
        for run in &self.runs {
            if run.bold {
                sink.control("b")?;
            }
            if run.italic {
                sink.control("i")?;
            }
            if run.underline {
                sink.control("ul")?;
            }
            sink.text(&run.text)?;
            if run.underline {
                sink.control("ul0")?;
            }
            if run.italic {
                sink.control("i0")?;
            }
            if run.bold {
                sink.control("b0")?;
            }
        }
        Ok(())
    }
}

/// An internal renderable element produced by the mapper.
#[derive(Debug, Clone)]
pub enum MappedElement {
    Paragraph(RtfParagraph),
    Table(Box<Table>),
}

impl MappedElement {
    pub(crate) fn is_paragraph(&self) -> bool {
        matches!(self, Self::Paragraph(_))
    }

    pub(crate) fn write<W: Write>(&self, sink: &mut RtfSink<'_, W>) -> io::Result<()> {
        match self {
            Self::Paragraph(paragraph) => paragraph.write(sink),
            Self::Table(table) => table.write_content(sink),
        }
    }
}

/// Maps cell and document content into renderable elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentMapper;

impl ContentMapper {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Map a cell's content list. Loose inline runs between blocks collapse
    /// into inferred paragraphs carrying the cell's alignment.
    pub(crate) fn map_cell(
        &self,
        source: &CellSource,
        keep_with_next: bool,
        ctx: &mut ImportContext<'_>,
    ) -> SmallVec<[MappedElement; 2]> {
        let align = source.halign();
        let mut out = SmallVec::new();
        let mut inferred: Vec<TextRun> = Vec::new();
        for element in source.content() {
            if let Element::Text(run) = element {
                inferred.push(run.clone());
            } else {
                Self::flush_inferred(&mut inferred, align, keep_with_next, &mut out);
                self.map_block(element, align, keep_with_next, ctx, &mut out);
            }
        }
        Self::flush_inferred(&mut inferred, align, keep_with_next, &mut out);
        out
    }

    fn flush_inferred(
        inferred: &mut Vec<TextRun>,
        align: HorizontalAlign,
        keep_with_next: bool,
        out: &mut SmallVec<[MappedElement; 2]>,
    ) {
        if !inferred.is_empty() {
            out.push(MappedElement::Paragraph(RtfParagraph::inferred(
                std::mem::take(inferred),
                align,
                keep_with_next,
            )));
        }
    }

    fn map_block(
        &self,
        element: &Element,
        align: HorizontalAlign,
        keep_with_next: bool,
        ctx: &mut ImportContext<'_>,
        out: &mut SmallVec<[MappedElement; 2]>,
    ) {
        match element {
            Element::Paragraph(model) => {
                out.push(MappedElement::Paragraph(RtfParagraph::from_model(
                    model,
                    align,
                    true,
                    keep_with_next,
                )));
            }
            Element::List(list) => {
                for item in &list.items {
                    out.push(MappedElement::Paragraph(
                        RtfParagraph::from_model(item, align, true, keep_with_next).bulleted(),
                    ));
                }
            }
            Element::Table(model) => {
                let mut table = Table::from_model(model, self, ctx);
                table.resolve_merges();
                out.push(MappedElement::Table(Box::new(table)));
            }
            Element::Image { name } => {
                log::warn!("skipping unsupported cell content element: image {name}");
            }
            Element::Text(run) => {
                // Reachable only if a caller routes inline content here;
                // treat it as a one-run inferred paragraph.
                out.push(MappedElement::Paragraph(RtfParagraph::inferred(
                    vec![run.clone()],
                    align,
                    keep_with_next,
                )));
            }
        }
    }
}
