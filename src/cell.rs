//! A single grid position: geometry, content, merge state, borders.
//!
//! The formatting surface a vertical merge shares - width, right edge,
//! padding, vertical alignment, background, borders - lives behind a
//! reference-counted [`CellFormat`] handle. A merge child adopts its parent's
//! handle instead of copying, so post-merge mutation of the parent's borders
//! is visible through the child. Placeholder slots left behind by colspan
//! absorption are a separate [`RowSlot`] variant and can never carry
//! geometry or content.

use std::cell::{Ref, RefCell};
use std::io::{self, Write};
use std::rc::Rc;

use smallvec::SmallVec;

use crate::border::{BorderGroup, BorderScope, BorderStyle, Sides};
use crate::color::{Color, ColorTable};
use crate::mapper::{ContentMapper, MappedElement, RtfParagraph};
use crate::model::{CellSource, Padding, VerticalAlign};
use crate::sink::RtfSink;
use crate::twips::Twips;
use crate::writer::ImportContext;

/// Vertical merge role of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeState {
    #[default]
    None,
    VerticalParent,
    VerticalChild,
}

impl MergeState {
    fn control_word(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::VerticalParent => Some("clvmgf"),
            Self::VerticalChild => Some("clvmrg"),
        }
    }
}

/// The formatting surface shared between a merge parent and its children.
#[derive(Debug, Clone, PartialEq)]
pub struct CellFormat {
    pub width: Twips,
    pub right: Twips,
    pub padding: Padding,
    pub valign: VerticalAlign,
    pub background: Option<Color>,
    pub borders: BorderGroup,
}

pub(crate) type FormatHandle = Rc<RefCell<CellFormat>>;

/// A live (non-placeholder) table cell.
#[derive(Debug, Clone)]
pub struct TableCell {
    format: FormatHandle,
    content: SmallVec<[MappedElement; 2]>,
    merge: MergeState,
    col_span: u16,
    row_span: u16,
    min_height: Twips,
    keep_with_next: bool,
}

impl TableCell {
    /// Import a cell from either source shape.
    ///
    /// Border resolution: the grid shape's own group wins, then the rich
    /// shape's legacy triple, then the enclosing table's row-scoped group
    /// rescoped down to the cell. Background defaults to opaque white; all
    /// referenced colors register in the document color table here.
    pub(crate) fn from_source(
        source: &CellSource,
        table_borders: &BorderGroup,
        table_padding: Twips,
        keep_with_next: bool,
        mapper: &ContentMapper,
        ctx: &mut ImportContext<'_>,
    ) -> Self {
        let col_span = source.col_span().max(1);
        let row_span = source.row_span().max(1);
        let merge = if row_span > 1 {
            MergeState::VerticalParent
        } else {
            MergeState::None
        };

        let borders = match source {
            CellSource::Grid(grid) => match &grid.borders {
                Some(own) => own.rescoped(BorderScope::Cell),
                None => table_borders.rescoped(BorderScope::Cell),
            },
            CellSource::Rich(rich) => match &rich.border {
                Some(legacy) => BorderGroup::with_borders(
                    BorderScope::Cell,
                    legacy.sides,
                    BorderStyle::Single,
                    legacy.width,
                    legacy.color,
                ),
                None => table_borders.rescoped(BorderScope::Cell),
            },
        };
        borders.register_colors(ctx.colors);

        let background = source.background().unwrap_or(Color::WHITE);
        ctx.colors.register(background);

        let padding = match source {
            CellSource::Rich(rich) if rich.padding > 0 => Padding::uniform(rich.padding),
            CellSource::Rich(_) => Padding::uniform(table_padding),
            CellSource::Grid(grid) => grid.padding,
        };

        let content = mapper.map_cell(source, keep_with_next, ctx);

        Self {
            format: Rc::new(RefCell::new(CellFormat {
                width: 0,
                right: 0,
                padding,
                valign: source.valign(),
                background: Some(background),
                borders,
            })),
            content,
            merge,
            col_span,
            row_span,
            min_height: source.min_height(),
            keep_with_next,
        }
    }

    /// Empty cell for a column the source row does not cover; inherits the
    /// table's border group.
    pub(crate) fn empty(
        table_borders: &BorderGroup,
        table_padding: Twips,
        keep_with_next: bool,
        colors: &mut ColorTable,
    ) -> Self {
        colors.register(Color::WHITE);
        Self {
            format: Rc::new(RefCell::new(CellFormat {
                width: 0,
                right: 0,
                padding: Padding::uniform(table_padding),
                valign: VerticalAlign::Top,
                background: Some(Color::WHITE),
                borders: table_borders.rescoped(BorderScope::Cell),
            })),
            content: SmallVec::new(),
            merge: MergeState::None,
            col_span: 1,
            row_span: 1,
            min_height: 0,
            keep_with_next,
        }
    }

    #[must_use]
    pub fn width(&self) -> Twips {
        self.format.borrow().width
    }

    #[must_use]
    pub fn right(&self) -> Twips {
        self.format.borrow().right
    }

    #[must_use]
    pub fn padding(&self) -> Padding {
        self.format.borrow().padding
    }

    #[must_use]
    pub fn background(&self) -> Option<Color> {
        self.format.borrow().background
    }

    /// Read access to the (possibly shared) border group.
    #[must_use]
    pub fn borders(&self) -> Ref<'_, BorderGroup> {
        Ref::map(self.format.borrow(), |format| &format.borders)
    }

    /// Mutate the cell's borders in place. For a merge parent the change is
    /// visible through every vertical child sharing this format.
    pub fn add_border(&mut self, sides: Sides, style: BorderStyle, width: Twips, color: Color) {
        self.format
            .borrow_mut()
            .borders
            .add_border(sides, style, width, color);
    }

    #[must_use]
    pub fn merge_state(&self) -> MergeState {
        self.merge
    }

    #[must_use]
    pub fn col_span(&self) -> u16 {
        self.col_span
    }

    #[must_use]
    pub fn row_span(&self) -> u16 {
        self.row_span
    }

    #[must_use]
    pub fn min_height(&self) -> Twips {
        self.min_height
    }

    /// True when both cells share one format allocation (merge aliasing).
    #[must_use]
    pub fn shares_format_with(&self, other: &TableCell) -> bool {
        Rc::ptr_eq(&self.format, &other.format)
    }

    pub(crate) fn set_width(&mut self, width: Twips) {
        self.format.borrow_mut().width = width;
    }

    pub(crate) fn set_right(&mut self, right: Twips) {
        self.format.borrow_mut().right = right;
    }

    /// Grow width and right edge by an absorbed neighbor's width.
    pub(crate) fn grow(&mut self, by: Twips) {
        let mut format = self.format.borrow_mut();
        format.width += by;
        format.right += by;
    }

    pub(crate) fn format_handle(&self) -> FormatHandle {
        Rc::clone(&self.format)
    }

    /// Become a vertical-merge child of `parent`: adopt its format by shared
    /// handle, drop own content, collapse spans.
    pub(crate) fn adopt_parent(&mut self, parent: &FormatHandle) {
        self.format = Rc::clone(parent);
        self.merge = MergeState::VerticalChild;
        self.col_span = 1;
        self.row_span = 1;
        self.content.clear();
    }

    /// Emit the cell definition words, strictly ordered: merge state,
    /// vertical alignment, borders, background reference, width authority,
    /// width, padding (halved, each side with its explicit-padding flag),
    /// right boundary.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures.
    pub(crate) fn write_definition<W: Write>(&self, sink: &mut RtfSink<'_, W>) -> io::Result<()> {
        let format = self.format.borrow();
        if let Some(word) = self.merge.control_word() {
            sink.control(word)?;
        }
        sink.control(format.valign.word())?;
        format.borders.write(sink)?;
        if let Some(background) = format.background {
            let index = sink.color_index(background);
            sink.control_val("clcbpat", index)?;
        }
        sink.control_val("clftsWidth", 3)?;
        sink.control_val("clwWidth", format.width)?;
        let padding = format.padding;
        if padding.left > 0 {
            sink.control_val("clpadl", padding.left / 2)?;
            sink.control_val("clpadfl", 3)?;
        }
        if padding.top > 0 {
            sink.control_val("clpadt", padding.top / 2)?;
            sink.control_val("clpadft", 3)?;
        }
        if padding.right > 0 {
            sink.control_val("clpadr", padding.right / 2)?;
            sink.control_val("clpadfr", 3)?;
        }
        if padding.bottom > 0 {
            sink.control_val("clpadb", padding.bottom / 2)?;
            sink.control_val("clpadfb", 3)?;
        }
        sink.control_val("cellx", format.right)
    }

    /// Emit the cell content: mapped elements with `\par` between
    /// consecutive paragraphs (never after the last), or the default empty
    /// paragraph, terminated by `\cell`.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures.
    pub(crate) fn write_content<W: Write>(&self, sink: &mut RtfSink<'_, W>) -> io::Result<()> {
        if self.content.is_empty() {
            RtfParagraph::empty(true, self.keep_with_next).write(sink)?;
        } else {
            let mut previous_was_paragraph = false;
            for element in &self.content {
                if previous_was_paragraph && element.is_paragraph() {
                    sink.control("par")?;
                }
                element.write(sink)?;
                previous_was_paragraph = element.is_paragraph();
            }
        }
        sink.control("cell")
    }
}

/// One position in a row's grid: a live cell or an absorbed placeholder.
#[derive(Debug, Clone)]
pub enum RowSlot {
    Cell(TableCell),
    /// Zero-content sentinel keeping column indices stable until compaction.
    Placeholder,
}

impl RowSlot {
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    #[must_use]
    pub fn as_cell(&self) -> Option<&TableCell> {
        match self {
            Self::Cell(cell) => Some(cell),
            Self::Placeholder => None,
        }
    }

    pub(crate) fn as_cell_mut(&mut self) -> Option<&mut TableCell> {
        match self {
            Self::Cell(cell) => Some(cell),
            Self::Placeholder => None,
        }
    }
}
