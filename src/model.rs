//! The upstream tabular content model.
//!
//! This is the producer-facing surface: a [`TableModel`] of [`RowModel`]s of
//! cell sources, plus the nested content elements a cell can carry. Two cell
//! source shapes exist and both are supported everywhere:
//!
//! - [`RichCell`] - the rich-text shape: uniform padding and an optional
//!   legacy `(sides, width, color)` border triple.
//! - [`GridCellSource`] - the lower-level grid shape: explicit per-side
//!   padding and an optional fully-specified [`BorderGroup`].
//!
//! Everything is builder-style; models are plain data the serialization
//! layer consumes once.

use crate::border::{BorderGroup, BorderScope, Sides};
use crate::color::Color;
use crate::twips::Twips;

/// Horizontal alignment of paragraph content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl HorizontalAlign {
    pub(crate) fn word(self) -> &'static str {
        match self {
            Self::Left => "ql",
            Self::Center => "qc",
            Self::Right => "qr",
            Self::Justify => "qj",
        }
    }
}

/// Vertical alignment of cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl VerticalAlign {
    pub(crate) fn word(self) -> &'static str {
        match self {
            Self::Top => "clvertalt",
            Self::Middle => "clvertalc",
            Self::Bottom => "clvertalb",
        }
    }
}

/// Horizontal placement of the whole table on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TableAlign {
    pub(crate) fn word(self) -> &'static str {
        match self {
            Self::Left => "trql",
            Self::Center => "trqc",
            Self::Right => "trqr",
        }
    }
}

/// Per-side padding in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub left: Twips,
    pub top: Twips,
    pub right: Twips,
    pub bottom: Twips,
}

impl Padding {
    /// Identical padding on all four sides.
    #[must_use]
    pub const fn uniform(value: Twips) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    /// Independent sides.
    #[must_use]
    pub const fn new(left: Twips, top: Twips, right: Twips, bottom: Twips) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::default()
    }
}

/// A run of text with character formatting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl TextRun {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    #[must_use]
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }
}

/// A paragraph block: runs plus an optional explicit alignment.
///
/// Without an explicit alignment the paragraph inherits the alignment of the
/// cell it lands in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParagraphModel {
    pub runs: Vec<TextRun>,
    pub align: Option<HorizontalAlign>,
}

impl ParagraphModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-run paragraph from plain text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![TextRun::new(text)],
            align: None,
        }
    }

    #[must_use]
    pub fn with_run(mut self, run: TextRun) -> Self {
        self.runs.push(run);
        self
    }

    #[must_use]
    pub fn align(mut self, align: HorizontalAlign) -> Self {
        self.align = Some(align);
        self
    }
}

/// A flat list block; items render as bulleted paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListModel {
    pub items: Vec<ParagraphModel>,
}

impl ListModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn item(mut self, item: ParagraphModel) -> Self {
        self.items.push(item);
        self
    }
}

/// A content element inside a cell (or at document top level).
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Paragraph(ParagraphModel),
    /// Loose inline text; accumulated into an inferred paragraph on import.
    Text(TextRun),
    List(ListModel),
    /// A nested table.
    Table(TableModel),
    /// Known-unsupported content; the mapper logs and skips it.
    Image { name: String },
}

/// Legacy border description: one style applied to a side mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegacyBorder {
    pub sides: Sides,
    pub width: Twips,
    pub color: Color,
}

/// Rich-text cell source: uniform padding, legacy border triple.
#[derive(Debug, Clone, PartialEq)]
pub struct RichCell {
    pub col_span: u16,
    pub row_span: u16,
    pub background: Option<Color>,
    /// Uniform padding in twips; 0 inherits the table's cell padding.
    pub padding: Twips,
    pub valign: VerticalAlign,
    pub halign: HorizontalAlign,
    pub border: Option<LegacyBorder>,
    pub min_height: Twips,
    pub content: Vec<Element>,
}

impl Default for RichCell {
    fn default() -> Self {
        Self {
            col_span: 1,
            row_span: 1,
            background: None,
            padding: 0,
            valign: VerticalAlign::Top,
            halign: HorizontalAlign::Left,
            border: None,
            min_height: 0,
            content: Vec::new(),
        }
    }
}

impl RichCell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell containing a single plain-text paragraph.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new().child(Element::Paragraph(ParagraphModel::text(text)))
    }

    #[must_use]
    pub fn col_span(mut self, span: u16) -> Self {
        self.col_span = span;
        self
    }

    #[must_use]
    pub fn row_span(mut self, span: u16) -> Self {
        self.row_span = span;
        self
    }

    #[must_use]
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: Twips) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn valign(mut self, valign: VerticalAlign) -> Self {
        self.valign = valign;
        self
    }

    #[must_use]
    pub fn halign(mut self, halign: HorizontalAlign) -> Self {
        self.halign = halign;
        self
    }

    #[must_use]
    pub fn border(mut self, sides: Sides, width: Twips, color: Color) -> Self {
        self.border = Some(LegacyBorder { sides, width, color });
        self
    }

    #[must_use]
    pub fn min_height(mut self, height: Twips) -> Self {
        self.min_height = height;
        self
    }

    #[must_use]
    pub fn child(mut self, element: Element) -> Self {
        self.content.push(element);
        self
    }
}

/// Grid cell source: per-side padding, owned border group.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCellSource {
    pub col_span: u16,
    pub row_span: u16,
    pub background: Option<Color>,
    pub padding: Padding,
    pub valign: VerticalAlign,
    pub halign: HorizontalAlign,
    pub borders: Option<BorderGroup>,
    pub min_height: Twips,
    pub content: Vec<Element>,
}

impl Default for GridCellSource {
    fn default() -> Self {
        Self {
            col_span: 1,
            row_span: 1,
            background: None,
            padding: Padding::default(),
            valign: VerticalAlign::Top,
            halign: HorizontalAlign::Left,
            borders: None,
            min_height: 0,
            content: Vec::new(),
        }
    }
}

impl GridCellSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn col_span(mut self, span: u16) -> Self {
        self.col_span = span;
        self
    }

    #[must_use]
    pub fn row_span(mut self, span: u16) -> Self {
        self.row_span = span;
        self
    }

    #[must_use]
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn valign(mut self, valign: VerticalAlign) -> Self {
        self.valign = valign;
        self
    }

    #[must_use]
    pub fn halign(mut self, halign: HorizontalAlign) -> Self {
        self.halign = halign;
        self
    }

    #[must_use]
    pub fn borders(mut self, borders: BorderGroup) -> Self {
        self.borders = Some(borders);
        self
    }

    #[must_use]
    pub fn min_height(mut self, height: Twips) -> Self {
        self.min_height = height;
        self
    }

    #[must_use]
    pub fn child(mut self, element: Element) -> Self {
        self.content.push(element);
        self
    }
}

/// Either cell source shape.
#[derive(Debug, Clone, PartialEq)]
pub enum CellSource {
    Rich(RichCell),
    Grid(GridCellSource),
}

impl CellSource {
    #[must_use]
    pub fn col_span(&self) -> u16 {
        match self {
            Self::Rich(c) => c.col_span,
            Self::Grid(c) => c.col_span,
        }
    }

    #[must_use]
    pub fn row_span(&self) -> u16 {
        match self {
            Self::Rich(c) => c.row_span,
            Self::Grid(c) => c.row_span,
        }
    }

    #[must_use]
    pub fn background(&self) -> Option<Color> {
        match self {
            Self::Rich(c) => c.background,
            Self::Grid(c) => c.background,
        }
    }

    #[must_use]
    pub fn valign(&self) -> VerticalAlign {
        match self {
            Self::Rich(c) => c.valign,
            Self::Grid(c) => c.valign,
        }
    }

    #[must_use]
    pub fn halign(&self) -> HorizontalAlign {
        match self {
            Self::Rich(c) => c.halign,
            Self::Grid(c) => c.halign,
        }
    }

    #[must_use]
    pub fn min_height(&self) -> Twips {
        match self {
            Self::Rich(c) => c.min_height,
            Self::Grid(c) => c.min_height,
        }
    }

    #[must_use]
    pub fn content(&self) -> &[Element] {
        match self {
            Self::Rich(c) => &c.content,
            Self::Grid(c) => &c.content,
        }
    }
}

impl From<RichCell> for CellSource {
    fn from(cell: RichCell) -> Self {
        Self::Rich(cell)
    }
}

impl From<GridCellSource> for CellSource {
    fn from(cell: GridCellSource) -> Self {
        Self::Grid(cell)
    }
}

/// One source row: an ordered list of cell sources.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowModel {
    pub cells: Vec<CellSource>,
}

impl RowModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn cell(mut self, cell: impl Into<CellSource>) -> Self {
        self.cells.push(cell.into());
        self
    }

    /// Row of plain rich-text cells, one per string.
    #[must_use]
    pub fn texts<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        let mut row = Self::new();
        for text in texts {
            row = row.cell(RichCell::text(text));
        }
        row
    }
}

/// The source table: rows plus table-wide geometry and style.
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    pub rows: Vec<RowModel>,
    /// Per-column proportional widths; should sum to about 100. Empty means
    /// equal columns derived from the widest row.
    pub col_widths: Vec<f32>,
    /// Table width as a percentage of the printable page width.
    pub width_percent: f32,
    /// Cell padding in points; scaled into twips on import.
    pub padding_points: f32,
    /// Cell spacing in points; scaled into twips on import.
    pub spacing_points: f32,
    /// Row-scoped border group applied to every row.
    pub borders: BorderGroup,
    pub align: TableAlign,
    /// Leading rows repeated on every page break.
    pub header_rows: usize,
    /// Keep each row on one page (`\trkeep`).
    pub keep_together: bool,
    /// Tag cell paragraphs keep-with-next (`\keepn`).
    pub keep_with_next: bool,
    /// Vertical offset in half-points; doubled into the internal unit on
    /// import.
    pub v_offset_half_points: Option<i32>,
}

impl Default for TableModel {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            col_widths: Vec::new(),
            width_percent: 100.0,
            padding_points: 0.0,
            spacing_points: 0.0,
            borders: BorderGroup::new(BorderScope::Row),
            align: TableAlign::Left,
            header_rows: 0,
            keep_together: false,
            keep_with_next: false,
            v_offset_half_points: None,
        }
    }
}

impl TableModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn row(mut self, row: RowModel) -> Self {
        self.rows.push(row);
        self
    }

    #[must_use]
    pub fn col_widths(mut self, widths: Vec<f32>) -> Self {
        self.col_widths = widths;
        self
    }

    #[must_use]
    pub fn width_percent(mut self, percent: f32) -> Self {
        self.width_percent = percent;
        self
    }

    #[must_use]
    pub fn padding_points(mut self, points: f32) -> Self {
        self.padding_points = points;
        self
    }

    #[must_use]
    pub fn spacing_points(mut self, points: f32) -> Self {
        self.spacing_points = points;
        self
    }

    #[must_use]
    pub fn borders(mut self, borders: BorderGroup) -> Self {
        self.borders = borders;
        self
    }

    #[must_use]
    pub fn align(mut self, align: TableAlign) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn header_rows(mut self, count: usize) -> Self {
        self.header_rows = count;
        self
    }

    #[must_use]
    pub fn keep_together(mut self) -> Self {
        self.keep_together = true;
        self
    }

    #[must_use]
    pub fn keep_with_next(mut self) -> Self {
        self.keep_with_next = true;
        self
    }

    #[must_use]
    pub fn v_offset_half_points(mut self, half_points: i32) -> Self {
        self.v_offset_half_points = Some(half_points);
        self
    }
}
