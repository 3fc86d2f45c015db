//! An ordered row of cells with two-phase merge resolution.
//!
//! Merge resolution is split into two strictly separated stages:
//!
//! 1. [`TableRow::resolve_spanning`] only relabels: colspan neighbors are
//!    absorbed into placeholders and rowspan children in the rows below are
//!    wired to the parent's shared format. Nothing is removed.
//! 2. [`TableRow::compact`] only removes placeholders.
//!
//! Stage 1 must complete for every row of the table before stage 2 runs for
//! any row, because rowspan resolution indexes into rows below the current
//! one by original column position.

use std::io::{self, Write};

use crate::border::BorderGroup;
use crate::cell::{FormatHandle, RowSlot, TableCell};
use crate::mapper::ContentMapper;
use crate::model::{RowModel, TableAlign};
use crate::sink::RtfSink;
use crate::twips::{self, Twips};
use crate::writer::ImportContext;

/// Table-level inputs a row needs while importing its cells.
#[derive(Debug)]
pub(crate) struct RowImport<'a> {
    pub row_width: Twips,
    pub col_widths: &'a [f32],
    pub borders: &'a BorderGroup,
    pub padding: Twips,
    pub keep_with_next: bool,
}

/// Table-level properties a row needs while serializing itself.
#[derive(Debug)]
pub(crate) struct RowProps<'a> {
    pub align: TableAlign,
    pub borders: &'a BorderGroup,
    pub spacing: Twips,
    pub padding: Twips,
    pub header_rows: usize,
    pub keep_together: bool,
    pub definition_after: bool,
}

/// One table row: ordered slots plus row geometry.
#[derive(Debug, Clone)]
pub struct TableRow {
    slots: Vec<RowSlot>,
    width: Twips,
    index: usize,
}

impl TableRow {
    /// Build the row grid: one cell per declared column, proportional widths
    /// truncated to twips, right edges accumulated left to right. Columns
    /// the source row does not cover get empty cells.
    pub(crate) fn from_model(
        model: &RowModel,
        index: usize,
        import: &RowImport<'_>,
        mapper: &ContentMapper,
        ctx: &mut ImportContext<'_>,
    ) -> Self {
        let mut slots = Vec::with_capacity(import.col_widths.len());
        let mut right: Twips = 0;
        for (column, percent) in import.col_widths.iter().enumerate() {
            let cell_width = twips::percent_of(import.row_width, *percent);
            right += cell_width;
            let mut cell = match model.cells.get(column) {
                Some(source) => TableCell::from_source(
                    source,
                    import.borders,
                    import.padding,
                    import.keep_with_next,
                    mapper,
                    ctx,
                ),
                None => TableCell::empty(
                    import.borders,
                    import.padding,
                    import.keep_with_next,
                    ctx.colors,
                ),
            };
            cell.set_width(cell_width);
            cell.set_right(right);
            slots.push(RowSlot::Cell(cell));
        }
        Self {
            slots,
            width: import.row_width,
            index,
        }
    }

    #[must_use]
    pub fn width(&self) -> Twips {
        self.width
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn slots(&self) -> &[RowSlot] {
        &self.slots
    }

    /// The live cell at a slot position, if any.
    #[must_use]
    pub fn cell(&self, position: usize) -> Option<&TableCell> {
        self.slots.get(position).and_then(RowSlot::as_cell)
    }

    /// Stage 1: resolve colspan absorption within this row and wire rowspan
    /// children in the rows below. Relabels only; placeholders stay in
    /// place so later rows still see original column indices. Out-of-bounds
    /// span targets from malformed producer metadata are skipped.
    pub(crate) fn resolve_spanning(&mut self, rows_below: &mut [TableRow]) {
        for column in 0..self.slots.len() {
            let (col_span, row_span) = match &self.slots[column] {
                RowSlot::Cell(cell) => (cell.col_span() as usize, cell.row_span() as usize),
                RowSlot::Placeholder => continue,
            };

            if col_span > 1 {
                let mut absorbed: Twips = 0;
                for offset in 1..col_span {
                    let Some(slot) = self.slots.get_mut(column + offset) else {
                        break;
                    };
                    if let RowSlot::Cell(neighbor) =
                        std::mem::replace(slot, RowSlot::Placeholder)
                    {
                        absorbed += neighbor.width();
                    }
                }
                if let Some(cell) = self.slots[column].as_cell_mut() {
                    cell.grow(absorbed);
                }
            }

            if row_span > 1 {
                let Some(parent) = self.slots[column].as_cell() else {
                    continue;
                };
                let handle = parent.format_handle();
                for offset in 1..row_span {
                    let Some(below) = rows_below.get_mut(offset - 1) else {
                        break;
                    };
                    below.link_merge_child(column, &handle, col_span);
                }
            }
        }
    }

    /// Wire the cell at `column` as a vertical-merge child and placeholder
    /// out the columns its parent's colspan covers.
    fn link_merge_child(&mut self, column: usize, parent: &FormatHandle, parent_cols: usize) {
        match self.slots.get_mut(column) {
            Some(RowSlot::Cell(cell)) => cell.adopt_parent(parent),
            // Malformed span metadata; the span is simply not applied here.
            _ => return,
        }
        for offset in 1..parent_cols {
            if let Some(slot) = self.slots.get_mut(column + offset) {
                *slot = RowSlot::Placeholder;
            }
        }
    }

    /// Stage 2: drop placeholders, preserving survivor order. Idempotent.
    pub(crate) fn compact(&mut self) {
        self.slots.retain(|slot| !slot.is_placeholder());
    }

    /// Row height: the tallest surviving cell's declared minimum height.
    fn height(&self) -> Twips {
        self.slots
            .iter()
            .filter_map(RowSlot::as_cell)
            .map(TableCell::min_height)
            .max()
            .unwrap_or(0)
    }

    /// Emit the row definition block: `\trowd`, width, keep flag, height,
    /// header marker, alignment, table borders, spacing/padding pairs, then
    /// every surviving cell's definition in column order.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures.
    pub(crate) fn write_definition<W: Write>(
        &self,
        props: &RowProps<'_>,
        sink: &mut RtfSink<'_, W>,
    ) -> io::Result<()> {
        sink.control("trowd")?;
        sink.control_val("trftsWidth", 3)?;
        sink.control_val("trwWidth", self.width)?;
        if props.keep_together {
            sink.control("trkeep")?;
        }
        sink.control_val("trrh", self.height())?;
        if self.index < props.header_rows {
            sink.control("trhdr")?;
        }
        sink.control(props.align.word())?;
        props.borders.write(sink)?;
        if props.spacing > 0 {
            for (word, flag) in [
                ("trspdl", "trspdfl"),
                ("trspdt", "trspdft"),
                ("trspdr", "trspdfr"),
                ("trspdb", "trspdfb"),
            ] {
                sink.control_val(word, props.spacing)?;
                sink.control_val(flag, 3)?;
            }
        }
        if props.padding > 0 {
            for (word, flag) in [
                ("trpaddl", "trpaddfl"),
                ("trpaddt", "trpaddft"),
                ("trpaddr", "trpaddfr"),
                ("trpaddb", "trpaddfb"),
            ] {
                sink.control_val(word, props.padding)?;
                sink.control_val(flag, 3)?;
            }
        }
        for slot in &self.slots {
            if let RowSlot::Cell(cell) = slot {
                cell.write_definition(sink)?;
            }
        }
        Ok(())
    }

    /// Emit the full row: definition, every surviving cell's content, the
    /// definition again when the document settings require trailing
    /// redefinition, and the `\row` terminator.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures.
    pub(crate) fn write_content<W: Write>(
        &self,
        props: &RowProps<'_>,
        sink: &mut RtfSink<'_, W>,
    ) -> io::Result<()> {
        self.write_definition(props, sink)?;
        for slot in &self.slots {
            if let RowSlot::Cell(cell) = slot {
                cell.write_content(sink)?;
            }
        }
        if props.definition_after {
            self.write_definition(props, sink)?;
        }
        sink.control("row")
    }
}
