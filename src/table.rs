//! Ordered rows plus table-wide geometry, style and merge orchestration.
//!
//! The table owns the whole-table two-phase merge ordering: every row's
//! spanning resolution runs before any row's compaction, because rowspan
//! resolution indexes into not-yet-compacted rows below the current one.

use std::io::{self, Write};

use crate::border::{BorderGroup, BorderScope};
use crate::mapper::ContentMapper;
use crate::model::{TableAlign, TableModel};
use crate::row::{RowImport, RowProps, TableRow};
use crate::sink::RtfSink;
use crate::twips::{self, Twips};
use crate::writer::ImportContext;

/// An imported table, ready for merge resolution and serialization.
#[derive(Debug, Clone)]
pub struct Table {
    rows: Vec<TableRow>,
    borders: BorderGroup,
    align: TableAlign,
    spacing: Twips,
    padding: Twips,
    header_rows: usize,
    keep_together: bool,
    definition_after: bool,
    v_offset: Option<Twips>,
}

impl Table {
    /// Import a source table.
    ///
    /// Row width is the printable page width scaled by the table's width
    /// percentage; padding and spacing scale from points into twips; the
    /// vertical offset arrives in half-points and is doubled into the
    /// internal unit. An empty column-width list derives equal columns from
    /// the widest source row.
    pub fn from_model(
        model: &TableModel,
        mapper: &ContentMapper,
        ctx: &mut ImportContext<'_>,
    ) -> Self {
        let row_width = twips::percent_of(ctx.page.content_width(), model.width_percent);
        let padding = twips::from_points(model.padding_points);
        let spacing = twips::from_points(model.spacing_points);
        let borders = model.borders.rescoped(BorderScope::Row);
        borders.register_colors(ctx.colors);

        let derived_widths;
        let col_widths: &[f32] = if model.col_widths.is_empty() {
            let columns = model.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);
            derived_widths = if columns == 0 {
                Vec::new()
            } else {
                vec![100.0 / columns as f32; columns]
            };
            &derived_widths
        } else {
            &model.col_widths
        };

        let definition_after = ctx.settings.row_definition_after;
        let mut rows = Vec::with_capacity(model.rows.len());
        for (index, row_model) in model.rows.iter().enumerate() {
            let import = RowImport {
                row_width,
                col_widths,
                borders: &borders,
                padding,
                keep_with_next: model.keep_with_next,
            };
            rows.push(TableRow::from_model(
                row_model,
                index,
                &import,
                mapper,
                ctx,
            ));
        }
        log::debug!(
            "imported table: {} rows, {} columns, row width {} twips",
            rows.len(),
            col_widths.len(),
            row_width
        );

        Self {
            rows,
            borders,
            align: model.align,
            spacing,
            padding,
            header_rows: model.header_rows,
            keep_together: model.keep_together,
            definition_after,
            v_offset: model.v_offset_half_points.map(|half_points| half_points * 2),
        }
    }

    /// Resolve all spans, strictly two-phase across the whole table:
    /// every row's spanning resolution first, then every row's compaction.
    pub fn resolve_merges(&mut self) {
        for index in 0..self.rows.len() {
            let (head, below) = self.rows.split_at_mut(index + 1);
            head[index].resolve_spanning(below);
        }
        for row in &mut self.rows {
            row.compact();
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&TableRow> {
        self.rows.get(index)
    }

    #[must_use]
    pub fn header_rows(&self) -> usize {
        self.header_rows
    }

    /// Stream the table: optional page offset, every row in order, trailing
    /// paragraph reset.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures.
    pub fn write_content<W: Write>(&self, sink: &mut RtfSink<'_, W>) -> io::Result<()> {
        if let Some(offset) = self.v_offset {
            sink.control_val("tposy", offset)?;
        }
        let props = RowProps {
            align: self.align,
            borders: &self.borders,
            spacing: self.spacing,
            padding: self.padding,
            header_rows: self.header_rows,
            keep_together: self.keep_together,
            definition_after: self.definition_after,
        };
        for row in &self.rows {
            row.write_content(&props, sink)?;
        }
        sink.control("pard")
    }
}
