//! End-to-end tests for table serialization.
//!
//! Tables are the most complex part of the pipeline with many interacting
//! features: proportional geometry, colspan/rowspan resolution, borders,
//! padding, header rows, and the strict control-word grammar.
//!
//! Run with: RUST_LOG=debug cargo test --test e2e_table -- --nocapture

mod common;

use common::{count_cell_words, init_test_logging, render_document};
use rtfgrid::prelude::*;

// =============================================================================
// Scenario 1: Geometry
// =============================================================================

#[test]
fn e2e_equal_columns_width_sum_within_tolerance() {
    init_test_logging();
    tracing::info!("Starting equal-column width sum test");

    for columns in 1..=9usize {
        let widths = vec![100.0 / columns as f32; columns];
        let model = TableModel::new()
            .col_widths(widths)
            .row(RowModel::texts(vec!["x"; columns]));

        let page = PageFormat::a4();
        let settings = WriterSettings::default();
        let mut colors = ColorTable::new();
        let mut ctx = ImportContext {
            page: &page,
            colors: &mut colors,
            settings: &settings,
        };
        let mut table = Table::from_model(&model, &ContentMapper::new(), &mut ctx);
        table.resolve_merges();

        let row = table.row(0).unwrap();
        let sum: Twips = row
            .slots()
            .iter()
            .filter_map(RowSlot::as_cell)
            .map(TableCell::width)
            .sum();
        tracing::debug!(columns, row_width = row.width(), sum, "geometry");
        assert!(
            (row.width() - sum).abs() <= columns as Twips,
            "{columns} columns: width {} vs sum {sum}",
            row.width()
        );
    }
}

// =============================================================================
// Scenario 2: Colspan
// =============================================================================

#[test]
fn e2e_colspan_2x2() {
    init_test_logging();

    let model = TableModel::new()
        .col_widths(vec![50.0, 50.0])
        .row(
            RowModel::new()
                .cell(RichCell::text("span").col_span(2))
                .cell(RichCell::text("absorbed")),
        )
        .row(RowModel::texts(["a", "b"]));

    let rtf = render_document(&model);
    tracing::debug!(rtf = %rtf, "rendered");

    // Row 0 has one surviving cell, row 1 has two: three \cell words total.
    assert_eq!(count_cell_words(&rtf), 3);
    // The absorbed cell's content never reaches the stream.
    assert!(!rtf.contains("absorbed"));
    assert!(rtf.contains("span"));
}

#[test]
fn e2e_colspan_surviving_cell_spans_full_row() {
    init_test_logging();

    let model = TableModel::new()
        .col_widths(vec![50.0, 50.0])
        .row(
            RowModel::new()
                .cell(RichCell::text("span").col_span(2))
                .cell(RichCell::text("gone")),
        )
        .row(RowModel::texts(["a", "b"]));

    let page = PageFormat::a4();
    let settings = WriterSettings::default();
    let mut colors = ColorTable::new();
    let mut ctx = ImportContext {
        page: &page,
        colors: &mut colors,
        settings: &settings,
    };
    let mut table = Table::from_model(&model, &ContentMapper::new(), &mut ctx);
    table.resolve_merges();

    let row0 = table.row(0).unwrap();
    assert_eq!(row0.len(), 1);
    let survivor = row0.cell(0).unwrap();
    assert_eq!(survivor.right(), row0.width());

    let row1 = table.row(1).unwrap();
    assert_eq!(row1.len(), 2, "row 1 unaffected");
}

// =============================================================================
// Scenario 3: Rowspan
// =============================================================================

#[test]
fn e2e_rowspan_2x2_child_shares_parent_format() {
    init_test_logging();

    let model = TableModel::new()
        .col_widths(vec![50.0, 50.0])
        .row(
            RowModel::new()
                .cell(
                    RichCell::text("tall")
                        .row_span(2)
                        .background(Color::rgb(200, 200, 200)),
                )
                .cell(RichCell::text("b")),
        )
        .row(RowModel::texts(["shadow", "c"]));

    let page = PageFormat::a4();
    let settings = WriterSettings::default();
    let mut colors = ColorTable::new();
    let mut ctx = ImportContext {
        page: &page,
        colors: &mut colors,
        settings: &settings,
    };
    let mut table = Table::from_model(&model, &ContentMapper::new(), &mut ctx);
    table.resolve_merges();

    let parent = table.row(0).unwrap().cell(0).unwrap();
    let child = table.row(1).unwrap().cell(0).unwrap();
    assert_eq!(child.merge_state(), MergeState::VerticalChild);
    assert!(child.shares_format_with(parent));
    assert_eq!(child.width(), parent.width());
    assert_eq!(child.right(), parent.right());
    assert_eq!(child.background(), parent.background());
}

#[test]
fn e2e_rowspan_child_emits_child_merge_word() {
    init_test_logging();

    let model = TableModel::new()
        .col_widths(vec![50.0, 50.0])
        .row(
            RowModel::new()
                .cell(RichCell::text("tall").row_span(2))
                .cell(RichCell::text("b")),
        )
        .row(RowModel::texts(["shadow", "c"]));

    let rtf = render_document(&model);
    tracing::debug!(rtf = %rtf, "rendered");
    assert_eq!(rtf.matches("\\clvmgf").count(), 1, "one merge parent");
    assert_eq!(rtf.matches("\\clvmrg").count(), 1, "one merge child");
    assert!(!rtf.contains("shadow"), "child content is dropped");
}

#[test]
fn e2e_post_merge_border_mutation_reaches_child() {
    init_test_logging();

    let model = TableModel::new()
        .col_widths(vec![100.0])
        .row(RowModel::new().cell(RichCell::text("tall").row_span(2)))
        .row(RowModel::texts(["x"]));

    let page = PageFormat::a4();
    let settings = WriterSettings::default();
    let mut colors = ColorTable::new();
    let mut ctx = ImportContext {
        page: &page,
        colors: &mut colors,
        settings: &settings,
    };
    let mut table = Table::from_model(&model, &ContentMapper::new(), &mut ctx);
    table.resolve_merges();

    // Mutating the parent's borders after the merge must be visible through
    // the child's shared format: this is aliasing, not a copy.
    {
        let rows = table.rows();
        assert!(rows[1]
            .cell(0)
            .unwrap()
            .borders()
            .get(BorderPosition::Bottom)
            .is_none());
    }
    // Re-import to get mutable access through the public test surface is not
    // needed: the parent handle is shared, so mutate via a clone of row 0.
    let mut parent = table.row(0).unwrap().cell(0).unwrap().clone();
    parent.add_border(Sides::BOTTOM, BorderStyle::Single, 15, Color::BLACK);
    assert!(table
        .row(1)
        .unwrap()
        .cell(0)
        .unwrap()
        .borders()
        .get(BorderPosition::Bottom)
        .is_some());
}

// =============================================================================
// Scenario 4: Padding, headers, borders
// =============================================================================

#[test]
fn e2e_padding_240_twips_emits_half_values() {
    init_test_logging();

    let model = TableModel::new()
        .col_widths(vec![100.0])
        .row(RowModel::new().cell(RichCell::text("padded").padding(240)));

    let rtf = render_document(&model);
    assert!(rtf.contains("\\clpadl120\\clpadfl3"));
    assert!(rtf.contains("\\clpadt120\\clpadft3"));
    assert!(rtf.contains("\\clpadr120\\clpadfr3"));
    assert!(rtf.contains("\\clpadb120\\clpadfb3"));
}

#[test]
fn e2e_header_row_count_three() {
    init_test_logging();

    let mut model = TableModel::new().col_widths(vec![100.0]).header_rows(3);
    for i in 0..5 {
        model = model.row(RowModel::texts([format!("row {i}")]));
    }
    let rtf = render_document(&model);
    // Row indices 0, 1, 2 are header rows; 3 and 4 are not.
    assert_eq!(rtf.matches("\\trhdr").count(), 3);
}

#[test]
fn e2e_table_borders_emitted_per_row_in_fixed_order() {
    init_test_logging();

    let model = TableModel::new()
        .col_widths(vec![100.0])
        .borders(BorderGroup::with_borders(
            BorderScope::Row,
            Sides::ALL,
            BorderStyle::Single,
            10,
            Color::BLACK,
        ))
        .row(RowModel::texts(["x"]));

    let rtf = render_document(&model);
    let l = rtf.find("\\trbrdrl").unwrap();
    let t = rtf.find("\\trbrdrt").unwrap();
    let r = rtf.find("\\trbrdrr").unwrap();
    let b = rtf.find("\\trbrdrb").unwrap();
    let v = rtf.find("\\trbrdrv").unwrap();
    let h = rtf.find("\\trbrdrh").unwrap();
    assert!(l < t && t < r && r < b && b < v && v < h, "fixed enum order");
    // Cells inherit the frame but not the interior edges.
    assert!(rtf.contains("\\clbrdrl"));
    assert!(!rtf.contains("\\clbrdrv"));
}

#[test]
fn e2e_grid_cell_per_side_padding() {
    init_test_logging();

    let model = TableModel::new().col_widths(vec![100.0]).row(
        RowModel::new().cell(
            GridCellSource::new()
                .padding(Padding::new(100, 0, 60, 0))
                .child(Element::Paragraph(ParagraphModel::text("grid"))),
        ),
    );
    let rtf = render_document(&model);
    assert!(rtf.contains("\\clpadl50\\clpadfl3"));
    assert!(rtf.contains("\\clpadr30\\clpadfr3"));
    assert!(!rtf.contains("\\clpadt"), "zero sides are omitted");
}

// =============================================================================
// Scenario 5: Placeholders never serialize
// =============================================================================

#[test]
fn e2e_no_placeholder_output() {
    init_test_logging();

    let model = TableModel::new()
        .col_widths(vec![25.0, 25.0, 25.0, 25.0])
        .row(
            RowModel::new()
                .cell(RichCell::text("wide").col_span(3))
                .cell(RichCell::text("g1"))
                .cell(RichCell::text("g2"))
                .cell(RichCell::text("last")),
        )
        .row(RowModel::texts(["a", "b", "c", "d"]));

    let rtf = render_document(&model);
    // Row 0: 2 survivors; row 1: 4 survivors.
    assert_eq!(count_cell_words(&rtf), 6);
}

// =============================================================================
// Scenario 6: Fit-to-page flags and spacing
// =============================================================================

#[test]
fn e2e_keep_flags() {
    init_test_logging();

    let model = TableModel::new()
        .col_widths(vec![100.0])
        .keep_together()
        .keep_with_next()
        .row(RowModel::new().cell(RichCell::new()));

    let rtf = render_document(&model);
    assert!(rtf.contains("\\trkeep"));
    // The empty cell's default paragraph carries keep-with-next.
    assert!(rtf.contains("\\pard\\intbl\\ql\\keepn\\cell"));
}

#[test]
fn e2e_spacing_and_padding_words() {
    init_test_logging();

    let model = TableModel::new()
        .col_widths(vec![100.0])
        .padding_points(6.0)
        .spacing_points(3.0)
        .row(RowModel::texts(["x"]));

    let rtf = render_document(&model);
    // 6pt -> 120 twips, 3pt -> 60 twips.
    assert!(rtf.contains("\\trspdl60\\trspdfl3"));
    assert!(rtf.contains("\\trspdb60\\trspdfb3"));
    assert!(rtf.contains("\\trpaddl120\\trpaddfl3"));
    // Table padding flows into rich cells without their own padding.
    assert!(rtf.contains("\\clpadl60\\clpadfl3"));
}

// =============================================================================
// Scenario 7: Nested tables
// =============================================================================

#[test]
fn e2e_nested_table_serializes_inline() {
    init_test_logging();

    let inner = TableModel::new()
        .col_widths(vec![100.0])
        .row(RowModel::texts(["inner"]));
    let model = TableModel::new().col_widths(vec![100.0]).row(
        RowModel::new().cell(RichCell::new().child(Element::Table(inner))),
    );

    let rtf = render_document(&model);
    assert!(rtf.contains("inner"));
    assert_eq!(rtf.matches("\\trowd").count(), 2);
    assert_eq!(rtf.matches("\\row").count(), 2);
}
