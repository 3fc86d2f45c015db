//! Property-based tests for geometry and merge resolution.
//!
//! These exercise the integer arithmetic and the two-phase merge pass with
//! randomized inputs, checking the invariants that hold for any table
//! rather than a hand-picked example.

mod common;

use common::init_test_logging;
use proptest::prelude::*;
use rtfgrid::prelude::*;

fn import_table(model: &TableModel) -> Table {
    let page = PageFormat::a4();
    let settings = WriterSettings::default();
    let mut colors = ColorTable::new();
    let mut ctx = ImportContext {
        page: &page,
        colors: &mut colors,
        settings: &settings,
    };
    let mut table = Table::from_model(model, &ContentMapper::new(), &mut ctx);
    table.resolve_merges();
    table
}

fn cell_width_sum(row: &TableRow) -> Twips {
    row.slots()
        .iter()
        .filter_map(RowSlot::as_cell)
        .map(TableCell::width)
        .sum()
}

/// Column width percentages that sum to 100.
fn normalized_widths() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(1.0f32..100.0, 1..=12).prop_map(|raw| {
        let total: f32 = raw.iter().sum();
        raw.iter().map(|w| w / total * 100.0).collect()
    })
}

proptest! {
    /// Truncation error per column is below one twip, so the gap between
    /// the declared row width and the cell sum is bounded by the column
    /// count.
    #[test]
    fn prop_width_sum_within_column_count(widths in normalized_widths()) {
        init_test_logging();

        let columns = widths.len();
        let model = TableModel::new()
            .col_widths(widths)
            .row(RowModel::texts(vec!["x"; columns]));
        let table = import_table(&model);

        let row = table.row(0).unwrap();
        let gap = (row.width() - cell_width_sum(row)).abs();
        prop_assert!(
            gap <= columns as Twips,
            "gap {gap} over {columns} columns"
        );
    }

    /// Each cell's right edge is the running sum of the widths before it,
    /// regardless of the percentage mix.
    #[test]
    fn prop_right_edges_accumulate(widths in normalized_widths()) {
        init_test_logging();

        let columns = widths.len();
        let model = TableModel::new()
            .col_widths(widths)
            .row(RowModel::texts(vec!["x"; columns]));
        let table = import_table(&model);

        let mut running = 0;
        for slot in table.row(0).unwrap().slots() {
            let cell = slot.as_cell().unwrap();
            running += cell.width();
            prop_assert_eq!(cell.right(), running);
        }
    }

    /// A colspan absorbs its neighbors' widths exactly: the surviving
    /// cells of the spanned row still sum to the same total as a plain row.
    #[test]
    fn prop_colspan_conserves_width(
        widths in normalized_widths(),
        span_start in 0usize..6,
        span_len in 2u16..5,
    ) {
        init_test_logging();

        let columns = widths.len();
        prop_assume!(span_start < columns);
        let span_len = span_len.min((columns - span_start) as u16);
        prop_assume!(span_len >= 2);

        let mut spanned = RowModel::new();
        for i in 0..columns {
            let cell = RichCell::text(format!("c{i}"));
            spanned = if i == span_start {
                spanned.cell(cell.col_span(span_len))
            } else {
                spanned.cell(cell)
            };
        }
        let model = TableModel::new()
            .col_widths(widths)
            .row(spanned)
            .row(RowModel::texts(vec!["y"; columns]));
        let table = import_table(&model);

        let spanned_sum = cell_width_sum(table.row(0).unwrap());
        let plain_sum = cell_width_sum(table.row(1).unwrap());
        prop_assert_eq!(spanned_sum, plain_sum);
        prop_assert_eq!(
            table.row(0).unwrap().len(),
            columns - span_len as usize + 1
        );
    }

    /// After compaction no placeholder survives and every slot is a cell.
    #[test]
    fn prop_compaction_leaves_no_placeholders(
        widths in normalized_widths(),
        span_col in 0usize..6,
    ) {
        init_test_logging();

        let columns = widths.len();
        prop_assume!(span_col < columns);

        let mut first = RowModel::new();
        for i in 0..columns {
            let cell = RichCell::text(format!("c{i}"));
            first = if i == span_col {
                first.cell(cell.row_span(2))
            } else {
                first.cell(cell)
            };
        }
        let model = TableModel::new()
            .col_widths(widths)
            .row(first)
            .row(RowModel::texts(vec!["y"; columns]));
        let table = import_table(&model);

        for row in table.rows() {
            prop_assert!(row.slots().iter().all(|s| !s.is_placeholder()));
        }
        // The merge child occupies a real slot in the second row.
        let child = table.row(1).unwrap().cell(span_col).unwrap();
        prop_assert_eq!(child.merge_state(), MergeState::VerticalChild);
    }

    /// Serialized output is structurally balanced: every group opened is
    /// closed, and each surviving cell emits exactly one `\cell`.
    #[test]
    fn prop_document_is_balanced(rows in 1usize..6, columns in 1usize..6) {
        init_test_logging();

        let mut model = TableModel::new()
            .col_widths(vec![100.0 / columns as f32; columns]);
        for r in 0..rows {
            model = model.row(RowModel::texts(
                (0..columns).map(|c| format!("r{r}c{c}")),
            ));
        }
        let rtf = common::render_document(&model);

        prop_assert_eq!(
            rtf.matches('{').count(),
            rtf.matches('}').count()
        );
        prop_assert_eq!(common::count_cell_words(&rtf), rows * columns);
        prop_assert_eq!(rtf.matches("\\trowd").count(), rows);
    }
}
