//! # rtfgrid
//!
//! A table-to-RTF serialization engine: turns a generic tabular content
//! model (rows of cells with column/row spanning, borders, padding,
//! background, alignment) into an RTF control-word byte stream consumable by
//! word processors.
//!
//! ## Quick Start
//!
//! ```rust
//! use rtfgrid::prelude::*;
//!
//! let model = TableModel::new()
//!     .col_widths(vec![50.0, 50.0])
//!     .row(RowModel::texts(["Name", "Value"]))
//!     .row(RowModel::texts(["Alice", "100"]))
//!     .header_rows(1);
//!
//! let mut writer = RtfWriter::new(Vec::new());
//! writer.open().unwrap();
//! writer.add_table(&model).unwrap();
//! writer.close().unwrap();
//! let rtf = writer.into_inner();
//! assert!(rtf.starts_with(b"{\\rtf1"));
//! ```
//!
//! ## Core Concepts
//!
//! - **TableModel**: the producer-facing tabular content model
//! - **Table / TableRow / TableCell**: the imported grid with two-phase
//!   colspan/rowspan resolution
//! - **BorderGroup**: up to six styled edges scoped to a row or cell
//! - **RtfSink**: the ordered control-word emitter
//! - **RtfWriter**: reusable document lifecycle over any byte sink
//!
//! All geometry is integer twips (1/20 point) with exact truncation, so
//! output is reproducible byte-for-byte.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
// Proportional geometry truncates by contract.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

pub mod border;
pub mod cell;
pub mod color;
pub mod mapper;
pub mod model;
pub mod row;
pub mod sink;
pub mod table;
pub mod twips;
pub mod writer;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::border::{Border, BorderGroup, BorderPosition, BorderScope, BorderStyle, Sides};
    pub use crate::cell::{CellFormat, MergeState, RowSlot, TableCell};
    pub use crate::color::{Color, ColorParseError, ColorTable};
    pub use crate::mapper::{ContentMapper, MappedElement, RtfParagraph};
    pub use crate::model::{
        CellSource, Element, GridCellSource, HorizontalAlign, ListModel, Padding, ParagraphModel,
        RichCell, RowModel, TableAlign, TableModel, TextRun, VerticalAlign,
    };
    pub use crate::row::TableRow;
    pub use crate::sink::RtfSink;
    pub use crate::table::Table;
    pub use crate::twips::{Twips, TWIPS_PER_POINT};
    pub use crate::writer::{ImportContext, PageFormat, RtfError, RtfWriter, WriterSettings};
}

// Re-export key types at crate root
pub use border::{BorderGroup, BorderScope, BorderStyle, Sides};
pub use color::{Color, ColorTable};
pub use model::TableModel;
pub use table::Table;
pub use writer::{PageFormat, RtfError, RtfWriter, WriterSettings};
