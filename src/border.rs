//! Per-side border registry for rows and cells.
//!
//! A [`BorderGroup`] holds up to six styled edges keyed by [`BorderPosition`]
//! and scoped to either a row (interior vertical/horizontal edges are legal)
//! or a cell (outer edges only). Callers address sides through the [`Sides`]
//! bitmask; the group expands the mask into discrete entries so that
//! serialization can walk positions in the fixed enum order the RTF grammar
//! expects.

use std::io::{self, Write};

use bitflags::bitflags;

use crate::color::{Color, ColorTable};
use crate::sink::RtfSink;
use crate::twips::Twips;

bitflags! {
    /// Bitmask addressing one or more border sides.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Sides: u8 {
        const LEFT = 1;
        const TOP = 1 << 1;
        const RIGHT = 1 << 2;
        const BOTTOM = 1 << 3;
        /// Interior grid edges; expands only under row scope.
        const BOX = 1 << 4;
        /// The four outer edges.
        const FRAME = Self::LEFT.bits()
            | Self::TOP.bits()
            | Self::RIGHT.bits()
            | Self::BOTTOM.bits();
        const ALL = Self::FRAME.bits() | Self::BOX.bits();
    }
}

/// Line style of a single border edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    Single,
    Thick,
    Double,
    Dotted,
    Dashed,
    Hairline,
}

impl BorderStyle {
    fn control_word(self) -> &'static str {
        match self {
            Self::Single => "brdrs",
            Self::Thick => "brdrth",
            Self::Double => "brdrdb",
            Self::Dotted => "brdrdot",
            Self::Dashed => "brdrdash",
            Self::Hairline => "brdrhair",
        }
    }
}

/// One styled edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub style: BorderStyle,
    pub width: Twips,
    pub color: Color,
}

/// Discrete border positions, in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderPosition {
    Left,
    Top,
    Right,
    Bottom,
    Vertical,
    Horizontal,
}

impl BorderPosition {
    /// Fixed emission order.
    pub const ORDER: [Self; 6] = [
        Self::Left,
        Self::Top,
        Self::Right,
        Self::Bottom,
        Self::Vertical,
        Self::Horizontal,
    ];

    fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Top => 1,
            Self::Right => 2,
            Self::Bottom => 3,
            Self::Vertical => 4,
            Self::Horizontal => 5,
        }
    }

    fn word(self, scope: BorderScope) -> &'static str {
        match scope {
            BorderScope::Row => match self {
                Self::Left => "trbrdrl",
                Self::Top => "trbrdrt",
                Self::Right => "trbrdrr",
                Self::Bottom => "trbrdrb",
                Self::Vertical => "trbrdrv",
                Self::Horizontal => "trbrdrh",
            },
            // Interior positions are never stored under cell scope; the
            // fallbacks keep the match total.
            BorderScope::Cell => match self {
                Self::Left | Self::Vertical => "clbrdrl",
                Self::Top => "clbrdrt",
                Self::Right => "clbrdrr",
                Self::Bottom | Self::Horizontal => "clbrdrb",
            },
        }
    }
}

/// Whether a group belongs to a row (interior edges legal) or a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderScope {
    Row,
    Cell,
}

impl BorderScope {
    fn allows(self, position: BorderPosition) -> bool {
        match self {
            Self::Row => true,
            Self::Cell => !matches!(
                position,
                BorderPosition::Vertical | BorderPosition::Horizontal
            ),
        }
    }
}

/// Registry of up to six styled edges.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderGroup {
    scope: BorderScope,
    entries: [Option<Border>; 6],
}

impl BorderGroup {
    /// Create an empty group for the given scope.
    #[must_use]
    pub fn new(scope: BorderScope) -> Self {
        Self {
            scope,
            entries: [None; 6],
        }
    }

    /// Create a group and populate it in one step.
    #[must_use]
    pub fn with_borders(
        scope: BorderScope,
        sides: Sides,
        style: BorderStyle,
        width: Twips,
        color: Color,
    ) -> Self {
        let mut group = Self::new(scope);
        group.add_border(sides, style, width, color);
        group
    }

    /// Expand `sides` into discrete entries. Re-adding a side overwrites its
    /// prior entry (last write wins).
    pub fn add_border(&mut self, sides: Sides, style: BorderStyle, width: Twips, color: Color) {
        let border = Border { style, width, color };
        for position in self.positions_for(sides) {
            self.entries[position.index()] = Some(border);
        }
    }

    /// Delete entries matching `sides`. Absent entries are simply never
    /// drawn, so removing them is not an error.
    pub fn remove_border(&mut self, sides: Sides) {
        for position in self.positions_for(sides) {
            self.entries[position.index()] = None;
        }
    }

    fn positions_for(&self, sides: Sides) -> Vec<BorderPosition> {
        let mut positions = Vec::with_capacity(6);
        if sides.contains(Sides::LEFT) {
            positions.push(BorderPosition::Left);
        }
        if sides.contains(Sides::TOP) {
            positions.push(BorderPosition::Top);
        }
        if sides.contains(Sides::RIGHT) {
            positions.push(BorderPosition::Right);
        }
        if sides.contains(Sides::BOTTOM) {
            positions.push(BorderPosition::Bottom);
        }
        if sides.contains(Sides::BOX) && self.scope == BorderScope::Row {
            positions.push(BorderPosition::Vertical);
            positions.push(BorderPosition::Horizontal);
        }
        positions
    }

    /// Copy this group into a new scope, keeping only entries legal there.
    #[must_use]
    pub fn rescoped(&self, scope: BorderScope) -> Self {
        let mut group = Self::new(scope);
        for position in BorderPosition::ORDER {
            if scope.allows(position) {
                group.entries[position.index()] = self.entries[position.index()];
            }
        }
        group
    }

    /// The entry at a position, if present.
    #[must_use]
    pub fn get(&self, position: BorderPosition) -> Option<&Border> {
        self.entries[position.index()].as_ref()
    }

    #[must_use]
    pub fn scope(&self) -> BorderScope {
        self.scope
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    /// Register every entry's color in the document color table.
    pub(crate) fn register_colors(&self, colors: &mut ColorTable) {
        for border in self.entries.iter().flatten() {
            colors.register(border.color);
        }
    }

    /// Emit each present entry's control words in fixed enum order.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures.
    pub fn write<W: Write>(&self, sink: &mut RtfSink<'_, W>) -> io::Result<()> {
        for position in BorderPosition::ORDER {
            if let Some(border) = &self.entries[position.index()] {
                sink.control(position.word(self.scope))?;
                sink.control(border.style.control_word())?;
                sink.control_val("brdrw", border.width)?;
                let index = sink.color_index(border.color);
                sink.control_val("brdrcf", index)?;
            }
        }
        Ok(())
    }
}
