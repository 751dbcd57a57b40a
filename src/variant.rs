use crate::component::{Component, ComponentKind};
use crate::CellPos;

/// Level configuration: board size, placement caps, preset layout and the
/// R/C combination rule.
#[derive(serde::Deserialize, serde::Serialize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// 3x7 board; resistors sum, capacitors combine by reciprocal sum.
    Series,
    /// 5x6 board; resistors combine by reciprocal sum, capacitors sum.
    Parallel,
}

impl Variant {
    pub fn rows(self) -> i32 {
        match self {
            Variant::Series => 3,
            Variant::Parallel => 5,
        }
    }

    pub fn cols(self) -> i32 {
        match self {
            Variant::Series => 7,
            Variant::Parallel => 6,
        }
    }

    /// `None` means unlimited.
    pub fn max_resistors(self) -> Option<usize> {
        match self {
            Variant::Series => Some(2),
            Variant::Parallel => Some(1),
        }
    }

    pub fn max_capacitors(self) -> Option<usize> {
        match self {
            Variant::Series => Some(1),
            Variant::Parallel => Some(2),
        }
    }

    /// The fixed locked layout for this level, applied to an empty grid both
    /// at construction and on every reset.
    pub fn preset(self) -> Vec<(CellPos, Component)> {
        let source = Component::source("Source", 10.0).locked();
        let ground = Component::new("Ground", ComponentKind::Destination).locked();
        let bulb = Component::bulb("Bulb").locked();
        let block = || Component::new("Block", ComponentKind::Block).locked();

        match self {
            Variant::Series => vec![
                ((0, 0), source),
                ((0, 6), bulb),
                ((2, 6), ground),
                ((1, 0), block()),
                ((1, 1), block()),
                ((2, 0), block()),
                ((2, 1), block()),
                ((0, 3), block()),
                ((1, 3), block()),
                ((1, 5), block()),
                ((2, 5), block()),
            ],
            Variant::Parallel => vec![
                ((2, 0), source),
                ((4, 5), ground),
                ((2, 5), bulb),
                ((0, 0), block()),
                ((1, 0), block()),
                ((3, 0), block()),
                ((4, 0), block()),
                ((1, 2), block()),
                ((2, 2), block()),
                ((3, 2), block()),
                ((1, 4), block()),
                ((2, 4), block()),
                ((3, 4), block()),
                ((4, 4), block()),
            ],
        }
    }
}
