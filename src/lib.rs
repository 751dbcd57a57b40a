#![warn(clippy::all, rust_2018_idioms)]

//! Board connectivity and circuit evaluation for the grid circuit puzzle.
//!
//! The board holds at most one component per cell. Each component exposes up
//! to four conducting ports (one per grid-edge face) as a pure function of
//! its kind and rotation; two neighboring cells conduct when their facing
//! ports are both active. A breadth-first search over that relation decides
//! whether the source reaches the destination, and the resistance and
//! capacitance of the qualifying path components feed an RC timing check
//! (bulb lit for ~5 seconds).
//!
//! Rendering and input handling live in a frontend; this crate is only the
//! rules.

mod board;
mod component;
mod ports;
mod sim;
mod variant;

pub use board::{Board, BoardError, SimReport};
pub use component::{Component, ComponentKind, ComponentType, Rotation};
pub use ports::{active_ports, are_connected, Direction, Ports};
pub use sim::{evaluate, Evaluation, FailureReason, Outcome};
pub use variant::Variant;

/// Grid coordinate as (row, col). Signed so that out-of-range lookups
/// (including negative ones) are expressible and simply return nothing.
pub type CellPos = (i32, i32);
