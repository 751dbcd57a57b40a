use crate::component::{Component, ComponentKind, Rotation};

/// Grid-neighbor direction, in the fixed enumeration order the path search
/// uses (up, down, left, right).
#[derive(serde::Deserialize, serde::Serialize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (row, col) offset of the neighbor in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// The four conduction flags of a component, one per grid-edge face.
#[derive(serde::Deserialize, serde::Serialize)]
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Ports {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Ports {
    pub const NONE: Ports = Ports::new(false, false, false, false);
    pub const ALL: Ports = Ports::new(true, true, true, true);

    pub const fn new(top: bool, right: bool, bottom: bool, left: bool) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Flag of the face pointing toward `dir`.
    pub fn facing(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.top,
            Direction::Right => self.right,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
        }
    }

    pub fn count(&self) -> usize {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .filter(|&&p| p)
            .count()
    }
}

/// The port table: which faces conduct, per kind and rotation.
///
/// Single source of truth for both the path search and any frontend
/// connection indicator; the two must never diverge.
pub fn active_ports(kind: ComponentKind, rotation: Rotation) -> Ports {
    use Rotation::{Deg0, Deg180, Deg270, Deg90};

    // (top, right, bottom, left)
    match kind {
        ComponentKind::Wire | ComponentKind::Resistor(_) | ComponentKind::Capacitor(_) => {
            match rotation {
                Deg0 | Deg180 => Ports::new(false, true, false, true),
                Deg90 | Deg270 => Ports::new(true, false, true, false),
            }
        }
        ComponentKind::CornerWire => match rotation {
            Deg0 => Ports::new(false, true, true, false),
            Deg90 => Ports::new(false, false, true, true),
            Deg180 => Ports::new(true, false, false, true),
            Deg270 => Ports::new(true, true, false, false),
        },
        ComponentKind::TeeWire => match rotation {
            Deg0 => Ports::new(false, true, true, true),
            Deg90 => Ports::new(true, false, true, true),
            Deg180 => Ports::new(true, true, false, true),
            Deg270 => Ports::new(true, true, true, false),
        },
        ComponentKind::Source => match rotation {
            Deg0 => Ports::new(false, true, false, false),
            Deg90 => Ports::new(false, false, true, false),
            Deg180 => Ports::new(false, false, false, true),
            Deg270 => Ports::new(true, false, false, false),
        },
        ComponentKind::Destination | ComponentKind::Bulb { .. } => Ports::ALL,
        ComponentKind::Block => Ports::NONE,
    }
}

/// Whether `a` conducts into its neighbor `b` lying in direction `dir`:
/// `a`'s port facing `dir` and `b`'s port facing back must both be active.
/// Symmetric under swapping the components and flipping the direction.
pub fn are_connected(a: &Component, b: &Component, dir: Direction) -> bool {
    let a_ports = active_ports(a.kind(), a.rotation());
    let b_ports = active_ports(b.kind(), b.rotation());
    a_ports.facing(dir) && b_ports.facing(dir.opposite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROTATIONS: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    fn kinds() -> Vec<(ComponentKind, usize)> {
        vec![
            (ComponentKind::Wire, 2),
            (ComponentKind::CornerWire, 2),
            (ComponentKind::TeeWire, 3),
            (ComponentKind::Resistor(1.0), 2),
            (ComponentKind::Capacitor(1.0), 2),
            (ComponentKind::Source, 1),
            (ComponentKind::Destination, 4),
            (ComponentKind::Bulb { lit: false }, 4),
            (ComponentKind::Block, 0),
        ]
    }

    #[test]
    fn port_counts_match_kind() {
        for (kind, expected) in kinds() {
            for rot in ALL_ROTATIONS {
                assert_eq!(
                    active_ports(kind, rot).count(),
                    expected,
                    "{kind:?} at {rot:?}"
                );
            }
        }
    }

    #[test]
    fn four_quarter_turns_restore_ports() {
        for (kind, _) in kinds() {
            for rot in ALL_ROTATIONS {
                let original = active_ports(kind, rot);
                let back = active_ports(
                    kind,
                    rot.rotated().rotated().rotated().rotated(),
                );
                assert_eq!(original, back, "{kind:?} at {rot:?}");
            }
        }
    }

    #[test]
    fn wire_conducts_along_its_axis_only() {
        let horizontal = active_ports(ComponentKind::Wire, Rotation::Deg0);
        assert!(horizontal.left && horizontal.right);
        assert!(!horizontal.top && !horizontal.bottom);

        let vertical = active_ports(ComponentKind::Wire, Rotation::Deg90);
        assert!(vertical.top && vertical.bottom);
        assert!(!vertical.left && !vertical.right);
    }

    #[test]
    fn source_conducts_out_of_one_rotating_face() {
        assert!(active_ports(ComponentKind::Source, Rotation::Deg0).right);
        assert!(active_ports(ComponentKind::Source, Rotation::Deg90).bottom);
        assert!(active_ports(ComponentKind::Source, Rotation::Deg180).left);
        assert!(active_ports(ComponentKind::Source, Rotation::Deg270).top);
    }

    #[test]
    fn connection_requires_both_facing_ports() {
        let source = Component::source("src", 10.0);
        let wire = Component::new("w", ComponentKind::Wire);

        // Source rot 0 faces right; a horizontal wire faces back with its left port.
        assert!(are_connected(&source, &wire, Direction::Right));
        // Same wire below the source: no bottom port on the source.
        assert!(!are_connected(&source, &wire, Direction::Down));

        let mut vertical = Component::new("v", ComponentKind::Wire);
        vertical.rotate();
        assert!(!are_connected(&source, &vertical, Direction::Right));
    }

    #[test]
    fn connection_is_symmetric() {
        let corner = Component::new("c", ComponentKind::CornerWire);
        let wire = Component::new("w", ComponentKind::Wire);
        let bulb = Component::bulb("b");

        for a in [&corner, &wire, &bulb] {
            for b in [&corner, &wire, &bulb] {
                for dir in Direction::ALL {
                    assert_eq!(
                        are_connected(a, b, dir),
                        are_connected(b, a, dir.opposite()),
                    );
                }
            }
        }
    }

    #[test]
    fn block_never_connects() {
        let block = Component::new("b", ComponentKind::Block);
        let bulb = Component::bulb("bulb");
        for dir in Direction::ALL {
            assert!(!are_connected(&block, &bulb, dir));
            assert!(!are_connected(&bulb, &block, dir));
        }
    }
}
