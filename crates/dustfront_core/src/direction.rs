//! Eight-way facing directions on a circular ring.
//!
//! Directions are indexed 0-7 clockwise from north; the successor of 7
//! wraps to 0. The same type is used for gun facing, fire points and
//! per-direction texture/pivot lookup, so all cyclic arithmetic lives in
//! one place.

use serde::{Deserialize, Serialize};

use crate::math::{Fixed, Vec2Fixed};

/// Number of discrete facing directions.
pub const DIRECTION_COUNT: u8 = 8;

/// One of the eight compass facing directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Direction {
    /// North, ring index 0.
    #[default]
    North,
    /// North-east, ring index 1.
    NorthEast,
    /// East, ring index 2.
    East,
    /// South-east, ring index 3.
    SouthEast,
    /// South, ring index 4.
    South,
    /// South-west, ring index 5.
    SouthWest,
    /// West, ring index 6.
    West,
    /// North-west, ring index 7.
    NorthWest,
}

impl Direction {
    /// All directions in ring order, index 0 first.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Ring index of this direction (0-7).
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Direction for a ring index, if it is in 0-7.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < DIRECTION_COUNT {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Canonical descriptor token for this direction.
    ///
    /// These are the keys weapon and gun descriptors use for per-direction
    /// tables (fire points, pivot offsets, textures).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::NorthEast => "north_east",
            Direction::East => "east",
            Direction::SouthEast => "south_east",
            Direction::South => "south",
            Direction::SouthWest => "south_west",
            Direction::West => "west",
            Direction::NorthWest => "north_west",
        }
    }

    /// Parse a descriptor token into a direction.
    ///
    /// Returns `None` for unknown tokens; descriptor loading turns that
    /// into a hard load failure rather than skipping the entry.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Direction::ALL.iter().copied().find(|d| d.name() == name)
    }

    /// Unit step offset of this direction on a square grid.
    ///
    /// Y grows northward, X grows eastward. Diagonals are not normalized;
    /// callers that need a unit-length vector must scale themselves.
    #[must_use]
    pub fn grid_offset(self) -> Vec2Fixed {
        let (x, y) = match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        };
        Vec2Fixed::new(Fixed::from_num(x), Fixed::from_num(y))
    }

    /// Number of single steps along the shorter arc to reach `target`.
    ///
    /// Always in 0-4; 4 means the exact opposite direction.
    #[must_use]
    pub fn steps_to(self, target: Direction) -> u8 {
        let diff = (i16::from(target.index()) - i16::from(self.index())).unsigned_abs() as u8;
        diff.min(DIRECTION_COUNT - diff)
    }

    /// Advance one step along the shorter arc toward `target`.
    ///
    /// The step sign follows `target - current` and is flipped only when
    /// the absolute index difference strictly exceeds 4, so a difference
    /// of exactly 4 (opposite direction) keeps the raw sign. That
    /// tie-break is deliberate and must not change: both arcs are equally
    /// long and gameplay depends on the rotation being predictable.
    #[must_use]
    pub fn step_toward(self, target: Direction) -> Direction {
        if self == target {
            return self;
        }

        let diff = i16::from(target.index()) - i16::from(self.index());
        let mut step = if diff > 0 { 1_i16 } else { -1_i16 };
        if diff.unsigned_abs() > u16::from(DIRECTION_COUNT / 2) {
            step = -step;
        }

        let next = (i16::from(self.index()) + step).rem_euclid(i16::from(DIRECTION_COUNT));
        Self::from_index(next as u8).unwrap_or(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_index(dir.index()), Some(dir));
        }
        assert_eq!(Direction::from_index(8), None);
    }

    #[test]
    fn test_name_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_name(dir.name()), Some(dir));
        }
        assert_eq!(Direction::from_name("northeast"), None);
        assert_eq!(Direction::from_name(""), None);
    }

    #[test]
    fn test_step_toward_short_arc() {
        // N -> E goes through NE (diff = 2, no flip)
        assert_eq!(
            Direction::North.step_toward(Direction::East),
            Direction::NorthEast
        );
        // NW -> NE goes through N (diff = -6, flipped to +1 across the wrap)
        assert_eq!(
            Direction::NorthWest.step_toward(Direction::NorthEast),
            Direction::North
        );
        // NE -> NW goes through N (diff = 6, flipped to -1 across the wrap)
        assert_eq!(
            Direction::NorthEast.step_toward(Direction::NorthWest),
            Direction::North
        );
    }

    #[test]
    fn test_step_toward_opposite_keeps_sign() {
        // Exactly opposite (diff = 4): raw sign is kept, no flip.
        assert_eq!(
            Direction::North.step_toward(Direction::South),
            Direction::NorthEast
        );
        // diff = -4 walks the ring downward.
        assert_eq!(
            Direction::South.step_toward(Direction::North),
            Direction::SouthEast
        );
    }

    #[test]
    fn test_step_toward_terminates_within_four_steps() {
        for from in Direction::ALL {
            for to in Direction::ALL {
                let mut current = from;
                let mut steps = 0;
                while current != to {
                    current = current.step_toward(to);
                    steps += 1;
                    assert!(steps <= 4, "{:?} -> {:?} took more than 4 steps", from, to);
                }
                assert_eq!(steps, from.steps_to(to));
            }
        }
    }

    #[test]
    fn test_steps_to_is_symmetric() {
        for from in Direction::ALL {
            for to in Direction::ALL {
                assert_eq!(from.steps_to(to), to.steps_to(from));
                assert!(from.steps_to(to) <= 4);
            }
        }
    }
}
