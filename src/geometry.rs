//! 3D rotation utilities for the whole cube and its face layers.
//!
//! A cube has 24 possible orientations in 3D space (the rotation group of a cube).
//! These are the 6 ways to choose which face points up, times 4 rotations around
//! the vertical axis. Coordinates use +x = right, +y = up, +z = front.

use std::fmt;

/// A 3D integer vector: a corner position (components are ±1) or a face normal.
pub type Coord = (i32, i32, i32);

/// Number of whole-cube orientations.
pub const ROTATION_COUNT: usize = 24;

/// The six faces of the cube, in sticker order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    /// Outward unit normal of this face.
    pub const fn normal(self) -> Coord {
        match self {
            Face::U => (0, 1, 0),
            Face::R => (1, 0, 0),
            Face::F => (0, 0, 1),
            Face::D => (0, -1, 0),
            Face::L => (-1, 0, 0),
            Face::B => (0, 0, -1),
        }
    }

    /// Returns the face whose outward normal is `normal`, if any.
    pub fn from_normal(normal: Coord) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.normal() == normal)
    }

    /// Single-letter notation (`U`, `R`, `F`, `D`, `L`, `B`).
    pub const fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        }
    }

    /// Parses an uppercase face letter.
    pub fn from_letter(letter: char) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.letter() == letter)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Face::U => "up",
            Face::R => "right",
            Face::F => "front",
            Face::D => "down",
            Face::L => "left",
            Face::B => "back",
        };
        f.write_str(name)
    }
}

/// Applies one of the 24 whole-cube rotations to `coord`.
///
/// Organized as 6 face-up choices x 4 rotations around vertical:
/// - Rotations 0-3: +Z face up
/// - Rotations 4-7: +Y face up
/// - Rotations 8-11: -Z face up
/// - Rotations 12-15: -Y face up
/// - Rotations 16-19: +X face up
/// - Rotations 20-23: -X face up
///
/// A `const fn` so the sticker tables in `facelets` can be built at compile
/// time. Indices past 23 act as rotation 23.
pub const fn rotate(rotation: usize, (x, y, z): Coord) -> Coord {
    match rotation {
        0 => (x, y, z),
        1 => (-y, x, z),
        2 => (-x, -y, z),
        3 => (y, -x, z),
        4 => (x, -z, y),
        5 => (z, x, y),
        6 => (-x, z, y),
        7 => (-z, -x, y),
        8 => (x, -y, -z),
        9 => (y, x, -z),
        10 => (-x, y, -z),
        11 => (-y, -x, -z),
        12 => (x, z, -y),
        13 => (-z, x, -y),
        14 => (-x, -z, -y),
        15 => (z, -x, -y),
        16 => (z, y, -x),
        17 => (-y, z, -x),
        18 => (-z, -y, -x),
        19 => (y, -z, -x),
        20 => (-z, y, x),
        21 => (-y, -z, x),
        22 => (z, -y, x),
        _ => (y, z, x),
    }
}

/// Rotation indices of the clockwise and counter-clockwise quarter turn of
/// each face layer, indexed by `Face as usize`.
///
/// Clockwise is judged looking at the face from outside the cube.
pub const QUARTER_TURNS: [(usize, usize); 6] = [
    (20, 16), // U: front stickers go left
    (12, 4),  // R: front stickers go up
    (3, 1),   // F: up stickers go right
    (16, 20), // D: front stickers go right
    (4, 12),  // L: front stickers go down
    (1, 3),   // B: up stickers go left
];

/// How the user must hold the physical cube before following a solution.
///
/// Solutions are computed in a frame where the reference corner (down-back-left)
/// sits in its home position. The orientation names which of the faces the user
/// currently sees must become the up and front faces of that frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HoldingOrientation {
    rotation: u8,
    up: Face,
    front: Face,
}

impl HoldingOrientation {
    /// Hold the cube as it is.
    pub const IDENTITY: Self = Self {
        rotation: 0,
        up: Face::U,
        front: Face::F,
    };

    /// Derives the holding instruction from one of the 24 rotations of [`rotate`].
    pub fn from_rotation(rotation: usize) -> Self {
        let rotation = rotation % ROTATION_COUNT;
        let face_moved_to = |target: Face| {
            Face::ALL
                .into_iter()
                .find(|face| rotate(rotation, face.normal()) == target.normal())
                .unwrap_or(target)
        };

        Self {
            rotation: rotation as u8,
            up: face_moved_to(Face::U),
            front: face_moved_to(Face::F),
        }
    }

    /// Index for [`rotate`] of the physical rotation to perform.
    pub fn rotation(&self) -> usize {
        self.rotation as usize
    }

    /// The current face that must end up on top.
    pub fn up(&self) -> Face {
        self.up
    }

    /// The current face that must end up facing the user.
    pub fn front(&self) -> Face {
        self.front
    }

    pub fn is_identity(&self) -> bool {
        self.rotation == 0
    }
}

impl Default for HoldingOrientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for HoldingOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            return f.write_str("Hold the cube as it is.");
        }
        write!(
            f,
            "Turn the cube so its current {} face is on top and its current {} face points toward you.",
            self.up, self.front
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross((ax, ay, az): Coord, (bx, by, bz): Coord) -> Coord {
        (ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    #[test]
    fn test_rotations_preserve_handedness() {
        for index in 0..ROTATION_COUNT {
            let x = rotate(index, (1, 0, 0));
            let y = rotate(index, (0, 1, 0));
            assert_eq!(
                cross(x, y),
                rotate(index, (0, 0, 1)),
                "Rotation {index} is a reflection"
            );
        }
    }

    #[test]
    fn test_rotations_are_distinct() {
        let mut images: Vec<(Coord, Coord)> = (0..ROTATION_COUNT)
            .map(|index| (rotate(index, (1, 0, 0)), rotate(index, (0, 1, 0))))
            .collect();
        images.sort();
        images.dedup();
        assert_eq!(images.len(), ROTATION_COUNT);
    }

    #[test]
    fn test_quarter_turns_spin_around_their_face() {
        for face in Face::ALL {
            let (clockwise, counter) = QUARTER_TURNS[face as usize];
            assert_eq!(rotate(clockwise, face.normal()), face.normal());

            let mut point = (1, 1, 1);
            for _ in 0..4 {
                point = rotate(clockwise, point);
            }
            assert_eq!(point, (1, 1, 1), "{face:?} is not a quarter turn");

            for corner in [(1, 1, 1), (-1, 1, -1), (1, -1, -1)] {
                assert_eq!(rotate(counter, rotate(clockwise, corner)), corner);
            }
        }
    }

    #[test]
    fn test_opposite_faces_turn_in_opposite_directions() {
        for (face, opposite) in [(Face::U, Face::D), (Face::R, Face::L), (Face::F, Face::B)] {
            assert_eq!(QUARTER_TURNS[face as usize].0, QUARTER_TURNS[opposite as usize].1);
        }
    }

    #[test]
    fn test_holding_orientation_of_identity() {
        let orientation = HoldingOrientation::from_rotation(0);
        assert_eq!(orientation, HoldingOrientation::IDENTITY);
        assert!(orientation.is_identity());
        assert_eq!(orientation.to_string(), "Hold the cube as it is.");
    }

    #[test]
    fn test_holding_orientations_name_adjacent_faces() {
        for rotation in 0..ROTATION_COUNT {
            let orientation = HoldingOrientation::from_rotation(rotation);
            let (ux, uy, uz) = orientation.up().normal();
            let (fx, fy, fz) = orientation.front().normal();
            assert_eq!(ux * fx + uy * fy + uz * fz, 0, "rotation {rotation}");
        }
    }

    #[test]
    fn test_face_letters_roundtrip() {
        for face in Face::ALL {
            assert_eq!(Face::from_letter(face.letter()), Some(face));
            assert_eq!(Face::from_normal(face.normal()), Some(face));
        }
        assert_eq!(Face::from_letter('X'), None);
    }
}
