//! Corner permutation/twist model of the 2x2x2 cube.
//!
//! A 2x2x2 has only corner pieces. Slot `i` holds piece `perm[i]` with twist
//! `twist[i]`: the position, in the slot's clockwise sticker list starting at
//! its up/down sticker, of the sticker that shows the piece's up/down color.
//!
//! The down-back-left corner is the reference corner. U, R and F turns never
//! move it, so once a state is rotated to put that piece home (see
//! [`CubeState::canonicalize`]) the whole-cube rotation symmetry is gone.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::facelets::{
    permute, Color, ColorScheme, FaceletColoring, NotationError, ROTATION_TABLE, STICKER_COUNT,
};
use crate::geometry::{Face, HoldingOrientation, ROTATION_COUNT};

/// Number of face quarter turns (6 faces, two directions).
pub const MOVE_COUNT: usize = 12;

/// Number of corner pieces.
pub const CORNER_COUNT: usize = 8;

/// Corner slots and pieces, named by the faces they touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Corner {
    Urf,
    Ufl,
    Ulb,
    Ubr,
    Dfr,
    Dlf,
    Dbl,
    Drb,
}

impl Corner {
    pub const ALL: [Corner; CORNER_COUNT] = [
        Corner::Urf,
        Corner::Ufl,
        Corner::Ulb,
        Corner::Ubr,
        Corner::Dfr,
        Corner::Dlf,
        Corner::Dbl,
        Corner::Drb,
    ];

    /// The corner whose piece pins the whole-cube orientation.
    pub const REFERENCE: Corner = Corner::Dbl;
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        CORNER_FACES[*self as usize]
            .iter()
            .try_for_each(|face| write!(f, "{}", face.letter()))
    }
}

/// Sticker indices of each corner slot, clockwise from the up/down sticker.
pub(crate) const CORNER_FACELETS: [[usize; 3]; CORNER_COUNT] = [
    [3, 4, 9],    // URF
    [2, 8, 17],   // UFL
    [0, 16, 21],  // ULB
    [1, 20, 5],   // UBR
    [13, 11, 6],  // DFR
    [12, 19, 10], // DLF
    [14, 23, 18], // DBL
    [15, 7, 22],  // DRB
];

/// Home face of each piece's stickers, in the same clockwise order.
pub(crate) const CORNER_FACES: [[Face; 3]; CORNER_COUNT] = [
    [Face::U, Face::R, Face::F],
    [Face::U, Face::F, Face::L],
    [Face::U, Face::L, Face::B],
    [Face::U, Face::B, Face::R],
    [Face::D, Face::F, Face::R],
    [Face::D, Face::L, Face::F],
    [Face::D, Face::B, Face::L],
    [Face::D, Face::R, Face::B],
];

/// Reasons a sticker coloring cannot be read as a cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{color} appears on {count} stickers, expected 4")]
    ColorCountMismatch { color: Color, count: usize },
    #[error("the stickers at the {slot} corner do not belong to any corner piece")]
    MalformedCorner { slot: Corner },
}

/// A quarter turn of one face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub clockwise: bool,
}

impl Move {
    pub const fn new(face: Face, clockwise: bool) -> Self {
        Self { face, clockwise }
    }

    /// Every quarter turn, indexed by [`Move::index`].
    pub const ALL: [Move; MOVE_COUNT] = [
        Move::new(Face::U, true),
        Move::new(Face::U, false),
        Move::new(Face::R, true),
        Move::new(Face::R, false),
        Move::new(Face::F, true),
        Move::new(Face::F, false),
        Move::new(Face::D, true),
        Move::new(Face::D, false),
        Move::new(Face::L, true),
        Move::new(Face::L, false),
        Move::new(Face::B, true),
        Move::new(Face::B, false),
    ];

    /// Search generators, in tie-break order: faces alphabetically, clockwise first.
    ///
    /// None of them touches the reference corner.
    pub const GENERATORS: [Move; 6] = [
        Move::new(Face::F, true),
        Move::new(Face::F, false),
        Move::new(Face::R, true),
        Move::new(Face::R, false),
        Move::new(Face::U, true),
        Move::new(Face::U, false),
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self.face as usize * 2 + if self.clockwise { 0 } else { 1 }
    }

    pub const fn inverse(self) -> Self {
        Self::new(self.face, !self.clockwise)
    }

    /// Uppercase for clockwise, lowercase for counter-clockwise.
    pub fn letter(self) -> char {
        let letter = self.face.letter();
        if self.clockwise {
            letter
        } else {
            letter.to_ascii_lowercase()
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        let face = Face::from_letter(letter.to_ascii_uppercase())?;
        Some(Self::new(face, letter.is_ascii_uppercase()))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut letters = s.trim().chars();
        match (letters.next(), letters.next()) {
            (Some(letter), None) => Move::from_letter(letter).ok_or(NotationError::UnknownMove(letter)),
            _ => Err(NotationError::WrongLength {
                expected: 1,
                found: s.trim().chars().count(),
            }),
        }
    }
}

/// Parses a move sequence such as `RUFururDbuR`; whitespace and commas are ignored.
pub fn parse_moves(notation: &str) -> Result<Vec<Move>, NotationError> {
    notation
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|letter| Move::from_letter(letter).ok_or(NotationError::UnknownMove(letter)))
        .collect()
}

/// Formats moves for display, comma-separated.
pub fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|mv| mv.letter().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Corner permutation and twist of a cube.
///
/// States are values: every move produces a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CubeState {
    perm: [u8; CORNER_COUNT],
    twist: [u8; CORNER_COUNT],
}

/// Effect of the clockwise quarter turn of each face, in `Face` order.
const QUARTER_TURN_STATES: [CubeState; 6] = [
    // U
    CubeState {
        perm: [3, 0, 1, 2, 4, 5, 6, 7],
        twist: [0, 0, 0, 0, 0, 0, 0, 0],
    },
    // R
    CubeState {
        perm: [4, 1, 2, 0, 7, 5, 6, 3],
        twist: [2, 0, 0, 1, 1, 0, 0, 2],
    },
    // F
    CubeState {
        perm: [1, 5, 2, 3, 0, 4, 6, 7],
        twist: [1, 2, 0, 0, 2, 1, 0, 0],
    },
    // D
    CubeState {
        perm: [0, 1, 2, 3, 5, 6, 7, 4],
        twist: [0, 0, 0, 0, 0, 0, 0, 0],
    },
    // L
    CubeState {
        perm: [0, 2, 6, 3, 4, 1, 5, 7],
        twist: [0, 1, 2, 0, 0, 2, 1, 0],
    },
    // B
    CubeState {
        perm: [0, 1, 3, 7, 4, 5, 2, 6],
        twist: [0, 0, 1, 2, 0, 0, 2, 1],
    },
];

/// Builds the move lookup table at compile time.
///
/// Counter-clockwise turns are three clockwise turns.
const fn build_move_table() -> [CubeState; MOVE_COUNT] {
    let mut table = [CubeState::SOLVED; MOVE_COUNT];

    let mut face = 0;
    while face < QUARTER_TURN_STATES.len() {
        let clockwise = QUARTER_TURN_STATES[face];
        table[face * 2] = clockwise;
        table[face * 2 + 1] = clockwise.multiply(&clockwise).multiply(&clockwise);
        face += 1;
    }
    table
}

/// Effect of every move, indexed by [`Move::index`].
pub const MOVE_TABLE: [CubeState; MOVE_COUNT] = build_move_table();

impl CubeState {
    /// Every corner home, untwisted.
    pub const SOLVED: Self = Self {
        perm: [0, 1, 2, 3, 4, 5, 6, 7],
        twist: [0; CORNER_COUNT],
    };

    /// Applies `other` after `self`.
    const fn multiply(&self, other: &CubeState) -> CubeState {
        let mut perm = [0u8; CORNER_COUNT];
        let mut twist = [0u8; CORNER_COUNT];

        let mut slot = 0;
        while slot < CORNER_COUNT {
            let from = other.perm[slot] as usize;
            perm[slot] = self.perm[from];
            twist[slot] = (self.twist[from] + other.twist[slot]) % 3;
            slot += 1;
        }
        CubeState { perm, twist }
    }

    /// Reads a coloring in the scheme it was painted with, see
    /// [`ColorScheme::infer`]. Colorings too broken to infer from are read
    /// with the default scheme.
    pub fn parse(coloring: &FaceletColoring) -> Result<Self, ValidationError> {
        let scheme = ColorScheme::infer(coloring).unwrap_or_default();
        Self::parse_with_scheme(coloring, &scheme)
    }

    /// Reads a coloring, checking color counts and that every corner is a real piece.
    pub fn parse_with_scheme(
        coloring: &FaceletColoring,
        scheme: &ColorScheme,
    ) -> Result<Self, ValidationError> {
        let counts = coloring.color_counts();
        if let Some(color) = Color::ALL
            .into_iter()
            .find(|&color| counts[color as usize] != 4)
        {
            return Err(ValidationError::ColorCountMismatch {
                color,
                count: counts[color as usize],
            });
        }

        let mut faces = [Face::U; STICKER_COUNT];
        for (face, &color) in faces.iter_mut().zip(coloring.stickers()) {
            *face = scheme.face_of(color);
        }
        Self::from_faces(&faces)
    }

    /// Reads corners from stickers labelled with their home face.
    ///
    /// Does not require the pieces to be distinct; see [`CubeState::parity_ok`].
    pub fn from_faces(faces: &[Face; STICKER_COUNT]) -> Result<Self, ValidationError> {
        let mut perm = [0u8; CORNER_COUNT];
        let mut twist = [0u8; CORNER_COUNT];

        for slot in Corner::ALL {
            let stickers = CORNER_FACELETS[slot as usize].map(|index| faces[index]);
            let malformed = ValidationError::MalformedCorner { slot };

            let ori = stickers
                .iter()
                .position(|&face| matches!(face, Face::U | Face::D))
                .ok_or(malformed)?;
            let clockwise = [stickers[ori], stickers[(ori + 1) % 3], stickers[(ori + 2) % 3]];

            // matching all three in cyclic order rejects mirror-image corners
            let piece = CORNER_FACES
                .iter()
                .position(|piece_faces| *piece_faces == clockwise)
                .ok_or(malformed)?;

            perm[slot as usize] = piece as u8;
            twist[slot as usize] = ori as u8;
        }

        Ok(Self { perm, twist })
    }

    /// Stickers of this state, labelled with their home face.
    pub fn to_faces(&self) -> [Face; STICKER_COUNT] {
        let mut faces = [Face::U; STICKER_COUNT];
        for slot in 0..CORNER_COUNT {
            let piece = self.perm[slot] as usize;
            let ori = self.twist[slot] as usize;
            for (k, &face) in CORNER_FACES[piece].iter().enumerate() {
                faces[CORNER_FACELETS[slot][(k + ori) % 3]] = face;
            }
        }
        faces
    }

    /// Paints this state with `scheme`.
    pub fn to_coloring(&self, scheme: &ColorScheme) -> FaceletColoring {
        FaceletColoring::from_stickers(self.to_faces().map(|face| scheme.color_of(face)))
    }

    /// The piece in `slot`.
    pub fn piece_at(&self, slot: Corner) -> Corner {
        Corner::ALL[self.perm[slot as usize] as usize % CORNER_COUNT]
    }

    /// The twist (0, 1 or 2) of the piece in `slot`.
    pub fn twist_at(&self, slot: Corner) -> u8 {
        self.twist[slot as usize]
    }

    #[inline]
    pub fn apply(&self, mv: Move) -> CubeState {
        self.multiply(&MOVE_TABLE[mv.index()])
    }

    pub fn apply_sequence(&self, moves: &[Move]) -> CubeState {
        moves.iter().fold(*self, |state, &mv| state.apply(mv))
    }

    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    /// Checks that the corner identities are a permutation of the eight pieces.
    ///
    /// Every quarter turn is a 4-cycle of corners, an odd permutation, so on this
    /// puzzle the sign of the permutation is not an invariant; a duplicated or
    /// missing piece is what makes a state unreachable.
    pub fn parity_ok(&self) -> bool {
        let mut seen = [false; CORNER_COUNT];
        self.perm.iter().all(|&piece| {
            let piece = piece as usize;
            piece < CORNER_COUNT && !std::mem::replace(&mut seen[piece], true)
        })
    }

    /// Sum of twists modulo 3; zero for every reachable state.
    pub fn twist_remainder(&self) -> u8 {
        (self.twist.iter().map(|&t| t as u32).sum::<u32>() % 3) as u8
    }

    pub fn twist_ok(&self) -> bool {
        self.twist_remainder() == 0
    }

    /// Rank of the corner permutation, in `0..8!`.
    pub fn permutation_index(&self) -> usize {
        let mut index = 0;
        for (slot, &piece) in self.perm.iter().enumerate() {
            let smaller = self.perm[slot + 1..].iter().filter(|&&later| later < piece).count();
            index = index * (CORNER_COUNT - slot) + smaller;
        }
        index
    }

    /// The twists read as a base-3 number, in `0..3^8`.
    pub fn twist_index(&self) -> usize {
        self.twist
            .iter()
            .fold(0, |index, &twist| index * 3 + twist as usize)
    }

    /// The same permutation with every twist cleared.
    ///
    /// Moves act on permutation and twist separately, so projections can be
    /// turned on their own.
    pub(crate) fn permutation_only(&self) -> CubeState {
        CubeState {
            perm: self.perm,
            twist: [0; CORNER_COUNT],
        }
    }

    /// The same twists with every piece home.
    pub(crate) fn twist_only(&self) -> CubeState {
        CubeState {
            perm: Self::SOLVED.perm,
            twist: self.twist,
        }
    }

    /// True if the reference piece is home and untwisted.
    pub fn is_canonical(&self) -> bool {
        let reference = Corner::REFERENCE as usize;
        self.perm[reference] == reference as u8 && self.twist[reference] == 0
    }

    /// Rotates the whole cube so the reference piece sits home, untwisted.
    ///
    /// Exactly one of the 24 rotations does this when the reference piece occurs
    /// once. A state without that piece is returned as is.
    pub fn canonicalize(&self) -> (CubeState, HoldingOrientation) {
        let faces = self.to_faces();
        (0..ROTATION_COUNT)
            .find_map(|rotation| {
                let rotated = permute(&faces, &ROTATION_TABLE[rotation]);
                let state = Self::from_faces(&rotated).ok()?;
                state
                    .is_canonical()
                    .then(|| (state, HoldingOrientation::from_rotation(rotation)))
            })
            .unwrap_or((*self, HoldingOrientation::IDENTITY))
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::SOLVED
    }
}
