//! Sticker-level representation of a 2x2x2 cube.
//!
//! The 24 stickers are stored as a flat array in face order `U R F D L B`, four
//! stickers per face in row-major order. Each sticker is identified with the
//! corner slot it sits on and the face it points out of, which lets whole-cube
//! rotations and face turns be expressed as sticker permutations built at
//! compile time.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::cube::{Corner, Move, CORNER_FACELETS, MOVE_COUNT};
use crate::geometry::{rotate, Coord, Face, QUARTER_TURNS, ROTATION_COUNT};

/// Number of stickers on a 2x2x2 cube.
pub const STICKER_COUNT: usize = 24;

/// Stickers on each face.
pub const STICKERS_PER_FACE: usize = 4;

/// A sticker permutation: entry `i` is the index sticker `i` moves to.
pub type StickerMap = [u8; STICKER_COUNT];

/// Position of each corner slot (`URF UFL ULB UBR DFR DLF DBL DRB`).
pub(crate) const CORNER_POSITIONS: [Coord; 8] = [
    (1, 1, 1),
    (-1, 1, 1),
    (-1, 1, -1),
    (1, 1, -1),
    (1, -1, 1),
    (-1, -1, 1),
    (-1, -1, -1),
    (1, -1, -1),
];

/// Corner slot under each sticker, indexed by `[face][row * 2 + col]`.
///
/// U is seen from above with B at the top, D from below with F at the top, and
/// the four side faces with U at the top.
pub(crate) const FACELET_CORNERS: [[u8; STICKERS_PER_FACE]; 6] = [
    [2, 3, 1, 0], // U: ULB UBR / UFL URF
    [0, 3, 4, 7], // R: URF UBR / DFR DRB
    [1, 0, 5, 4], // F: UFL URF / DLF DFR
    [5, 4, 6, 7], // D: DLF DFR / DBL DRB
    [2, 1, 6, 5], // L: ULB UFL / DBL DLF
    [3, 2, 7, 6], // B: UBR ULB / DRB DBL
];

/// Converts (face, row, col) to a linear sticker index.
#[inline(always)]
pub const fn facelet_index(face: Face, row: usize, col: usize) -> usize {
    face as usize * STICKERS_PER_FACE + row * 2 + col
}

/// Converts a linear sticker index to (face, row, col).
#[inline(always)]
pub const fn facelet_of(index: usize) -> (Face, usize, usize) {
    let within = index % STICKERS_PER_FACE;
    (Face::ALL[index / STICKERS_PER_FACE], within / 2, within % 2)
}

/// Position of the sticker's corner and its outward normal.
const fn sticker_geometry(index: usize) -> (Coord, Coord) {
    let face = index / STICKERS_PER_FACE;
    let slot = FACELET_CORNERS[face][index % STICKERS_PER_FACE] as usize;
    (CORNER_POSITIONS[slot], Face::ALL[face].normal())
}

const fn coord_eq(a: Coord, b: Coord) -> bool {
    a.0 == b.0 && a.1 == b.1 && a.2 == b.2
}

/// Finds the sticker at `position` facing `normal`.
const fn sticker_at(position: Coord, normal: Coord) -> usize {
    let mut face = 0;
    while face < Face::ALL.len() {
        if coord_eq(Face::ALL[face].normal(), normal) {
            let mut within = 0;
            while within < STICKERS_PER_FACE {
                let slot = FACELET_CORNERS[face][within] as usize;
                if coord_eq(CORNER_POSITIONS[slot], position) {
                    return face * STICKERS_PER_FACE + within;
                }
                within += 1;
            }
        }
        face += 1;
    }
    panic!("rotated sticker left the cube surface");
}

/// Builds the sticker permutation of every whole-cube rotation.
const fn build_rotation_table() -> [StickerMap; ROTATION_COUNT] {
    let mut table = [[0u8; STICKER_COUNT]; ROTATION_COUNT];

    let mut rot = 0;
    while rot < ROTATION_COUNT {
        let mut src = 0;
        while src < STICKER_COUNT {
            let (position, normal) = sticker_geometry(src);
            let dest = sticker_at(rotate(rot, position), rotate(rot, normal));
            table[rot][src] = dest as u8;
            src += 1;
        }
        rot += 1;
    }
    table
}

/// Builds the sticker permutation of every face quarter turn.
///
/// Only stickers whose corner lies in the turning layer move; indexing follows
/// [`Move::index`].
const fn build_turn_table() -> [StickerMap; MOVE_COUNT] {
    let mut table = [[0u8; STICKER_COUNT]; MOVE_COUNT];

    let mut face = 0;
    while face < Face::ALL.len() {
        let axis = Face::ALL[face].normal();
        let (clockwise, counter) = QUARTER_TURNS[face];

        let mut src = 0;
        while src < STICKER_COUNT {
            let (position, normal) = sticker_geometry(src);
            let in_layer = position.0 * axis.0 + position.1 * axis.1 + position.2 * axis.2 == 1;

            let (cw_dest, ccw_dest) = if in_layer {
                (
                    sticker_at(rotate(clockwise, position), rotate(clockwise, normal)),
                    sticker_at(rotate(counter, position), rotate(counter, normal)),
                )
            } else {
                (src, src)
            };
            table[face * 2][src] = cw_dest as u8;
            table[face * 2 + 1][src] = ccw_dest as u8;
            src += 1;
        }
        face += 1;
    }
    table
}

/// Sticker permutations of the 24 whole-cube rotations.
pub const ROTATION_TABLE: [StickerMap; ROTATION_COUNT] = build_rotation_table();

/// Sticker permutations of the 12 face quarter turns.
pub const TURN_TABLE: [StickerMap; MOVE_COUNT] = build_turn_table();

/// Moves each sticker value to its destination under `mapping`.
pub fn permute<T: Copy>(stickers: &[T; STICKER_COUNT], mapping: &StickerMap) -> [T; STICKER_COUNT] {
    let mut moved = *stickers;
    for (source, &dest) in mapping.iter().enumerate() {
        moved[dest as usize] = stickers[source];
    }
    moved
}

/// Errors from the text notations for colorings, color schemes and moves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("expected {expected} letters, found {found}")]
    WrongLength { expected: usize, found: usize },
    #[error("`{0}` is not a color letter (use W, R, G, Y, O, B)")]
    UnknownColor(char),
    #[error("color {0} is used for more than one face")]
    RepeatedColor(Color),
    #[error("`{0}` is not a move (use U R F D L B, lowercase for counter-clockwise)")]
    UnknownMove(char),
}

/// One of the six sticker colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Red,
    Green,
    Yellow,
    Orange,
    Blue,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Orange,
        Color::Blue,
    ];

    pub const fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Yellow => 'Y',
            Color::Orange => 'O',
            Color::Blue => 'B',
        }
    }

    /// Parses a color letter, case-insensitively.
    pub fn from_letter(letter: char) -> Option<Color> {
        let letter = letter.to_ascii_uppercase();
        Color::ALL.into_iter().find(|color| color.letter() == letter)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::White => "white",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
            Color::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// Which color belongs on which face of the solved cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorScheme {
    colors: [Color; 6],
    faces: [Face; 6],
}

impl ColorScheme {
    /// Builds a scheme from the colors of `U R F D L B`, in that order.
    pub fn new(colors: [Color; 6]) -> Result<Self, NotationError> {
        let mut faces = [Face::U; 6];
        let mut assigned = [false; 6];
        for (face, &color) in Face::ALL.iter().zip(&colors) {
            if assigned[color as usize] {
                return Err(NotationError::RepeatedColor(color));
            }
            assigned[color as usize] = true;
            faces[color as usize] = *face;
        }
        Ok(Self { colors, faces })
    }

    /// Color of `face` on the solved cube.
    pub fn color_of(&self, face: Face) -> Color {
        self.colors[face as usize]
    }

    /// Face whose solved color is `color`.
    pub fn face_of(&self, color: Color) -> Face {
        self.faces[color as usize]
    }

    /// Reads the scheme `coloring` was painted with.
    ///
    /// The stickers in the down-back-left slot give the D, B and L colors.
    /// Each opposite face gets the one color that never shares a corner with
    /// them. If the default scheme is the same painting seen from another
    /// side, the default is returned.
    ///
    /// Returns `None` if the corners do not pin down three opposite pairs.
    pub fn infer(coloring: &FaceletColoring) -> Option<ColorScheme> {
        let mut adjacent = [[false; 6]; 6];
        for slot in CORNER_FACELETS {
            let colors = slot.map(|index| coloring.stickers[index] as usize);
            for a in colors {
                for b in colors {
                    adjacent[a][b] = true;
                }
            }
        }

        let opposite = |color: Color| {
            let mut apart = Color::ALL
                .into_iter()
                .filter(|&other| !adjacent[color as usize][other as usize]);
            match (apart.next(), apart.next()) {
                (Some(other), None) => Some(other),
                _ => None,
            }
        };

        let [down, back, left] =
            CORNER_FACELETS[Corner::REFERENCE as usize].map(|index| coloring.stickers[index]);
        let inferred = ColorScheme::new([
            opposite(down)?,
            opposite(left)?,
            opposite(back)?,
            down,
            left,
            back,
        ])
        .ok()?;

        let default = ColorScheme::default();
        let same_painting = (0..ROTATION_COUNT).any(|rotation| {
            Face::ALL.into_iter().all(|face| {
                Face::from_normal(rotate(rotation, face.normal()))
                    .is_some_and(|turned| inferred.color_of(turned) == default.color_of(face))
            })
        });
        Some(if same_painting { default } else { inferred })
    }
}

impl Default for ColorScheme {
    /// White up, green front, red right.
    fn default() -> Self {
        Self {
            colors: Color::ALL,
            faces: Face::ALL,
        }
    }
}

impl FromStr for ColorScheme {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if letters.len() != Face::ALL.len() {
            return Err(NotationError::WrongLength {
                expected: Face::ALL.len(),
                found: letters.len(),
            });
        }

        let mut colors = [Color::White; 6];
        for (slot, &letter) in colors.iter_mut().zip(&letters) {
            *slot = Color::from_letter(letter).ok_or(NotationError::UnknownColor(letter))?;
        }
        Self::new(colors)
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.colors
            .iter()
            .try_for_each(|color| write!(f, "{}", color.letter()))
    }
}

/// A complete sticker coloring, as handed over by whatever painted the cube.
///
/// Nothing here checks that the coloring describes a real cube; that is the
/// job of [`CubeState::parse`](crate::cube::CubeState::parse).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceletColoring {
    stickers: [Color; STICKER_COUNT],
}

impl FaceletColoring {
    pub fn from_stickers(stickers: [Color; STICKER_COUNT]) -> Self {
        Self { stickers }
    }

    /// The solved cube under `scheme`.
    pub fn solved(scheme: &ColorScheme) -> Self {
        let mut stickers = [Color::White; STICKER_COUNT];
        for (index, sticker) in stickers.iter_mut().enumerate() {
            let (face, _, _) = facelet_of(index);
            *sticker = scheme.color_of(face);
        }
        Self { stickers }
    }

    pub fn stickers(&self) -> &[Color; STICKER_COUNT] {
        &self.stickers
    }

    pub fn get(&self, face: Face, row: usize, col: usize) -> Color {
        debug_assert!(row < 2 && col < 2, "no sticker at row {row}, col {col}");
        self.stickers[facelet_index(face, row, col)]
    }

    pub fn set(&mut self, face: Face, row: usize, col: usize, color: Color) {
        debug_assert!(row < 2 && col < 2, "no sticker at row {row}, col {col}");
        self.stickers[facelet_index(face, row, col)] = color;
    }

    /// Number of stickers of each color, indexed by `Color as usize`.
    pub fn color_counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for &color in &self.stickers {
            counts[color as usize] += 1;
        }
        counts
    }

    /// The same physical cube after the whole-cube rotation `rotate(rotation, _)`.
    pub fn rotated(&self, rotation: usize) -> Self {
        Self {
            stickers: permute(&self.stickers, &ROTATION_TABLE[rotation % ROTATION_COUNT]),
        }
    }

    /// The coloring after turning one face.
    pub fn turned(&self, mv: Move) -> Self {
        Self {
            stickers: permute(&self.stickers, &TURN_TABLE[mv.index()]),
        }
    }

    /// The coloring after a sequence of face turns.
    pub fn scrambled(&self, moves: &[Move]) -> Self {
        moves.iter().fold(*self, |coloring, &mv| coloring.turned(mv))
    }

    /// Formats the coloring as an unfolded net.
    ///
    /// U sits above F, D below it, and the middle band reads L F R B.
    /// Cells outside the net show as '.'.
    pub fn net(&self) -> String {
        let mut output = String::new();
        let face_row = |face: Face, row: usize| -> String {
            (0..2).map(|col| self.get(face, row, col).letter()).collect()
        };

        for row in 0..2 {
            output.push_str(&format!(".. {} .. ..\n", face_row(Face::U, row)));
        }
        for row in 0..2 {
            let band: Vec<String> = [Face::L, Face::F, Face::R, Face::B]
                .into_iter()
                .map(|face| face_row(face, row))
                .collect();
            output.push_str(&band.join(" "));
            output.push('\n');
        }
        for row in 0..2 {
            output.push_str(&format!(".. {} .. ..\n", face_row(Face::D, row)));
        }

        output
    }
}

impl Default for FaceletColoring {
    fn default() -> Self {
        Self::solved(&ColorScheme::default())
    }
}

impl FromStr for FaceletColoring {
    type Err = NotationError;

    /// Reads 24 color letters in sticker order; whitespace and commas are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .collect();
        if letters.len() != STICKER_COUNT {
            return Err(NotationError::WrongLength {
                expected: STICKER_COUNT,
                found: letters.len(),
            });
        }

        let mut stickers = [Color::White; STICKER_COUNT];
        for (sticker, &letter) in stickers.iter_mut().zip(&letters) {
            *sticker = Color::from_letter(letter).ok_or(NotationError::UnknownColor(letter))?;
        }
        Ok(Self { stickers })
    }
}

impl fmt::Display for FaceletColoring {
    /// Four letters per face, faces separated by spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, color) in self.stickers.iter().enumerate() {
            if index > 0 && index % STICKERS_PER_FACE == 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", color.letter())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVED: &str = "WWWW RRRR GGGG YYYY OOOO BBBB";

    fn assert_is_permutation(mapping: &StickerMap, label: &str) {
        let mut seen = [false; STICKER_COUNT];
        for (src, &dest) in mapping.iter().enumerate() {
            let dest = dest as usize;
            assert!(dest < STICKER_COUNT, "{label} maps sticker {src} out of bounds");
            assert!(!seen[dest], "{label} maps two stickers to {dest}");
            seen[dest] = true;
        }
    }

    #[test]
    fn test_identity_rotation_is_unchanged() {
        for sticker in 0..STICKER_COUNT {
            assert_eq!(
                ROTATION_TABLE[0][sticker], sticker as u8,
                "Identity rotation should not move sticker {sticker}"
            );
        }
    }

    #[test]
    fn test_rotations_are_permutations() {
        for (rot, mapping) in ROTATION_TABLE.iter().enumerate() {
            assert_is_permutation(mapping, &format!("Rotation {rot}"));
        }
    }

    #[test]
    fn test_turns_are_permutations_of_one_layer() {
        for (index, mapping) in TURN_TABLE.iter().enumerate() {
            assert_is_permutation(mapping, &format!("Turn {index}"));
            let moved = mapping
                .iter()
                .enumerate()
                .filter(|&(src, &dest)| src != dest as usize)
                .count();
            assert_eq!(moved, 12, "Turn {index} should move one face and one ring");
        }
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let coloring: FaceletColoring = "WGRB ROYW GBYO YWRG OBWY BYGO".parse().unwrap();
        for mv in Move::ALL {
            assert_eq!(coloring.scrambled(&[mv; 4]), coloring, "{mv}");
            assert_eq!(coloring.turned(mv).turned(mv.inverse()), coloring, "{mv}");
        }
    }

    #[test]
    fn test_coordinate_conversion_roundtrip() {
        for index in 0..STICKER_COUNT {
            let (face, row, col) = facelet_of(index);
            assert_eq!(facelet_index(face, row, col), index, "Roundtrip failed for {index}");
        }
    }

    #[test]
    fn test_notation_roundtrip() {
        let coloring: FaceletColoring = SOLVED.parse().unwrap();
        assert_eq!(coloring, FaceletColoring::default());
        assert_eq!(coloring.to_string(), SOLVED);

        let compact: FaceletColoring = "wwwwrrrrggggyyyyoooobbbb".parse().unwrap();
        assert_eq!(compact, coloring);
    }

    #[test]
    fn test_notation_errors() {
        assert_eq!(
            "WWWW RRRR".parse::<FaceletColoring>(),
            Err(NotationError::WrongLength { expected: 24, found: 8 })
        );
        assert_eq!(
            "WWWW RRRR GGGG YYYY OOOO BBBX".parse::<FaceletColoring>(),
            Err(NotationError::UnknownColor('X'))
        );
    }

    #[test]
    fn test_scheme_parsing() {
        let scheme: ColorScheme = "WRGYOB".parse().unwrap();
        assert_eq!(scheme, ColorScheme::default());
        assert_eq!(scheme.to_string(), "WRGYOB");

        let japanese: ColorScheme = "WOGBRY".parse().unwrap();
        assert_eq!(japanese.color_of(Face::D), Color::Blue);
        assert_eq!(japanese.face_of(Color::Yellow), Face::B);

        assert_eq!(
            "WRGYOW".parse::<ColorScheme>(),
            Err(NotationError::RepeatedColor(Color::White))
        );
    }

    #[test]
    fn test_infer_scheme() {
        let default = FaceletColoring::default();
        for rotation in 0..ROTATION_COUNT {
            let rotated = default.rotated(rotation);
            assert_eq!(ColorScheme::infer(&rotated), Some(ColorScheme::default()));
            let turned = rotated.scrambled(&[Move::ALL[rotation % MOVE_COUNT]]);
            assert_eq!(ColorScheme::infer(&turned), Some(ColorScheme::default()));
        }

        // mirror image of the default painting
        let scheme: ColorScheme = "WOGYRB".parse().unwrap();
        let coloring = FaceletColoring::solved(&scheme).turned(Move::ALL[2]);
        assert_eq!(ColorScheme::infer(&coloring), Some(scheme));

        let blank = FaceletColoring::from_stickers([Color::White; STICKER_COUNT]);
        assert_eq!(ColorScheme::infer(&blank), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "no sticker at row 2")]
    fn test_sticker_outside_the_face() {
        // row 2 of U would otherwise read row 0 of R
        FaceletColoring::default().get(Face::U, 2, 0);
    }

    #[test]
    fn test_color_counts_of_solved_cube() {
        assert_eq!(FaceletColoring::default().color_counts(), [4; 6]);
    }

    #[test]
    fn test_solved_net() {
        insta::assert_snapshot!(FaceletColoring::default().net(), @r"
        .. WW .. ..
        .. WW .. ..
        OO GG RR BB
        OO GG RR BB
        .. YY .. ..
        .. YY .. ..
        ");
    }

    #[test]
    fn test_net_after_up_turn() {
        let up: Move = "U".parse().unwrap();
        insta::assert_snapshot!(FaceletColoring::default().turned(up).net(), @r"
        .. WW .. ..
        .. WW .. ..
        GG RR BB OO
        OO GG RR BB
        .. YY .. ..
        .. YY .. ..
        ");
    }

    #[test]
    fn test_rotation_moves_whole_faces() {
        // rotation 5 puts the right face on top
        let rotated = FaceletColoring::default().rotated(5);
        for row in 0..2 {
            for col in 0..2 {
                assert_eq!(rotated.get(Face::U, row, col), Color::Red);
            }
        }
        assert_eq!(rotated.color_counts(), [4; 6]);
    }
}
