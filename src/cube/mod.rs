use crate::prelude::*;

pub mod coord;
mod cubie;

pub use coord::*;
pub use cubie::CubeState;

pub trait CubeLike: Sized + core::fmt::Debug + Eq {
    fn solved() -> Self;
    fn apply(self, move_: Move) -> Self;

    fn apply_all(self, moves: impl IntoIterator<Item = Move>) -> Self {
        moves.into_iter().fold(self, |cube, m| cube.apply(m))
    }

    fn is_solved(&self) -> bool {
        *self == Self::solved()
    }
}

/// Faces in move-index order: a move's face is its index mod 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, enum_iterator::Sequence)]
pub enum Face {
    Up,
    Right,
    Front,
    Down,
    Left,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    UD,
    LR,
    FB,
}

impl From<Face> for Axis {
    fn from(face: Face) -> Self {
        match face {
            Face::Up | Face::Down => Axis::UD,
            Face::Front | Face::Back => Axis::FB,
            Face::Left | Face::Right => Axis::LR,
        }
    }
}

impl Face {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Face> {
        enum_iterator::all::<Face>().nth(index)
    }

    pub fn axis(self) -> Axis {
        self.into()
    }

    pub fn same_axis(a: Face, b: Face) -> bool {
        a.axis() == b.axis()
    }

    /// Case-insensitive inverse of [`Face::letter`].
    pub fn from_letter(letter: char) -> Option<Face> {
        enum_iterator::all::<Face>().find(|face| face.letter() == letter.to_ascii_uppercase())
    }

    pub fn letter(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Right => 'R',
            Face::Front => 'F',
            Face::Down => 'D',
            Face::Left => 'L',
            Face::Back => 'B',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_is_solved() {
        assert!(CubeState::solved().is_solved());
    }

    #[test]
    fn single_move_is_not_solved() {
        assert!(!CubeState::solved().apply("F2".parse().unwrap()).is_solved());
    }

    #[test]
    fn face_indices_follow_move_order() {
        let letters: String = enum_iterator::all::<Face>().map(Face::letter).collect();
        assert_eq!(letters, "URFDLB");
        for face in enum_iterator::all::<Face>() {
            assert_eq!(Face::from_index(face.index()), Some(face));
        }
        assert_eq!(Face::from_index(6), None);
    }

    #[test]
    fn letters_parse_back_to_faces() {
        for face in enum_iterator::all::<Face>() {
            assert_eq!(Face::from_letter(face.letter()), Some(face));
            assert_eq!(Face::from_letter(face.letter().to_ascii_lowercase()), Some(face));
        }
        assert_eq!(Face::from_letter('X'), None);
    }

    #[test]
    fn opposite_faces_share_an_axis() {
        assert!(Face::same_axis(Face::Up, Face::Down));
        assert!(Face::same_axis(Face::Left, Face::Right));
        assert!(Face::same_axis(Face::Front, Face::Back));
        assert!(!Face::same_axis(Face::Up, Face::Front));
        assert!(!Face::same_axis(Face::Right, Face::Back));
    }
}
