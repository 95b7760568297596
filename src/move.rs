use crate::cube::*;

pub const MOVE_COUNT: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub direction: Direction,
}

/// Turn amounts in move-index order: quarter (indices 0-5), reverse quarter
/// (6-11), half (12-17).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, enum_iterator::Sequence)]
pub enum Direction {
    Single,
    Reverse,
    Double,
}

impl Direction {
    /// How many quarter turns of the face generator make up this direction.
    pub fn turns(self) -> usize {
        match self {
            Direction::Single => 1,
            Direction::Reverse => 3,
            Direction::Double => 2,
        }
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::Single => Direction::Reverse,
            Direction::Reverse => Direction::Single,
            Direction::Double => Direction::Double,
        }
    }
}

#[rustfmt::skip]
const GENERATORS: [CubeState; 6] = [
    // U
    CubeState {
        cp: [1, 2, 3, 0, 4, 5, 6, 7],
        co: [0, 0, 0, 0, 0, 0, 0, 0],
        ep: [1, 2, 3, 0, 4, 5, 6, 7, 8, 9, 10, 11],
        eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    },
    // R
    CubeState {
        cp: [3, 1, 2, 7, 0, 5, 6, 4],
        co: [2, 0, 0, 1, 1, 0, 0, 2],
        ep: [11, 1, 2, 3, 8, 5, 6, 7, 0, 9, 10, 4],
        eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    },
    // F
    CubeState {
        cp: [4, 0, 2, 3, 5, 1, 6, 7],
        co: [1, 2, 0, 0, 2, 1, 0, 0],
        ep: [0, 8, 2, 3, 4, 9, 6, 7, 5, 1, 10, 11],
        eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
    },
    // D
    CubeState {
        cp: [0, 1, 2, 3, 7, 4, 5, 6],
        co: [0, 0, 0, 0, 0, 0, 0, 0],
        ep: [0, 1, 2, 3, 7, 4, 5, 6, 8, 9, 10, 11],
        eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    },
    // L
    CubeState {
        cp: [0, 5, 1, 3, 4, 6, 2, 7],
        co: [0, 1, 2, 0, 0, 2, 1, 0],
        ep: [0, 1, 9, 3, 4, 5, 10, 7, 8, 6, 2, 11],
        eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    },
    // B
    CubeState {
        cp: [0, 1, 6, 2, 4, 5, 7, 3],
        co: [0, 0, 1, 2, 0, 0, 2, 1],
        ep: [0, 1, 2, 10, 4, 5, 6, 11, 8, 9, 7, 3],
        eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
    },
];

lazy_static::lazy_static! {
    /// Every move's transformation, in move-index order, built by composing the
    /// face generator `turns` times.
    static ref MOVE_TABLE: Vec<CubeState> = Move::all()
        .map(|m| {
            let generator = Move::generator(m.face);
            (0..m.direction.turns()).fold(CubeState::SOLVED, |cube, _| cube.compose(generator))
        })
        .collect();
}

impl Move {
    /// All 18 moves in index order.
    pub fn all() -> impl Iterator<Item = Move> {
        enum_iterator::all::<Direction>().flat_map(|direction| {
            enum_iterator::all::<Face>().map(move |face| Move { face, direction })
        })
    }

    pub fn index(&self) -> usize {
        self.direction as usize * 6 + self.face.index()
    }

    pub fn from_index(index: usize) -> Option<Move> {
        let direction = enum_iterator::all::<Direction>().nth(index / 6)?;
        let face = Face::from_index(index % 6)?;
        Some(Move { face, direction })
    }

    /// The quarter-turn transformation of `face`.
    pub fn generator(face: Face) -> &'static CubeState {
        &GENERATORS[face.index()]
    }

    pub fn transformation(&self) -> &'static CubeState {
        &MOVE_TABLE[self.index()]
    }

    pub fn reverse(&self) -> Move {
        Move {
            face: self.face,
            direction: self.direction.reverse(),
        }
    }

    /// Whether `self` may directly follow `previous` in a search path. Turning
    /// the same face twice collapses into one move, and opposite faces commute,
    /// so any move on the previous move's axis is redundant.
    pub fn could_follow(&self, previous: &Move) -> bool {
        !Face::same_axis(self.face, previous.face)
    }

    /// The sequence that undoes `moves`.
    pub fn inverse_seq(moves: &[Move]) -> Vec<Move> {
        moves.iter().rev().map(Move::reverse).collect()
    }

    pub fn parse_sequence(s: &str) -> anyhow::Result<Vec<Move>> {
        s.split_whitespace().map(|s| s.parse()).collect()
    }

    pub fn format_sequence(moves: &[Move]) -> String {
        moves
            .iter()
            .map(Move::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl core::str::FromStr for Move {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Move> {
        let mut chars = s.chars();
        let letter = chars
            .next()
            .ok_or_else(|| anyhow::anyhow!("Empty move"))?;
        let face = Face::from_letter(letter)
            .ok_or_else(|| anyhow::anyhow!("Unrecognized face {:?} in {:?}", letter, s))?;

        let direction = match chars.as_str() {
            "" => Direction::Single,
            "'" => Direction::Reverse,
            "2" => Direction::Double,
            suffix => anyhow::bail!("Unrecognized turn {:?} in {:?}", suffix, s),
        };
        Ok(Move { face, direction })
    }
}

impl core::fmt::Display for Move {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let suffix = match self.direction {
            Direction::Single => "",
            Direction::Reverse => "'",
            Direction::Double => "2",
        };
        write!(f, "{}{}", self.face.letter(), suffix)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Move {
    fn arbitrary<G: quickcheck::Gen>(g: &mut G) -> Self {
        use rand::Rng;

        let index = g.gen_range(0, MOVE_COUNT);
        Move::all().nth(index).unwrap()
    }
}
