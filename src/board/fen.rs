use std::fmt;

/// Board width and height in cells.
pub const BOARD_SIZE: usize = 8;

/// Placement field of the standard starting position.
pub const START_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// One of the 12 piece codes: uppercase is white, lowercase is black.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceCode {
    /// `K`
    WhiteKing,
    /// `Q`
    WhiteQueen,
    /// `R`
    WhiteRook,
    /// `B`
    WhiteBishop,
    /// `N`
    WhiteKnight,
    /// `P`
    WhitePawn,
    /// `k`
    BlackKing,
    /// `q`
    BlackQueen,
    /// `r`
    BlackRook,
    /// `b`
    BlackBishop,
    /// `n`
    BlackKnight,
    /// `p`
    BlackPawn,
}

impl PieceCode {
    /// Every piece code, white first.
    pub const ALL: [PieceCode; 12] = [
        PieceCode::WhiteKing,
        PieceCode::WhiteQueen,
        PieceCode::WhiteRook,
        PieceCode::WhiteBishop,
        PieceCode::WhiteKnight,
        PieceCode::WhitePawn,
        PieceCode::BlackKing,
        PieceCode::BlackQueen,
        PieceCode::BlackRook,
        PieceCode::BlackBishop,
        PieceCode::BlackKnight,
        PieceCode::BlackPawn,
    ];

    /// True for uppercase codes.
    pub fn is_white(self) -> bool {
        char::from(self).is_ascii_uppercase()
    }
}

/// Character is not one of the 12 piece letters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotAPiece(pub char);

impl TryFrom<char> for PieceCode {
    type Error = NotAPiece;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Ok(match value {
            'K' => PieceCode::WhiteKing,
            'Q' => PieceCode::WhiteQueen,
            'R' => PieceCode::WhiteRook,
            'B' => PieceCode::WhiteBishop,
            'N' => PieceCode::WhiteKnight,
            'P' => PieceCode::WhitePawn,
            'k' => PieceCode::BlackKing,
            'q' => PieceCode::BlackQueen,
            'r' => PieceCode::BlackRook,
            'b' => PieceCode::BlackBishop,
            'n' => PieceCode::BlackKnight,
            'p' => PieceCode::BlackPawn,
            other => return Err(NotAPiece(other)),
        })
    }
}

impl From<PieceCode> for char {
    fn from(value: PieceCode) -> Self {
        match value {
            PieceCode::WhiteKing => 'K',
            PieceCode::WhiteQueen => 'Q',
            PieceCode::WhiteRook => 'R',
            PieceCode::WhiteBishop => 'B',
            PieceCode::WhiteKnight => 'N',
            PieceCode::WhitePawn => 'P',
            PieceCode::BlackKing => 'k',
            PieceCode::BlackQueen => 'q',
            PieceCode::BlackRook => 'r',
            PieceCode::BlackBishop => 'b',
            PieceCode::BlackKnight => 'n',
            PieceCode::BlackPawn => 'p',
        }
    }
}

impl fmt::Display for PieceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

/// How strictly rank lengths and rank count are checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RankPolicy {
    /// Every rank must cover exactly 8 columns and there must be exactly 8 ranks.
    #[default]
    Strict,
    /// Short ranks and missing ranks are accepted and leave empty cells.
    /// Pieces past the eighth column and a ninth rank are still rejected.
    Lenient,
}

/// Placement parsing error. `index` is the byte offset into the placement string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// Not a piece letter, a digit 1-8 or a rank separator.
    #[error("invalid character '{ch}' at index {index}")]
    InvalidChar {
        /// Byte offset.
        index: usize,
        /// Offending character.
        ch: char,
    },
    /// A piece or skip count runs past the eighth column.
    #[error("'{ch}' at index {index} overflows rank {rank} (column {col})")]
    RowOverflow {
        /// Byte offset.
        index: usize,
        /// Offending character.
        ch: char,
        /// Rank (row) being parsed, 0-based.
        rank: usize,
        /// Column cursor when the character was read.
        col: usize,
    },
    /// A rank covers fewer than 8 columns.
    #[error("rank {rank} ending at index {index} covers {cols} columns, expected 8")]
    ShortRank {
        /// Byte offset of the rank's end.
        index: usize,
        /// Rank, 0-based.
        rank: usize,
        /// Columns covered.
        cols: usize,
    },
    /// More than 8 ranks.
    #[error("rank separator at index {index} starts a ninth rank")]
    TooManyRanks {
        /// Byte offset of the separator.
        index: usize,
    },
    /// Fewer than 8 ranks.
    #[error("placement has {ranks} ranks, expected 8")]
    MissingRanks {
        /// Ranks found.
        ranks: usize,
    },
}

/// Fixed 8x8 grid. Row 0 is the first rank in the placement string (top of
/// the image), column 0 the leftmost file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<PieceCode>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Piece at `(row, col)`. Panics if either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<PieceCode> {
        self.cells[row][col]
    }

    /// Set or clear `(row, col)`. Panics if either index is out of range.
    pub fn set(&mut self, row: usize, col: usize, pc: Option<PieceCode>) {
        self.cells[row][col] = pc;
    }

    /// One full row.
    pub fn row(&self, row: usize) -> &[Option<PieceCode>; BOARD_SIZE] {
        &self.cells[row]
    }

    /// Occupied cells as `(row, col, piece)`, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, PieceCode)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, pc)| pc.map(|pc| (r, c, pc)))
        })
    }

    /// Canonical placement field, empties collapsed into digits.
    pub fn to_placement(&self) -> String {
        let mut out = String::with_capacity(BOARD_SIZE * (BOARD_SIZE + 1));
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                out.push('/');
            }
            let mut empty = 0u32;
            for pc in row {
                match pc {
                    Some(pc) => {
                        if empty > 0 {
                            out.push(char::from_digit(empty, 10).unwrap_or('?'));
                            empty = 0;
                        }
                        out.push(char::from(*pc));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from_digit(empty, 10).unwrap_or('?'));
            }
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for pc in row {
                match pc {
                    Some(pc) => write!(f, "{pc}")?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parse a FEN piece-placement field into a [`Board`].
pub fn parse_placement(placement: &str, policy: RankPolicy) -> Result<Board, FenError> {
    let mut board = Board::default();
    let strict = policy == RankPolicy::Strict;

    let mut row = 0usize;
    let mut col = 0usize;

    let end_rank = |row: usize, col: usize, index: usize| -> Result<(), FenError> {
        if strict && col != BOARD_SIZE {
            return Err(FenError::ShortRank {
                index,
                rank: row,
                cols: col,
            });
        }
        Ok(())
    };

    for (i, c) in placement.char_indices() {
        match c {
            '/' => {
                end_rank(row, col, i)?;
                if row + 1 >= BOARD_SIZE {
                    return Err(FenError::TooManyRanks { index: i });
                }
                row += 1;
                col = 0;
            }
            '1'..='8' => {
                let n = c.to_digit(10).ok_or(FenError::InvalidChar { index: i, ch: c })?;
                if strict && col + n as usize > BOARD_SIZE {
                    return Err(FenError::RowOverflow {
                        index: i,
                        ch: c,
                        rank: row,
                        col,
                    });
                }
                col += n as usize;
            }
            _ => {
                let pc = PieceCode::try_from(c)
                    .map_err(|NotAPiece(ch)| FenError::InvalidChar { index: i, ch })?;
                if col >= BOARD_SIZE {
                    return Err(FenError::RowOverflow {
                        index: i,
                        ch: c,
                        rank: row,
                        col,
                    });
                }
                board.set(row, col, Some(pc));
                col += 1;
            }
        }
    }

    end_rank(row, col, placement.len())?;
    if strict && row + 1 != BOARD_SIZE {
        return Err(FenError::MissingRanks { ranks: row + 1 });
    }

    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_chars(board: &Board, row: usize) -> String {
        board
            .row(row)
            .iter()
            .map(|pc| pc.map(char::from).unwrap_or('.'))
            .collect()
    }

    #[test]
    fn start_position() {
        let b = parse_placement(START_PLACEMENT, RankPolicy::Strict).unwrap();
        assert_eq!(row_chars(&b, 0), "rnbqkbnr");
        assert_eq!(row_chars(&b, 1), "pppppppp");
        for r in 2..6 {
            assert_eq!(row_chars(&b, r), "........");
        }
        assert_eq!(row_chars(&b, 6), "PPPPPPPP");
        assert_eq!(row_chars(&b, 7), "RNBQKBNR");
        assert_eq!(b.occupied().count(), 32);
    }

    #[test]
    fn every_piece_letter_fills_a_rank() {
        for pc in PieceCode::ALL {
            let rank: String = std::iter::repeat_n(char::from(pc), 8).collect();
            let placement = format!("{rank}/8/8/8/8/8/8/8");
            let b = parse_placement(&placement, RankPolicy::Strict).unwrap();
            assert!(b.row(0).iter().all(|c| *c == Some(pc)), "{pc}");
            assert_eq!(b.occupied().count(), 8);
        }
    }

    #[test]
    fn char_round_trip_covers_all_codes() {
        for pc in PieceCode::ALL {
            assert_eq!(PieceCode::try_from(char::from(pc)), Ok(pc));
        }
        assert_eq!(PieceCode::try_from('x'), Err(NotAPiece('x')));
        assert!(PieceCode::WhiteQueen.is_white());
        assert!(!PieceCode::BlackQueen.is_white());
    }

    #[test]
    fn invalid_character_is_rejected() {
        let err = parse_placement("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR", RankPolicy::Strict)
            .unwrap_err();
        assert_eq!(err, FenError::InvalidChar { index: 13, ch: 'x' });
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn digits_outside_one_to_eight_are_invalid() {
        for policy in [RankPolicy::Strict, RankPolicy::Lenient] {
            assert_eq!(
                parse_placement("9/8/8/8/8/8/8/8", policy),
                Err(FenError::InvalidChar { index: 0, ch: '9' })
            );
            assert_eq!(
                parse_placement("08/8/8/8/8/8/8/8", policy),
                Err(FenError::InvalidChar { index: 0, ch: '0' })
            );
        }
    }

    #[test]
    fn piece_after_full_rank_overflows() {
        for policy in [RankPolicy::Strict, RankPolicy::Lenient] {
            let err = parse_placement("ppppppppp/8/8/8/8/8/8/8", policy).unwrap_err();
            assert_eq!(
                err,
                FenError::RowOverflow {
                    index: 8,
                    ch: 'p',
                    rank: 0,
                    col: 8
                }
            );

            let err = parse_placement("8/8/8/8/8/8/8/8K", policy).unwrap_err();
            assert!(matches!(err, FenError::RowOverflow { rank: 7, .. }));
        }
    }

    #[test]
    fn strict_rejects_digit_overflow_and_short_ranks() {
        assert!(matches!(
            parse_placement("44p/8/8/8/8/8/8/8", RankPolicy::Strict),
            Err(FenError::RowOverflow { index: 2, .. })
        ));
        assert!(matches!(
            parse_placement("54/8/8/8/8/8/8/8", RankPolicy::Strict),
            Err(FenError::RowOverflow { index: 1, ch: '4', .. })
        ));
        assert_eq!(
            parse_placement("7/8/8/8/8/8/8/8", RankPolicy::Strict),
            Err(FenError::ShortRank {
                index: 1,
                rank: 0,
                cols: 7
            })
        );
        assert_eq!(
            parse_placement("8/8/8", RankPolicy::Strict),
            Err(FenError::MissingRanks { ranks: 3 })
        );
        assert!(matches!(
            parse_placement("", RankPolicy::Strict),
            Err(FenError::ShortRank { rank: 0, cols: 0, .. })
        ));
    }

    #[test]
    fn lenient_accepts_short_and_missing_ranks() {
        let b = parse_placement("k/3P", RankPolicy::Lenient).unwrap();
        assert_eq!(b.get(0, 0), Some(PieceCode::BlackKing));
        assert_eq!(b.get(1, 3), Some(PieceCode::WhitePawn));
        assert_eq!(b.occupied().count(), 2);
        for r in 2..BOARD_SIZE {
            assert_eq!(row_chars(&b, r), "........");
        }

        // A digit run may push the cursor past the edge; only a following piece fails.
        let b = parse_placement("55/8", RankPolicy::Lenient).unwrap();
        assert_eq!(b.occupied().count(), 0);

        assert_eq!(parse_placement("", RankPolicy::Lenient), Ok(Board::default()));
    }

    #[test]
    fn ninth_rank_is_rejected() {
        for policy in [RankPolicy::Strict, RankPolicy::Lenient] {
            assert_eq!(
                parse_placement("8/8/8/8/8/8/8/8/8", policy),
                Err(FenError::TooManyRanks { index: 15 })
            );
        }
    }

    #[test]
    fn full_fen_fields_are_not_consumed() {
        let err = parse_placement(&format!("{START_PLACEMENT} w KQkq - 0 1"), RankPolicy::Strict)
            .unwrap_err();
        assert_eq!(
            err,
            FenError::InvalidChar {
                index: START_PLACEMENT.len(),
                ch: ' '
            }
        );
    }

    #[test]
    fn to_placement_is_canonical() {
        for s in [
            START_PLACEMENT,
            "8/8/8/8/8/8/8/8",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
            "4k3/8/8/8/8/8/8/4K2R",
        ] {
            let b = parse_placement(s, RankPolicy::Strict).unwrap();
            assert_eq!(b.to_placement(), s);
        }
    }

    #[test]
    fn display_draws_a_diagram() {
        let b = parse_placement("4k3/8/8/8/8/8/8/4K3", RankPolicy::Strict).unwrap();
        let text = b.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "....k...");
        assert_eq!(lines[7], "....K...");
    }
}
