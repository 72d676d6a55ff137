//! FEN to classifier feature vector.
//!
//! The layout is shared with the offline training pipeline and must not
//! change: 64 square codes in a1, b1, ..., h1, a2, ..., h8 order, followed by
//! one side-to-move flag.

use serde::{Serialize, Serializer};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Color, Piece, Position, Role, Square};

/// Board squares encoded per position.
pub const NUM_SQUARES: usize = 64;

/// Total vector length: one code per square plus the side-to-move flag.
pub const NUM_FEATURES: usize = NUM_SQUARES + 1;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureError {
    #[error("Invalid position: {0}")]
    InvalidPosition(String),
}

/// Classifier input for a single position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureVector([i8; NUM_FEATURES]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[i8] {
        &self.0
    }

    /// Square codes only, without the side-to-move flag.
    pub fn squares(&self) -> &[i8] {
        &self.0[..NUM_SQUARES]
    }

    pub fn white_to_move(&self) -> bool {
        self.0[NUM_SQUARES] == 1
    }

    pub fn get(&self, index: usize) -> Option<i8> {
        self.0.get(index).copied()
    }
}

// serde only derives arrays up to 32 elements
impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

/// Signed piece code: white positive, black negative, magnitude by role.
pub fn piece_code(piece: Piece) -> i8 {
    let magnitude = match piece.role {
        Role::Pawn => 1,
        Role::Knight => 2,
        Role::Bishop => 3,
        Role::Rook => 4,
        Role::Queen => 5,
        Role::King => 6,
    };
    match piece.color {
        Color::White => magnitude,
        Color::Black => -magnitude,
    }
}

/// Parse a FEN string into a legal position.
///
/// Fields may be separated by any whitespace. Castling rights and the en
/// passant square are not encoded, so inconsistent values there are dropped
/// instead of rejected. Board and turn errors still fail.
pub fn parse_position(fen: &str) -> Result<Chess, FeatureError> {
    let normalized = fen.split_whitespace().collect::<Vec<_>>().join(" ");
    let setup = normalized
        .parse::<Fen>()
        .map_err(|e| FeatureError::InvalidPosition(e.to_string()))?;
    setup
        .into_position::<Chess>(CastlingMode::Standard)
        .or_else(|e| e.ignore_invalid_castling_rights())
        .or_else(|e| e.ignore_invalid_ep_square())
        .map_err(|e| FeatureError::InvalidPosition(e.to_string()))
}

/// Encode a position as a feature vector.
pub fn encode_position(pos: &Chess) -> FeatureVector {
    let mut features = [0i8; NUM_FEATURES];
    let board = pos.board();

    for (i, sq) in Square::ALL.into_iter().enumerate() {
        if let Some(piece) = board.piece_at(sq) {
            features[i] = piece_code(piece);
        }
    }

    features[NUM_SQUARES] = match pos.turn() {
        Color::White => 1,
        Color::Black => 0,
    };

    FeatureVector(features)
}

/// Convert FEN text into the 65-element feature vector.
pub fn extract_features(fen: &str) -> Result<FeatureVector, FeatureError> {
    let pos = parse_position(fen)?;
    Ok(encode_position(&pos))
}
