use std::fmt;

/// Predicted result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    WhiteWin,
    BlackWin,
    Draw,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::WhiteWin, Outcome::BlackWin, Outcome::Draw];

    /// Map a raw classifier label to an outcome.
    ///
    /// Anything other than "White Win" or "Black Win" is treated as a draw,
    /// including labels the model was never trained with. Callers that care
    /// should check [`Outcome::is_known_label`] first.
    pub fn from_label(label: &str) -> Self {
        match label {
            "White Win" => Outcome::WhiteWin,
            "Black Win" => Outcome::BlackWin,
            _ => Outcome::Draw,
        }
    }

    pub fn is_known_label(label: &str) -> bool {
        Outcome::ALL.iter().any(|o| o.label() == label)
    }

    /// Label as written by the training pipeline.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::WhiteWin => "White Win",
            Outcome::BlackWin => "Black Win",
            Outcome::Draw => "Draw",
        }
    }

    pub fn sentence(self) -> &'static str {
        match self {
            Outcome::WhiteWin => "White is predicted to win.",
            Outcome::BlackWin => "Black is predicted to win.",
            Outcome::Draw => "The game is predicted to be a draw.",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_to_sentence() {
        assert_eq!(Outcome::from_label("White Win").sentence(), "White is predicted to win.");
        assert_eq!(Outcome::from_label("Black Win").sentence(), "Black is predicted to win.");
        assert_eq!(
            Outcome::from_label("Draw").sentence(),
            "The game is predicted to be a draw."
        );
    }

    #[test]
    fn test_unknown_labels_fall_back_to_draw() {
        for label in ["", "white win", "1-0", "Stalemate"] {
            assert_eq!(Outcome::from_label(label), Outcome::Draw, "{label:?}");
            assert!(!Outcome::is_known_label(label));
        }
    }

    #[test]
    fn test_labels_round_trip() {
        for outcome in Outcome::ALL {
            assert!(Outcome::is_known_label(outcome.label()));
            assert_eq!(Outcome::from_label(outcome.label()), outcome);
        }
    }
}
