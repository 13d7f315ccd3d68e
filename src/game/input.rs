//! Input vocabulary accepted by the round state machine

/// One event from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A single typed character; only letters are accepted
    Letter(char),
    Backspace,
    Enter,
    ArrowLeft,
    ArrowRight,
    /// Pointer click on a cell of the active row
    CellClick(usize),
    /// Start over with a new word
    Restart,
}

impl Input {
    /// Parse a key name as reported by the presentation layer
    ///
    /// Recognizes `Backspace`, `Enter`, `ArrowLeft`, `ArrowRight` and single
    /// characters. Anything else is `None` and should be ignored.
    ///
    /// # Examples
    /// ```
    /// use wordle_play::game::Input;
    ///
    /// assert_eq!(Input::from_key("Enter"), Some(Input::Enter));
    /// assert_eq!(Input::from_key("ç"), Some(Input::Letter('ç')));
    /// assert_eq!(Input::from_key("Shift"), None);
    /// ```
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Backspace" => Some(Self::Backspace),
            "Enter" => Some(Self::Enter),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(Self::Letter(ch)),
                    _ => None,
                }
            }
        }
    }
}
