use ratatui::style::Color as TermColor;

/// A color that can appear either as a word or as the ink a word is printed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Brown,
    Black,
    Purple,
}

impl Color {
    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Brown,
        Color::Black,
        Color::Purple,
    ];

    /// The word shown on screen, e.g. "RED"
    pub fn word(&self) -> String {
        self.to_string().to_uppercase()
    }

    /// The choice label, e.g. "Red"
    pub fn label(&self) -> String {
        let name = self.to_string();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => name,
        }
    }

    /// Response key bound to this color ('1'..='7')
    pub fn key(&self) -> char {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        char::from(b'1' + idx as u8)
    }

    pub fn from_key(c: char) -> Option<Color> {
        let idx = c.to_digit(10)? as usize;
        if idx == 0 {
            return None;
        }
        Self::ALL.get(idx - 1).copied()
    }

    /// Terminal color used to paint this ink. Stimuli are drawn on a light
    /// card so black stays visible on dark terminals.
    pub fn ink(&self) -> TermColor {
        match self {
            Color::Red => TermColor::Rgb(200, 0, 0),
            Color::Green => TermColor::Rgb(0, 140, 0),
            Color::Blue => TermColor::Rgb(0, 0, 220),
            Color::Yellow => TermColor::Rgb(210, 170, 0),
            Color::Brown => TermColor::Rgb(139, 69, 19),
            Color::Black => TermColor::Rgb(0, 0, 0),
            Color::Purple => TermColor::Rgb(128, 0, 128),
        }
    }
}

/// Background of the card stimuli are printed on
pub const CARD_BACKGROUND: TermColor = TermColor::Rgb(240, 240, 235);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(Color::Red.to_string(), "red");
        assert_eq!(Color::Purple.to_string(), "purple");
    }

    #[test]
    fn test_word_and_label() {
        assert_eq!(Color::Yellow.word(), "YELLOW");
        assert_eq!(Color::Yellow.label(), "Yellow");
    }

    #[test]
    fn test_keys_round_trip_in_order() {
        let keys: String = Color::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(keys, "1234567");
        for c in Color::ALL {
            assert_eq!(Color::from_key(c.key()), Some(c));
        }
    }

    #[test]
    fn test_from_key_rejects_out_of_range() {
        assert_eq!(Color::from_key('0'), None);
        assert_eq!(Color::from_key('8'), None);
        assert_eq!(Color::from_key('r'), None);
    }

    #[test]
    fn test_from_key_ignores_letters_of_every_case() {
        for c in ['r', 'R', 'b', 'B', ' '] {
            assert_eq!(Color::from_key(c), None);
        }
    }

    #[test]
    fn test_inks_are_distinct() {
        for (i, a) in Color::ALL.iter().enumerate() {
            for b in &Color::ALL[i + 1..] {
                assert_ne!(a.ink(), b.ink());
            }
        }
    }
}
