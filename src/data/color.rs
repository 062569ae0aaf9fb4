/// relic and vessel slot colors, in the reference table's index order.
/// a White SLOT accepts a relic of any color; a White RELIC still only
/// fits White slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Color {
    Red = 0,
    Blue = 1,
    Yellow = 2,
    Green = 3,
    White = 4,
}

impl Color {
    /// color code column from the relic table; anything out of range is
    /// colorless (promotional flatstones and the like)
    pub fn from_code(code: i64) -> Option<Color> {
        match code {
            0 => Some(Color::Red),
            1 => Some(Color::Blue),
            2 => Some(Color::Yellow),
            3 => Some(Color::Green),
            4 => Some(Color::White),
            _ => None,
        }
    }

    pub fn admits(&self, relic: Color) -> bool {
        *self == Color::White || *self == relic
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Color::Red => write!(f, "Red"),
            Color::Blue => write!(f, "Blue"),
            Color::Yellow => write!(f, "Yellow"),
            Color::Green => write!(f, "Green"),
            Color::White => write!(f, "White"),
        }
    }
}
