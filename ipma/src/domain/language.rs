//! Display languages and compass point names.

/// Language used when rendering descriptions.
///
/// The upstream classifiers carry Portuguese and English text; Portuguese is
/// the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Portuguese,
    English,
}

/// One of the eight compass points used for wind directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassPoint {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassPoint {
    /// Parse an abbreviation such as `"NE"`.
    ///
    /// Portuguese `"O"` (Oeste) is accepted for west alongside `"W"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "N" => Some(Self::North),
            "NE" => Some(Self::NorthEast),
            "E" => Some(Self::East),
            "SE" => Some(Self::SouthEast),
            "S" => Some(Self::South),
            "SW" | "SO" => Some(Self::SouthWest),
            "W" | "O" => Some(Self::West),
            "NW" | "NO" => Some(Self::NorthWest),
            _ => None,
        }
    }

    /// Map the numeric direction id used by station observations.
    ///
    /// `0` means calm / no direction; `9` is north again.
    pub fn from_observation_id(id: i64) -> Option<Self> {
        match id {
            1 | 9 => Some(Self::North),
            2 => Some(Self::NorthEast),
            3 => Some(Self::East),
            4 => Some(Self::SouthEast),
            5 => Some(Self::South),
            6 => Some(Self::SouthWest),
            7 => Some(Self::West),
            8 => Some(Self::NorthWest),
            _ => None,
        }
    }

    /// English abbreviation ("N", "NE", ...).
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::North => "N",
            Self::NorthEast => "NE",
            Self::East => "E",
            Self::SouthEast => "SE",
            Self::South => "S",
            Self::SouthWest => "SW",
            Self::West => "W",
            Self::NorthWest => "NW",
        }
    }

    /// Full name in `lang`.
    pub fn name(&self, lang: Language) -> &'static str {
        match lang {
            Language::Portuguese => match self {
                Self::North => "Norte",
                Self::NorthEast => "Nordeste",
                Self::East => "Este",
                Self::SouthEast => "Sudeste",
                Self::South => "Sul",
                Self::SouthWest => "Sudoeste",
                Self::West => "Oeste",
                Self::NorthWest => "Noroeste",
            },
            Language::English => match self {
                Self::North => "North",
                Self::NorthEast => "Northeast",
                Self::East => "East",
                Self::SouthEast => "Southeast",
                Self::South => "South",
                Self::SouthWest => "Southwest",
                Self::West => "West",
                Self::NorthWest => "Northwest",
            },
        }
    }
}
