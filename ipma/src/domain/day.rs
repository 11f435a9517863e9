//! Day offsets for the per-day datasets.

/// Today or tomorrow, for datasets published two days ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayOffset {
    #[default]
    Today,
    Tomorrow,
}

impl DayOffset {
    pub fn offset(&self) -> u8 {
        match self {
            Self::Today => 0,
            Self::Tomorrow => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
        }
    }
}

/// One of the three days covered by the sea forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SeaDay {
    #[default]
    Today,
    Tomorrow,
    DayAfterTomorrow,
}

impl SeaDay {
    /// All sea forecast days, in order.
    pub const ALL: [SeaDay; 3] = [SeaDay::Today, SeaDay::Tomorrow, SeaDay::DayAfterTomorrow];

    pub fn offset(&self) -> u8 {
        match self {
            Self::Today => 0,
            Self::Tomorrow => 1,
            Self::DayAfterTomorrow => 2,
        }
    }
}
