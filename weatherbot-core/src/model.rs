use serde::{Deserialize, Serialize};

/// Relative day a weather question refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayOffset {
    #[default]
    Today,
    Tomorrow,
    DayAfterTomorrow,
}

impl DayOffset {
    /// Number of days after the current UTC date.
    pub fn as_days(self) -> u8 {
        match self {
            DayOffset::Today => 0,
            DayOffset::Tomorrow => 1,
            DayOffset::DayAfterTomorrow => 2,
        }
    }

    /// Label used in forecast reports.
    pub fn label(self) -> &'static str {
        match self {
            DayOffset::Today => "today",
            DayOffset::Tomorrow => "tomorrow",
            DayOffset::DayAfterTomorrow => "day after tomorrow",
        }
    }
}

impl std::fmt::Display for DayOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// City and day pulled out of a free-text question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub city: String,
    pub day: DayOffset,
}

/// Body of `POST /ask-weather`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
