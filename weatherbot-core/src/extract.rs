//! Pulls a city name and a day offset out of free-text weather questions.
//!
//! The two passes are independent: the day phrase is detected anywhere in the
//! text and the city is whatever follows the first `" in "`.

use crate::model::{DayOffset, ParsedRequest};

const CITY_DELIMITER: &str = " in ";

/// Phrases that end the city span.
const CITY_STOP_MARKERS: &[&str] =
    &[" tomorrow", " today", " day after", " day-after", " dayafter"];

const TRIM_PUNCTUATION: &[char] = &['?', '.', ',', '!'];

/// Outcome of [`extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Parsed(ParsedRequest),
    /// No usable city was found.
    Unrecognized,
}

pub fn extract(text: &str) -> Extraction {
    let day = detect_day(text);

    match extract_city(text) {
        Some(city) => Extraction::Parsed(ParsedRequest { city, day }),
        None => Extraction::Unrecognized,
    }
}

/// "day after tomorrow" wins over "tomorrow"; everything else is today.
pub fn detect_day(text: &str) -> DayOffset {
    let lower = text.to_lowercase();

    if lower.contains("day after tomorrow") {
        DayOffset::DayAfterTomorrow
    } else if lower.contains("tomorrow") {
        DayOffset::Tomorrow
    } else {
        DayOffset::Today
    }
}

pub fn extract_city(text: &str) -> Option<String> {
    // ASCII lowering keeps byte offsets valid for slicing `text`.
    let lower = text.to_ascii_lowercase();
    let start = lower.find(CITY_DELIMITER)? + CITY_DELIMITER.len();

    let span = &text[start..];
    let span_lower = &lower[start..];

    let end = CITY_STOP_MARKERS
        .iter()
        .filter_map(|marker| span_lower.find(marker))
        .min()
        .unwrap_or(span.len());

    let city = span[..end]
        .trim_matches(|c: char| c.is_whitespace() || TRIM_PUNCTUATION.contains(&c));

    if city.is_empty() { None } else { Some(title_case(city)) }
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(city: &str, day: DayOffset) -> Extraction {
        Extraction::Parsed(ParsedRequest { city: city.to_string(), day })
    }

    #[test]
    fn mumbai_tomorrow() {
        assert_eq!(extract("weather in Mumbai tomorrow"), parsed("Mumbai", DayOffset::Tomorrow));
    }

    #[test]
    fn multi_word_city_is_title_cased() {
        assert_eq!(
            extract("weather in new york city today"),
            parsed("New York City", DayOffset::Today)
        );
    }

    #[test]
    fn day_after_tomorrow_takes_priority() {
        assert_eq!(detect_day("Weather day after tomorrow"), DayOffset::DayAfterTomorrow);
        assert_eq!(detect_day("TOMORROW or the DAY AFTER TOMORROW?"), DayOffset::DayAfterTomorrow);
        assert_eq!(
            extract("weather in paris day after tomorrow"),
            parsed("Paris", DayOffset::DayAfterTomorrow)
        );
    }

    #[test]
    fn defaults_to_today() {
        assert_eq!(detect_day("what's the weather in Oslo"), DayOffset::Today);
        assert_eq!(detect_day("weather in Oslo today"), DayOffset::Today);
    }

    #[test]
    fn missing_delimiter_is_unrecognized() {
        assert_eq!(extract("weather tomorrow"), Extraction::Unrecognized);
        assert_eq!(extract("weather"), Extraction::Unrecognized);
    }

    #[test]
    fn empty_city_is_unrecognized() {
        assert_eq!(extract("weather in  ?!"), Extraction::Unrecognized);
        assert_eq!(extract("weather in ...  "), Extraction::Unrecognized);
    }

    #[test]
    fn delimiter_match_ignores_case() {
        assert_eq!(extract("Weather IN berlin"), parsed("Berlin", DayOffset::Today));
    }

    #[test]
    fn trailing_punctuation_is_trimmed() {
        assert_eq!(extract("How is the weather in Delhi?"), parsed("Delhi", DayOffset::Today));
        assert_eq!(extract("weather in  tokyo!!  "), parsed("Tokyo", DayOffset::Today));
    }

    #[test]
    fn earliest_stop_marker_wins() {
        // " today" appears before " tomorrow"; the span ends at the first one.
        assert_eq!(
            extract("weather in Lima today not tomorrow"),
            parsed("Lima", DayOffset::Tomorrow)
        );
        assert_eq!(extract("weather in Cairo day-after"), parsed("Cairo", DayOffset::Today));
        assert_eq!(extract("weather in Rome dayafter"), parsed("Rome", DayOffset::Today));
    }

    #[test]
    fn only_first_delimiter_counts() {
        assert_eq!(
            extract("weather in san jose in california"),
            parsed("San Jose In California", DayOffset::Today)
        );
    }

    #[test]
    fn day_phrase_need_not_follow_city() {
        assert_eq!(
            extract("tomorrow, what is the weather in Kyiv"),
            parsed("Kyiv", DayOffset::Tomorrow)
        );
    }

    #[test]
    fn title_case_rules() {
        assert_eq!(title_case("new york"), "New York");
        assert_eq!(title_case("SAN FRANCISCO"), "San Francisco");
        assert_eq!(title_case("st. louis"), "St. Louis");
        assert_eq!(title_case("rio-de-janeiro"), "Rio-De-Janeiro");
        assert_eq!(title_case("münchen"), "München");
    }
}
