//! Column role guessing: which column holds temperature, humidity, and the
//! time axis. The guesses only seed the selectors; the user has the final say.

/// Substrings hinting at a temperature column, in priority order.
pub const TEMPERATURE_HINTS: &[&str] = &["temp"];
/// Substrings hinting at a humidity column.
pub const HUMIDITY_HINTS: &[&str] = &["hum"];
/// Substrings hinting at a time/date column.
pub const TIME_AXIS_HINTS: &[&str] = &["date", "time", "day", "timestamp"];

/// Sentinel shown first in the humidity selector.
pub const NO_HUMIDITY: &str = "<none>";
/// Sentinel shown first in the x-axis selector.
pub const ROW_INDEX_AXIS: &str = "<index>";

/// Semantic role a column can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Temperature,
    Humidity,
    TimeAxis,
}

impl Role {
    pub fn hints(self) -> &'static [&'static str] {
        match self {
            Role::Temperature => TEMPERATURE_HINTS,
            Role::Humidity => HUMIDITY_HINTS,
            Role::TimeAxis => TIME_AXIS_HINTS,
        }
    }
}

/// Return the first column whose lowercased name contains one of the
/// substrings. Substrings are tried in order; for each one, columns are
/// scanned in their original order.
pub fn first_match<'a, S: AsRef<str>>(columns: &'a [S], substrings: &[&str]) -> Option<&'a str> {
    let lowered: Vec<String> = columns.iter().map(|c| c.as_ref().to_lowercase()).collect();
    substrings.iter().find_map(|sub| {
        let sub = sub.to_lowercase();
        lowered
            .iter()
            .position(|name| name.contains(&sub))
            .map(|i| columns[i].as_ref())
    })
}

/// Best guess per role for a set of column names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleGuess {
    pub temperature: Option<String>,
    pub humidity: Option<String>,
    pub time_axis: Option<String>,
}

pub fn guess_roles<S: AsRef<str>>(columns: &[S]) -> RoleGuess {
    let guess = |role: Role| first_match(columns, role.hints()).map(str::to_string);
    RoleGuess {
        temperature: guess(Role::Temperature),
        humidity: guess(Role::Humidity),
        time_axis: guess(Role::TimeAxis),
    }
}

/// Starting position for a selector whose real options may be shifted by a
/// sentinel entry (`offset = 1` when `<none>` sits at position 0).
///
/// Returns `offset + position(value)` when `value` is one of `options`,
/// otherwise `fallback`. Never panics.
pub fn safe_index<S: AsRef<str>>(
    options: &[S],
    value: Option<&str>,
    offset: usize,
    fallback: usize,
) -> usize {
    value
        .and_then(|v| options.iter().position(|o| o.as_ref() == v))
        .and_then(|pos| offset.checked_add(pos))
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_match_is_case_insensitive() {
        let c = cols(&["Station", "AirTemp_F", "RelHumidity"]);
        assert_eq!(first_match(&c, &["temp"]), Some("AirTemp_F"));
        assert_eq!(first_match(&c, &["hum"]), Some("RelHumidity"));
        assert_eq!(first_match(&c, &["HUM"]), Some("RelHumidity"));
    }

    #[test]
    fn first_match_prefers_substring_priority_over_column_order() {
        // "time" appears in an earlier column, but "date" has priority.
        let c = cols(&["time_of_obs", "obs_date", "weekday"]);
        assert_eq!(first_match(&c, TIME_AXIS_HINTS), Some("obs_date"));
    }

    #[test]
    fn first_match_takes_first_column_for_a_substring() {
        let c = cols(&["temp_min", "temp_max"]);
        assert_eq!(first_match(&c, &["temp"]), Some("temp_min"));
    }

    #[test]
    fn first_match_none_when_nothing_matches() {
        let c = cols(&["a", "b"]);
        assert_eq!(first_match(&c, TIME_AXIS_HINTS), None);
        let empty: Vec<String> = Vec::new();
        assert_eq!(first_match(&empty, &["temp"]), None);
    }

    #[test]
    fn guess_roles_fills_each_role_independently() {
        let c = cols(&["Date", "Temperature", "Humidity (%)"]);
        let guess = guess_roles(&c);
        assert_eq!(guess.temperature.as_deref(), Some("Temperature"));
        assert_eq!(guess.humidity.as_deref(), Some("Humidity (%)"));
        assert_eq!(guess.time_axis.as_deref(), Some("Date"));

        let guess = guess_roles(&cols(&["x", "y"]));
        assert_eq!(guess, RoleGuess::default());
    }

    #[test]
    fn safe_index_applies_offset_for_known_values() {
        let c = cols(&["date", "temp", "hum"]);
        assert_eq!(safe_index(&c, Some("temp"), 0, 0), 1);
        assert_eq!(safe_index(&c, Some("hum"), 1, 0), 3);
    }

    #[test]
    fn safe_index_falls_back() {
        let c = cols(&["date", "temp"]);
        assert_eq!(safe_index(&c, None, 1, 0), 0);
        assert_eq!(safe_index(&c, Some("missing"), 1, 7), 7);
        let empty: Vec<String> = Vec::new();
        assert_eq!(safe_index(&empty, Some("temp"), 0, 0), 0);
        assert_eq!(safe_index(&c, Some("temp"), usize::MAX, 3), 3);
    }
}
