//! Duration text grammars and renderings.
//!
//! Stanza durations have one normal form and several accepted input forms:
//!
//! - **Dotted** (canonical, round-trip identity): `[-][D.]HH:MM:SS[.fffffffff]`,
//!   fractional seconds trimmed to the shortest exact representation, the day
//!   field omitted when zero. Produced by [`to_dotted_string`].
//! - **Unit-suffixed** (compact, human-readable): `6d 2h 11m 23.548s`, leading
//!   zero-valued units omitted. Produced by [`to_unit_string`] and used for
//!   default document rendering of `(duration)` values.
//! - **Input-only**: any subset of `d h m s ms us ns` fields in any order,
//!   additive, with or without whitespace (`6d2h11m23s548ms112us900ns`), or a
//!   bare number meaning seconds.
//!
//! [`parse`] accepts all of the above; output form is always chosen by the
//! call site, never inferred from the input spelling.
//!
//! ```rust
//! use stanza::duration;
//!
//! let a = duration::parse("6d2h11m23s548ms").unwrap();
//! let b = duration::parse("6.02:11:23.548").unwrap();
//! assert_eq!(a, b);
//! assert_eq!(duration::to_dotted_string(&a), "6.02:11:23.548");
//! assert_eq!(duration::to_unit_string(&a), "6d 2h 11m 23.548s");
//! ```

use chrono::TimeDelta;

const NANOS_PER_SEC: i128 = 1_000_000_000;
const NANOS_PER_MIN: i128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: i128 = 60 * NANOS_PER_MIN;
const NANOS_PER_DAY: i128 = 24 * NANOS_PER_HOUR;

/// Parses a duration from any of the accepted grammars.
///
/// Returns `None` for text matching none of them.
pub fn parse(text: &str) -> Option<TimeDelta> {
    let text = text.trim();
    let (negative, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if text.is_empty() {
        return None;
    }

    let nanos = if text.contains(':') {
        parse_dotted(text)?
    } else {
        parse_units(text)?
    };

    from_total_nanos(if negative { -nanos } else { nanos })
}

/// Renders the canonical dotted form `[-][D.]HH:MM:SS[.f]`.
pub fn to_dotted_string(duration: &TimeDelta) -> String {
    let total = total_nanos(duration);
    let (sign, magnitude) = split_sign(total);

    let days = magnitude / NANOS_PER_DAY;
    let hours = magnitude % NANOS_PER_DAY / NANOS_PER_HOUR;
    let minutes = magnitude % NANOS_PER_HOUR / NANOS_PER_MIN;
    let seconds = magnitude % NANOS_PER_MIN / NANOS_PER_SEC;
    let fraction = format_fraction((magnitude % NANOS_PER_SEC) as u32);

    if days > 0 {
        format!("{sign}{days}.{hours:02}:{minutes:02}:{seconds:02}{fraction}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}{fraction}")
    }
}

/// Renders the compact unit form `Xd Xh Xm X.fs`, omitting zero-valued
/// leading units. The zero duration renders as `0s`.
pub fn to_unit_string(duration: &TimeDelta) -> String {
    let total = total_nanos(duration);
    let (sign, magnitude) = split_sign(total);

    let days = magnitude / NANOS_PER_DAY;
    let hours = magnitude % NANOS_PER_DAY / NANOS_PER_HOUR;
    let minutes = magnitude % NANOS_PER_HOUR / NANOS_PER_MIN;
    let seconds = magnitude % NANOS_PER_MIN / NANOS_PER_SEC;
    let fraction = format_fraction((magnitude % NANOS_PER_SEC) as u32);

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 || !parts.is_empty() {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 || !parts.is_empty() {
        parts.push(format!("{minutes}m"));
    }
    parts.push(format!("{seconds}{fraction}s"));

    format!("{sign}{}", parts.join(" "))
}

fn total_nanos(duration: &TimeDelta) -> i128 {
    duration.num_seconds() as i128 * NANOS_PER_SEC + duration.subsec_nanos() as i128
}

fn split_sign(total: i128) -> (&'static str, i128) {
    if total < 0 {
        ("-", -total)
    } else {
        ("", total)
    }
}

fn from_total_nanos(nanos: i128) -> Option<TimeDelta> {
    let secs = i64::try_from(nanos.div_euclid(NANOS_PER_SEC)).ok()?;
    let subsec = nanos.rem_euclid(NANOS_PER_SEC) as u32;
    TimeDelta::new(secs, subsec)
}

/// `.548`-style suffix with trailing zeros trimmed, empty when whole.
fn format_fraction(subsec_nanos: u32) -> String {
    if subsec_nanos == 0 {
        return String::new();
    }
    let mut digits = format!("{subsec_nanos:09}");
    while digits.ends_with('0') {
        digits.pop();
    }
    format!(".{digits}")
}

/// `[D.]HH:MM:SS[.f]` — exactly three colon-separated fields, the first
/// optionally carrying a day prefix, the last optionally a fraction.
fn parse_dotted(text: &str) -> Option<i128> {
    let mut fields = text.split(':');
    let head = fields.next()?;
    let minutes_field = fields.next()?;
    let seconds_field = fields.next()?;
    if fields.next().is_some() {
        return None;
    }

    let (days, hours_field) = match head.split_once('.') {
        Some((days, hours)) => (parse_int_field(days)?, hours),
        None => (0, head),
    };
    let hours = parse_int_field(hours_field)?;
    let minutes = parse_int_field(minutes_field)?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    let (whole_seconds, fraction_nanos) = match seconds_field.split_once('.') {
        Some((whole, fraction)) => (parse_int_field(whole)?, parse_fraction(fraction)?),
        None => (parse_int_field(seconds_field)?, 0),
    };
    if whole_seconds > 59 {
        return None;
    }

    Some(
        days as i128 * NANOS_PER_DAY
            + hours as i128 * NANOS_PER_HOUR
            + minutes as i128 * NANOS_PER_MIN
            + whole_seconds as i128 * NANOS_PER_SEC
            + fraction_nanos as i128,
    )
}

/// Unit-suffixed fields (`6d2h11m23s548ms112us900ns`, whitespace tolerated)
/// or a single bare number meaning seconds. Fields are additive.
fn parse_units(text: &str) -> Option<i128> {
    let mut total: i128 = 0;
    let mut rest = text;
    let mut saw_field = false;

    while !rest.is_empty() {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        let number_len = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        if number_len == 0 {
            return None;
        }
        let (number, after) = rest.split_at(number_len);

        let unit_len = after
            .find(|c: char| !c.is_ascii_lowercase())
            .unwrap_or(after.len())
            .min(2);
        let (unit, after_unit) = after.split_at(unit_len);

        // `ms`/`us`/`ns` bind as one unit; a bare `m` followed by more
        // digits is the minutes field.
        let per_unit = match unit {
            "d" => NANOS_PER_DAY,
            "h" => NANOS_PER_HOUR,
            "m" => NANOS_PER_MIN,
            "ms" => 1_000_000,
            "us" => 1_000,
            "ns" => 1,
            "s" => NANOS_PER_SEC,
            // bare number: seconds, allowed only as the sole field
            "" if !saw_field && after_unit.trim_start().is_empty() => NANOS_PER_SEC,
            _ => return None,
        };

        // fractions are allowed on seconds only
        total += match number.split_once('.') {
            Some(_) if per_unit != NANOS_PER_SEC => return None,
            Some((whole, fraction)) => {
                let whole = parse_int_field(whole)? as i128;
                whole * NANOS_PER_SEC + parse_fraction(fraction)? as i128
            }
            None => parse_int_field(number)? as i128 * per_unit,
        };

        saw_field = true;
        rest = after_unit;
    }

    if saw_field {
        Some(total)
    } else {
        None
    }
}

fn parse_int_field(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Up to nine fractional digits, right-padded to nanoseconds.
fn parse_fraction(digits: &str) -> Option<u32> {
    if digits.is_empty() || digits.len() > 9 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let padded = format!("{digits:0<9}");
    padded.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nanos(text: &str) -> i128 {
        total_nanos(&parse(text).unwrap())
    }

    #[test]
    fn test_parse_equivalence_across_grammars() {
        assert_eq!(nanos("6d2h11m23s548ms"), nanos("6.02:11:23.548"));
        assert_eq!(
            to_dotted_string(&parse("6d2h11m23s548ms").unwrap()),
            "6.02:11:23.548"
        );
        assert_eq!(
            to_dotted_string(&parse("06.23:11:23.5481121").unwrap()),
            "6.23:11:23.5481121"
        );
    }

    #[test]
    fn test_parse_full_unit_grammar() {
        let d = parse("6d2h11m23s548ms112us900ns").unwrap();
        assert_eq!(
            total_nanos(&d),
            6 * NANOS_PER_DAY
                + 2 * NANOS_PER_HOUR
                + 11 * NANOS_PER_MIN
                + 23 * NANOS_PER_SEC
                + 548_000_000
                + 112_000
                + 900
        );
        assert_eq!(to_dotted_string(&d), "6.02:11:23.5481129");
    }

    #[test]
    fn test_parse_units_any_subset_and_order() {
        assert_eq!(nanos("90m"), 90 * NANOS_PER_MIN);
        assert_eq!(nanos("23s6d"), 6 * NANOS_PER_DAY + 23 * NANOS_PER_SEC);
        assert_eq!(nanos("500ms"), 500_000_000);
        assert_eq!(nanos("1h 30m"), NANOS_PER_HOUR + 30 * NANOS_PER_MIN);
    }

    #[test]
    fn test_parse_bare_seconds() {
        assert_eq!(nanos("90"), 90 * NANOS_PER_SEC);
        assert_eq!(nanos("23.548"), 23 * NANOS_PER_SEC + 548_000_000);
        assert_eq!(to_dotted_string(&parse("90").unwrap()), "00:01:30");
    }

    #[test]
    fn test_parse_compact_form_round_trips() {
        let d = parse("6d2h11m23s548ms").unwrap();
        let compact = to_unit_string(&d);
        assert_eq!(compact, "6d 2h 11m 23.548s");
        assert_eq!(parse(&compact).unwrap(), d);
    }

    #[test]
    fn test_unit_string_omits_leading_zero_units() {
        assert_eq!(to_unit_string(&parse("02:11:23").unwrap()), "2h 11m 23s");
        assert_eq!(to_unit_string(&parse("00:00:05").unwrap()), "5s");
        assert_eq!(to_unit_string(&parse("00:03:00").unwrap()), "3m 0s");
        assert_eq!(to_unit_string(&TimeDelta::zero()), "0s");
    }

    #[test]
    fn test_negative_durations() {
        let d = parse("-1.01:02:03").unwrap();
        assert!(d < TimeDelta::zero());
        assert_eq!(to_dotted_string(&d), "-1.01:02:03");
        assert_eq!(to_unit_string(&d), "-1d 1h 2m 3s");
        assert_eq!(parse("-90"), Some(TimeDelta::seconds(-90)));
    }

    #[test]
    fn test_dotted_requires_valid_clock_fields() {
        assert_eq!(parse("25:00:00"), None);
        assert_eq!(parse("00:61:00"), None);
        assert_eq!(parse("00:00:61"), None);
        assert_eq!(parse("1:2"), None);
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("abc"), None);
        assert_eq!(parse("5x"), None);
        assert_eq!(parse("1.5d"), None); // fraction only on seconds
        assert_eq!(parse("12:"), None);
    }

    #[test]
    fn test_fraction_trimming_is_shortest_exact() {
        assert_eq!(to_dotted_string(&parse("0.5s").unwrap()), "00:00:00.5");
        assert_eq!(
            to_dotted_string(&parse("00:00:00.500").unwrap()),
            "00:00:00.5"
        );
    }
}
