// crates/engine/src/extract.rs
//! Date header extraction
//!
//! Extraction runs in three stages, each one only when the previous found nothing:
//!
//! - **Header block**: the content is parsed as an RFC 5322 header block and the
//!   first `Date` value is read as an RFC 2822 date. A trailing zone name that
//!   has no known offset is dropped and the date is kept as wall-clock time.
//! - **Manual formats**: the first `Date:` line within [`HEADER_SCAN_LINES`] lines
//!   is matched against [`FORMATS`] in order.
//! - **Cleaned formats**: trailing zone decorations are removed with [`clean_date`]
//!   and the result is matched against [`CLEANED_FORMATS`].
//!
//! Nothing in here returns an error. A date that cannot be read is `None`.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Weekday};
use log::{debug, trace};
use mailparse::MailHeaderMap;
use std::fmt;

/// Maximum number of lines inspected by the manual `Date:` scan.
pub const HEADER_SCAN_LINES: usize = 50;

/// Zone names removed by [`clean_date`]. Matching is case-sensitive.
pub const CLEANUP_ZONES: &[&str] = &["GMT", "UTC", "CET", "EST", "PST", "MST", "CST"];

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A date read from a message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedTimestamp {
    /// Date carrying a numeric UTC offset.
    Zoned(DateTime<FixedOffset>),
    /// Date without a usable offset. Interpretation is left to the caller.
    Naive(NaiveDateTime),
}

impl ParsedTimestamp {
    /// Date and time fields as written in the header.
    #[must_use]
    pub fn wall_clock(&self) -> NaiveDateTime {
        match self {
            Self::Zoned(dt) => dt.naive_local(),
            Self::Naive(naive) => *naive,
        }
    }

    #[must_use]
    pub fn offset(&self) -> Option<FixedOffset> {
        match self {
            Self::Zoned(dt) => Some(*dt.offset()),
            Self::Naive(_) => None,
        }
    }

    #[must_use]
    pub const fn is_naive(&self) -> bool {
        matches!(self, Self::Naive(_))
    }
}

impl fmt::Display for ParsedTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wall_clock().format(DISPLAY_FORMAT))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayName {
    Absent,
    /// `Tue, ...`
    WithComma,
    /// `Tue ...`
    Bare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Absent,
    /// Numeric offset parsed by `%z` at the end of `body`.
    Offset,
    /// Alphabetic zone name after the time. The name is discarded.
    TrailingName,
    /// Alphabetic zone name between the time and the year. The name is discarded.
    NameBeforeYear,
}

/// One manual date layout: an optional leading day name, a chrono format for the
/// rest, and where a zone may appear.
#[derive(Debug, Clone, Copy)]
pub struct DateFormat {
    day_name: DayName,
    body: &'static str,
    zone: Zone,
    example: &'static str,
}

impl DateFormat {
    /// Example input matched by this format.
    #[must_use]
    pub const fn example(&self) -> &'static str {
        self.example
    }

    /// Match `input` (single-spaced) against this format.
    #[must_use]
    pub fn parse(&self, input: &str) -> Option<ParsedTimestamp> {
        let rest = self.day_name.strip(input)?;
        match self.zone {
            Zone::Offset => DateTime::parse_from_str(rest, self.body)
                .ok()
                .map(ParsedTimestamp::Zoned),
            Zone::Absent => parse_naive(rest, self.body),
            Zone::TrailingName => {
                let (body, name) = rest.rsplit_once(' ')?;
                if !is_zone_name(name) {
                    return None;
                }
                parse_naive(body, self.body)
            }
            Zone::NameBeforeYear => {
                let (head, year) = rest.rsplit_once(' ')?;
                let (time, name) = head.rsplit_once(' ')?;
                if !is_zone_name(name) {
                    return None;
                }
                parse_naive(&format!("{time} {year}"), self.body)
            }
        }
    }
}

impl DayName {
    fn strip(self, input: &str) -> Option<&str> {
        let token_name = |token: &str| token.parse::<Weekday>().is_ok();
        match self {
            Self::Absent => Some(input),
            Self::WithComma => {
                let (token, rest) = input.split_once(' ')?;
                token_name(token.strip_suffix(',')?).then_some(rest)
            }
            Self::Bare => {
                let (token, rest) = input.split_once(' ')?;
                token_name(token).then_some(rest)
            }
        }
    }
}

const fn date_format(
    day_name: DayName,
    body: &'static str,
    zone: Zone,
    example: &'static str,
) -> DateFormat {
    DateFormat {
        day_name,
        body,
        zone,
        example,
    }
}

/// Manual formats, tried strictly in this order.
pub const FORMATS: [DateFormat; 8] = [
    date_format(
        DayName::WithComma,
        "%d %b %Y %H:%M:%S %z",
        Zone::Offset,
        "Tue, 5 Mar 2024 16:01:44 +0100",
    ),
    date_format(
        DayName::WithComma,
        "%d %b %Y %H:%M:%S",
        Zone::TrailingName,
        "Tue, 5 Mar 2024 16:01:44 CET",
    ),
    date_format(
        DayName::Absent,
        "%d %b %Y %H:%M:%S %z",
        Zone::Offset,
        "5 Mar 2024 16:01:44 +0100",
    ),
    date_format(
        DayName::WithComma,
        "%d %b %Y %H:%M:%S",
        Zone::Absent,
        "Tue, 5 Mar 2024 16:01:44",
    ),
    date_format(
        DayName::Absent,
        "%d %b %Y %H:%M:%S",
        Zone::Absent,
        "5 Mar 2024 16:01:44",
    ),
    date_format(
        DayName::Absent,
        "%Y-%m-%d %H:%M:%S",
        Zone::Absent,
        "2024-03-05 16:01:44",
    ),
    date_format(
        DayName::Bare,
        "%b %d %H:%M:%S %Y",
        Zone::Absent,
        "Tue Mar 5 16:01:44 2024",
    ),
    date_format(
        DayName::Bare,
        "%b %d %H:%M:%S %Y",
        Zone::NameBeforeYear,
        "Tue Mar 5 16:01:44 CET 2024",
    ),
];

/// Formats retried after [`clean_date`].
pub const CLEANED_FORMATS: [DateFormat; 3] = [FORMATS[3], FORMATS[4], FORMATS[6]];

/// Extract the message date from raw file content.
#[must_use]
pub fn extract(content: &str) -> Option<ParsedTimestamp> {
    if let Some(ts) = parse_header_block(content) {
        debug!("Date header parsed as RFC 2822: {ts}");
        return Some(ts);
    }
    let raw = scan_date_line(content)?;
    parse_date(raw)
}

/// Parse a raw `Date` value with the manual formats, then the cleaned formats.
#[must_use]
pub fn parse_date(raw: &str) -> Option<ParsedTimestamp> {
    let input = collapse_whitespace(raw);

    if let Some(ts) = first_match(&FORMATS, &input) {
        return Some(ts);
    }

    let cleaned = clean_date(&input);
    trace!("Date '{input}' cleaned to '{cleaned}'");
    let ts = first_match(&CLEANED_FORMATS, &cleaned);
    if ts.is_none() {
        debug!("No date format matches '{raw}'");
    }
    ts
}

/// Strip trailing zone decorations: a parenthesized comment, a signed
/// four-digit offset and a name from [`CLEANUP_ZONES`].
///
/// The strip sequence repeats until nothing changes, so the result is a fixed
/// point and cleaning twice equals cleaning once.
#[must_use]
pub fn clean_date(raw: &str) -> String {
    let mut current = raw.trim();
    loop {
        let next = strip_zone_name(strip_numeric_offset(strip_paren_comment(current)));
        if next.len() == current.len() {
            return current.to_string();
        }
        current = next;
    }
}

fn first_match(formats: &[DateFormat], input: &str) -> Option<ParsedTimestamp> {
    formats.iter().enumerate().find_map(|(index, fmt)| {
        let ts = fmt.parse(input)?;
        debug!("Date '{input}' matched format {} ({})", index + 1, fmt.example);
        Some(ts)
    })
}

fn parse_header_block(content: &str) -> Option<ParsedTimestamp> {
    let (headers, _) = mailparse::parse_headers(content.as_bytes()).ok()?;
    let value = headers.get_first_value("Date")?;
    let value = value.trim();
    match DateTime::parse_from_rfc2822(value) {
        Ok(dt) => Some(ParsedTimestamp::Zoned(dt)),
        Err(e) => {
            debug!("Date header '{value}' is not RFC 2822: {e}");
            parse_rfc2822_unknown_zone(value)
        }
    }
}

/// Read an RFC 2822 date whose zone is a name chrono does not know, such as
/// `CEST` or `JST`. The zone carries no usable offset, so the result is naive.
fn parse_rfc2822_unknown_zone(value: &str) -> Option<ParsedTimestamp> {
    let (rest, zone) = value.rsplit_once(char::is_whitespace)?;
    if !is_zone_name(zone) {
        return None;
    }
    let dt = DateTime::parse_from_rfc2822(&format!("{} -0000", rest.trim_end())).ok()?;
    debug!("Date header '{value}' has unknown zone '{zone}', using wall clock");
    Some(ParsedTimestamp::Naive(dt.naive_local()))
}

/// Find the first `Date:` line before the end of the header block.
fn scan_date_line(content: &str) -> Option<&str> {
    for line in content.lines().take(HEADER_SCAN_LINES) {
        if let Some(prefix) = line.get(..5)
            && prefix.eq_ignore_ascii_case("date:")
        {
            return Some(line[5..].trim());
        }
        if line.trim().is_empty() {
            return None;
        }
    }
    None
}

fn parse_naive(input: &str, fmt: &str) -> Option<ParsedTimestamp> {
    NaiveDateTime::parse_from_str(input, fmt)
        .ok()
        .map(ParsedTimestamp::Naive)
}

fn is_zone_name(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_alphabetic())
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_paren_comment(s: &str) -> &str {
    let s = s.trim_end();
    let Some(body) = s.strip_suffix(')') else {
        return s;
    };
    // The comment may not contain ')' but may contain '('.
    let start = body.rfind(')').map_or(0, |i| i + 1);
    match body[start..].find('(') {
        Some(open) if start + open + 1 < body.len() => body[..start + open].trim_end(),
        _ => s,
    }
}

fn strip_numeric_offset(s: &str) -> &str {
    let s = s.trim_end();
    let bytes = s.as_bytes();
    if bytes.len() < 5 {
        return s;
    }
    let split = bytes.len() - 5;
    let (sign, digits) = (bytes[split], &bytes[split + 1..]);
    if matches!(sign, b'+' | b'-') && digits.iter().all(u8::is_ascii_digit) {
        s[..split].trim_end()
    } else {
        s
    }
}

fn strip_zone_name(s: &str) -> &str {
    let s = s.trim_end();
    CLEANUP_ZONES
        .iter()
        .find_map(|zone| s.strip_suffix(zone))
        .map_or(s, str::trim_end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn zoned(offset_secs: i32, wall: NaiveDateTime) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_secs)
            .unwrap()
            .from_local_datetime(&wall)
            .unwrap()
    }

    #[test]
    fn test_header_with_numeric_offset() {
        let content = "From: a@example.com\nDate: Tue, 5 Mar 2024 16:01:44 +0100\nSubject: hi\n\nbody\n";
        let ts = extract(content).unwrap();

        assert_eq!(
            ts,
            ParsedTimestamp::Zoned(zoned(3600, naive(2024, 3, 5, 16, 1, 44)))
        );
        assert_eq!(ts.to_string(), "2024-03-05 16:01:44");
    }

    #[test]
    fn test_named_zone_is_stripped_to_naive() {
        let content = "Date: 5 Mar 2024 16:01:44 CET\nSubject: hi\n\nbody\n";
        let ts = extract(content).unwrap();

        assert_eq!(ts, ParsedTimestamp::Naive(naive(2024, 3, 5, 16, 1, 44)));
        assert!(ts.is_naive());
        assert_eq!(ts.offset(), None);
    }

    #[test]
    fn test_unknown_zone_name_reads_wall_clock() {
        for zone in ["CEST", "JST", "BST", "MSK"] {
            let content = format!("Date: 5 Mar 2024 16:01:44 {zone}\nSubject: hi\n\nbody\n");
            assert_eq!(
                extract(&content),
                Some(ParsedTimestamp::Naive(naive(2024, 3, 5, 16, 1, 44))),
                "zone {zone}"
            );
        }
    }

    #[test]
    fn test_unknown_zone_with_day_name() {
        let ts = extract("Date: Tue, 5 Mar 2024 16:01:44 CEST\n\n").unwrap();
        assert_eq!(ts, ParsedTimestamp::Naive(naive(2024, 3, 5, 16, 1, 44)));
    }

    #[test]
    fn test_header_key_is_case_insensitive() {
        let ts = extract("DATE: Tue, 5 Mar 2024 16:01:44 -0500\n\n").unwrap();
        assert_eq!(ts.offset(), FixedOffset::west_opt(5 * 3600));
        assert_eq!(ts.wall_clock(), naive(2024, 3, 5, 16, 1, 44));
    }

    #[test]
    fn test_empty_content_has_no_date() {
        assert_eq!(extract(""), None);
    }

    #[test]
    fn test_blank_line_ends_header_scan() {
        let content = "From: a@example.com\nSubject: hi\n\nDate: Tue, 5 Mar 2024 16:01:44 +0100\n";
        assert_eq!(extract(content), None);
    }

    #[test]
    fn test_date_beyond_scan_limit_is_ignored() {
        let mut content: String = (0..HEADER_SCAN_LINES)
            .map(|i| format!("X-Filler-{i}: value\n"))
            .collect();
        content.push_str("Date: not a date but still a header\n");
        // Header parse sees the bogus value and fails; the manual scan stops
        // before reaching the line.
        assert_eq!(extract(&content), None);
    }

    #[test]
    fn test_manual_scan_finds_date_within_limit() {
        let mut content: String = (0..HEADER_SCAN_LINES - 1)
            .map(|i| format!("X-Filler-{i}: value\n"))
            .collect();
        content.push_str("Date: 2024-03-05 16:01:44\n");
        assert_eq!(
            extract(&content),
            Some(ParsedTimestamp::Naive(naive(2024, 3, 5, 16, 1, 44)))
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "Subject: hi\r\nDate: Tue Mar 5 16:01:44 2024\r\n\r\nbody\r\n";
        assert_eq!(
            extract(content),
            Some(ParsedTimestamp::Naive(naive(2024, 3, 5, 16, 1, 44)))
        );
    }

    #[test]
    fn test_each_format_matches_its_example() {
        for (index, fmt) in FORMATS.iter().enumerate() {
            let matched = FORMATS
                .iter()
                .position(|f| f.parse(fmt.example()).is_some());
            assert_eq!(matched, Some(index), "example {}", fmt.example());
            assert_eq!(
                parse_date(fmt.example()).map(|ts| ts.wall_clock()),
                Some(naive(2024, 3, 5, 16, 1, 44))
            );
        }
    }

    #[test]
    fn test_offset_formats_produce_zoned() {
        let with_day = parse_date("Tue, 5 Mar 2024 16:01:44 +0100").unwrap();
        let without_day = parse_date("5 Mar 2024 16:01:44 +0100").unwrap();
        assert_eq!(with_day, without_day);
        assert_eq!(with_day.offset(), FixedOffset::east_opt(3600));
    }

    #[test]
    fn test_day_name_is_not_checked_against_date() {
        // 2024-03-05 is a Tuesday.
        let ts = parse_date("Fri, 5 Mar 2024 16:01:44 +0100").unwrap();
        assert_eq!(ts.wall_clock(), naive(2024, 3, 5, 16, 1, 44));
    }

    #[test]
    fn test_ctime_with_padded_day() {
        let ts = parse_date("Tue Mar  5 16:01:44 2024").unwrap();
        assert_eq!(ts, ParsedTimestamp::Naive(naive(2024, 3, 5, 16, 1, 44)));
    }

    #[test]
    fn test_ctime_with_zone_name() {
        let ts = parse_date("Tue Mar 5 16:01:44 PST 2024").unwrap();
        assert_eq!(ts, ParsedTimestamp::Naive(naive(2024, 3, 5, 16, 1, 44)));
    }

    #[test]
    fn test_parenthesized_comment_is_cleaned() {
        let ts = parse_date("5 Mar 2024 16:01:44 (CET)").unwrap();
        assert_eq!(ts, ParsedTimestamp::Naive(naive(2024, 3, 5, 16, 1, 44)));
    }

    #[test]
    fn test_unparseable_dates() {
        for raw in [
            "",
            "yesterday",
            "Tue, 5 Foo 2024 16:01:44 +0100",
            "5 Mar 2024",
            "2024-03-05T16:01:44",
            "Tue, 32 Mar 2024 16:01:44",
            "Blah, 5 Mar 2024 16:01:44",
        ] {
            assert_eq!(parse_date(raw), None, "{raw}");
        }
    }

    #[test]
    fn test_clean_date_strips_decorations() {
        assert_eq!(
            clean_date("Tue, 5 Mar 2024 16:01:44 +0100 (CET)"),
            "Tue, 5 Mar 2024 16:01:44"
        );
        assert_eq!(clean_date("5 Mar 2024 16:01:44 -0500"), "5 Mar 2024 16:01:44");
        assert_eq!(clean_date("5 Mar 2024 16:01:44 GMT "), "5 Mar 2024 16:01:44");
        assert_eq!(clean_date("5 Mar 2024 16:01:44 MSK"), "5 Mar 2024 16:01:44 MSK");
        assert_eq!(clean_date("(only)"), "");
        assert_eq!(clean_date("keep ()"), "keep ()");
    }

    #[test]
    fn test_clean_date_reaches_fixed_point() {
        let raw = "5 Mar 2024 16:01:44 (CET) +0100";
        let once = clean_date(raw);
        assert_eq!(once, "5 Mar 2024 16:01:44");
        assert_eq!(clean_date(&once), once);
    }
}
