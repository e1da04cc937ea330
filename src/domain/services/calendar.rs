use crate::domain::models::calendar_event::CalendarEvent;
use chrono::{DateTime, Duration, Utc};
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger};
use rand::{distributions::Alphanumeric, Rng};
use std::fmt;

const PRODUCT_ID: &str = "-//Fanvite//Creator Events//EN";
const UID_DOMAIN: &str = "fanvite";

/// Basic UTC format used by DTSTART/DTEND/DTSTAMP and the Google/Yahoo links.
pub fn format_utc_basic(instant: &DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// CRLF and lone CR both become LF, so no bare CR survives into a content line.
fn normalize_newlines(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\r', "\n")
}

/// Drops control characters from values written without TEXT escaping (URIs, mail addresses).
fn strip_controls(value: &str) -> String {
    value.chars().filter(|c| !c.is_control()).collect()
}

/// Escapes TEXT values. Backslash goes first so the escapes added after it are not doubled.
pub fn escape_text(value: &str) -> String {
    normalize_newlines(value)
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

/// Inverse of [`escape_text`]. Unknown escapes are kept verbatim.
pub fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(';') => out.push(';'),
            Some(',') => out.push(','),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// A built VCALENDAR with a single VEVENT. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDocument {
    uid: String,
    ics: String,
}

impl CalendarDocument {
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Folded, CRLF-terminated iCalendar text.
    pub fn to_ics_string(&self) -> String {
        self.ics.clone()
    }
}

impl fmt::Display for CalendarDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ics)
    }
}

/// Builds a fresh document; UID and DTSTAMP differ on every call.
pub fn build_calendar_document(event: &CalendarEvent) -> CalendarDocument {
    let now = Utc::now();
    build_calendar_document_at(event, now, generate_uid(&now))
}

// SUMMARY, DESCRIPTION and LOCATION are TEXT values; icalendar applies the
// escaping table to them when rendering, so they are handed over unescaped.
pub fn build_calendar_document_at(event: &CalendarEvent, stamped_at: DateTime<Utc>, uid: String) -> CalendarDocument {
    let mut cal = Calendar::empty();
    cal.append_property(("VERSION", "2.0"));
    cal.append_property(("PRODID", PRODUCT_ID));
    cal.append_property(("CALSCALE", "GREGORIAN"));
    cal.append_property(("METHOD", "PUBLISH"));

    let title = normalize_newlines(&event.title);

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&uid);
    ics_event.add_property("DTSTAMP", format_utc_basic(&stamped_at));
    ics_event.add_property("DTSTART", format_utc_basic(&event.start_time));
    ics_event.add_property("DTEND", format_utc_basic(&event.effective_end()));
    ics_event.summary(&title);

    if let Some(description) = &event.description {
        ics_event.description(&normalize_newlines(description));
    }
    if let Some(location) = &event.location {
        ics_event.location(&normalize_newlines(location));
    }
    if let Some(url) = &event.url {
        ics_event.add_property("URL", strip_controls(url));
    }
    if let Some(organizer) = &event.organizer {
        let mut prop = Property::new("ORGANIZER", format!("mailto:{}", strip_controls(&organizer.email)));
        // parameter values cannot carry a DQUOTE
        let name = strip_controls(&escape_text(&organizer.name)).replace('"', "");
        prop.add_parameter("CN", &name);
        ics_event.append_property(prop);
    }

    let mut alarm = Alarm::display(
        &format!("Reminder: {}", title),
        Trigger::before_start(Duration::hours(1)),
    );
    // chrono renders the trigger as -PT3600S
    alarm.add_property("TRIGGER", "-PT1H");
    ics_event.alarm(alarm);

    let ics_event = ics_event.done();
    cal.push(ics_event);

    CalendarDocument { uid, ics: strip_alarm_bloat(&cal.to_string()) }
}

/// Removes the DTSTAMP and UID icalendar adds to every VALARM.
fn strip_alarm_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_valarm = false;

    for line in ics.lines() {
        if line == "BEGIN:VALARM" {
            in_valarm = true;
        } else if line == "END:VALARM" {
            in_valarm = false;
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

fn generate_uid(now: &DateTime<Utc>) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!("{}-{}@{}", now.timestamp_millis(), suffix, UID_DOMAIN)
}

/// Download name for the file-save boundary.
pub fn calendar_filename(event: &CalendarEvent) -> String {
    let stem = slug::slugify(&event.title);
    if stem.is_empty() {
        "event.ics".to_string()
    } else {
        format!("{}.ics", stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::calendar_event::Organizer;
    use chrono::TimeZone;
    use icalendar::parser::unfold;

    fn live_qa() -> CalendarEvent {
        CalendarEvent::new("Live Q&A", Utc.with_ymd_and_hms(2024, 3, 4, 18, 0, 0).unwrap())
    }

    fn content_lines(doc: &CalendarDocument) -> Vec<String> {
        unfold(&doc.to_ics_string())
            .split("\r\n")
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect()
    }

    fn vevent_count(ics: &str) -> (usize, usize) {
        let lines: Vec<&str> = ics.split("\r\n").collect();
        (
            lines.iter().filter(|l| **l == "BEGIN:VEVENT").count(),
            lines.iter().filter(|l| **l == "END:VEVENT").count(),
        )
    }

    #[test]
    fn document_is_wrapped_in_a_single_vevent() {
        let ics = build_calendar_document(&live_qa()).to_ics_string();
        assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Fanvite//Creator Events//EN\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert_eq!(vevent_count(&ics), (1, 1));
        assert!(ics.contains("\r\nMETHOD:PUBLISH\r\n"));
    }

    #[test]
    fn missing_end_defaults_to_one_hour() {
        let ics = build_calendar_document(&live_qa()).to_ics_string();
        assert!(ics.contains("DTSTART:20240304T180000Z"));
        assert!(ics.contains("DTEND:20240304T190000Z"));
    }

    #[test]
    fn optional_lines_are_omitted() {
        let lines = content_lines(&build_calendar_document(&live_qa()));
        for prefix in ["DESCRIPTION:Live", "LOCATION:", "URL:", "ORGANIZER"] {
            assert!(!lines.iter().any(|l| l.starts_with(prefix)), "unexpected {}", prefix);
        }
    }

    #[test]
    fn optional_lines_are_emitted_and_escaped() {
        let mut event = live_qa();
        event.description = Some("Bring questions; snacks, too\nSee you".to_string());
        event.location = Some("Studio 4, Berlin".to_string());
        event.url = Some("https://fanvite.example/e/42".to_string());
        event.organizer = Some(Organizer { name: "Doe, Jane".to_string(), email: "jane@example.com".to_string() });

        let lines = content_lines(&build_calendar_document(&event));
        assert!(lines.contains(&"DESCRIPTION:Bring questions\\; snacks\\, too\\nSee you".to_string()));
        assert!(lines.contains(&"LOCATION:Studio 4\\, Berlin".to_string()));
        assert!(lines.contains(&"URL:https://fanvite.example/e/42".to_string()));
        assert!(lines.contains(&"ORGANIZER;CN=\"Doe\\, Jane\":mailto:jane@example.com".to_string()));
    }

    #[test]
    fn carriage_returns_become_escaped_newlines() {
        let mut event = live_qa();
        event.description = Some("line1\r\nline2\rline3".to_string());
        let doc = build_calendar_document(&event);
        assert!(content_lines(&doc).contains(&"DESCRIPTION:line1\\nline2\\nline3".to_string()));
        assert!(!doc.to_ics_string().replace("\r\n", "").contains('\r'));
    }

    #[test]
    fn long_lines_are_folded() {
        let mut event = live_qa();
        event.description = Some("A long description that easily runs past the seventy-five octet limit of a content line".to_string());
        let ics = build_calendar_document(&event).to_ics_string();
        assert!(ics.split("\r\n").all(|l| l.len() <= 75));
        assert!(ics.contains("\r\n "));
        assert!(content_lines(&build_calendar_document(&event))
            .iter()
            .any(|l| l.ends_with("limit of a content line")));
    }

    #[test]
    fn hostile_url_and_email_cannot_open_a_second_event() {
        let mut event = live_qa();
        event.url = Some("https://a.example/\r\nEND:VEVENT\r\nBEGIN:VEVENT\r\nSUMMARY:spoof".to_string());
        event.organizer = Some(Organizer {
            name: "Eve\r\nBEGIN:VEVENT".to_string(),
            email: "a@b\r\nBEGIN:VEVENT".to_string(),
        });

        let doc = build_calendar_document(&event);
        assert_eq!(vevent_count(&doc.to_ics_string()), (1, 1));
        let lines = content_lines(&doc);
        assert!(lines.contains(&"URL:https://a.example/END:VEVENTBEGIN:VEVENTSUMMARY:spoof".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("ORGANIZER;") && l.ends_with(":mailto:a@bBEGIN:VEVENT")));
    }

    #[test]
    fn alarm_fires_one_hour_before() {
        let ics = build_calendar_document(&live_qa()).to_ics_string();
        let alarm = ics.split("BEGIN:VALARM").nth(1).unwrap().split("END:VALARM").next().unwrap();
        assert!(alarm.contains("TRIGGER:-PT1H"));
        assert!(alarm.contains("ACTION:DISPLAY"));
        assert!(alarm.contains("DESCRIPTION:Reminder: Live Q&A"));
        assert!(!alarm.contains("UID:"));
        assert!(!alarm.contains("DTSTAMP:"));
    }

    #[test]
    fn every_build_gets_a_new_uid() {
        let a = build_calendar_document(&live_qa());
        let b = build_calendar_document(&live_qa());
        assert_ne!(a.uid(), b.uid());
        assert!(a.uid().ends_with("@fanvite"));
        assert!(content_lines(&a).contains(&format!("UID:{}", a.uid())));
    }

    #[test]
    fn fixed_stamp_and_uid_are_reproducible() {
        let stamp = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let a = build_calendar_document_at(&live_qa(), stamp, "fixed@fanvite".to_string());
        let b = build_calendar_document_at(&live_qa(), stamp, "fixed@fanvite".to_string());
        assert_eq!(a, b);
        assert!(content_lines(&a).contains(&"DTSTAMP:20240301T093000Z".to_string()));
    }

    #[test]
    fn inverted_range_is_serialized_as_given() {
        let mut event = live_qa();
        event.end_time = Some(event.start_time - Duration::hours(2));
        let ics = build_calendar_document(&event).to_ics_string();
        assert!(ics.contains("DTEND:20240304T160000Z"));
    }

    #[test]
    fn escaping_round_trips() {
        let samples = [
            "plain",
            "a;b,c\\d\ne",
            "\\n is not a newline",
            "trailing backslash \\",
            ";;,,\\\\\n\n",
        ];
        for original in samples {
            let escaped = escape_text(original);
            assert!(!escaped.contains('\n'));
            assert_eq!(unescape_text(&escaped), original);
        }
    }

    #[test]
    fn escaping_folds_carriage_returns_into_newlines() {
        assert_eq!(escape_text("line1\r\nline2"), "line1\\nline2");
        assert_eq!(escape_text("a\rb"), "a\\nb");
    }

    #[test]
    fn escaped_text_has_no_bare_specials() {
        let escaped = escape_text("x;y,z\\w");
        let mut chars = escaped.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                assert!(matches!(chars.next(), Some('\\' | ';' | ',' | 'n')));
            } else {
                assert!(c != ';' && c != ',');
            }
        }
    }

    #[test]
    fn filename_comes_from_title() {
        assert_eq!(calendar_filename(&live_qa()), "live-q-a.ics");
        assert_eq!(calendar_filename(&CalendarEvent::new("", Utc::now())), "event.ics");
    }
}
