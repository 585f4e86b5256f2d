//! Line format of the data file.
//!
//! ```text
//! T | <done> | description
//! D | <done> | description | due [| <clock>]
//! E | <done> | description | from | to [| <clock>]
//! ```
//!
//! `<done>` and `<clock>` are `0` or `1`. Records written before the clock
//! flag existed omit it; they load with the flag off.
//!
//! Free-text fields escape `\` as `\\` and `|` as `\|`, so a pipe typed by
//! the user never reads back as a field separator.

use crate::error::CorruptRecord;
use crate::model::task::{Due, EventSpan, Task, TaskKind};
use crate::time::DateTimeResolver;

pub const DELIMITER: &str = " | ";

pub fn encode(task: &Task) -> String {
    let done = flag(task.done);
    let description = escape(&task.description);
    match &task.kind {
        TaskKind::Todo => ["T", done, description.as_str()].join(DELIMITER),
        TaskKind::Deadline(due) => [
            "D",
            done,
            description.as_str(),
            escape(&due.raw).as_str(),
            flag(due.has_clock_time),
        ]
        .join(DELIMITER),
        TaskKind::Event(span) => [
            "E",
            done,
            description.as_str(),
            escape(&span.from_raw).as_str(),
            escape(&span.to_raw).as_str(),
            flag(span.has_clock_time),
        ]
        .join(DELIMITER),
    }
}

/// Decodes one record. Raw temporal text is re-resolved against `resolver`;
/// the stored clock flag wins over whatever resolution reports.
pub fn decode(line: &str, resolver: &DateTimeResolver) -> Result<Task, CorruptRecord> {
    let fields = split_fields(line);
    let fields: Vec<&str> = fields.iter().map(|f| f.trim()).collect();
    if fields.len() < 3 {
        return Err(CorruptRecord::TooFewFields(fields.len()));
    }

    let done = parse_flag(fields[1])
        .ok_or_else(|| CorruptRecord::InvalidDoneFlag(fields[1].to_string()))?;
    let description = fields[2];
    if description.is_empty() {
        return Err(CorruptRecord::EmptyDescription);
    }

    let kind = match fields[0] {
        "T" => match fields.len() {
            3 => TaskKind::Todo,
            found => return Err(CorruptRecord::FieldCount { tag: 'T', found }),
        },
        "D" => {
            let has_clock_time = match fields.len() {
                4 => false,
                5 => parse_time_flag(fields[4])?,
                found => return Err(CorruptRecord::FieldCount { tag: 'D', found }),
            };
            let mut due = Due::resolve(fields[3], resolver);
            due.has_clock_time = has_clock_time;
            TaskKind::Deadline(due)
        }
        "E" => {
            let has_clock_time = match fields.len() {
                5 => false,
                6 => parse_time_flag(fields[5])?,
                found => return Err(CorruptRecord::FieldCount { tag: 'E', found }),
            };
            let mut span = EventSpan::resolve(fields[3], fields[4], resolver);
            span.has_clock_time = has_clock_time;
            TaskKind::Event(span)
        }
        other => return Err(CorruptRecord::UnknownTag(other.to_string())),
    };

    let mut task = Task::with_kind(description, kind);
    if done {
        task.mark_done();
    }
    Ok(task)
}

fn escape(field: &str) -> String {
    field.replace('\\', "\\\\").replace('|', "\\|")
}

/// Splits on unescaped delimiters and unescapes each field. A backslash
/// before anything other than `\` or `|` is kept as is.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut rest = line;

    loop {
        if let Some(after) = rest.strip_prefix(DELIMITER) {
            fields.push(std::mem::take(&mut current));
            rest = after;
            continue;
        }
        let mut chars = rest.chars();
        match chars.next() {
            None => break,
            Some('\\') => match chars.clone().next() {
                Some(c @ ('\\' | '|')) => {
                    current.push(c);
                    chars.next();
                }
                _ => current.push('\\'),
            },
            Some(c) => current.push(c),
        }
        rest = chars.as_str();
    }
    fields.push(current);
    fields
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

fn parse_flag(field: &str) -> Option<bool> {
    match field {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

fn parse_time_flag(field: &str) -> Result<bool, CorruptRecord> {
    parse_flag(field).ok_or_else(|| CorruptRecord::InvalidTimeFlag(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn resolver() -> DateTimeResolver {
        DateTimeResolver::with_today(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
    }

    #[test]
    fn test_encode_shapes() {
        let r = resolver();
        let mut todo = Task::todo("read book");
        todo.mark_done();
        assert_eq!(encode(&todo), "T | 1 | read book");
        assert_eq!(
            encode(&Task::deadline("return book", "2019-12-02 1800", &r)),
            "D | 0 | return book | 2019-12-02 1800 | 1"
        );
        assert_eq!(
            encode(&Task::event("trip", "2019-12-02", "2019-12-05", &r)),
            "E | 0 | trip | 2019-12-02 | 2019-12-05 | 0"
        );
    }

    #[test]
    fn test_decode_keeps_raw_text_and_flags() {
        let r = resolver();
        let task = Task::event("standup", "0900", "2019-12-02 0930", &r);
        let decoded = decode(&encode(&task), &r).unwrap();
        assert_eq!(decoded, task);

        let mut deadline = Task::deadline("essay", "end of term", &r);
        deadline.mark_done();
        let decoded = decode(&encode(&deadline), &r).unwrap();
        assert_eq!(decoded.description, "essay");
        assert!(decoded.done);
        match decoded.kind {
            TaskKind::Deadline(due) => {
                assert_eq!(due.raw, "end of term");
                assert_eq!(due.resolved, None);
            }
            _ => panic!("expected deadline"),
        }
    }

    #[test]
    fn test_pipes_in_text_survive_a_round_trip() {
        let r = resolver();
        let todo = Task::todo("compare a | b");
        assert_eq!(encode(&todo), "T | 0 | compare a \\| b");
        assert_eq!(decode(&encode(&todo), &r), Ok(todo));

        let deadline = Task::deadline("x", "Fri | late", &r);
        assert_eq!(decode(&encode(&deadline), &r), Ok(deadline));

        let event = Task::event(r"dir C:\temp\|x", "|", "a\\ | b", &r);
        assert_eq!(decode(&encode(&event), &r), Ok(event));
    }

    #[test]
    fn test_stray_backslash_is_kept() {
        let r = resolver();
        let task = decode(r"T | 0 | path\to\file", &r).unwrap();
        assert_eq!(task.description, r"path\to\file");
    }

    #[test]
    fn test_legacy_records_have_no_clock_time() {
        let r = resolver();
        let task = decode("D | 0 | return book | 2019-12-02 1800", &r).unwrap();
        match &task.kind {
            TaskKind::Deadline(due) => {
                assert!(!due.has_clock_time);
                assert!(due.resolved.is_some());
            }
            _ => panic!("expected deadline"),
        }
        assert_eq!(task.to_string(), "[D][ ] return book (by: Dec 02 2019)");

        let task = decode("E | 1 | fair | 2019-12-02 | 2019-12-04", &r).unwrap();
        assert!(task.done);
        assert!(matches!(task.kind, TaskKind::Event(ref s) if !s.has_clock_time));
    }

    #[test]
    fn test_corrupt_records() {
        let r = resolver();
        assert_eq!(decode("T | 1", &r), Err(CorruptRecord::TooFewFields(2)));
        assert_eq!(
            decode("X | 0 | what", &r),
            Err(CorruptRecord::UnknownTag("X".to_string()))
        );
        assert_eq!(
            decode("T | yes | read", &r),
            Err(CorruptRecord::InvalidDoneFlag("yes".to_string()))
        );
        assert_eq!(
            decode("T | 0 | read | extra", &r),
            Err(CorruptRecord::FieldCount { tag: 'T', found: 4 })
        );
        assert_eq!(
            decode("D | 0 | essay", &r),
            Err(CorruptRecord::FieldCount { tag: 'D', found: 3 })
        );
        assert_eq!(
            decode("E | 0 | fair | 2019-12-02 | 2019-12-04 | 1 | 1", &r),
            Err(CorruptRecord::FieldCount { tag: 'E', found: 7 })
        );
        assert_eq!(
            decode("D | 0 | essay | Friday | maybe", &r),
            Err(CorruptRecord::InvalidTimeFlag("maybe".to_string()))
        );
        assert_eq!(decode("T | 0 |  ", &r), Err(CorruptRecord::EmptyDescription));
    }
}
