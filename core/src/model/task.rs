use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::range::infer_event_range;
use crate::time::{format_resolved, DateTimeResolver};

/// Due point of a deadline. `resolved` is `None` when `raw` matched no known
/// format; rendering then falls back to `raw`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Due {
    pub raw: String,
    pub resolved: Option<NaiveDateTime>,
    pub has_clock_time: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSpan {
    pub from_raw: String,
    pub to_raw: String,
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
    pub has_clock_time: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    Todo,
    Deadline(Due),
    Event(EventSpan),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub description: String,
    pub done: bool,
    pub kind: TaskKind,
}

impl Due {
    pub fn resolve(raw: &str, resolver: &DateTimeResolver) -> Self {
        let resolution = resolver.resolve(raw);
        Self {
            raw: raw.to_string(),
            resolved: resolution.date_time,
            has_clock_time: resolution.has_time,
        }
    }
}

impl EventSpan {
    pub fn resolve(from_raw: &str, to_raw: &str, resolver: &DateTimeResolver) -> Self {
        let from = resolver.resolve(from_raw);
        let to = resolver.resolve(to_raw);
        // Taken before inference rewrites the dates.
        let has_clock_time = from.has_time || to.has_time;
        let (from_dt, to_dt) = infer_event_range(from, to, resolver.today());

        Self {
            from_raw: from_raw.to_string(),
            to_raw: to_raw.to_string(),
            from: from_dt,
            to: to_dt,
            has_clock_time,
        }
    }

    /// True when both ends resolved and `date` lies between them, inclusive.
    pub fn covers(&self, date: NaiveDate) -> bool {
        match (self.from, self.to) {
            (Some(from), Some(to)) => from.date() <= date && date <= to.date(),
            _ => false,
        }
    }
}

impl Task {
    pub fn todo(description: impl Into<String>) -> Self {
        Self::with_kind(description, TaskKind::Todo)
    }

    pub fn deadline(description: impl Into<String>, by: &str, resolver: &DateTimeResolver) -> Self {
        Self::with_kind(description, TaskKind::Deadline(Due::resolve(by, resolver)))
    }

    pub fn event(
        description: impl Into<String>,
        from: &str,
        to: &str,
        resolver: &DateTimeResolver,
    ) -> Self {
        Self::with_kind(
            description,
            TaskKind::Event(EventSpan::resolve(from, to, resolver)),
        )
    }

    pub fn with_kind(description: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind,
        }
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_undone(&mut self) {
        self.done = false;
    }

    pub fn type_tag(&self) -> char {
        match self.kind {
            TaskKind::Todo => 'T',
            TaskKind::Deadline(_) => 'D',
            TaskKind::Event(_) => 'E',
        }
    }

    pub fn status_icon(&self) -> char {
        if self.done {
            'X'
        } else {
            ' '
        }
    }

    /// Whether this task falls on `date`: a deadline due that day, or an event
    /// spanning it. Todos and unresolved dates never match.
    pub fn is_scheduled_on(&self, date: NaiveDate) -> bool {
        match &self.kind {
            TaskKind::Todo => false,
            TaskKind::Deadline(due) => due.resolved.is_some_and(|dt| dt.date() == date),
            TaskKind::Event(span) => span.covers(date),
        }
    }

    /// Human rendering of the temporal part, without brackets.
    pub fn when(&self) -> Option<String> {
        match &self.kind {
            TaskKind::Todo => None,
            TaskKind::Deadline(due) => Some(format!(
                "by: {}",
                render_point(&due.raw, due.resolved, due.has_clock_time)
            )),
            TaskKind::Event(span) => Some(format!(
                "from: {} to: {}",
                render_point(&span.from_raw, span.from, span.has_clock_time),
                render_point(&span.to_raw, span.to, span.has_clock_time)
            )),
        }
    }
}

fn render_point(raw: &str, resolved: Option<NaiveDateTime>, has_clock_time: bool) -> String {
    match resolved {
        Some(dt) => format_resolved(dt, has_clock_time),
        None => raw.to_string(),
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}][{}] {}",
            self.type_tag(),
            self.status_icon(),
            self.description
        )?;
        if let Some(when) = self.when() {
            write!(f, " ({})", when)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> DateTimeResolver {
        DateTimeResolver::with_today(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
    }

    #[test]
    fn test_render_todo() {
        let mut task = Task::todo("read book");
        assert_eq!(task.to_string(), "[T][ ] read book");
        task.mark_done();
        assert_eq!(task.to_string(), "[T][X] read book");
    }

    #[test]
    fn test_render_deadline() {
        let r = resolver();
        assert_eq!(
            Task::deadline("return book", "2019-12-02", &r).to_string(),
            "[D][ ] return book (by: Dec 02 2019)"
        );
        assert_eq!(
            Task::deadline("return book", "2019-12-02 1800", &r).to_string(),
            "[D][ ] return book (by: 18:00 Dec 02 2019)"
        );
        assert_eq!(
            Task::deadline("return book", "next week", &r).to_string(),
            "[D][ ] return book (by: next week)"
        );
    }

    #[test]
    fn test_render_event() {
        let r = resolver();
        let task = Task::event("meeting", "1800", "2019-12-02 0600", &r);
        assert_eq!(
            task.to_string(),
            "[E][ ] meeting (from: 18:00 Dec 01 2019 to: 06:00 Dec 02 2019)"
        );

        let task = Task::event("trip", "2019-12-02", "2019-12-05", &r);
        assert_eq!(
            task.to_string(),
            "[E][ ] trip (from: Dec 02 2019 to: Dec 05 2019)"
        );

        let task = Task::event("party", "Friday night", "late", &r);
        assert_eq!(task.to_string(), "[E][ ] party (from: Friday night to: late)");
    }

    #[test]
    fn test_event_clock_flag_is_either_endpoint() {
        let r = resolver();
        let task = Task::event("conf", "2019-12-02", "2019-12-03 1700", &r);
        match task.kind {
            TaskKind::Event(span) => {
                assert!(span.has_clock_time);
                assert_eq!(
                    span.from,
                    NaiveDate::from_ymd_opt(2019, 12, 2).unwrap().and_hms_opt(0, 0, 0)
                );
            }
            _ => panic!("expected event"),
        }
    }

    #[test]
    fn test_mark_is_idempotent() {
        let mut task = Task::todo("x");
        task.mark_done();
        task.mark_done();
        assert!(task.done);
        task.mark_undone();
        task.mark_undone();
        assert!(!task.done);
    }

    #[test]
    fn test_is_scheduled_on() {
        let r = resolver();
        let day = NaiveDate::from_ymd_opt(2019, 12, 3).unwrap();
        assert!(Task::deadline("d", "2019-12-03 0900", &r).is_scheduled_on(day));
        assert!(!Task::deadline("d", "2019-12-04", &r).is_scheduled_on(day));
        assert!(!Task::deadline("d", "someday", &r).is_scheduled_on(day));
        assert!(Task::event("e", "2019-12-02", "2019-12-05", &r).is_scheduled_on(day));
        assert!(Task::event("e", "2019-12-03", "2019-12-03", &r).is_scheduled_on(day));
        assert!(!Task::event("e", "2019-12-04", "2019-12-05", &r).is_scheduled_on(day));
        assert!(!Task::event("e", "2019-12-02", "soon", &r).is_scheduled_on(day));
        assert!(!Task::todo("t").is_scheduled_on(day));
    }
}
