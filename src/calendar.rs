//! Calendar Month View
//!
//! Sunday-first month grid plus event lookups.

use chrono::{Datelike, Days, Local, Months, NaiveDate, NaiveTime, TimeDelta};

use crate::models::{CalendarEvent, EventRequest, Priority, RepeatType, Task};

/// How many events the upcoming list shows
pub const UPCOMING_LIMIT: usize = 5;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The displayed month, anchored at its first day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthView {
    first: NaiveDate,
}

impl MonthView {
    pub fn containing(day: NaiveDate) -> Self {
        Self { first: day.with_day(1).unwrap_or(day) }
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first - Days::new(1)
    }

    pub fn previous(&self) -> Self {
        Self { first: self.first - Months::new(1) }
    }

    pub fn next(&self) -> Self {
        Self { first: self.first + Months::new(1) }
    }

    /// e.g. "March 2025"
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day.year() == self.first.year() && day.month() == self.first.month()
    }

    /// Every day from the Sunday on/before the 1st to the Saturday
    /// on/after the last day; always whole weeks.
    pub fn grid(&self) -> Vec<NaiveDate> {
        let lead = self.first.weekday().num_days_from_sunday() as u64;
        let last = self.last_day();
        let trail = 6 - last.weekday().num_days_from_sunday() as u64;
        let start = self.first - Days::new(lead);
        let end = last + Days::new(trail);
        start.iter_days().take_while(|d| *d <= end).collect()
    }
}

/// Events shown on a day: starting that day, or spanning it
pub fn events_on(events: &[CalendarEvent], day: NaiveDate) -> Vec<CalendarEvent> {
    events
        .iter()
        .filter(|e| {
            let start = e.start_date.date();
            let end = e.end_date.date();
            day == start || (start <= day && day <= end)
        })
        .cloned()
        .collect()
}

/// Next events starting today or later, earliest first
pub fn upcoming(events: &[CalendarEvent], today: NaiveDate) -> Vec<CalendarEvent> {
    let mut future: Vec<CalendarEvent> = events.iter().filter(|e| e.start_date.date() >= today).cloned().collect();
    future.sort_by_key(|e| e.start_date);
    future.truncate(UPCOMING_LIMIT);
    future
}

/// Tasks whose deadline falls on a day
pub fn tasks_due_on(tasks: &[Task], day: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| t.deadline.map(|d| d.date()) == Some(day))
        .cloned()
        .collect()
}

pub const DEFAULT_EVENT_CATEGORY: &str = "Company";
pub const FALLBACK_EVENT_CATEGORY: &str = "Uncategorized";

/// Event modal fields; events last one hour from their start
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub category: String,
    pub priority: Priority,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub description: String,
    pub repeat: RepeatType,
}

impl EventDraft {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            title: String::new(),
            category: DEFAULT_EVENT_CATEGORY.to_string(),
            priority: Priority::Medium,
            date,
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            description: String::new(),
            repeat: RepeatType::Never,
        }
    }

    pub fn from_event(event: &CalendarEvent) -> Self {
        Self {
            title: event.title.clone(),
            category: event.category.clone(),
            priority: event.priority,
            date: event.start_date.date(),
            time: event.start_date.time(),
            description: event.description.clone().unwrap_or_default(),
            repeat: event.repeat_type,
        }
    }

    /// Request body, or None without a title
    pub fn request(&self) -> Option<EventRequest> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        let start = self.date.and_time(self.time);
        let category = match self.category.trim() {
            "" => FALLBACK_EVENT_CATEGORY.to_string(),
            c => c.to_string(),
        };
        Some(EventRequest {
            title: title.to_string(),
            description: self.description.clone(),
            start_date: start,
            end_date: start + TimeDelta::hours(1),
            category,
            priority: self.priority,
            repeat_type: self.repeat,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, start: NaiveDate, end: NaiveDate) -> CalendarEvent {
        CalendarEvent {
            id: id.into(),
            title: id.into(),
            description: None,
            start_date: start.and_hms_opt(9, 0, 0).unwrap(),
            end_date: end.and_hms_opt(18, 0, 0).unwrap(),
            category: "Meeting".into(),
            priority: Priority::Medium,
            repeat_type: RepeatType::Never,
            creator_id: None,
            creator_name: None,
        }
    }

    #[test]
    fn test_grid_spans_whole_weeks() {
        // March 2025 starts on a Saturday and ends on a Monday
        let view = MonthView::containing(date(2025, 3, 17));
        let grid = view.grid();
        assert_eq!(grid.first(), Some(&date(2025, 2, 23)));
        assert_eq!(grid.last(), Some(&date(2025, 4, 5)));
        assert_eq!(grid.len() % 7, 0);
        assert_eq!(view.title(), "March 2025");
        assert!(!view.contains(date(2025, 2, 28)));
    }

    #[test]
    fn test_month_navigation_across_years() {
        let view = MonthView::containing(date(2025, 1, 31));
        assert_eq!(view.previous(), MonthView::containing(date(2024, 12, 1)));
        assert_eq!(view.next(), MonthView::containing(date(2025, 2, 1)));
        assert_eq!(view.next().last_day(), date(2025, 2, 28));
    }

    #[test]
    fn test_events_on_spanning_days() {
        let events = vec![
            event("single", date(2025, 3, 3), date(2025, 3, 3)),
            event("trip", date(2025, 3, 4), date(2025, 3, 6)),
        ];
        assert_eq!(events_on(&events, date(2025, 3, 3)).len(), 1);
        let mid = events_on(&events, date(2025, 3, 5));
        assert_eq!(mid.len(), 1);
        assert_eq!(mid[0].id, "trip");
        // End day counts by calendar date even though it ends at 18:00
        assert_eq!(events_on(&events, date(2025, 3, 6)).len(), 1);
        assert!(events_on(&events, date(2025, 3, 7)).is_empty());
    }

    #[test]
    fn test_upcoming_limits_and_sorts() {
        let today = date(2025, 3, 10);
        let mut events = vec![event("past", date(2025, 3, 9), date(2025, 3, 9))];
        for day in (11..=17).rev() {
            events.push(event(&format!("e{}", day), date(2025, 3, day), date(2025, 3, day)));
        }
        events.push(event("today", today, today));

        let next = upcoming(&events, today);
        let ids: Vec<&str> = next.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["today", "e11", "e12", "e13", "e14"]);
    }

    #[test]
    fn test_event_draft_defaults_to_one_hour() {
        let mut draft = EventDraft::new(date(2025, 5, 2));
        assert!(draft.request().is_none());

        draft.title = " Kickoff ".into();
        draft.category = "".into();
        draft.time = NaiveTime::from_hms_opt(23, 30, 0).unwrap();
        let request = draft.request().unwrap();
        assert_eq!(request.title, "Kickoff");
        assert_eq!(request.category, FALLBACK_EVENT_CATEGORY);
        assert_eq!(request.end_date, date(2025, 5, 3).and_hms_opt(0, 30, 0).unwrap());
        assert_eq!(request.repeat_type, RepeatType::Never);
    }

    #[test]
    fn test_event_draft_from_event() {
        let original = event("demo", date(2025, 5, 9), date(2025, 5, 9));
        let draft = EventDraft::from_event(&original);
        assert_eq!(draft.time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(draft.request().unwrap().start_date, original.start_date);
    }
}
