mod panel;
pub(crate) use self::panel::EventsPanel;
use crate::calendar::CalendarDate;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use time::{
    format_description::BorrowedFormatItem,
    macros::{format_description, time},
    Time,
};

static HM_FMT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]");

/// Lookup key for the events of a single calendar day.  Keys from different
/// calendar systems never coincide.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct DateKey(String);

impl DateKey {
    pub(crate) fn of<D: CalendarDate>(date: D) -> DateKey {
        DateKey(format!(
            "{}:{}-{}-{}",
            D::SYSTEM,
            date.year(),
            date.month(),
            date.day()
        ))
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct EventId(u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Time of day of an event, to the minute
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct EventTime(Time);

impl EventTime {
    pub(crate) const NOON: EventTime = EventTime(time!(12:00));

    /// Parse an "HH:MM" time.  Blank input yields [`EventTime::NOON`].
    pub(crate) fn parse(s: &str) -> Result<EventTime, EventTimeError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(EventTime::NOON);
        }
        Time::parse(s, &HM_FMT)
            .map(EventTime)
            .map_err(|_| EventTimeError(s.to_owned()))
    }
}

impl Default for EventTime {
    fn default() -> EventTime {
        EventTime::NOON
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid event time {0:?}; expected HH:MM")]
pub(crate) struct EventTimeError(String);

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Event {
    id: EventId,
    title: String,
    time: EventTime,
}

impl Event {
    pub(crate) fn id(&self) -> EventId {
        self.id
    }

    pub(crate) fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn time(&self) -> EventTime {
        self.time
    }
}

/// The events of every day, keyed by [`DateKey`].  Updates never modify a
/// store in place; they return a new store.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct EventStore {
    // Invariant: No list is empty
    events: BTreeMap<DateKey, Vec<Event>>,
    next_id: u64,
}

impl EventStore {
    pub(crate) fn new() -> EventStore {
        EventStore::default()
    }

    /// Returns a store with an event titled `title` appended to the events
    /// for `key`, along with the new event's ID.  If `title` is blank, the
    /// store is returned unchanged and no ID is returned.  A `time` of
    /// `None` means noon.
    #[must_use]
    pub(crate) fn add(
        &self,
        key: &DateKey,
        title: &str,
        time: Option<EventTime>,
    ) -> (EventStore, Option<EventId>) {
        let title = title.trim();
        if title.is_empty() {
            return (self.clone(), None);
        }
        let id = EventId(self.next_id);
        let mut store = self.clone();
        store.next_id += 1;
        store.events.entry(key.clone()).or_default().push(Event {
            id,
            title: title.to_owned(),
            time: time.unwrap_or_default(),
        });
        (store, Some(id))
    }

    /// Returns a store without the event with ID `id` on `key`.  Unknown
    /// keys and IDs are ignored.
    #[must_use]
    pub(crate) fn remove(&self, key: &DateKey, id: EventId) -> EventStore {
        let mut store = self.clone();
        if let Some(events) = store.events.get_mut(key) {
            events.retain(|ev| ev.id != id);
            if events.is_empty() {
                store.events.remove(key);
            }
        }
        store
    }

    /// Returns the events for `key` in the order they were added
    pub(crate) fn events_for(&self, key: &DateKey) -> &[Event] {
        self.events
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn has_events(&self, key: &DateKey) -> bool {
        self.events.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{hebrew::HebrewMonth, HebrewDate};
    use std::collections::HashSet;
    use time::macros::date;

    fn sample_key() -> DateKey {
        DateKey::of(date!(2024 - 09 - 15))
    }

    #[test]
    fn test_key_format() {
        assert_eq!(
            DateKey::of(date!(2024 - 09 - 15)).to_string(),
            "greg:2024-September-15"
        );
        let hd = HebrewDate::new(5785, HebrewMonth::Shvat, 3).unwrap();
        assert_eq!(DateKey::of(hd).to_string(), "heb:5785-Sh'vat-3");
    }

    #[test]
    fn test_key_stable() {
        let d = date!(2024 - 09 - 15);
        assert_eq!(DateKey::of(d), DateKey::of(d));
        let rebuilt = date!(2024 - 09 - 01).replace_day(15).unwrap();
        assert_eq!(DateKey::of(d), DateKey::of(rebuilt));
    }

    #[test]
    fn test_key_injective_gregorian() {
        let mut seen = HashSet::new();
        let mut d = date!(2023 - 01 - 01);
        while d < date!(2025 - 01 - 01) {
            assert!(seen.insert(DateKey::of(d)), "duplicate key for {d}");
            d = d.next_day().unwrap();
        }
    }

    #[test]
    fn test_key_injective_hebrew() {
        let mut seen = HashSet::new();
        let mut d = date!(2023 - 01 - 01);
        while d < date!(2026 - 01 - 01) {
            let hd = HebrewDate::from_civil(d).unwrap();
            assert!(seen.insert(DateKey::of(hd)), "duplicate key for {hd:?}");
            d = d.next_day().unwrap();
        }
    }

    #[test]
    fn test_key_distinct_across_systems() {
        let d = date!(2024 - 10 - 03);
        let hd = HebrewDate::from_civil(d).unwrap();
        assert_ne!(DateKey::of(d), DateKey::of(hd));
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(EventTime::parse("14:30").unwrap().to_string(), "14:30");
        assert_eq!(EventTime::parse(" 09:05 ").unwrap().to_string(), "09:05");
        assert_eq!(EventTime::parse("").unwrap(), EventTime::NOON);
        assert_eq!(EventTime::parse("   ").unwrap().to_string(), "12:00");
    }

    #[test]
    fn test_parse_bad_time() {
        for s in ["25:00", "12:60", "noon", "1230", "12:3"] {
            assert!(EventTime::parse(s).is_err(), "{s:?} should not parse");
        }
        assert_eq!(
            EventTime::parse("9pm").unwrap_err().to_string(),
            "invalid event time \"9pm\"; expected HH:MM"
        );
    }

    #[test]
    fn test_add_default_time() {
        let key = sample_key();
        let (store, id) = EventStore::new().add(&key, "Test Meeting", None);
        assert!(id.is_some());
        let events = store.events_for(&key);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title(), "Test Meeting");
        assert_eq!(events[0].time().to_string(), "12:00");
        assert_eq!(Some(events[0].id()), id);
    }

    #[test]
    fn test_add_trims_title() {
        let key = sample_key();
        let time = EventTime::parse("14:30").unwrap();
        let (store, _) = EventStore::new().add(&key, "  Lunch \n", Some(time));
        assert_eq!(store.events_for(&key)[0].title(), "Lunch");
        assert_eq!(store.events_for(&key)[0].time(), time);
    }

    #[test]
    fn test_add_blank_title() {
        let key = sample_key();
        let before = EventStore::new();
        let (after, id) = before.add(&key, "   ", None);
        assert_eq!(id, None);
        assert_eq!(after, before);
        assert!(after.events_for(&key).is_empty());
        assert!(!after.has_events(&key));
    }

    #[test]
    fn test_add_does_not_modify_original() {
        let key = sample_key();
        let before = EventStore::new();
        let (after, _) = before.add(&key, "Standup", None);
        assert!(before.events_for(&key).is_empty());
        assert_eq!(after.events_for(&key).len(), 1);
    }

    #[test]
    fn test_add_then_remove() {
        let key = sample_key();
        let (store, _) = EventStore::new().add(&key, "Existing", None);
        let before = store.events_for(&key).to_vec();
        let (added, id) = store.add(&key, "Temporary", None);
        let removed = added.remove(&key, id.unwrap());
        assert_eq!(removed.events_for(&key), before.as_slice());
    }

    #[test]
    fn test_remove_first_of_two() {
        let key = sample_key();
        let (store, first) = EventStore::new().add(&key, "First", None);
        let (store, second) = store.add(&key, "Second", None);
        let store = store.remove(&key, first.unwrap());
        let events = store.events_for(&key);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title(), "Second");
        assert_eq!(Some(events[0].id()), second);
    }

    #[test]
    fn test_insertion_order() {
        let key = sample_key();
        let mut store = EventStore::new();
        for title in ["c", "a", "b"] {
            let time = EventTime::parse("08:00").unwrap();
            store = store.add(&key, title, Some(time)).0;
        }
        let titles = store
            .events_for(&key)
            .iter()
            .map(Event::title)
            .collect::<Vec<_>>();
        assert_eq!(titles, ["c", "a", "b"]);
    }

    #[test]
    fn test_remove_last_drops_key() {
        let key = sample_key();
        let (store, id) = EventStore::new().add(&key, "Only", None);
        assert!(store.has_events(&key));
        let store = store.remove(&key, id.unwrap());
        assert!(!store.has_events(&key));
        assert!(store.events_for(&key).is_empty());
    }

    #[test]
    fn test_remove_unknown() {
        let key = sample_key();
        let other = DateKey::of(date!(2024 - 09 - 16));
        let (store, id) = EventStore::new().add(&key, "Keep", None);
        assert_eq!(store.remove(&other, id.unwrap()), store);
        let (_, unknown) = store.add(&other, "Elsewhere", None);
        assert_eq!(store.remove(&key, unknown.unwrap()), store);
    }

    #[test]
    fn test_ids_not_reused() {
        let key = sample_key();
        let (store, first) = EventStore::new().add(&key, "One", None);
        let store = store.remove(&key, first.unwrap());
        let (_, second) = store.add(&key, "Two", None);
        assert_ne!(first, second);
    }

    #[test]
    fn test_days_are_separate() {
        let key = sample_key();
        let other = DateKey::of(date!(2024 - 09 - 16));
        let (store, _) = EventStore::new().add(&key, "Here", None);
        assert!(store.events_for(&other).is_empty());
        assert!(!store.has_events(&other));
    }
}
