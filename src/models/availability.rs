use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::TimeSlot;

/// Bookable slots a psychologist declared for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub date: NaiveDate,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
}

impl Availability {
    pub fn new(date: NaiveDate, time_slots: Vec<TimeSlot>) -> Self {
        let mut day = Self { date, time_slots };
        day.normalize();
        day
    }

    /// Deduplicates and sorts the day's slots.
    pub fn normalize(&mut self) {
        self.time_slots.sort();
        self.time_slots.dedup();
    }
}

/// Display shape of a schedule: one entry per date, dates ascending, each
/// day's slots sorted and unique, empty days dropped.
pub fn normalize_schedule(schedule: Vec<Availability>) -> Vec<Availability> {
    let mut by_date: BTreeMap<NaiveDate, Vec<TimeSlot>> = BTreeMap::new();
    for day in schedule {
        by_date.entry(day.date).or_default().extend(day.time_slots);
    }

    by_date
        .into_iter()
        .map(|(date, slots)| Availability::new(date, slots))
        .filter(|day| !day.time_slots.is_empty())
        .collect()
}

pub fn slots_on(schedule: &[Availability], date: NaiveDate) -> Vec<TimeSlot> {
    let mut slots: Vec<TimeSlot> = schedule
        .iter()
        .filter(|day| day.date == date)
        .flat_map(|day| day.time_slots.iter().copied())
        .collect();
    slots.sort();
    slots.dedup();
    slots
}

pub fn is_available(schedule: &[Availability], date: NaiveDate, slot: TimeSlot) -> bool {
    schedule
        .iter()
        .any(|day| day.date == date && day.time_slots.contains(&slot))
}

/// Drops days before `now` and today's slots that already started.
pub fn upcoming(schedule: &[Availability], now: NaiveDateTime) -> Vec<Availability> {
    let today = now.date();
    let cleaned = schedule
        .iter()
        .filter(|day| day.date >= today)
        .map(|day| {
            let time_slots = day
                .time_slots
                .iter()
                .copied()
                .filter(|slot| day.date > today || slot.time() > now.time())
                .collect();
            Availability {
                date: day.date,
                time_slots,
            }
        })
        .collect();
    normalize_schedule(cleaned)
}

pub fn add_slot(schedule: Vec<Availability>, date: NaiveDate, slot: TimeSlot) -> Vec<Availability> {
    let mut schedule = schedule;
    schedule.push(Availability {
        date,
        time_slots: vec![slot],
    });
    normalize_schedule(schedule)
}

pub fn remove_slot(
    schedule: Vec<Availability>,
    date: NaiveDate,
    slot: TimeSlot,
) -> Vec<Availability> {
    let trimmed = schedule
        .into_iter()
        .map(|mut day| {
            if day.date == date {
                day.time_slots.retain(|s| *s != slot);
            }
            day
        })
        .collect();
    normalize_schedule(trimmed)
}
