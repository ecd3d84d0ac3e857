use chrono::{NaiveDate, Timelike};

use crate::datetime::CalendarDay;
use crate::event::{Event, EventColor};

/// Events a month cell lists before the rest collapse into "+N more".
pub const MAX_CELL_EVENTS: usize = 2;

/// Events whose `[start day, end day]` range covers `day`, both ends included.
pub fn events_on_day<'a, I>(events: I, day: NaiveDate) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|event| event.start_date.date() <= day && day <= event.end_date.date())
        .collect()
}

/// Stable sort, ties keep their input order.
pub fn sort_by_start_time(events: &mut [&Event]) {
    events.sort_by_key(|event| event.start_date);
}

pub fn sorted_by_start_time<'a, I>(events: I) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut sorted: Vec<&Event> = events.into_iter().collect();
    sort_by_start_time(&mut sorted);
    sorted
}

/// Events bucketed by the hour they start in; spans are never split.
pub fn events_at_hour<'a, I>(events: I, hour: u32) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|event| event.start_date.hour() == hour)
        .collect()
}

pub fn is_in_hour_range(event: &Event, start_hour: u32, end_hour: u32) -> bool {
    let hour = event.start_date.hour();
    hour >= start_hour && hour < end_hour
}

pub fn events_in_hour_range<'a, I>(events: I, start_hour: u32, end_hour: u32) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|event| is_in_hour_range(event, start_hour, end_hour))
        .collect()
}

/// What a week-view cell shows: events on `day` starting at `hour`, by start time.
pub fn slot_events<'a, I>(events: I, day: NaiveDate, hour: u32) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    let on_day = sorted_by_start_time(events_on_day(events, day));
    events_at_hour(on_day, hour)
}

/// What a month-view cell shows: the day's first events by start time and the
/// number left out. Days outside the shown month stay empty.
pub fn cell_events<'a, I>(events: I, day: &CalendarDay) -> (Vec<&'a Event>, usize)
where
    I: IntoIterator<Item = &'a Event>,
{
    if !day.is_current_month {
        return (Vec::new(), 0);
    }

    let mut shown = sorted_by_start_time(events_on_day(events, day.date));
    let hidden = shown.len().saturating_sub(MAX_CELL_EVENTS);
    shown.truncate(MAX_CELL_EVENTS);
    (shown, hidden)
}

pub fn color_class(color: EventColor) -> &'static str {
    match color {
        EventColor::Blue => "bg-event-blue text-white",
        EventColor::Green => "bg-event-green text-white",
        EventColor::Purple => "bg-event-purple text-white",
        EventColor::Orange => "bg-event-orange text-white",
        EventColor::Pink => "bg-event-pink text-white",
        EventColor::Red => "bg-event-red text-white",
    }
}

pub fn light_color_class(color: EventColor) -> &'static str {
    match color {
        EventColor::Blue => "bg-event-blue/10 text-event-blue border-event-blue/20",
        EventColor::Green => "bg-event-green/10 text-event-green border-event-green/20",
        EventColor::Purple => "bg-event-purple/10 text-event-purple border-event-purple/20",
        EventColor::Orange => "bg-event-orange/10 text-event-orange border-event-orange/20",
        EventColor::Pink => "bg-event-pink/10 text-event-pink border-event-pink/20",
        EventColor::Red => "bg-event-red/10 text-event-red border-event-red/20",
    }
}

/// Class for a color name coming from outside; unknown names get the blue class.
pub fn color_class_for(name: &str) -> &'static str {
    color_class(EventColor::from_name(name))
}
