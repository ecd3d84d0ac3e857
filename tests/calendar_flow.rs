use calgrid::config::Config;
use calgrid::datetime::{self, FixedClock};
use calgrid::{CalendarController, EventColor, EventDraft, EventStore, NavigationState, ViewMode};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn clock() -> Box<FixedClock> {
    Box::new(FixedClock::new(at(2024, 10, 18, 9)))
}

#[test]
fn adding_to_an_empty_store_assigns_a_fresh_id() {
    let mut calendar = CalendarController::new(
        EventStore::new(),
        NavigationState::new(at(2024, 10, 18, 0).date(), ViewMode::Month),
        clock(),
    );
    let earlier = calgrid::event::generate_id();

    let id = calendar
        .add(
            EventDraft::new("Lunch", at(2024, 10, 18, 12), at(2024, 10, 18, 13))
                .color(EventColor::Green),
        )
        .unwrap();

    let events = calendar.store().events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, id);
    assert!(!id.as_str().is_empty());
    assert_ne!(id, earlier);
    assert_eq!(events[0].color, EventColor::Green);
}

#[test]
fn configured_calendar_renders_week_slots() {
    let config: Config = r#"
view = "week"
date = "2024-10-29"

[[events]]
id = "1"
title = "Team Standup"
start_date = "2024-10-29T09:00:00"
end_date = "2024-10-29T09:30:00"

[[events]]
id = "4"
title = "Client Meeting"
start_date = "2024-11-01T10:00:00"
end_date = "2024-11-01T11:30:00"
color = "green"
"#
    .parse()
    .unwrap();

    let mut calendar = CalendarController::from_config(&config, clock());
    let days = calendar.visible_days();

    assert_eq!(days.len(), 7);
    assert_eq!(days[0].date.weekday(), Weekday::Sun);
    assert_eq!(days[3].date.weekday(), Weekday::Wed);

    let tuesday = days[2].date;
    assert_eq!(calendar.slot_events(tuesday, 9)[0].title, "Team Standup");
    assert!(calendar.slot_events(tuesday, 10).is_empty());

    // Friday the 1st is outside October but still in this week.
    let friday = days[5].date;
    assert!(!days[5].is_current_month);
    assert_eq!(calendar.events_for_day(friday)[0].title, "Client Meeting");

    calendar.next();
    assert_eq!(
        calendar.navigation().reference_date(),
        NaiveDate::from_ymd_opt(2024, 11, 5).unwrap()
    );
    assert!(calendar
        .visible_days()
        .iter()
        .all(|d| calendar.events_for_day(d.date).is_empty()));
}

#[test]
fn month_navigation_over_a_year() {
    let mut calendar = CalendarController::new(
        EventStore::new(),
        NavigationState::new(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(), ViewMode::Month),
        clock(),
    );

    for _ in 0..12 {
        calendar.next();
        let days = calendar.visible_days();
        assert_eq!(days.len(), datetime::GRID_CELLS);
        assert!(days.iter().any(|d| d.is_current_month && d.day_num() == 1));
    }

    assert_eq!(
        calendar.navigation().reference_date(),
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    );
    assert_eq!(calendar.title(), "January 2025");
}
