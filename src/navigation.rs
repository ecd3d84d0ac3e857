use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::cmds::Cmd;
use crate::datetime::{self, Clock};
use crate::error::{Error, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Month,
    Week,
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Month
    }
}

impl ViewMode {
    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::Month => "month",
            ViewMode::Week => "week",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ViewMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(ViewMode::Month),
            "week" => Ok(ViewMode::Week),
            other => Err(Error::new(
                ErrorKind::CommandParse,
                &format!("'{}' is not a view, expected month|week", other),
            )),
        }
    }
}

/// Which month or week is on screen and which day the user picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    reference_date: NaiveDate,
    view_mode: ViewMode,
    selected_date: Option<NaiveDate>,
}

impl NavigationState {
    pub fn new(reference_date: NaiveDate, view_mode: ViewMode) -> Self {
        NavigationState {
            reference_date,
            view_mode,
            selected_date: None,
        }
    }

    pub fn from_clock(clock: &dyn Clock) -> Self {
        NavigationState::new(clock.today(), ViewMode::default())
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn next(&mut self) {
        self.reference_date = match self.view_mode {
            ViewMode::Month => datetime::next_month(self.reference_date),
            ViewMode::Week => datetime::next_week(self.reference_date),
        };
    }

    pub fn previous(&mut self) {
        self.reference_date = match self.view_mode {
            ViewMode::Month => datetime::previous_month(self.reference_date),
            ViewMode::Week => datetime::previous_week(self.reference_date),
        };
    }

    pub fn today(&mut self, clock: &dyn Clock) {
        let today = datetime::today(clock).date();
        self.reference_date = today;
        self.selected_date = Some(today);
    }

    pub fn change_view(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
    }

    pub fn apply(&mut self, cmd: Cmd, clock: &dyn Clock) {
        log::debug!("Navigation: {:?} from {}", cmd, self.reference_date);
        match cmd {
            Cmd::Noop => {}
            Cmd::Next => self.next(),
            Cmd::Previous => self.previous(),
            Cmd::Today => self.today(clock),
            Cmd::ChangeView(view_mode) => self.change_view(view_mode),
            Cmd::SelectDate(date) => self.select_date(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::FixedClock;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock::new(date(2024, 10, 18).and_hms_opt(16, 20, 0).unwrap())
    }

    #[test]
    fn starts_unselected() {
        let nav = NavigationState::from_clock(&clock());
        assert_eq!(nav.reference_date(), date(2024, 10, 18));
        assert_eq!(nav.view_mode(), ViewMode::Month);
        assert_eq!(nav.selected_date(), None);
    }

    #[test]
    fn twelve_months_forward_is_one_year() {
        let mut nav = NavigationState::new(date(2024, 1, 15), ViewMode::Month);
        for _ in 0..12 {
            nav.next();
        }
        assert_eq!(nav.reference_date(), date(2025, 1, 15));
    }

    #[test]
    fn month_steps_clamp_at_month_end() {
        let mut nav = NavigationState::new(date(2024, 3, 31), ViewMode::Month);
        nav.previous();
        assert_eq!(nav.reference_date(), date(2024, 2, 29));
    }

    #[test]
    fn week_view_steps_by_week() {
        let mut nav = NavigationState::new(date(2024, 10, 18), ViewMode::Week);
        nav.next();
        assert_eq!(nav.reference_date(), date(2024, 10, 25));
        nav.previous();
        nav.previous();
        assert_eq!(nav.reference_date(), date(2024, 10, 11));
    }

    #[test]
    fn stepping_keeps_selection() {
        let mut nav = NavigationState::new(date(2024, 10, 18), ViewMode::Month);
        nav.select_date(date(2024, 10, 2));
        nav.next();
        assert_eq!(nav.selected_date(), Some(date(2024, 10, 2)));
        assert_eq!(nav.reference_date().month(), 11);
    }

    #[test]
    fn today_resets_reference_and_selection() {
        let mut nav = NavigationState::new(date(2020, 5, 5), ViewMode::Week);
        nav.today(&clock());
        assert_eq!(nav.reference_date(), date(2024, 10, 18));
        assert_eq!(nav.selected_date(), Some(date(2024, 10, 18)));
        assert_eq!(nav.view_mode(), ViewMode::Week);
    }

    #[test]
    fn change_view_keeps_dates() {
        let mut nav = NavigationState::new(date(2024, 10, 18), ViewMode::Month);
        nav.select_date(date(2024, 10, 20));
        nav.apply(Cmd::ChangeView(ViewMode::Week), &clock());

        assert_eq!(nav.view_mode(), ViewMode::Week);
        assert_eq!(nav.reference_date(), date(2024, 10, 18));
        assert_eq!(nav.selected_date(), Some(date(2024, 10, 20)));
    }

    #[test]
    fn view_mode_parses_case_insensitively() {
        assert_eq!("Week".parse::<ViewMode>().unwrap(), ViewMode::Week);
        assert!("day".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::Month.to_string(), "month");
    }
}
