use chrono::NaiveDate;
use std::str::FromStr;

use crate::datetime;
use crate::error::{Error, ErrorKind};
use crate::navigation::ViewMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    Noop,
    Next,
    Previous,
    Today,
    ChangeView(ViewMode),
    SelectDate(NaiveDate),
}

impl FromStr for Cmd {
    type Err = Error;

    /// `next`, `prev`, `today`, `month`, `week` or `select:yyyy-mm-dd`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(date) = s.strip_prefix("select:") {
            return datetime::parse_date(date).map(Cmd::SelectDate);
        }

        match s {
            "" | "noop" => Ok(Cmd::Noop),
            "next" | "n" => Ok(Cmd::Next),
            "prev" | "previous" | "p" => Ok(Cmd::Previous),
            "today" | "t" => Ok(Cmd::Today),
            "month" | "week" => s.parse().map(Cmd::ChangeView),
            _ => Err(Error::new(
                ErrorKind::CommandParse,
                &format!("Could not handle command '{}'", s),
            )),
        }
    }
}
