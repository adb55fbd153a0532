//! Recurrence Rule
//!
//! Repeat type, interval, weekday selection and optional end date.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{RecurrenceError, RecurrenceResult};

/// Unit the interval counts in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RepeatType {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl RepeatType {
    pub const ALL: [RepeatType; 3] = [RepeatType::Daily, RepeatType::Weekly, RepeatType::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatType::Daily => "DAILY",
            RepeatType::Weekly => "WEEKLY",
            RepeatType::Monthly => "MONTHLY",
        }
    }

    /// Label used by the type selector
    pub fn display_name(&self) -> &'static str {
        match self {
            RepeatType::Daily => "매일",
            RepeatType::Weekly => "매주",
            RepeatType::Monthly => "매월",
        }
    }
}

impl FromStr for RepeatType {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DAILY" => Ok(RepeatType::Daily),
            "WEEKLY" => Ok(RepeatType::Weekly),
            "MONTHLY" => Ok(RepeatType::Monthly),
            _ => Err(RecurrenceError::UnknownRepeatType(s.to_string())),
        }
    }
}

/// Day of week, indexed from Sunday = 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WeekDay {
    Sun = 0,
    Mon = 1,
    Tue = 2,
    Wed = 3,
    Thu = 4,
    Fri = 5,
    Sat = 6,
}

impl WeekDay {
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Sun,
        WeekDay::Mon,
        WeekDay::Tue,
        WeekDay::Wed,
        WeekDay::Thu,
        WeekDay::Fri,
        WeekDay::Sat,
    ];

    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::ALL[date.weekday().num_days_from_sunday() as usize]
    }

    /// Three-letter wire abbreviation
    pub fn abbrev(self) -> &'static str {
        match self {
            WeekDay::Sun => "SUN",
            WeekDay::Mon => "MON",
            WeekDay::Tue => "TUE",
            WeekDay::Wed => "WED",
            WeekDay::Thu => "THU",
            WeekDay::Fri => "FRI",
            WeekDay::Sat => "SAT",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            WeekDay::Sun => "일",
            WeekDay::Mon => "월",
            WeekDay::Tue => "화",
            WeekDay::Wed => "수",
            WeekDay::Thu => "목",
            WeekDay::Fri => "금",
            WeekDay::Sat => "토",
        }
    }

    fn full_name(self) -> &'static str {
        match self {
            WeekDay::Sun => "SUNDAY",
            WeekDay::Mon => "MONDAY",
            WeekDay::Tue => "TUESDAY",
            WeekDay::Wed => "WEDNESDAY",
            WeekDay::Thu => "THURSDAY",
            WeekDay::Fri => "FRIDAY",
            WeekDay::Sat => "SATURDAY",
        }
    }
}

impl FromStr for WeekDay {
    type Err = RecurrenceError;

    /// Accepts "MON" as well as "MONDAY", in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_uppercase();
        WeekDay::ALL
            .into_iter()
            .find(|d| d.abbrev() == token || d.full_name() == token)
            .ok_or_else(|| RecurrenceError::UnknownWeekDay(s.to_string()))
    }
}

/// Set of selected weekdays.
///
/// Stored as a bitmask so equality and iteration order never depend on
/// the order days were picked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekDays(u8);

impl WeekDays {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn from_days(days: impl IntoIterator<Item = WeekDay>) -> Self {
        days.into_iter().fold(Self::empty(), |set, d| set.with(d))
    }

    /// Indices outside 0..=6 are ignored
    pub fn from_indices(indices: impl IntoIterator<Item = u32>) -> Self {
        Self::from_days(indices.into_iter().filter_map(WeekDay::from_index))
    }

    pub fn with(mut self, day: WeekDay) -> Self {
        self.insert(day);
        self
    }

    pub fn insert(&mut self, day: WeekDay) {
        self.0 |= 1 << day.index();
    }

    pub fn remove(&mut self, day: WeekDay) {
        self.0 &= !(1 << day.index());
    }

    pub fn toggle(&mut self, day: WeekDay) {
        self.0 ^= 1 << day.index();
    }

    pub fn contains(&self, day: WeekDay) -> bool {
        self.0 & (1 << day.index()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Selected days in ascending index order (Sunday first)
    pub fn iter(&self) -> impl Iterator<Item = WeekDay> + '_ {
        WeekDay::ALL.into_iter().filter(move |d| self.contains(*d))
    }

    pub fn first(&self) -> Option<WeekDay> {
        self.iter().next()
    }

    /// Smallest selected day strictly after `day` in the same week
    pub fn first_after(&self, day: WeekDay) -> Option<WeekDay> {
        self.iter().find(|d| *d > day)
    }

    /// Wire form: "MON,WED,FRI"
    pub fn to_csv(&self) -> String {
        self.iter().map(WeekDay::abbrev).collect::<Vec<_>>().join(",")
    }

    pub fn parse_csv(csv: &str) -> Result<Self, RecurrenceError> {
        csv.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(WeekDay::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::from_days)
    }

    /// Like `parse_csv`, but unknown tokens are logged and skipped
    pub fn parse_csv_lossy(csv: &str) -> Self {
        Self::from_days(
            csv.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .filter_map(|token| match WeekDay::from_str(token) {
                    Ok(day) => Some(day),
                    Err(e) => {
                        tracing::warn!("dropping weekday token: {}", e);
                        None
                    }
                }),
        )
    }
}

/// A recurrence rule as configured on a todo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub repeat_type: RepeatType,
    interval_value: u32,
    pub week_days: WeekDays,
    pub end_date: Option<NaiveDate>,
}

impl RecurrenceRule {
    pub fn new(repeat_type: RepeatType, interval_value: u32) -> RecurrenceResult<Self> {
        if interval_value == 0 {
            return Err(RecurrenceError::InvalidInterval);
        }
        Ok(Self {
            repeat_type,
            interval_value,
            week_days: WeekDays::empty(),
            end_date: None,
        })
    }

    pub fn daily(interval_value: u32) -> RecurrenceResult<Self> {
        Self::new(RepeatType::Daily, interval_value)
    }

    pub fn weekly(interval_value: u32, week_days: WeekDays) -> RecurrenceResult<Self> {
        Ok(Self::new(RepeatType::Weekly, interval_value)?.with_week_days(week_days))
    }

    pub fn monthly(interval_value: u32) -> RecurrenceResult<Self> {
        Self::new(RepeatType::Monthly, interval_value)
    }

    pub fn with_week_days(mut self, week_days: WeekDays) -> Self {
        self.week_days = week_days;
        self
    }

    pub fn with_end_date(mut self, end_date: Option<NaiveDate>) -> Self {
        self.end_date = end_date;
        self
    }

    pub fn interval_value(&self) -> u32 {
        self.interval_value
    }

    /// Weekday selection as the rule applies it (empty unless weekly)
    pub fn effective_week_days(&self) -> WeekDays {
        match self.repeat_type {
            RepeatType::Weekly => self.week_days,
            _ => WeekDays::empty(),
        }
    }

    /// The series ended before `today`; the end date itself still repeats
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.end_date.is_some_and(|end| end < today)
    }

    /// Human readable label, e.g. "매일", "2주마다 (월, 수)", "매월 (~2025-06-30)"
    pub fn label(&self) -> String {
        let n = self.interval_value;
        let mut label = match (self.repeat_type, n) {
            (RepeatType::Daily, 1) => "매일".to_string(),
            (RepeatType::Daily, n) => format!("{}일마다", n),
            (RepeatType::Weekly, 1) => "매주".to_string(),
            (RepeatType::Weekly, n) => format!("{}주마다", n),
            (RepeatType::Monthly, 1) => "매월".to_string(),
            (RepeatType::Monthly, n) => format!("{}개월마다", n),
        };
        let days = self.effective_week_days();
        if !days.is_empty() {
            let names: Vec<_> = days.iter().map(WeekDay::short_label).collect();
            label.push_str(&format!(" ({})", names.join(", ")));
        }
        if let Some(end) = self.end_date {
            label.push_str(&format!(" (~{})", end.format("%Y-%m-%d")));
        }
        label
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
