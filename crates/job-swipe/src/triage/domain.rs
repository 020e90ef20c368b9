use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Stable catalog identifier for a job posting.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobCategory {
    Cooking,
    Delivery,
    Warehouse,
    Cleaning,
    Retail,
    Restaurant,
    Office,
    Construction,
    Other,
}

impl JobCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cooking => "cooking",
            Self::Delivery => "delivery",
            Self::Warehouse => "warehouse",
            Self::Cleaning => "cleaning",
            Self::Retail => "retail",
            Self::Restaurant => "restaurant",
            Self::Office => "office",
            Self::Construction => "construction",
            Self::Other => "other",
        }
    }
}

impl FromStr for JobCategory {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cooking" => Ok(Self::Cooking),
            "delivery" => Ok(Self::Delivery),
            "warehouse" => Ok(Self::Warehouse),
            "cleaning" => Ok(Self::Cleaning),
            "retail" => Ok(Self::Retail),
            "restaurant" => Ok(Self::Restaurant),
            "office" => Ok(Self::Office),
            "construction" => Ok(Self::Construction),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown job category '{other}'")),
        }
    }
}

/// Unit the advertised wage is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayPeriod {
    Hourly,
    Daily,
    Monthly,
    Annual,
}

impl PayPeriod {
    /// Working hours one period is normalized against.
    pub const fn hours(self) -> u32 {
        match self {
            Self::Hourly => 1,
            Self::Daily => 8,
            Self::Monthly => 160,
            Self::Annual => 1920,
        }
    }
}

impl FromStr for PayPeriod {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "hourly" | "hour" => Ok(Self::Hourly),
            "daily" | "day" => Ok(Self::Daily),
            "monthly" | "month" => Ok(Self::Monthly),
            "annual" | "annually" | "yearly" | "year" => Ok(Self::Annual),
            other => Err(format!("unknown pay period '{other}'")),
        }
    }
}

/// Advertised pay. A scalar wage is represented with `min == max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wage {
    pub min: u32,
    pub max: u32,
    pub period: PayPeriod,
}

impl Wage {
    pub const fn scalar(amount: u32, period: PayPeriod) -> Self {
        Self {
            min: amount,
            max: amount,
            period,
        }
    }

    pub const fn range(min: u32, max: u32, period: PayPeriod) -> Self {
        Self { min, max, period }
    }

    /// Lower bound normalized to an hourly amount; used for filtering and sorting.
    pub const fn hourly_equivalent(&self) -> u32 {
        self.min / self.period.hours()
    }
}

/// Required language proficiency. `N5` is the easiest level and orders lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LanguageLevel {
    N5,
    N4,
    N3,
    N2,
    N1,
}

impl LanguageLevel {
    pub const fn ordered() -> [Self; 5] {
        [Self::N5, Self::N4, Self::N3, Self::N2, Self::N1]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::N5 => "N5",
            Self::N4 => "N4",
            Self::N3 => "N3",
            Self::N2 => "N2",
            Self::N1 => "N1",
        }
    }
}

impl FromStr for LanguageLevel {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| format!("unknown language level '{}'", raw.trim()))
    }
}

/// Commute duration in minutes from the two reference points a seeker cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commute {
    pub home_minutes: u32,
    pub school_minutes: u32,
}

/// Immutable catalog entry. The triage engine never mutates a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    pub category: JobCategory,
    #[serde(default)]
    pub location: String,
    pub wage: Wage,
    pub language_level: LanguageLevel,
    pub commute: Commute,
    #[serde(default)]
    pub work_days: Vec<Weekday>,
    pub posted_on: NaiveDate,
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// Inclusive hourly wage bounds. A range with `min > max` matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageRange {
    pub min: u32,
    pub max: u32,
}

impl WageRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn unbounded() -> Self {
        Self {
            min: 0,
            max: u32::MAX,
        }
    }

    pub const fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    pub fn contains(&self, hourly: u32) -> bool {
        self.is_valid() && (self.min..=self.max).contains(&hourly)
    }
}

impl Default for WageRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Active filters supplied by the settings surface. Empty sets mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfiguration {
    pub categories: BTreeSet<JobCategory>,
    pub wage_range: WageRange,
    pub language_levels: BTreeSet<LanguageLevel>,
    pub weekdays: Vec<Weekday>,
}

impl FilterConfiguration {
    pub fn matches(&self, job: &JobPosting) -> bool {
        let category = self.categories.is_empty() || self.categories.contains(&job.category);
        let wage = self.wage_range.contains(job.wage.hourly_equivalent());
        let level =
            self.language_levels.is_empty() || self.language_levels.contains(&job.language_level);
        // any overlapping day is enough
        let days = self.weekdays.is_empty()
            || job.work_days.iter().any(|day| self.weekdays.contains(day));

        category && wage && level && days
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Ascending hourly-equivalent wage.
    Wage,
    /// Ascending commute from home.
    CommuteFromHome,
    /// Ascending commute from school.
    CommuteFromSchool,
    /// Most recently posted first.
    #[default]
    PostingDate,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "wage" => Ok(Self::Wage),
            "commute_home" | "commute_from_home" | "commute" => Ok(Self::CommuteFromHome),
            "commute_school" | "commute_from_school" => Ok(Self::CommuteFromSchool),
            "date" | "posting_date" | "posted" => Ok(Self::PostingDate),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageOutcome {
    Accepted,
    Rejected,
}

impl TriageOutcome {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for TriageOutcome {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "accepted" | "accept" | "right" | "r" | "chosen" => Ok(Self::Accepted),
            "rejected" | "reject" | "left" | "l" | "refused" => Ok(Self::Rejected),
            other => Err(format!("unknown triage outcome '{other}'")),
        }
    }
}

/// Recorded, irrevocable decision for a single job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageDecision {
    pub job_id: JobId,
    pub outcome: TriageOutcome,
    pub decided_at: DateTime<Utc>,
}
