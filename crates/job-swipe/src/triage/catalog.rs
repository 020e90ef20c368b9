use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Deserializer};

use super::domain::{Commute, JobCategory, JobId, JobPosting, LanguageLevel, PayPeriod, Wage};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read job catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid catalog JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("row {row}: invalid {field} '{value}'")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("duplicate job id '{0}'")]
    DuplicateId(JobId),
    #[error("job '{0}' has a maximum wage below its minimum")]
    InvalidWage(JobId),
    #[error("unsupported catalog format '{0}' (expected .csv or .json)")]
    UnsupportedFormat(String),
}

/// Read-only snapshot of job postings handed to the triage engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobCatalog {
    jobs: Vec<JobPosting>,
    index: HashMap<JobId, usize>,
}

impl JobCatalog {
    pub fn new(jobs: Vec<JobPosting>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(jobs.len());
        for (position, job) in jobs.iter().enumerate() {
            if job.wage.max < job.wage.min {
                return Err(CatalogError::InvalidWage(job.id.clone()));
            }
            if index.insert(job.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(job.id.clone()));
            }
        }
        Ok(Self { jobs, index })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        let reader = BufReader::new(File::open(path)?);

        match extension.as_str() {
            "csv" => Self::from_csv_reader(reader),
            "json" => Self::from_json_reader(reader),
            other => Err(CatalogError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let jobs: Vec<JobPosting> = serde_json::from_reader(reader)?;
        Self::new(jobs)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut jobs = Vec::new();

        for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
            // header is line 1
            let row = index + 2;
            jobs.push(record?.into_posting(row)?);
        }

        Self::new(jobs)
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn get(&self, id: &JobId) -> Option<&JobPosting> {
        self.index.get(id).and_then(|position| self.jobs.get(*position))
    }

    pub fn contains(&self, id: &JobId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    title: String,
    category: String,
    #[serde(default)]
    location: String,
    wage_min: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    wage_max: Option<String>,
    pay_period: String,
    language_level: String,
    commute_home_minutes: u32,
    commute_school_minutes: u32,
    #[serde(default)]
    work_days: String,
    posted_on: String,
    #[serde(default)]
    highlights: String,
}

impl CatalogRow {
    fn into_posting(self, row: usize) -> Result<JobPosting, CatalogError> {
        let category: JobCategory = parse_field(row, "category", &self.category)?;
        let period: PayPeriod = parse_field(row, "pay_period", &self.pay_period)?;
        let language_level: LanguageLevel =
            parse_field(row, "language_level", &self.language_level)?;
        let wage_max = match self.wage_max.as_deref() {
            Some(raw) => parse_field(row, "wage_max", raw)?,
            None => self.wage_min,
        };
        if wage_max < self.wage_min {
            return Err(invalid(row, "wage_max", &wage_max.to_string()));
        }
        let posted_on = NaiveDate::parse_from_str(self.posted_on.trim(), "%Y-%m-%d")
            .map_err(|_| invalid(row, "posted_on", &self.posted_on))?;
        let work_days = split_list(&self.work_days)
            .map(|day| parse_field::<Weekday>(row, "work_days", day))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(JobPosting {
            id: JobId(self.id),
            title: self.title,
            category,
            location: self.location,
            wage: Wage::range(self.wage_min, wage_max, period),
            language_level,
            commute: Commute {
                home_minutes: self.commute_home_minutes,
                school_minutes: self.commute_school_minutes,
            },
            work_days,
            posted_on,
            highlights: split_list(&self.highlights).map(str::to_string).collect(),
        })
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split('|').map(str::trim).filter(|item| !item.is_empty())
}

fn parse_field<T: FromStr>(row: usize, field: &'static str, raw: &str) -> Result<T, CatalogError> {
    raw.trim().parse().map_err(|_| invalid(row, field, raw))
}

fn invalid(row: usize, field: &'static str, raw: &str) -> CatalogError {
    CatalogError::InvalidField {
        row,
        field,
        value: raw.to_string(),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
