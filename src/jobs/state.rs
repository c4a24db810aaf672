//! Job records and the compiled-in job table.
//!
//! `data/jobs.json` はビルド時に `include_str!` で埋め込む。
//! 読み込み時に日付の前後関係と必須フィールドを検証し、
//! 不正なデータは `JobDataError` で返す（呼び出し側は空テーブルにフォールバック）。

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use super::actions::MAX_JOBS;

const BUILTIN_JOBS: &str = include_str!("../../data/jobs.json");

/// One entry of the job history.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobRecord {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub company: String,
    pub position: String,
    /// Author-supplied HTML. Goes through `sanitize` before display.
    pub responsibilities_html: String,
    /// Display order is significant.
    #[serde(default)]
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Error)]
pub enum JobDataError {
    #[error("job data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("job {index} ({company}) ends {end} before it starts {start}")]
    DateRange {
        index: usize,
        company: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("job {index} has an empty {field}")]
    MissingField { index: usize, field: &'static str },

    #[error("{count} jobs exceed the limit of {max}")]
    TooMany { count: usize, max: usize },
}

/// Immutable, ordered list of jobs handed to the selector at construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobTable {
    jobs: Vec<JobRecord>,
}

impl JobTable {
    /// サイトに同梱されるテーブル。
    pub fn builtin() -> Result<Self, JobDataError> {
        Self::from_json(BUILTIN_JOBS)
    }

    pub fn from_json(json: &str) -> Result<Self, JobDataError> {
        let jobs: Vec<JobRecord> = serde_json::from_str(json)?;
        Self::from_records(jobs)
    }

    pub fn from_records(jobs: Vec<JobRecord>) -> Result<Self, JobDataError> {
        // クリック用アクションIDは u16 なので件数に上限がある。
        if jobs.len() > MAX_JOBS {
            return Err(JobDataError::TooMany {
                count: jobs.len(),
                max: MAX_JOBS,
            });
        }
        for (index, job) in jobs.iter().enumerate() {
            if job.company.trim().is_empty() {
                return Err(JobDataError::MissingField { index, field: "company" });
            }
            if job.position.trim().is_empty() {
                return Err(JobDataError::MissingField { index, field: "position" });
            }
            if job.end_date < job.start_date {
                return Err(JobDataError::DateRange {
                    index,
                    company: job.company.clone(),
                    start: job.start_date,
                    end: job.end_date,
                });
            }
        }
        Ok(Self { jobs })
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&JobRecord> {
        self.jobs.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &JobRecord> {
        self.jobs.iter()
    }
}
