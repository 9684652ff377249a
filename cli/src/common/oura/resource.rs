//! # Provider Resources
//!
//! File: cli/src/common/oura/resource.rs
//! Author: Christi Mahu
//!
//! The three daily collections PulseBot reads from the provider, with both of
//! their spellings: the URL path segment (`daily_sleep`) and the name the value
//! is bound to inside prompt templates (`dailySleep`).
//!
use crate::core::error::PulseError;
use std::{fmt, str::FromStr};

/// A fixed provider endpoint under `/v2/usercollection/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Resource {
    #[value(name = "daily_activity", alias = "dailyActivity")]
    DailyActivity,
    #[value(name = "daily_readiness", alias = "dailyReadiness")]
    DailyReadiness,
    #[value(name = "daily_sleep", alias = "dailySleep")]
    DailySleep,
}

impl Resource {
    pub const ALL: [Resource; 3] = [
        Resource::DailyActivity,
        Resource::DailyReadiness,
        Resource::DailySleep,
    ];

    /// Path segment appended to `/v2/usercollection/`.
    pub fn path_segment(self) -> &'static str {
        match self {
            Resource::DailyActivity => "daily_activity",
            Resource::DailyReadiness => "daily_readiness",
            Resource::DailySleep => "daily_sleep",
        }
    }

    /// Variable name used in prompt templates.
    pub fn prompt_variable(self) -> &'static str {
        match self {
            Resource::DailyActivity => "dailyActivity",
            Resource::DailyReadiness => "dailyReadiness",
            Resource::DailySleep => "dailySleep",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for Resource {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.path_segment() == s || r.prompt_variable() == s)
            .ok_or_else(|| {
                PulseError::ArgumentParsing(format!(
                    "Unknown resource '{}'. Expected one of: daily_activity, daily_readiness, daily_sleep.",
                    s
                ))
            })
    }
}
