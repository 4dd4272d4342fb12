//! Read-only view model of the payload served by the stats backend at
//! `/api/stats/{username}`. Field names follow the backend's camelCase JSON.
//! Numbers the backend leaves out default to zero and lists to empty, so a
//! sparse payload still renders.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

/// Number of languages shown in the "Top Languages" card.
pub const TOP_LANGUAGES: usize = 5;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub data: Option<WrappedData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WrappedData {
    #[serde(default)]
    pub username: Option<String>,
    pub user: GitHubUser,
    pub stats: GitHubStats,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitHubUser {
    pub username: Option<String>,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub blog_url: Option<String>,
    pub twitter_username: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    pub pinned_repositories: Vec<PinnedRepository>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PinnedRepository {
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub stars: Option<u64>,
    pub fork_count: Option<u64>,
    pub top_language: Option<String>,
    pub top_language_color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitHubStats {
    pub total_commits: u64,
    pub total_issues_closed: u64,
    pub total_pull_requests_closed: u64,
    pub total_stars: u64,
    pub total_forks: u64,
    pub languages_stats: Vec<LanguageStats>,
    pub contribution_calendar: ContributionCalendar,
    pub top_repository: Option<TopRepository>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageStats {
    pub language: String,
    pub color: Option<String>,
    pub lines_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopRepository {
    pub name: String,
    pub top_language: Option<String>,
    pub top_language_color: Option<String>,
    pub stars: u64,
    pub forks: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContributionCalendar {
    pub total_contributions: Option<u64>,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Week {
    pub contribution_days: Vec<ContributionDay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContributionDay {
    pub contribution_count: u64,
    pub date: String,
    pub color: Option<String>,
}

impl GitHubStats {
    /// Sum of `linesCount` across every listed language, not just the top few.
    pub fn total_lines(&self) -> u64 {
        self.languages_stats
            .iter()
            .map(|l| l.lines_count.unwrap_or(0))
            .fold(0u64, u64::saturating_add)
    }

    /// Languages in payload order, capped at [`TOP_LANGUAGES`].
    pub fn top_languages(&self) -> &[LanguageStats] {
        let n = self.languages_stats.len().min(TOP_LANGUAGES);
        &self.languages_stats[..n]
    }

    /// Share of `lang` in the total line count, in percent.
    pub fn language_share(&self, lang: &LanguageStats) -> f64 {
        let total = self.total_lines();
        if total == 0 {
            return 0.0;
        }
        lang.lines_count.unwrap_or(0) as f64 / total as f64 * 100.0
    }
}

/// Formats a percentage with one decimal place, e.g. `42.9`. Ties round up.
pub fn format_share(share: f64) -> String {
    format!("{:.1}", (share * 10.0).round() / 10.0)
}

impl ContributionDay {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

impl ContributionCalendar {
    pub fn days(&self) -> impl Iterator<Item = &ContributionDay> {
        self.weeks.iter().flat_map(|w| w.contribution_days.iter())
    }

    /// Year the calendar covers, taken from its latest parsable date.
    pub fn year(&self) -> Option<i32> {
        self.days()
            .filter_map(ContributionDay::parsed_date)
            .max()
            .map(|d| d.year())
    }

    /// Reported total, or the sum of the daily counts when the backend omits it.
    pub fn total_contributions(&self) -> u64 {
        self.total_contributions.unwrap_or_else(|| {
            self.days()
                .map(|d| d.contribution_count)
                .fold(0u64, u64::saturating_add)
        })
    }
}
