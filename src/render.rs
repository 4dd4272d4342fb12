//! Server-rendered pages.
//!
//! Each page is an askama template under `templates/`, all extending
//! `layout.html`. Values are auto-escaped by askama. Colours and links coming
//! from the backend are checked here before they reach `style` or `href`.

use askama::Template;
use askama_web::WebTemplate;
use chrono::{Datelike, Weekday};

use crate::stats::{
    ContributionCalendar, GitHubStats, GitHubUser, LanguageStats, PinnedRepository, TopRepository,
    WrappedData, format_share,
};

const CELL_SIZE: u32 = 10;
const CELL_GAP: u32 = 3;
const DAYS_PER_WEEK: u32 = 7;

const EMPTY_DAY_COLOR: &str = "#161b22";
const FALLBACK_LANGUAGE_COLOR: &str = "#666";

/// Legend swatches, quietest to busiest.
pub const LEGEND: [&str; 5] = ["#161b22", "#0e4429", "#006d32", "#26a641", "#39d353"];

/// Hex colour (`#rgb`, `#rrggbb`, with optional alpha) or `fallback`.
fn css_color(color: Option<&str>, fallback: &'static str) -> String {
    match color {
        Some(c)
            if c.starts_with('#')
                && matches!(c.len() - 1, 3 | 4 | 6 | 8)
                && c[1..].chars().all(|ch| ch.is_ascii_hexdigit()) =>
        {
            c.to_string()
        }
        _ => fallback.to_string(),
    }
}

/// Only http(s) links are emitted.
fn safe_url(url: Option<&str>) -> Option<String> {
    url.filter(|u| u.starts_with("https://") || u.starts_with("http://"))
        .map(str::to_string)
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.filter(|s| !s.is_empty()).map(str::to_string)
}

/// Entry page with a form that navigates to `/{username}`.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomePage {
    pub year: i32,
}

impl HomePage {
    pub fn new(year: i32) -> Self {
        Self { year }
    }
}

/// Fallback shown when the backend has nothing for `username`.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub year: i32,
    pub username: String,
}

impl NotFoundPage {
    pub fn new(username: &str, year: i32) -> Self {
        Self {
            year,
            username: username.to_string(),
        }
    }
}

pub struct LanguageBadge {
    pub name: String,
    pub color: String,
}

impl LanguageBadge {
    fn new(name: Option<&str>, color: Option<&str>) -> Option<Self> {
        non_empty(name).map(|name| Self {
            name,
            color: css_color(color, FALLBACK_LANGUAGE_COLOR),
        })
    }
}

pub struct LanguageRow {
    pub name: String,
    pub color: String,
    pub share: String,
}

pub struct TopRepoCard {
    pub name: String,
    pub language: Option<LanguageBadge>,
    pub stars: u64,
    pub forks: u64,
}

pub struct PinnedCard {
    pub name: String,
    pub href: String,
    pub description: Option<String>,
    pub language: Option<LanguageBadge>,
    pub stars: Option<u64>,
    pub forks: Option<u64>,
}

pub struct CalendarCell {
    pub x: u32,
    pub y: u32,
    pub fill: String,
    pub count: u64,
    pub date: String,
}

/// Heatmap geometry and cells, one column per week.
pub struct Heatmap {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub cells: Vec<CalendarCell>,
}

impl Heatmap {
    pub fn new(calendar: &ContributionCalendar) -> Self {
        let step = CELL_SIZE + CELL_GAP;
        let weeks = calendar.weeks.len() as u32;

        let mut cells = Vec::new();
        for (wi, week) in calendar.weeks.iter().enumerate() {
            let x = wi as u32 * step;
            for (di, day) in week.contribution_days.iter().enumerate() {
                // Partial first/last weeks keep their weekday row when the date parses.
                let row = day
                    .parsed_date()
                    .map(|d| weekday_row(d.weekday()))
                    .unwrap_or(di as u32)
                    .min(DAYS_PER_WEEK - 1);
                cells.push(CalendarCell {
                    x,
                    y: row * step,
                    fill: css_color(day.color.as_deref(), EMPTY_DAY_COLOR),
                    count: day.contribution_count,
                    date: day.date.clone(),
                });
            }
        }

        Self {
            width: (weeks * step).saturating_sub(CELL_GAP).max(CELL_SIZE),
            height: DAYS_PER_WEEK * step - CELL_GAP,
            cell_size: CELL_SIZE,
            cells,
        }
    }
}

fn weekday_row(day: Weekday) -> u32 {
    day.num_days_from_sunday()
}

/// Full profile page for a user with data.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfilePage {
    pub year: i32,
    pub calendar_year: i32,

    pub display_name: String,
    pub avatar: Option<String>,
    pub avatar_alt: String,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub twitter: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,

    pub heatmap: Heatmap,
    pub total_contributions: u64,
    pub legend: [&'static str; 5],

    pub commits: u64,
    pub issues_closed: u64,
    pub prs_merged: u64,
    pub stars: u64,
    pub forks: u64,
    pub languages: Vec<LanguageRow>,
    pub top_repo: Option<TopRepoCard>,
    pub pinned: Vec<PinnedCard>,
}

impl ProfilePage {
    pub fn new(username: &str, data: &WrappedData, year: i32) -> Self {
        let user = &data.user;
        let stats = &data.stats;
        let calendar = &stats.contribution_calendar;

        Self {
            year,
            calendar_year: calendar.year().unwrap_or(year),

            display_name: non_empty(user.name.as_deref()).unwrap_or_else(|| username.to_string()),
            avatar: safe_url(user.avatar_url.as_deref()),
            avatar_alt: user.username.clone().unwrap_or_default(),
            bio: non_empty(user.bio.as_deref()),
            company: non_empty(user.company.as_deref()),
            blog: safe_url(user.blog_url.as_deref()),
            twitter: non_empty(user.twitter_username.as_deref()),
            followers: user.followers,
            following: user.following,
            public_repos: user.public_repos,

            heatmap: Heatmap::new(calendar),
            total_contributions: calendar.total_contributions(),
            legend: LEGEND,

            commits: stats.total_commits,
            issues_closed: stats.total_issues_closed,
            prs_merged: stats.total_pull_requests_closed,
            stars: stats.total_stars,
            forks: stats.total_forks,
            languages: language_rows(stats),
            top_repo: stats
                .top_repository
                .as_ref()
                .filter(|r| !r.name.is_empty())
                .map(top_repo_card),
            pinned: pinned_cards(user),
        }
    }
}

fn language_rows(stats: &GitHubStats) -> Vec<LanguageRow> {
    stats
        .top_languages()
        .iter()
        .map(|lang: &LanguageStats| LanguageRow {
            name: lang.language.clone(),
            color: css_color(lang.color.as_deref(), FALLBACK_LANGUAGE_COLOR),
            share: format_share(stats.language_share(lang)),
        })
        .collect()
}

fn top_repo_card(repo: &TopRepository) -> TopRepoCard {
    TopRepoCard {
        name: repo.name.clone(),
        language: LanguageBadge::new(
            repo.top_language.as_deref(),
            repo.top_language_color.as_deref(),
        ),
        stars: repo.stars,
        forks: repo.forks,
    }
}

fn pinned_cards(user: &GitHubUser) -> Vec<PinnedCard> {
    user.pinned_repositories.iter().map(pinned_card).collect()
}

fn pinned_card(repo: &PinnedRepository) -> PinnedCard {
    PinnedCard {
        name: repo.name.clone(),
        href: safe_url(repo.url.as_deref()).unwrap_or_else(|| "#".to_string()),
        description: non_empty(repo.description.as_deref()),
        language: LanguageBadge::new(
            repo.top_language.as_deref(),
            repo.top_language_color.as_deref(),
        ),
        // Zero counts are hidden along with missing ones.
        stars: repo.stars.filter(|&n| n > 0),
        forks: repo.fork_count.filter(|&n| n > 0),
    }
}
