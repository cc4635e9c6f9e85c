//! Contest microsite.
//!
//! The site is a fixed menu of sections. [`MenuSection`] is closed, and
//! [`MenuSection::content`] matches every variant, so adding a section
//! means adding its content.

mod content;
mod inquiry;

pub use content::{
    Countdown, Criterion, FaqEntry, Milestone, PrizeTier, SectionContent, TopicGroup,
    INQUIRY_TOPICS,
};
pub use inquiry::{Inquiry, INQUIRY_RECEIVED};

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::config::ContestConfig;

/// Facts about the contest that vary per deployment.
#[derive(Debug, Clone, Serialize)]
pub struct ContestInfo {
    pub title: String,
    pub organizer: String,
    pub deadline: NaiveDate,
    pub contact_email: String,
    pub contact_phone: String,
}

impl From<&ContestConfig> for ContestInfo {
    fn from(config: &ContestConfig) -> Self {
        Self {
            title: config.title.clone(),
            organizer: config.organizer.clone(),
            deadline: config.deadline,
            contact_email: config.contact_email.clone(),
            contact_phone: config.contact_phone.clone(),
        }
    }
}

impl Default for ContestInfo {
    fn default() -> Self {
        Self::from(&ContestConfig::default())
    }
}

/// Whole days from `today` until `deadline`; negative once it has passed.
pub fn days_left(deadline: NaiveDate, today: NaiveDate) -> i64 {
    (deadline - today).num_days()
}

/// One-character Korean weekday name.
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "월",
        Weekday::Tue => "화",
        Weekday::Wed => "수",
        Weekday::Thu => "목",
        Weekday::Fri => "금",
        Weekday::Sat => "토",
        Weekday::Sun => "일",
    }
}

/// Format a date as "2025년 7월 18일(금)".
pub fn korean_date(date: NaiveDate) -> String {
    format!(
        "{}년 {}월 {}일({})",
        date.year(),
        date.month(),
        date.day(),
        weekday_label(date)
    )
}

/// A microsite section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuSection {
    Overview,
    Prizes,
    Schedule,
    Topics,
    Submission,
    Criteria,
    Faq,
    Contact,
    Community,
}

impl MenuSection {
    /// All sections in menu order.
    pub const ALL: [MenuSection; 9] = [
        MenuSection::Overview,
        MenuSection::Prizes,
        MenuSection::Schedule,
        MenuSection::Topics,
        MenuSection::Submission,
        MenuSection::Criteria,
        MenuSection::Faq,
        MenuSection::Contact,
        MenuSection::Community,
    ];

    /// URL slug.
    pub fn slug(&self) -> &'static str {
        match self {
            MenuSection::Overview => "overview",
            MenuSection::Prizes => "prizes",
            MenuSection::Schedule => "schedule",
            MenuSection::Topics => "topics",
            MenuSection::Submission => "submission",
            MenuSection::Criteria => "criteria",
            MenuSection::Faq => "faq",
            MenuSection::Contact => "contact",
            MenuSection::Community => "community",
        }
    }

    /// Menu title.
    pub fn title(&self) -> &'static str {
        match self {
            MenuSection::Overview => "공모전 개요",
            MenuSection::Prizes => "상금 및 시상",
            MenuSection::Schedule => "일정 및 마감",
            MenuSection::Topics => "공모 주제",
            MenuSection::Submission => "제출 방법",
            MenuSection::Criteria => "심사 기준",
            MenuSection::Faq => "자주 묻는 질문",
            MenuSection::Contact => "문의하기",
            MenuSection::Community => "커뮤니티 게시판",
        }
    }

    /// Menu icon.
    pub fn icon(&self) -> &'static str {
        match self {
            MenuSection::Overview => "📋",
            MenuSection::Prizes => "💰",
            MenuSection::Schedule => "📅",
            MenuSection::Topics => "💡",
            MenuSection::Submission => "📝",
            MenuSection::Criteria => "⚖️",
            MenuSection::Faq => "❓",
            MenuSection::Contact => "📧",
            MenuSection::Community => "💬",
        }
    }

    /// Content of this section as of `today`.
    pub fn content(&self, info: &ContestInfo, today: NaiveDate) -> SectionContent {
        match self {
            MenuSection::Overview => content::overview(info, today),
            MenuSection::Prizes => content::prizes(),
            MenuSection::Schedule => content::schedule(info),
            MenuSection::Topics => content::topics(),
            MenuSection::Submission => content::submission(info),
            MenuSection::Criteria => content::criteria(),
            MenuSection::Faq => content::faq(),
            MenuSection::Contact => content::contact(info),
            MenuSection::Community => content::community(),
        }
    }
}

impl fmt::Display for MenuSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for MenuSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = s.trim().to_lowercase();
        MenuSection::ALL
            .into_iter()
            .find(|section| section.slug() == slug)
            .ok_or_else(|| format!("unknown section: {s}"))
    }
}
