//! Section content.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::{days_left, korean_date, weekday_label, ContestInfo};
use crate::board::Category;

/// Deadline countdown shown on the overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Countdown {
    Open { days_left: i64, label: String },
    Closed { label: String },
}

impl Countdown {
    pub fn new(deadline: NaiveDate, today: NaiveDate) -> Self {
        let days = days_left(deadline, today);
        if days > 0 {
            Countdown::Open {
                days_left: days,
                label: format!("마감까지 {days}일 남았습니다"),
            }
        } else {
            Countdown::Closed {
                label: "접수 마감".to_string(),
            }
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Countdown::Open { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PrizeTier {
    pub icon: &'static str,
    pub rank: &'static str,
    pub recipients: &'static str,
    pub award: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Milestone {
    pub event: &'static str,
    pub date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicGroup {
    pub title: &'static str,
    pub examples: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Criterion {
    pub name: &'static str,
    pub description: &'static str,
    pub points: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

/// Structured content of one section.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionContent {
    Overview {
        title: String,
        subtitle: &'static str,
        organizer: String,
        purposes: Vec<&'static str>,
        eligibility: Vec<&'static str>,
        eligibility_note: &'static str,
        countdown: Countdown,
    },
    Prizes {
        tiers: Vec<PrizeTier>,
        note: &'static str,
    },
    Schedule {
        milestones: Vec<Milestone>,
    },
    Topics {
        groups: Vec<TopicGroup>,
        note: &'static str,
    },
    Submission {
        required: Vec<&'static str>,
        optional: Vec<&'static str>,
        email: String,
        period: String,
        note: &'static str,
    },
    Criteria {
        items: Vec<Criterion>,
        total_points: u32,
    },
    Faq {
        entries: Vec<FaqEntry>,
    },
    Contact {
        department: &'static str,
        email: String,
        phone: String,
        person: &'static str,
        inquiry_topics: Vec<&'static str>,
    },
    Community {
        categories: Vec<&'static str>,
        board_path: &'static str,
    },
}

const OPENING: (i32, u32, u32) = (2025, 6, 25);
const REVIEW: ((i32, u32, u32), (i32, u32, u32)) = ((2025, 7, 21), (2025, 7, 25));
const ANNOUNCEMENT: (i32, u32, u32) = (2025, 7, 30);

fn ymd((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

/// "2025. 6. 25.(수)"
fn short_date(date: NaiveDate) -> String {
    format!(
        "{}. {}. {}.({})",
        date.year(),
        date.month(),
        date.day(),
        weekday_label(date)
    )
}

/// "7월 25일(금)"
fn month_day(date: NaiveDate) -> String {
    format!("{}월 {}일({})", date.month(), date.day(), weekday_label(date))
}

pub(super) fn overview(info: &ContestInfo, today: NaiveDate) -> SectionContent {
    SectionContent::Overview {
        title: info.title.clone(),
        subtitle: "AI 활용 교육용 앱 개발 공모전",
        organizer: info.organizer.clone(),
        purposes: vec![
            "AI 기술을 활용한 교육용 앱 개발을 통한 교실 수업 혁신",
            "교직원과 예비교사가 참여하는 현장 중심 교육 실천 문화 조성",
            "공공성과 실용성을 갖춘 앱으로 AI 교육 생태계 기반 마련",
        ],
        eligibility: vec![
            "전국 초·중·고·특수학교 교직원",
            "교육전문직원",
            "교육대학교 및 사범대학 재학생(예비교사)",
        ],
        eligibility_note: "개인 단위로만 참가 가능 (팀 참가 불가)",
        countdown: Countdown::new(info.deadline, today),
    }
}

pub(super) fn prizes() -> SectionContent {
    let tier = |icon, rank, recipients, award| PrizeTier {
        icon,
        rank,
        recipients,
        award,
    };
    SectionContent::Prizes {
        tiers: vec![
            tier("🥇", "대상", "1명", "100만원"),
            tier("🥈", "금상", "2명", "50만원"),
            tier("🥉", "은상", "3명", "30만원"),
            tier("🏅", "동상", "5명", "10만원"),
            tier("🎖️", "장려상", "10명 내외", "소정의 상품"),
        ],
        note: "상금은 제세공과금 공제 후 지급됩니다.",
    }
}

pub(super) fn schedule(info: &ContestInfo) -> SectionContent {
    let opening = ymd(OPENING);
    let (review_start, review_end) = (ymd(REVIEW.0), ymd(REVIEW.1));
    let announcement = ymd(ANNOUNCEMENT);

    SectionContent::Schedule {
        milestones: vec![
            Milestone {
                event: "공고 및 접수 시작",
                date: opening,
                end_date: None,
                label: korean_date(opening),
            },
            Milestone {
                event: "접수 마감",
                date: info.deadline,
                end_date: None,
                label: korean_date(info.deadline),
            },
            Milestone {
                event: "심사 기간",
                date: review_start,
                end_date: Some(review_end),
                label: format!("{} ~ {}", korean_date(review_start), month_day(review_end)),
            },
            Milestone {
                event: "결과 발표",
                date: announcement,
                end_date: None,
                label: korean_date(announcement),
            },
        ],
    }
}

pub(super) fn topics() -> SectionContent {
    let group = |title, examples: [&'static str; 3]| TopicGroup {
        title,
        examples: examples.to_vec(),
    };
    SectionContent::Topics {
        groups: vec![
            group(
                "① 수업 및 학습 지원",
                [
                    "개별 맞춤형 학습 경로 추천",
                    "AI를 활용한 질의응답, 요약, 퀴즈 생성",
                    "학생의 학습 패턴 분석 및 피드백 제공",
                ],
            ),
            group(
                "② 생활·정서 지원",
                [
                    "AI 기반 자기성찰, 감정일기, 스트레스 진단",
                    "생활 습관 관리, 학습 동기 유발 도우미",
                    "교실 속 SEL(Social Emotional Learning) 도구",
                ],
            ),
            group(
                "③ 평가 및 피드백",
                [
                    "서술형/논술형 문항 채점 보조",
                    "학습 진단 및 성취 피드백 자동화",
                    "교사용 평가 보조 앱",
                ],
            ),
            group(
                "④ 교육행정 및 업무 경감",
                [
                    "가정통신문 자동 작성, 학급 일정 자동 정리",
                    "수업 계획서/자료 추천, 보고서 초안 생성",
                    "상담 기록 자동 정리 및 요약",
                ],
            ),
            group(
                "⑤ 기타 AI 기술 기반의 창의적 교육활용",
                [
                    "교실 속 생성형 AI 도구",
                    "AI 윤리교육을 위한 시뮬레이션 앱",
                    "지역/학교 맥락에 맞춘 문제 해결형 앱",
                ],
            ),
        ],
        note: "위 범주를 참고하여 교육현장의 실제 필요에 기반한 앱을 자유롭게 기획·개발하세요!",
    }
}

pub(super) fn submission(info: &ContestInfo) -> SectionContent {
    SectionContent::Submission {
        required: vec![
            "앱 실행 파일 또는 웹앱 접속 링크",
            "앱 소개서 1부 (PDF, 5쪽 이내)",
            "소스코드 전체 (zip 압축 파일)",
            "개인정보 수집 및 이용 동의서 1부",
        ],
        optional: vec!["시연 영상 (3분 이내)"],
        email: info.contact_email.clone(),
        period: format!(
            "{} ~ {}",
            short_date(ymd(OPENING)),
            short_date(info.deadline)
        ),
        note: "파일 용량이 클 경우 클라우드 링크(Google Drive, OneDrive 등) 첨부",
    }
}

pub(super) fn criteria() -> SectionContent {
    let items = vec![
        Criterion {
            name: "창의성",
            description: "기존과 차별화된 문제 해결 방식인가",
            points: 25,
        },
        Criterion {
            name: "교육 효과성",
            description: "수업, 생활, 행정 등 교육현장 활용 가능성",
            points: 25,
        },
        Criterion {
            name: "실현 가능성",
            description: "기술적 완성도와 사용 안정성",
            points: 20,
        },
        Criterion {
            name: "AI 활용성",
            description: "AI 기술 적용의 적절성과 기능적 의미",
            points: 20,
        },
        Criterion {
            name: "완성도",
            description: "앱 구성의 논리성, 디자인, 사용자 편의성",
            points: 10,
        },
    ];
    let total_points = items.iter().map(|c| c.points).sum();
    SectionContent::Criteria {
        items,
        total_points,
    }
}

pub(super) fn faq() -> SectionContent {
    let entry = |question, answer| FaqEntry { question, answer };
    SectionContent::Faq {
        entries: vec![
            entry(
                "팀으로 참가할 수 있나요?",
                "아니요. 개인 단위로만 참가 가능하며, 팀 단위 접수는 불가합니다.",
            ),
            entry(
                "예비교사도 참가할 수 있나요?",
                "네! 교육대학교 및 사범대학 재학생이라면 참가 가능합니다.",
            ),
            entry(
                "AI 기술을 꼭 사용해야 하나요?",
                "네, 모든 응모작은 AI 요소를 반드시 포함해야 합니다. AI 모델은 자유롭게 선택할 수 있습니다.",
            ),
            entry(
                "오픈소스를 활용해도 되나요?",
                "네, 가능합니다. 단, 라이선스 확인 및 출처 명시는 필수입니다.",
            ),
            entry(
                "제출한 앱의 저작권은 어떻게 되나요?",
                "출품작의 저작재산권은 경상북도교육청에 귀속되며, 향후 비영리적 교육 목적으로 활용됩니다.",
            ),
            entry(
                "파일 용량이 너무 큰데 어떻게 제출하나요?",
                "Google Drive, OneDrive 등 클라우드 링크를 이메일에 첨부하여 제출하시면 됩니다.",
            ),
        ],
    }
}

/// Topics offered on the inquiry form.
pub const INQUIRY_TOPICS: [&str; 4] = ["참가 자격", "제출 방법", "심사 기준", "기타"];

pub(super) fn contact(info: &ContestInfo) -> SectionContent {
    SectionContent::Contact {
        department: "경상북도교육청 기획예산관",
        email: info.contact_email.clone(),
        phone: info.contact_phone.clone(),
        person: "공모전 담당자",
        inquiry_topics: INQUIRY_TOPICS.to_vec(),
    }
}

pub(super) fn community() -> SectionContent {
    SectionContent::Community {
        categories: Category::ALL.iter().map(|c| c.as_str()).collect(),
        board_path: "/api/board",
    }
}
