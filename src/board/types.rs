//! Post categories and derived status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category chosen by the author when submitting a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// A question awaiting an answer from the organizers.
    Question,
    /// Information shared with other participants.
    InfoShare,
    /// An idea or suggestion.
    Idea,
    /// Anything else.
    #[default]
    Other,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 4] = [
        Category::Question,
        Category::InfoShare,
        Category::Idea,
        Category::Other,
    ];

    /// Label persisted in the `category` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Question => "질문",
            Category::InfoShare => "정보공유",
            Category::Idea => "아이디어",
            Category::Other => "기타",
        }
    }

    /// Key used in the JSON API.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Question => "question",
            Category::InfoShare => "info_share",
            Category::Idea => "idea",
            Category::Other => "other",
        }
    }

    /// Decode a stored label, treating unknown labels as `Other`.
    pub fn from_stored(label: &str) -> Self {
        label.parse().unwrap_or_else(|_| {
            tracing::warn!(label, "unknown stored category, treating as other");
            Category::Other
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts the stored label, the API key, or the English name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s || c.key().eq_ignore_ascii_case(s))
            .or_else(|| match s.to_lowercase().as_str() {
                "정보 공유" | "infoshare" | "info" => Some(Category::InfoShare),
                _ => None,
            })
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Display state of a post, derived from its category and replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    /// At least one reply exists.
    Answered,
    /// A question with no reply yet.
    Waiting,
    /// Not a question and not answered.
    None,
}

impl PostStatus {
    /// Derive the status. Never stored.
    pub fn derive(category: Category, reply_count: usize) -> Self {
        if reply_count > 0 {
            PostStatus::Answered
        } else if category == Category::Question {
            PostStatus::Waiting
        } else {
            PostStatus::None
        }
    }

    /// Badge text, if any.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            PostStatus::Answered => Some("답변 완료"),
            PostStatus::Waiting => Some("답변 대기"),
            PostStatus::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_as_str() {
        assert_eq!(Category::Question.as_str(), "질문");
        assert_eq!(Category::InfoShare.as_str(), "정보공유");
        assert_eq!(Category::Idea.as_str(), "아이디어");
        assert_eq!(Category::Other.as_str(), "기타");
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("질문".parse::<Category>().unwrap(), Category::Question);
        assert_eq!("question".parse::<Category>().unwrap(), Category::Question);
        assert_eq!("Question".parse::<Category>().unwrap(), Category::Question);
        assert_eq!("info_share".parse::<Category>().unwrap(), Category::InfoShare);
        assert_eq!("정보 공유".parse::<Category>().unwrap(), Category::InfoShare);
        assert_eq!("IDEA".parse::<Category>().unwrap(), Category::Idea);
        assert!("bogus".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_from_stored_unknown() {
        assert_eq!(Category::from_stored("무엇"), Category::Other);
        assert_eq!(Category::from_stored("아이디어"), Category::Idea);
    }

    #[test]
    fn test_category_serde_keys() {
        let json = serde_json::to_string(&Category::InfoShare).unwrap();
        assert_eq!(json, "\"info_share\"");
        let parsed: Category = serde_json::from_str("\"question\"").unwrap();
        assert_eq!(parsed, Category::Question);
    }

    #[test]
    fn test_status_derivation() {
        for category in Category::ALL {
            assert_eq!(PostStatus::derive(category, 1), PostStatus::Answered);
            assert_eq!(PostStatus::derive(category, 3), PostStatus::Answered);
        }
        assert_eq!(PostStatus::derive(Category::Question, 0), PostStatus::Waiting);
        assert_eq!(PostStatus::derive(Category::InfoShare, 0), PostStatus::None);
        assert_eq!(PostStatus::derive(Category::Idea, 0), PostStatus::None);
        assert_eq!(PostStatus::derive(Category::Other, 0), PostStatus::None);
    }

    #[test]
    fn test_status_label() {
        assert_eq!(PostStatus::Answered.label(), Some("답변 완료"));
        assert_eq!(PostStatus::Waiting.label(), Some("답변 대기"));
        assert_eq!(PostStatus::None.label(), None);
    }
}
