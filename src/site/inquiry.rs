//! Contact form submissions.

use serde::Deserialize;

use super::content::INQUIRY_TOPICS;
use crate::{BoardError, Result};

/// Reply shown once an inquiry is accepted.
pub const INQUIRY_RECEIVED: &str =
    "문의가 접수되었습니다! 담당자가 확인 후 이메일로 답변 드리겠습니다.";

/// A message sent from the contact form.
#[derive(Debug, Clone, Deserialize)]
pub struct Inquiry {
    pub name: String,
    pub email: String,
    pub topic: String,
    pub message: String,
}

impl Inquiry {
    /// Check required fields and the topic.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(BoardError::Validation(format!("{field} must not be empty")));
            }
        }
        if !self.email.contains('@') {
            return Err(BoardError::Validation("email is not an address".to_string()));
        }
        if !INQUIRY_TOPICS.contains(&self.topic.trim()) {
            return Err(BoardError::Validation(format!(
                "topic must be one of: {}",
                INQUIRY_TOPICS.join(", ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inquiry() -> Inquiry {
        Inquiry {
            name: "Kim".to_string(),
            email: "kim@example.com".to_string(),
            topic: "제출 방법".to_string(),
            message: "zip 용량 제한이 있나요?".to_string(),
        }
    }

    #[test]
    fn test_valid() {
        assert!(inquiry().validate().is_ok());
    }

    #[test]
    fn test_missing_fields() {
        let mut i = inquiry();
        i.message = " ".to_string();
        assert!(matches!(i.validate(), Err(BoardError::Validation(_))));

        let mut i = inquiry();
        i.email = "nope".to_string();
        assert!(matches!(i.validate(), Err(BoardError::Validation(_))));
    }

    #[test]
    fn test_unknown_topic() {
        let mut i = inquiry();
        i.topic = "상금".to_string();
        assert!(matches!(i.validate(), Err(BoardError::Validation(_))));
    }
}
