use serde::{Deserialize, Serialize};

/// Title used when a page has neither a discussion header nor a `<title>`
pub const NO_TITLE: &str = "No Title";

/// Topic used when the title names no topic number
pub const MISC_TOPIC: &str = "Misc";

/// Structured content of one discussion page
///
/// Any field except `url`, `title` and `topic` may be absent when the page
/// lacks the corresponding element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub url: String,
    pub title: String,
    pub topic: String,
    pub question_number: Option<u64>,
    pub question_text: Option<String>,
    pub choices: Vec<Choice>,
    pub correct_answer: Option<String>,
    pub vote_distribution: Vec<Vote>,
    pub discussion: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub letter: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub answer: String,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    /// Full timestamp from the date element's `title` attribute
    pub date: Option<String>,
    pub comment: String,
    pub selected_answer: String,
}

impl Record {
    /// Sort key: topic, then question number with a missing number as 0
    pub fn sort_key(&self) -> (&str, u64) {
        (self.topic.as_str(), self.question_number.unwrap_or(0))
    }
}
