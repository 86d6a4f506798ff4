//! Discussion page extractor
//!
//! Best-effort: every lookup yields an `Option` and a missing element only
//! blanks its own field. The one fallback value is the title sentinel.

use crate::extract::record::{Choice, Comment, Record, Vote, MISC_TOPIC, NO_TITLE};
use crate::extract::text::{
    all, first, joined_text, stripped_text, CARD_TEXT, CHOICES, CHOICE_ITEM, CHOICE_LETTER,
    COMMENT, COMMENT_CONTENT, COMMENT_DATE, CORRECT_ANSWER, DISCUSSION, HEADER, QUESTION_BODY,
    SELECTED_ANSWERS, SPAN, TITLE, USERNAME, VOTE_BAR, VOTING_SUMMARY,
};
use lazy_regex::regex_captures;
use scraper::{ElementRef, Html};

/// Extracts a [`Record`] from a discussion page body
///
/// # Example
///
/// ```
/// use discussion_scraper::extract::extract_record;
///
/// let html = r#"<h1 class="discussion-list-header">Exam X topic 2 question 14 discussion</h1>"#;
/// let record = extract_record(html, "https://example.com/discussions/x/view/1/");
/// assert_eq!(record.topic, "Topic 2");
/// assert_eq!(record.question_number, Some(14));
/// ```
pub fn extract_record(html: &str, url: &str) -> Record {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let title = extract_title(root).unwrap_or_else(|| NO_TITLE.to_string());
    let topic = topic_from_title(&title).unwrap_or_else(|| MISC_TOPIC.to_string());
    let question_number = question_number_from_title(&title);

    Record {
        url: url.to_string(),
        topic,
        question_number,
        question_text: extract_question_text(root),
        choices: extract_choices(root),
        correct_answer: extract_correct_answer(root),
        vote_distribution: extract_votes(root),
        discussion: extract_discussion(root),
        title,
    }
}

fn extract_title(root: ElementRef<'_>) -> Option<String> {
    first(root, &HEADER)
        .or_else(|| first(root, &TITLE))
        .map(stripped_text)
}

/// `Topic <n>` from a case-insensitive "topic <n>" in the title
pub fn topic_from_title(title: &str) -> Option<String> {
    let (_, number) = regex_captures!(r"(?i)topic\W*(\d+)", title)?;
    let number: u64 = number.parse().ok()?;
    Some(format!("Topic {}", number))
}

/// Number from a case-insensitive "question <n>" in the title
pub fn question_number_from_title(title: &str) -> Option<u64> {
    let (_, number) = regex_captures!(r"(?i)question\W*(\d+)", title)?;
    number.parse().ok()
}

fn extract_question_text(root: ElementRef<'_>) -> Option<String> {
    let body = first(root, &QUESTION_BODY)?;
    let paragraph = first(body, &CARD_TEXT)?;
    Some(joined_text(paragraph, "\n"))
}

fn extract_choices(root: ElementRef<'_>) -> Vec<Choice> {
    let Some(container) = first(root, &CHOICES) else {
        return Vec::new();
    };

    all(container, &CHOICE_ITEM)
        .into_iter()
        .filter_map(extract_choice)
        .collect()
}

fn extract_choice(item: ElementRef<'_>) -> Option<Choice> {
    let letter = stripped_text(first(item, &CHOICE_LETTER)?).replace('.', "");
    let text = stripped_text(item)
        .replace(&format!("{}.", letter), "")
        .trim()
        .to_string();
    Some(Choice { letter, text })
}

fn extract_correct_answer(root: ElementRef<'_>) -> Option<String> {
    first(root, &CORRECT_ANSWER).map(stripped_text)
}

fn extract_votes(root: ElementRef<'_>) -> Vec<Vote> {
    let Some(summary) = first(root, &VOTING_SUMMARY) else {
        return Vec::new();
    };

    all(summary, &VOTE_BAR)
        .into_iter()
        .filter_map(|bar| parse_vote(&stripped_text(bar)))
        .collect()
}

/// Parses vote bar text such as `B (64%)`
pub fn parse_vote(text: &str) -> Option<Vote> {
    let (_, answer, percentage) = regex_captures!(r"([A-Z]) \((\d+)%\)", text)?;
    Some(Vote {
        answer: answer.to_string(),
        percentage: percentage.parse().ok()?,
    })
}

fn extract_discussion(root: ElementRef<'_>) -> Vec<Comment> {
    let Some(container) = first(root, &DISCUSSION) else {
        return Vec::new();
    };

    all(container, &COMMENT)
        .into_iter()
        .filter_map(extract_comment)
        .collect()
}

/// Only comments that declare a selected answer are kept
fn extract_comment(comment: ElementRef<'_>) -> Option<Comment> {
    let selected = first(comment, &SELECTED_ANSWERS)?;
    let author = first(comment, &USERNAME)?;
    let date = first(comment, &COMMENT_DATE)?;
    let content = first(comment, &COMMENT_CONTENT)?;
    let answer = first(selected, &SPAN)?;

    Some(Comment {
        author: stripped_text(author),
        date: date.value().attr("title").map(str::to_string),
        comment: joined_text(content, "\n"),
        selected_answer: stripped_text(answer),
    })
}
