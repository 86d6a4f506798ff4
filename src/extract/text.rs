//! Text helpers shared by link and record extraction

use lazy_static::lazy_static;
use scraper::{ElementRef, Selector};

const E: &str = "Invalid selector";
lazy_static! {
    pub(crate) static ref ANCHOR: Selector = Selector::parse("a[href]").expect(E);
    pub(crate) static ref HEADER: Selector = Selector::parse("h1.discussion-list-header").expect(E);
    pub(crate) static ref TITLE: Selector = Selector::parse("title").expect(E);
    pub(crate) static ref QUESTION_BODY: Selector = Selector::parse("div.question-body").expect(E);
    pub(crate) static ref CARD_TEXT: Selector = Selector::parse("p.card-text").expect(E);
    pub(crate) static ref CHOICES: Selector =
        Selector::parse("div.question-choices-container").expect(E);
    pub(crate) static ref CHOICE_ITEM: Selector = Selector::parse("li.multi-choice-item").expect(E);
    pub(crate) static ref CHOICE_LETTER: Selector =
        Selector::parse("span.multi-choice-letter").expect(E);
    pub(crate) static ref CORRECT_ANSWER: Selector = Selector::parse("span.correct-answer").expect(E);
    pub(crate) static ref VOTING_SUMMARY: Selector = Selector::parse("div.voting-summary").expect(E);
    pub(crate) static ref VOTE_BAR: Selector = Selector::parse("div.vote-bar").expect(E);
    pub(crate) static ref DISCUSSION: Selector = Selector::parse("div.discussion-container").expect(E);
    pub(crate) static ref COMMENT: Selector = Selector::parse("div.comment-container").expect(E);
    pub(crate) static ref SELECTED_ANSWERS: Selector =
        Selector::parse("div.comment-selected-answers").expect(E);
    pub(crate) static ref USERNAME: Selector = Selector::parse("h5.comment-username").expect(E);
    pub(crate) static ref COMMENT_DATE: Selector = Selector::parse("span.comment-date").expect(E);
    pub(crate) static ref COMMENT_CONTENT: Selector = Selector::parse("div.comment-content").expect(E);
    pub(crate) static ref SPAN: Selector = Selector::parse("span").expect(E);
}

/// Trimmed, non-empty text nodes of `element` joined with `separator`
pub fn joined_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Trimmed text nodes concatenated without a separator
pub fn stripped_text(element: ElementRef<'_>) -> String {
    joined_text(element, "")
}

/// First descendant of `scope` matching `sel`
pub fn first<'a>(scope: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    scope.select(sel).next()
}

/// All descendants of `scope` matching `sel`, in document order
pub fn all<'a>(scope: ElementRef<'a>, sel: &Selector) -> Vec<ElementRef<'a>> {
    scope.select(sel).collect()
}
