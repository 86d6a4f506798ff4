//! Record extraction
//!
//! A pure transformation from a fetched discussion page to a [`Record`].

mod extractor;
mod record;
pub(crate) mod text;

pub use extractor::{extract_record, parse_vote, question_number_from_title, topic_from_title};
pub use record::{Choice, Comment, Record, Vote, MISC_TOPIC, NO_TITLE};
