//! Line-oriented text transforms and the user-story template.
//!
//! Every [`TextOperation`] works on `\n`-separated lines or on the whole
//! text at once. Counting operations yield a number and everything else
//! yields the transformed text; see [`TextOutput`].

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email pattern compiles")
});
static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("url pattern compiles"));
/// A word starts at an ASCII word character and runs to the next whitespace.
static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_]\S*").expect("word pattern compiles"));

// ── Operations ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextOperation {
    WordCount,
    CharCount,
    RemoveDuplicates,
    SortLines,
    ExtractEmails,
    ExtractUrls,
    ToUppercase,
    ToLowercase,
    ToTitleCase,
    TrimWhitespace,
    AddLineNumbers,
}

impl TextOperation {
    pub const ALL: [TextOperation; 11] = [
        TextOperation::WordCount,
        TextOperation::CharCount,
        TextOperation::RemoveDuplicates,
        TextOperation::SortLines,
        TextOperation::ExtractEmails,
        TextOperation::ExtractUrls,
        TextOperation::ToUppercase,
        TextOperation::ToLowercase,
        TextOperation::ToTitleCase,
        TextOperation::TrimWhitespace,
        TextOperation::AddLineNumbers,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextOperation::WordCount => "word_count",
            TextOperation::CharCount => "char_count",
            TextOperation::RemoveDuplicates => "remove_duplicates",
            TextOperation::SortLines => "sort_lines",
            TextOperation::ExtractEmails => "extract_emails",
            TextOperation::ExtractUrls => "extract_urls",
            TextOperation::ToUppercase => "to_uppercase",
            TextOperation::ToLowercase => "to_lowercase",
            TextOperation::ToTitleCase => "to_title_case",
            TextOperation::TrimWhitespace => "trim_whitespace",
            TextOperation::AddLineNumbers => "add_line_numbers",
        }
    }
}

impl fmt::Display for TextOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextOperation {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TextOperation::ALL
            .into_iter()
            .find(|op| op.name() == wanted)
            .ok_or_else(|| {
                CalendarError::InvalidArgument(format!("unknown text operation '{wanted}'"))
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    /// Sort descending (`sort_lines` only).
    pub reverse: bool,
}

/// A count, or the transformed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TextOutput {
    Count(usize),
    Text(String),
}

/// Apply `op` to `text`.
///
/// Blank text has zero words. Characters are counted as Unicode scalar
/// values. Extractions return one match per line in order of appearance.
///
/// # Examples
///
/// ```
/// use ba_calendar::text::{apply, TextOperation, TextOptions, TextOutput};
///
/// let out = apply(TextOperation::AddLineNumbers, "alpha\nbeta", TextOptions::default());
/// assert_eq!(out, TextOutput::Text("1. alpha\n2. beta".into()));
/// ```
pub fn apply(op: TextOperation, text: &str, options: TextOptions) -> TextOutput {
    use TextOperation::*;

    match op {
        WordCount => TextOutput::Count(text.split_whitespace().count()),
        CharCount => TextOutput::Count(text.chars().count()),
        RemoveDuplicates => {
            let mut seen = HashSet::new();
            joined(text.split('\n').filter(|line| seen.insert(*line)))
        }
        SortLines => {
            let mut lines: Vec<&str> = text.split('\n').collect();
            lines.sort_unstable();
            if options.reverse {
                lines.reverse();
            }
            TextOutput::Text(lines.join("\n"))
        }
        ExtractEmails => joined(EMAIL.find_iter(text).map(|m| m.as_str())),
        ExtractUrls => joined(URL.find_iter(text).map(|m| m.as_str())),
        ToUppercase => TextOutput::Text(text.to_uppercase()),
        ToLowercase => TextOutput::Text(text.to_lowercase()),
        ToTitleCase => TextOutput::Text(
            WORD.replace_all(text, |caps: &regex::Captures<'_>| title_word(&caps[0]))
                .into_owned(),
        ),
        TrimWhitespace => joined(text.split('\n').map(str::trim)),
        AddLineNumbers => TextOutput::Text(
            text.split('\n')
                .enumerate()
                .map(|(i, line)| format!("{}. {line}", i + 1))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
    }
}

fn joined<'a>(lines: impl Iterator<Item = &'a str>) -> TextOutput {
    TextOutput::Text(lines.collect::<Vec<_>>().join("\n"))
}

fn title_word(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut titled: String = first.to_uppercase().collect();
    titled.push_str(&chars.as_str().to_lowercase());
    titled
}

// ── User stories ────────────────────────────────────────────────────────────

/// One Given/When/Then scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub precondition: String,
    pub action: String,
    pub outcome: String,
}

/// Acceptance criteria, either structured scenarios or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AcceptanceCriteria {
    Scenarios(Vec<Criterion>),
    Text(String),
}

/// The fields of a business-analysis user story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStory {
    pub role: String,
    pub feature: String,
    pub business_value: String,
    pub placement: String,
    pub visual_type: String,
    pub behavior: String,
    #[serde(default)]
    pub extra_info: Option<String>,
    pub acceptance_criteria: AcceptanceCriteria,
}

/// Renders the story as Markdown in the standard section order. The
/// "Extra Information" section is omitted when `extra_info` is blank.
impl fmt::Display for UserStory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**Requirement**")?;
        writeln!(f, "As a {},", self.role)?;
        writeln!(f, "I want {},", self.feature)?;
        writeln!(f, "So that {}.", self.business_value)?;
        writeln!(f)?;

        writeln!(f, "**Placement on the Page**")?;
        writeln!(f, "This feature should be located in {}.", self.placement)?;
        writeln!(f, "It should be visually {}.", self.visual_type)?;
        writeln!(f)?;

        writeln!(f, "**Expected Behavior**")?;
        writeln!(f, "{}", self.behavior)?;
        writeln!(f)?;

        if let Some(extra) = self.extra_info.as_deref().filter(|e| !e.trim().is_empty()) {
            writeln!(f, "**Extra Information**")?;
            writeln!(f, "{extra}")?;
            writeln!(f)?;
        }

        writeln!(f, "**Acceptance Criteria**")?;
        match &self.acceptance_criteria {
            AcceptanceCriteria::Scenarios(scenarios) => {
                for c in scenarios {
                    writeln!(f, "Given that {},", c.precondition)?;
                    writeln!(f, "When {},", c.action)?;
                    writeln!(f, "Then {}.", c.outcome)?;
                    writeln!(f)?;
                }
                Ok(())
            }
            AcceptanceCriteria::Text(text) => writeln!(f, "{text}"),
        }
    }
}

pub fn format_user_story(story: &UserStory) -> String {
    story.to_string()
}
