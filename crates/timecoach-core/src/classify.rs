//! Text heuristics for raw task records.
//!
//! Raw tasks from an external task source carry their metadata as free text:
//! a duration hint somewhere in the notes, priority markers in the title,
//! and a work category implied by the wording. These extractors are
//! deterministic; the keyword table is evaluated in fixed order with first
//! match winning.

use std::sync::OnceLock;

use regex::Regex;

use crate::item::Priority;

/// Category keyword table. Order matters: earlier rows win.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("meeting", &["meeting", "call", "standup", "sync"]),
    ("coding", &["code", "develop", "implement", "debug", "fix", "programming"]),
    ("writing", &["write", "document", "blog", "article", "notes"]),
    ("research", &["research", "investigate", "analyze", "study", "learn"]),
    ("planning", &["plan", "strategy", "roadmap", "outline"]),
    ("communication", &["email", "slack", "message", "respond", "follow up"]),
    ("admin", &["admin", "paperwork", "organize", "file", "expense"]),
];

/// Category when nothing in the keyword table matches.
pub const DEFAULT_CATEGORY: &str = "general";

fn duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(\d+)\s*(min|minutes|hour|hours|h)").expect("valid duration regex")
    })
}

/// Extract an estimated duration in minutes from free text, if present.
///
/// Picks the first `<number> <unit>` occurrence; hour units are converted
/// to minutes.
pub fn parse_duration(text: &str) -> Option<u32> {
    let captures = duration_pattern().captures(text)?;
    let value: u32 = captures.get(1)?.as_str().parse().ok()?;
    let unit = captures.get(2)?.as_str().to_lowercase();

    if unit.starts_with("hour") || unit == "h" {
        Some(value.saturating_mul(60))
    } else {
        Some(value)
    }
}

/// Infer priority from title and notes markers.
pub fn extract_priority(title: &str, notes: &str) -> Priority {
    let text = format!("{} {}", title, notes).to_lowercase();

    if text.contains("urgent") || text.contains("asap") || text.contains("!!!") {
        Priority::High
    } else if text.contains("important") || text.contains("!!") {
        Priority::Medium
    } else if text.contains("low priority") || text.contains("when time allows") {
        Priority::Low
    } else {
        Priority::Medium
    }
}

/// Infer a work category from title and notes.
pub fn extract_category(title: &str, notes: &str) -> String {
    let text = format!("{} {}", title, notes).to_lowercase();

    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|keyword| text.contains(keyword)) {
            return (*category).to_string();
        }
    }
    DEFAULT_CATEGORY.to_string()
}
