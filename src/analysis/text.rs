//! Bag-of-words helpers shared by the analyzers.

/// Relevance below which a statement counts as unrelated to the agenda topic.
pub const RELEVANCE_THRESHOLD: f64 = 0.3;

/// Task overlap above which two action items are the same task.
pub const SIMILARITY_THRESHOLD: f64 = 0.7;

/// True when `text` contains any of `phrases`. `text` must already be lower-cased.
pub fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| text.contains(phrase))
}

/// The phrases from `phrases` that occur in `text`, in table order.
pub fn matching<'a>(text: &str, phrases: &[&'a str]) -> Vec<&'a str> {
    phrases
        .iter()
        .copied()
        .filter(|phrase| text.contains(phrase))
        .collect()
}

/// Lower-cased, punctuation-free, deduplicated words longer than 3 characters.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    let mut keywords: Vec<String> = Vec::new();
    for word in cleaned.split_whitespace() {
        if word.chars().count() > 3 && !keywords.iter().any(|k| k == word) {
            keywords.push(word.to_string());
        }
    }
    keywords
}

/// Share of keywords the topic and the text have in common. A topic keyword
/// counts as shared when it contains, or is contained in, any text keyword.
pub fn relevance(topic_keywords: &[String], text_keywords: &[String]) -> f64 {
    if topic_keywords.is_empty() || text_keywords.is_empty() {
        return 0.0;
    }

    let common = topic_keywords
        .iter()
        .filter(|keyword| {
            text_keywords
                .iter()
                .any(|text_keyword| text_keyword.contains(keyword.as_str()) || keyword.contains(text_keyword.as_str()))
        })
        .count();

    common as f64 / topic_keywords.len().max(text_keywords.len()) as f64
}

/// Shared distinct words divided by the larger word count.
pub fn task_similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let words_a: Vec<&str> = a.split_whitespace().collect();
    let words_b: Vec<&str> = b.split_whitespace().collect();

    let larger = words_a.len().max(words_b.len());
    if larger == 0 {
        return 0.0;
    }

    let mut shared: Vec<&str> = Vec::new();
    for word in &words_a {
        if words_b.contains(word) && !shared.contains(word) {
            shared.push(word);
        }
    }

    shared.len() as f64 / larger as f64
}

pub fn is_similar_task(a: &str, b: &str) -> bool {
    task_similarity(a, b) > SIMILARITY_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_keywords_strips_punctuation_and_short_words() {
        let keywords = extract_keywords("That's off-topic, by the way. The WAY!");
        assert_eq!(keywords, vec!["thats", "offtopic"]);
    }

    #[test]
    fn test_relevance_uses_substring_containment() {
        let topic = extract_keywords("Budget Review");
        let text = extract_keywords("the budgets need another review");
        // budget ⊂ budgets, review == review; max(2, 4) = 4
        assert!((relevance(&topic, &text) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_relevance_empty_sets_are_zero() {
        assert_eq!(relevance(&[], &extract_keywords("plenty of words here")), 0.0);
        assert_eq!(relevance(&extract_keywords("Budget"), &[]), 0.0);
    }

    #[test]
    fn test_task_similarity_dedup_case() {
        let score = task_similarity("Send the weekly report", "Send weekly report");
        assert!((score - 0.75).abs() < f64::EPSILON);
        assert!(is_similar_task("Send the weekly report", "send weekly report"));
    }

    #[test]
    fn test_task_similarity_counts_distinct_words() {
        // "the" appears twice in the first task but is shared once.
        let score = task_similarity("the the report", "the report draft");
        assert!((score - 2.0 / 3.0).abs() < 1e-9);
        assert!(!is_similar_task("Review the budget", "Book the venue"));
    }

    #[test]
    fn test_matching_preserves_table_order() {
        let found = matching("a few of everything", &["everything", "a few", "several"]);
        assert_eq!(found, vec!["everything", "a few"]);
    }
}
