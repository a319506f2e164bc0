//! Fixed vocabularies consumed by the analyzers. All entries are lower-case
//! and matched as plain substrings of lower-cased text unless noted.

/// Hedging statements that leave owner, scope or timing open.
pub const HEDGING_PHRASES: &[&str] = &[
    "we'll handle that",
    "sometime next week",
    "we should look into",
    "someone needs to",
    "we'll figure it out",
    "let's discuss later",
    "we'll get back to you",
    "we'll see",
    "maybe we can",
    "we might want to",
    "it would be good to",
    "we should probably",
    "we need to think about",
    "we'll work on it",
    "we'll take care of it",
];

pub const VAGUE_TIME_PHRASES: &[&str] = &[
    "soon",
    "eventually",
    "when we get a chance",
    "in the near future",
    "asap",
    "when possible",
    "at some point",
    "down the road",
    "in due time",
];

/// Words that mark a statement as a commitment to do something.
pub const ACTION_WORDS: &[&str] = &[
    "need to",
    "should",
    "must",
    "have to",
    "will",
    "going to",
    "implement",
    "create",
    "build",
    "develop",
    "fix",
    "update",
    "review",
    "analyze",
    "investigate",
    "research",
    "prepare",
    "send",
    "schedule",
    "organize",
    "plan",
    "coordinate",
];

pub const ASSIGNEE_INDICATORS: &[&str] = &[
    "i will",
    "i'll",
    "i can",
    "i should",
    "john will",
    "sarah will",
    "the team will",
    "marketing will",
    "engineering will",
    "sales will",
    "assigned to",
    "responsible for",
    "owner is",
];

pub const OFF_TOPIC_PHRASES: &[&str] = &[
    "unrelated",
    "off-topic",
    "side note",
    "by the way",
    "this reminds me",
    "speaking of",
    "while we're on the subject",
    "just to mention",
    "random thought",
    "completely different",
];

pub const COMPLETION_PHRASES: &[&str] = &[
    "that's all for",
    "finished with",
    "done with",
    "completed",
    "let's move on",
    "next item",
    "that covers",
    "wrapping up",
];

/// Verbs that turn a sentence into an action-item candidate.
pub const ACTION_VERBS: &[&str] = &[
    "implement",
    "create",
    "build",
    "develop",
    "fix",
    "update",
    "modify",
    "review",
    "analyze",
    "investigate",
    "research",
    "prepare",
    "organize",
    "send",
    "schedule",
    "coordinate",
    "plan",
    "design",
    "test",
    "deploy",
    "write",
    "document",
    "present",
    "meet",
    "call",
    "email",
    "follow up",
];

/// Case-insensitive assignee patterns, tried in order. Patterns without a
/// capture group contribute their whole match.
pub const ASSIGNEE_PATTERNS: &[&str] = &[
    r"(?i)(?:i will|i'll|i can|i should)",
    r"(?i)(?:(\w+)\s+will)",
    r"(?i)(?:(\w+)\s+should)",
    r"(?i)(?:(\w+)\s+needs to)",
    r"(?i)(?:assigned to\s+(\w+))",
    r"(?i)(?:(\w+)\s+is responsible)",
    r"(?i)(?:(\w+)\s+will handle)",
];

pub const DEADLINE_PATTERNS: &[&str] = &[
    r"(?i)(?:by|before|until)\s+(\w+\s+\d+)",
    r"(?i)(?:due|deadline)\s+(?:on|by)\s+(\w+\s+\d+)",
    r"(?i)(?:next\s+)(\w+day|week|month)",
    r"(?i)(?:this\s+)(\w+day|week|month)",
    r"(?i)(?:in\s+)(\d+)\s+(?:days?|weeks?|months?)",
];

/// Relative offsets that a deadline fragment must contain to resolve.
pub const RELATIVE_OFFSET_PATTERN: &str = r"in\s+(\d+)\s+(days?|weeks?|months?)";

pub const TASK_SELF_REFERENCE_PREFIX: &str = r"(?i)^(?:i will|i'll|i can|i should|we will|we'll|we should)";
pub const TASK_MODAL_PREFIX: &str = r"(?i)^(?:need to|should|must|have to)";

pub const URGENT_WORDS: &[&str] = &["urgent", "asap", "immediately"];
pub const IMPORTANT_WORDS: &[&str] = &["important", "priority", "soon"];

pub const WEAK_VERBS: &[&str] = &[
    "look into",
    "check out",
    "think about",
    "consider",
    "explore",
    "investigate",
    "review",
    "analyze",
    "examine",
    "study",
];

/// Stronger replacements for each weak verb.
pub const STRONG_ALTERNATIVES: &[(&str, [&str; 4])] = &[
    ("look into", ["investigate", "research", "analyze", "examine"]),
    ("check out", ["review", "evaluate", "assess", "audit"]),
    ("think about", ["decide", "determine", "resolve", "conclude"]),
    ("consider", ["evaluate", "assess", "decide", "choose"]),
    ("explore", ["investigate", "research", "analyze", "examine"]),
    ("investigate", ["research", "analyze", "examine", "audit"]),
    ("review", ["evaluate", "assess", "audit", "analyze"]),
    ("analyze", ["examine", "evaluate", "assess", "audit"]),
    ("examine", ["analyze", "evaluate", "assess", "audit"]),
    ("study", ["research", "analyze", "examine", "investigate"]),
];

pub const DEADLINE_INDICATORS: &[&str] = &[
    "by",
    "before",
    "until",
    "due",
    "deadline",
    "target",
    "next week",
    "tomorrow",
    "friday",
    "monday",
    "end of",
    "asap",
    "urgent",
    "immediately",
];

pub const SUCCESS_CRITERIA_INDICATORS: &[&str] = &[
    "complete",
    "finished",
    "done",
    "delivered",
    "launched",
    "working",
    "functional",
    "tested",
    "approved",
    "validated",
    "successful",
    "effective",
    "meets requirements",
];

pub const RESOURCE_INDICATORS: &[&str] = &[
    "budget",
    "funding",
    "team",
    "staff",
    "tools",
    "software",
    "equipment",
    "materials",
    "support",
    "help",
    "assistance",
    "resources",
    "time",
    "personnel",
    "technology",
];

pub const VAGUE_SCOPE_PHRASES: &[&str] = &[
    "some of",
    "a few",
    "several",
    "various",
    "multiple",
    "all the",
    "everything",
    "anything",
    "whatever",
];

pub const CLOSING_PHRASES: &[&str] = &[
    "wrapping up",
    "finishing",
    "concluding",
    "ending",
    "last thing",
    "final point",
    "before we go",
    "closing",
];

/// Strong alternatives for a weak verb; empty when the verb is unknown.
pub fn strong_alternatives(weak_verb: &str) -> &'static [&'static str] {
    STRONG_ALTERNATIVES
        .iter()
        .find(|(verb, _)| *verb == weak_verb)
        .map(|(_, alternatives)| alternatives.as_slice())
        .unwrap_or(&[])
}
