//! Multilingual signal lexicon.
//!
//! Curated English, Hindi (transliterated), and Kannada (transliterated and
//! Unicode) keyword sets for the four indicator categories, plus the
//! high-severity phrase list. Loaded once at first use and compiled into
//! per-category case-insensitive matchers; never mutated afterwards.
//!
//! Short tokens (≤5 characters) are matched at word boundaries only, so a
//! 2-letter token cannot fire inside an unrelated longer word. Longer phrases
//! match as substrings anywhere in the text.

use regex::RegexSet;
use std::sync::OnceLock;

/// One of the four semantic indicator categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Fear,
    Authority,
    Urgency,
    Financial,
}

impl Category {
    /// Per-category score weight.
    pub const WEIGHT: u32 = 25;
}

// ---------------------------------------------------------------------------
// Keyword tables (English + Hindi + Kannada transliterated + Kannada Unicode)
// ---------------------------------------------------------------------------

const FEAR_KEYWORDS_EN: &[&str] = &[
    "arrest", "arrested", "digital arrest", "under arrest",
    "police", "crime", "criminal", "illegal",
    "fraud", "warrant", "jail", "prison", "sued", "lawsuit",
    "investigation", "fir", "case filed", "cybercrime",
    "court order", "government action", "seized", "detained",
    "legal action", "escalated for", "escalate the matter",
    "remain on this call", "remain available on this call",
    "do not disconnect", "cannot leave",
];

const FEAR_KEYWORDS_HI: &[&str] = &[
    "giraftari", "giraftar", "police", "fir", "kejar", "jail",
    "qanoon", "adalat", "criminal", "pakad", "case",
    "saza", "kaid", "warrant", "aarop",
    "kanoon", "cybercrime", "digital giraftari",
];

// Roman-script approximation of common Kannada scam phrases.
const FEAR_KEYWORDS_KN: &[&str] = &[
    "digital bandana", "digital bandhanada", "digtal arrest",
    "sajjana", "keisi", "arrest madutteve", "bandana",
    "cyber crime", "takshanadha", "takshana", "takshanave",
    "suchane anusarisabeku", "kayida kriya",
];

// Kannada script keywords (direct Kannada text or transcribed Kannada).
const FEAR_KEYWORDS_KN_UNICODE: &[&str] = &[
    "ಡಿಜಿಟಲ್ ಬಂಧನ",
    "ಬಂಧನ",
    "ಸೈಬರ್ ಕ್ರೈಮ್",
    "ಕ್ರಿಮಿನಲ್",
    "ಕಾನೂನು ಕ್ರಮ",
    "ಡಿಜಿಟಲ್",
    "ಆರೋಪ",
    "ತಕ್ಷಣ",
];

// Authority: phrase-based only. Standalone short tokens like "ed" or
// "officer" fire on innocent words ("Desk", "verification officer" alone).
const AUTHORITY_KEYWORDS_EN: &[&str] = &[
    "central bureau of investigation", "cbi officer", "cbi unit",
    "cyber crime unit", "cybercrime unit", "cyber crime cell",
    "enforcement directorate", "income tax department", "income tax officer",
    "customs department", "customs officer", "narcotics control",
    "trai", "telecom regulatory", "supreme court", "high court",
    "government of india", "rbi", "sebi", "interpol",
    "commissioner of police", "national security", "cyber police",
    "compliance review", "verification officer",
    "inspector", "ips officer", "ias officer",
    "ministry of", "home ministry",
];

const AUTHORITY_KEYWORDS_HI: &[&str] = &[
    "cbi", "trai", "sarkar", "mantri",
    "collector", "commissioner", "adhikari", "enforcement directorate",
    "income tax", "customs vibhag",
    "supreme court", "high court", "cyber police",
];

const AUTHORITY_KEYWORDS_KN: &[&str] = &[
    "cyber crime vibhaga", "takshanadha",
    "cbi adhikari", "police adhikari",
    "sarkar", "nyayalaya",
    "commissioner", "inspector",
];

const AUTHORITY_KEYWORDS_KN_UNICODE: &[&str] = &[
    "ಸೈಬರ್ ಕ್ರೈಮ್ ಘಟಕ",
    "ಇನ್ಸ್ ಪೆಕ್ಟರ್",
    "ಸರ್ಕಾರ",
    "ನ್ಯಾಯಾಲಯ",
    "ಆಧಾರ್",
];

const URGENCY_KEYWORDS_EN: &[&str] = &[
    "immediately", "right now", "within 24 hours", "urgent",
    "do not delay", "last warning", "final notice", "today only",
    "in the next hour", "within minutes", "before it's too late",
    "deadline", "no time left", "act now", "emergency",
    "do not hang up", "stay on the line", "remain on this call",
    "remain available on this call", "avoid automated",
    "automated system escalation", "must follow instructions",
    "otherwise the matter will be escalated",
    "cannot be delayed", "must not disconnect",
];

const URGENCY_KEYWORDS_HI: &[&str] = &[
    "abhi", "turant", "jaldi", "der mat karo", "aaj hi",
    "kal tak", "call mat kaatna", "ruko mat", "baad mein nahi",
    "aakhri mauka", "warning", "emergency", "sirf aaj",
    "fauran", "der karne par",
];

const URGENCY_KEYWORDS_KN: &[&str] = &[
    "takshana", "takshanadha", "ippude", "bega",
    "delay madabeda", "call kaiyodu", "takshanave",
];

const URGENCY_KEYWORDS_KN_UNICODE: &[&str] = &[
    "ತಕ್ಷಣ",
    "ಸೂಚನೆಗಳನ್ನು ಅನುಸರಿಸಬೇಕು",
    "ಕರೆಯಲ್ಲಿ ಉಳಿದು",
    "ವಿಷಯವನ್ನು ಹೆಚ್ಚಿಸಲಾಗುವುದು",
];

const FINANCIAL_KEYWORDS_EN: &[&str] = &[
    "send money", "transfer money", "wire transfer", "pay fine",
    "bank account", "bitcoin", "gift card", "amazon card",
    "cash deposit", "clear your dues", "upfront payment",
    "advance payment", "security deposit", "freeze your account",
    "account will be frozen", "account will be blocked",
    "pay immediately", "rupees", "dollars", "lakh", "crore",
    "payment required", "fine to be paid",
];

const FINANCIAL_KEYWORDS_HI: &[&str] = &[
    "paise bhejo", "transfer karo", "account mein dalo",
    "fine bharo", "jama karo", "bank account band",
    "froze", "rupaye", "lakh", "crore", "paisa",
    "payment", "advance", "guarantee deposit",
];

const FINANCIAL_KEYWORDS_KN: &[&str] = &[
    "hortu madabeku", "paise", "account freeze",
    "dakshina", "harishavanu",
];

const FINANCIAL_KEYWORDS_KN_UNICODE: &[&str] = &[
    "ಹಣ",
    "ಪಾವತಿ",
    "ಖಾತೆ",
    "ರೂಪಾಯಿ",
];

// High-severity phrases. Any single hit gives a major score boost; these are
// weighted above ordinary category keywords.
pub const HIGH_SEVERITY_PHRASES: &[&str] = &[
    "digital arrest",
    "under digital arrest",
    "you are under arrest",
    "warrant has been issued",
    "arrested for money laundering",
    "drug trafficking",
    "aadhaar has been used",
    "aadhaar linked to",
    "illegal use of aadhaar",
    "remain on this call",
    "do not disconnect",
    "do not hang up",
    "immediate legal action",
];

// ---------------------------------------------------------------------------
// Compiled lexicon
// ---------------------------------------------------------------------------

/// Word-boundary matching below this many characters; substring above.
const WORD_BOUNDARY_MAX_CHARS: usize = 5;

/// One category's canonical keywords with a compiled matcher.
/// Pattern index i corresponds to `keywords[i]`.
pub struct CategorySet {
    pub category: Category,
    keywords: Vec<&'static str>,
    matcher: RegexSet,
}

impl CategorySet {
    fn compile(category: Category, variants: &[&'static [&'static str]]) -> Self {
        let keywords: Vec<&'static str> = variants.iter().flat_map(|v| v.iter().copied()).collect();
        let patterns: Vec<String> = keywords.iter().map(|kw| keyword_pattern(kw)).collect();
        let matcher = RegexSet::new(&patterns).expect("lexicon regex must compile");
        CategorySet { category, keywords, matcher }
    }

    /// Canonical keyword strings found in `text`, in table order.
    pub fn find_matches(&self, text: &str) -> Vec<&'static str> {
        self.matcher.matches(text).iter().map(|i| self.keywords[i]).collect()
    }
}

fn keyword_pattern(kw: &str) -> String {
    // Character count, not byte length: Kannada script keywords are short in
    // characters but long in UTF-8 bytes.
    if kw.chars().count() <= WORD_BOUNDARY_MAX_CHARS {
        format!(r"(?i)\b{}\b", regex::escape(kw))
    } else {
        format!(r"(?i){}", regex::escape(kw))
    }
}

/// The full compiled lexicon: four category sets plus high-severity phrases.
pub struct SignalLexicon {
    pub fear: CategorySet,
    pub authority: CategorySet,
    pub urgency: CategorySet,
    pub financial: CategorySet,
    pub high_severity: &'static [&'static str],
}

impl SignalLexicon {
    /// Number of distinct high-severity phrases present as case-insensitive
    /// substrings of `text_lower` (caller lowercases once).
    pub fn count_high_severity(&self, text_lower: &str) -> u32 {
        self.high_severity
            .iter()
            .filter(|phrase| text_lower.contains(*phrase))
            .count() as u32
    }
}

/// Process-wide lexicon, compiled on first use.
pub fn lexicon() -> &'static SignalLexicon {
    static LEXICON: OnceLock<SignalLexicon> = OnceLock::new();
    LEXICON.get_or_init(|| SignalLexicon {
        fear: CategorySet::compile(
            Category::Fear,
            &[FEAR_KEYWORDS_EN, FEAR_KEYWORDS_HI, FEAR_KEYWORDS_KN, FEAR_KEYWORDS_KN_UNICODE],
        ),
        authority: CategorySet::compile(
            Category::Authority,
            &[
                AUTHORITY_KEYWORDS_EN,
                AUTHORITY_KEYWORDS_HI,
                AUTHORITY_KEYWORDS_KN,
                AUTHORITY_KEYWORDS_KN_UNICODE,
            ],
        ),
        urgency: CategorySet::compile(
            Category::Urgency,
            &[
                URGENCY_KEYWORDS_EN,
                URGENCY_KEYWORDS_HI,
                URGENCY_KEYWORDS_KN,
                URGENCY_KEYWORDS_KN_UNICODE,
            ],
        ),
        financial: CategorySet::compile(
            Category::Financial,
            &[
                FINANCIAL_KEYWORDS_EN,
                FINANCIAL_KEYWORDS_HI,
                FINANCIAL_KEYWORDS_KN,
                FINANCIAL_KEYWORDS_KN_UNICODE,
            ],
        ),
        high_severity: HIGH_SEVERITY_PHRASES,
    })
}
