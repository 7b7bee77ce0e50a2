use super::{
    document::{HeadingKind, Node},
    pipeline::{Pipeline, Rewrite, Stage, unflatten},
};
use regex::{Captures, Regex};

// Atomic captures exclude the node marker so a citation never swallows an
// already-built node. Otherwise these follow the model's markdown dialect.
const QUOTED_CITATION: &str =
    r#""([^\n\x{FFFC}]*?)" \[([^\n\x{FFFC}]*?):\s*(\d+)\]\((https?://[^\s)\x{FFFC}]+)\)"#;
const CITATION: &str = r"\[([^\n\x{FFFC}]*?):\s*(\d+)\]\((https?://[^\s)\x{FFFC}]+)\)";
const BOLD: &str = r"\*\*([^*]*)\*\*";
const ITALIC: &str = r"__([^_]*)__";

const ANSWER_HEADING: &str = "### Quran GPT's Answer:";
const DIVINE_QUOTE_HEADING: &str = "Allah(SWT) says in the Glorious Quran:";
const SECTION_LABELS: [(&str, &str); 4] = [
    ("explanation_heading", "Explanation:"),
    ("tafseer_heading", "Tafseer:"),
    ("additional_information_heading", "Additional Information:"),
    ("references_heading", "References:"),
];

/// Stage order used for every answer.
///
/// The quoted citation runs before the plain citation; the other way round the
/// plain citation consumes the bracket part and a quoted ayah never becomes a
/// blockquote.
pub fn standard() -> Pipeline {
    let mut stages = vec![
        quoted_citation(),
        citation(),
        bold(),
        italic(),
        literal("answer_heading", ANSWER_HEADING, strip),
        literal("divine_quote_heading", DIVINE_QUOTE_HEADING, divine_quote_heading),
    ];
    stages.extend(
        SECTION_LABELS
            .into_iter()
            .map(|(name, label)| literal(name, label, section_heading)),
    );
    Pipeline::new(stages)
}

pub fn quoted_citation() -> Stage {
    Stage::new("quoted_citation", compile(QUOTED_CITATION), |caps, inner| {
        Some(Node::DivineQuote {
            children: unflatten(&caps[1], inner),
            surah: caps[2].to_string(),
            ayah: caps[3].to_string(),
            url: caps[4].to_string(),
        })
    })
}

pub fn citation() -> Stage {
    Stage::new("citation", compile(CITATION), |caps, _| {
        Some(Node::Citation {
            surah: caps[1].to_string(),
            ayah: caps[2].to_string(),
            url: caps[3].to_string(),
        })
    })
}

pub fn bold() -> Stage {
    Stage::new("bold", compile(BOLD), |caps, inner| {
        Some(Node::Bold {
            children: unflatten(&caps[1], inner),
        })
    })
}

pub fn italic() -> Stage {
    Stage::new("italic", compile(ITALIC), |caps, inner| {
        Some(Node::Italic {
            children: unflatten(&caps[1], inner),
        })
    })
}

fn literal(name: &'static str, text: &str, rewrite: Rewrite) -> Stage {
    Stage::new(name, compile(&regex::escape(text)), rewrite)
}

fn strip(_caps: &Captures<'_>, _inner: Vec<Node>) -> Option<Node> {
    None
}

fn divine_quote_heading(_caps: &Captures<'_>, _inner: Vec<Node>) -> Option<Node> {
    Some(Node::Heading {
        kind: HeadingKind::DivineQuote,
        text: "Allah (SWT) says in the Glorious Quran:".to_string(),
    })
}

fn section_heading(caps: &Captures<'_>, _inner: Vec<Node>) -> Option<Node> {
    Some(Node::Heading {
        kind: HeadingKind::Section,
        text: caps[0].trim_end_matches(':').to_string(),
    })
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("format patterns are valid regular expressions")
}
