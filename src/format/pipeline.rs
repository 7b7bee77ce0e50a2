use super::document::{Document, Node};
use regex::{Captures, Regex};
use tracing::trace;

/// Stands in for an already-built node inside the text a stage matches
/// against. Nodes are kept in textual order, so the n-th marker is the n-th
/// node.
pub(crate) const MARKER: char = '\u{FFFC}';

/// Builds the replacement for one match.
///
/// `inner` holds the nodes whose markers fall inside the match, in order.
/// Returning `None` deletes the match.
pub type Rewrite = fn(&Captures<'_>, Vec<Node>) -> Option<Node>;

/// A named, global pattern rewrite over the raw text of an answer.
pub struct Stage {
    name: &'static str,
    pattern: Regex,
    rewrite: Rewrite,
}

/// An ordered list of stages. Each stage only sees raw text: nodes built by an
/// earlier stage show up as opaque markers and are never re-matched, except
/// that the children of bold and italic spans keep flowing through later
/// stages.
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Stage {
    pub fn new(name: &'static str, pattern: Regex, rewrite: Rewrite) -> Self {
        Self {
            name,
            pattern,
            rewrite,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Applies the stage to every raw text run in `nodes`, recursing into
    /// span and quote children first.
    pub fn apply(&self, nodes: Vec<Node>) -> Vec<Node> {
        let nodes = nodes
            .into_iter()
            .map(|node| match node {
                Node::Bold { children } => Node::Bold {
                    children: self.apply(children),
                },
                Node::Italic { children } => Node::Italic {
                    children: self.apply(children),
                },
                Node::DivineQuote {
                    children,
                    surah,
                    ayah,
                    url,
                } => Node::DivineQuote {
                    children: self.apply(children),
                    surah,
                    ayah,
                    url,
                },
                other => other,
            })
            .collect();

        let (text, objects) = flatten(nodes);
        if !self.pattern.is_match(&text) {
            return unflatten(&text, objects);
        }

        let mut objects = objects.into_iter();
        let mut out_text = String::with_capacity(text.len());
        let mut out_objects = Vec::new();
        let mut last = 0;
        let mut matches = 0usize;

        for caps in self.pattern.captures_iter(&text) {
            let Some(whole) = caps.get(0) else { continue };
            let before = &text[last..whole.start()];
            out_text.push_str(before);
            out_objects.extend(objects.by_ref().take(count_markers(before)));

            let inner: Vec<Node> = objects
                .by_ref()
                .take(count_markers(whole.as_str()))
                .collect();
            if let Some(node) = (self.rewrite)(&caps, inner) {
                out_text.push(MARKER);
                out_objects.push(node);
            }

            last = whole.end();
            matches += 1;
        }
        out_text.push_str(&text[last..]);
        out_objects.extend(objects);

        trace!(stage = self.name, matches, "Applied format stage");
        unflatten(&out_text, out_objects)
    }
}

impl Pipeline {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(Stage::name).collect()
    }

    pub fn run(&self, text: &str) -> Document {
        let mut nodes = tokenize(text);
        for stage in &self.stages {
            nodes = stage.apply(nodes);
        }
        Document::new(nodes)
    }
}

/// Turns raw input into the initial node list. Marker characters in the input
/// are replaced so they cannot alias built nodes.
fn tokenize(text: &str) -> Vec<Node> {
    if text.is_empty() {
        return Vec::new();
    }
    vec![Node::text(text.replace(MARKER, "\u{FFFD}"))]
}

/// Concatenates text runs and swaps every other node for a marker.
fn flatten(nodes: Vec<Node>) -> (String, Vec<Node>) {
    let mut text = String::new();
    let mut objects = Vec::new();
    for node in nodes {
        match node {
            Node::Text { text: run } => text.push_str(&run),
            other => {
                text.push(MARKER);
                objects.push(other);
            }
        }
    }
    (text, objects)
}

/// Inverse of [`flatten`]: splits `text` at markers and splices `objects` back
/// in. Empty text runs are dropped and adjacent runs are never produced.
pub(crate) fn unflatten(text: &str, objects: Vec<Node>) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(objects.len() * 2 + 1);
    let mut objects = objects.into_iter();
    for (i, run) in text.split(MARKER).enumerate() {
        if i > 0 {
            if let Some(object) = objects.next() {
                nodes.push(object);
            }
        }
        if !run.is_empty() {
            nodes.push(Node::text(run));
        }
    }
    nodes
}

fn count_markers(text: &str) -> usize {
    text.chars().filter(|&c| c == MARKER).count()
}
