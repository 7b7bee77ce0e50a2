use serde::Serialize;
use std::fmt::Write;

/// One node of a formatted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Text {
        text: String,
    },
    /// `[Surah: Ayah](url)`
    Citation {
        surah: String,
        ayah: String,
        url: String,
    },
    /// `"quote" [Surah: Ayah](url)`
    DivineQuote {
        children: Vec<Node>,
        surah: String,
        ayah: String,
        url: String,
    },
    Bold {
        children: Vec<Node>,
    },
    Italic {
        children: Vec<Node>,
    },
    Heading {
        kind: HeadingKind,
        text: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingKind {
    DivineQuote,
    Section,
}

/// A formatted answer: an ordered list of nodes, rendered with every text run
/// and attribute escaped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    fn render(&self, out: &mut String) {
        match self {
            Self::Text { text } => escape_text(text, out),
            Self::Citation { surah, ayah, url } => {
                out.push_str(r#"<span class="quran-link"><span class="surah-name">"#);
                escape_text(surah, out);
                out.push(' ');
                escape_text(ayah, out);
                out.push_str("</span>");
                render_link(url, out);
                out.push_str("</span>");
            }
            Self::DivineQuote {
                children,
                surah,
                ayah,
                url,
            } => {
                out.push_str(r#"<blockquote class="divine-quote">""#);
                for child in children {
                    child.render(out);
                }
                out.push_str(r#"" <span class="surah-reference">"#);
                escape_text(surah, out);
                out.push(' ');
                escape_text(ayah, out);
                out.push(' ');
                render_link(url, out);
                out.push_str("</span></blockquote>");
            }
            Self::Bold { children } => render_span("font-bold", children, out),
            Self::Italic { children } => render_span("italic", children, out),
            Self::Heading { kind, text } => {
                let class = match kind {
                    HeadingKind::DivineQuote => "divine-quote-heading",
                    HeadingKind::Section => "section-heading",
                };
                let _ = write!(out, r#"<h3 class="{}">"#, class);
                escape_text(text, out);
                out.push_str("</h3>");
            }
        }
    }
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.render(&mut out);
        }
        out
    }

    /// Depth-first walk over every node, containers before their children.
    pub fn walk(&self) -> impl Iterator<Item = &Node> {
        let mut stack: Vec<&Node> = self.nodes.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            if let Node::Bold { children }
            | Node::Italic { children }
            | Node::DivineQuote { children, .. } = node
            {
                stack.extend(children.iter().rev());
            }
            Some(node)
        })
    }
}

fn render_span(class: &str, children: &[Node], out: &mut String) {
    let _ = write!(out, r#"<span class="{}">"#, class);
    for child in children {
        child.render(out);
    }
    out.push_str("</span>");
}

fn render_link(url: &str, out: &mut String) {
    out.push_str(r#"<a href=""#);
    escape_attr(url, out);
    out.push_str(r#"" target="_blank" rel="noopener noreferrer" class="link-icon">↗</a>"#);
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
