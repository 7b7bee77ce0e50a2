//! Turns raw completion text into a [`Document`].
//!
//! Formatting is an ordered list of named [`Stage`]s (see [`stages::standard`]).
//! The result is a node tree rather than markup, so model output is escaped
//! when rendered and can never inject HTML.

mod document;
mod pipeline;
pub mod stages;

pub use document::{Document, HeadingKind, Node};
pub use pipeline::{Pipeline, Rewrite, Stage};

use std::sync::LazyLock;

static STANDARD: LazyLock<Pipeline> = LazyLock::new(stages::standard);

/// Formats a completion with the standard stage order.
pub fn format_response(text: &str) -> Document {
    STANDARD.run(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_answer() {
        let raw = "### Quran GPT's Answer:\n\nAllah(SWT) says in the Glorious Quran:\n\n\
                   \"Be patient\" [Al-Baqarah: 153](https://alquran.cloud/ayah?reference=2:153)\n\n\
                   Explanation: **Patience** is __rewarded__.";
        let html = format_response(raw).to_html();
        assert_eq!(
            html,
            "\n\n<h3 class=\"divine-quote-heading\">Allah (SWT) says in the Glorious Quran:</h3>\n\n\
             <blockquote class=\"divine-quote\">\"Be patient\" <span class=\"surah-reference\">Al-Baqarah 153 \
             <a href=\"https://alquran.cloud/ayah?reference=2:153\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"link-icon\">↗</a>\
             </span></blockquote>\n\n\
             <h3 class=\"section-heading\">Explanation</h3> <span class=\"font-bold\">Patience</span> is \
             <span class=\"italic\">rewarded</span>."
        );
    }
}
