//! Text conversion collaborator.
//!
//! Markdown, math and diagram conversion are pure string-to-markup
//! functions behind one trait so they can be substituted independently of
//! the core pipeline. [`CommonMark`] is the default implementation.

use pulldown_cmark::{Options, Parser, html};

/// Pure text-to-markup conversion hooks.
///
/// Every method must be a pure function of its input; the renderer may call
/// them in any order.
pub trait TextRenderer: Send + Sync {
    /// Convert markdown to an HTML fragment.
    fn render_markdown(&self, text: &str) -> String;

    /// Convert math source (TeX) to an HTML fragment.
    ///
    /// The default wraps the escaped source in a `math` span using TeX
    /// inline delimiters, ready for a client-side typesetter.
    fn render_math(&self, source: &str) -> String {
        format!(r#"<span class="math">\({}\)</span>"#, escape(source))
    }

    /// Convert diagram source to an HTML fragment.
    ///
    /// The default emits the escaped source as a `diagram` code block.
    fn render_diagram(&self, source: &str) -> String {
        format!(r#"<pre class="diagram"><code>{}</code></pre>"#, escape(source))
    }
}

/// Default markdown renderer built on `pulldown-cmark`, with tables and
/// strikethrough enabled.
pub struct CommonMark;

impl TextRenderer for CommonMark {
    fn render_markdown(&self, text: &str) -> String {
        let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
        let mut out = String::with_capacity(text.len() * 2);
        html::push_html(&mut out, Parser::new_ext(text, options));
        out
    }
}

/// Minimal HTML escaping for the default math/diagram wrappers.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
