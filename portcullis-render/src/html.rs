//! Definition-list rendering with inline parent recursion.

use portcullis_core::{KindRegistry, ResourceToken, KIND_REGISTRY};

/// Default ceiling on parent nesting in one rendering.
pub const DEFAULT_MAX_DEPTH: usize = 16;

// ============================================================================
// RENDERER (Task 6.1)
// ============================================================================

/// Renders tokens as nested HTML definition lists.
///
/// One `<dl>` per token, one `<dt>/<dd>` row per field, every value
/// HTML-escaped. For kinds that embed their parent, the raw `type` row is
/// replaced by a `parent` row holding the parent's own rendering, so the
/// markup nests exactly the way the wire format does.
///
/// Rendering never fails. A parent that will not decode becomes an inline
/// error marker; a nest deeper than the ceiling becomes a truncation
/// marker; a token of an unregistered kind renders its fields verbatim.
pub struct Renderer<'r> {
    registry: &'r KindRegistry,
    max_depth: usize,
}

impl<'r> Renderer<'r> {
    pub fn new(registry: &'r KindRegistry) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn render(&self, token: &ResourceToken) -> String {
        let mut out = String::new();
        self.render_token(&mut out, token, 0);
        out
    }

    fn render_token(&self, out: &mut String, token: &ResourceToken, depth: usize) {
        out.push_str("<dl class=\"resource-token\">\n");
        push_row(out, "kind", token.kind());

        let embeds = self
            .registry
            .get(token.kind())
            .is_some_and(|spec| spec.embeds_parent());
        if embeds {
            self.push_parent_row(out, token, depth);
        } else {
            push_row(out, "type", token.token_type());
        }

        push_row(out, "source", token.source());
        push_row(out, "id", token.id());
        for (name, value) in token.extras() {
            push_row(out, name, value);
        }
        out.push_str("</dl>\n");
    }

    /// The parent goes through the token's memo cell, so rendering shares
    /// the decode with ancestor resolution.
    fn push_parent_row(&self, out: &mut String, token: &ResourceToken, depth: usize) {
        out.push_str("<dt>parent</dt>\n<dd>\n");
        if depth + 1 >= self.max_depth {
            out.push_str("<span class=\"error\">nesting limit reached</span>\n");
        } else {
            match token.embedded_parent(self.registry) {
                Ok(parent) => self.render_token(out, parent, depth + 1),
                Err(err) => {
                    out.push_str("<span class=\"error\">unreadable parent: ");
                    push_escaped(out, &err.to_string());
                    out.push_str("</span>\n");
                }
            }
        }
        out.push_str("</dd>\n");
    }
}

fn push_row(out: &mut String, name: &str, value: &str) {
    out.push_str("<dt>");
    push_escaped(out, name);
    out.push_str("</dt>\n<dd>");
    push_escaped(out, value);
    out.push_str("</dd>\n");
}

fn push_escaped(out: &mut String, text: &str) {
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

/// Render over the built-in kinds with the default depth ceiling.
pub fn render(token: &ResourceToken) -> String {
    Renderer::new(&KIND_REGISTRY).render(token)
}

// ============================================================================
// TESTS
// ============================================================================
