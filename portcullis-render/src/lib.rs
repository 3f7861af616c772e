//! PORTCULLIS Render - Diagnostic HTML
//!
//! Turns a resource token into a nested HTML definition list for debug
//! panes and error pages: every field the wire format carries, with
//! embedded parents rendered inline, recursively.
//!
//! Strictly presentational. Rendering never fails and is never consulted
//! for identity or permissions; a parent that will not decode is shown as
//! an inline marker where resolution would have returned an error.

mod html;

pub use html::{render, Renderer, DEFAULT_MAX_DEPTH};
