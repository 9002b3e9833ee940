//! Renders the diagnostics a pass leaves in a [`Handler`] to stderr.
//!
//! `SourceMap::format_span` already produces the `--> file:line:col` plus
//! source-line-and-caret block; this just prefixes it with the level and
//! message and appends notes/helps, in the style `rustc` (and this
//! workspace's own `DiagnosticBuilder`) lay a diagnostic out.

use glyphc_util::{Handler, SourceMap};

pub fn report(handler: &Handler, sources: &SourceMap) {
    for diag in handler.diagnostics() {
        eprintln!("{}: {}", diag.level, diag.message);
        if let Some(rendered) = sources.format_span(diag.span) {
            eprintln!("{}", rendered);
        }
        for note in &diag.notes {
            eprintln!("  note: {}", note);
        }
        for help in &diag.helps {
            eprintln!("  help: {}", help);
        }
        eprintln!();
    }
}
