//! Terminal rendering of compile and runtime errors.

use std::ops::Range;

use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};
use cordon_eval::EvalError;
use cordon_ir::Span;

use crate::error::CompileError;
use crate::source::ExpressionSource;

/// Color choice for rendered reports.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColorMode {
    Always,
    Never,
}

impl ColorMode {
    /// Color only when stderr is a terminal.
    pub fn detect() -> Self {
        if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            ColorMode::Always
        } else {
            ColorMode::Never
        }
    }
}

/// Render a compile error against its source.
pub fn render_compile_error(err: &CompileError, source: &ExpressionSource, color: ColorMode) -> String {
    let label = match err {
        CompileError::Parse { message, .. } => message.clone(),
        CompileError::Safety(violation) => violation.category().to_owned(),
    };
    render(source, err.span(), &err.to_string(), &label, color)
}

/// Render an uncaught runtime exception against its source.
pub fn render_eval_error(err: &EvalError, source: &ExpressionSource, color: ColorMode) -> String {
    render(source, err.span, &err.to_string(), "raised here", color)
}

fn clamp(span: Span, text: &str) -> Range<usize> {
    let end = (span.end as usize).min(text.len());
    let start = (span.start as usize).min(end);
    start..end
}

fn render(
    source: &ExpressionSource,
    span: Span,
    message: &str,
    label: &str,
    color: ColorMode,
) -> String {
    let filename = source.filename();
    let range = clamp(span, source.text());
    let config = Config::default()
        .with_color(color == ColorMode::Always)
        .with_index_type(IndexType::Byte);
    let mut out = Vec::new();
    let written = Report::build(ReportKind::Error, (filename, range.clone()))
        .with_config(config)
        .with_message(message)
        .with_label(Label::new((filename, range)).with_message(label))
        .finish()
        .write((filename, Source::from(source.text())), &mut out);
    match written {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        // Writing into memory does not fail in practice; keep the message.
        Err(_) => format!("error: {message}\n"),
    }
}
