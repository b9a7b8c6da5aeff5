//! output/error reporting and formatting

use std::fmt;
use std::iter;
use std::fmt::Formatter;
use crate::utils;
use crate::ScriptError;
use crate::parser::ParserError;


pub fn render_script_error<'a>(source: &'a str, error: &'a ScriptError) -> impl fmt::Display + 'a {
    utils::delegate_fmt(move |fmt| match error {
        ScriptError::Syntax(error) => fmt_parser_error(fmt, source, error),
        ScriptError::Eval(error) => writeln!(fmt, "{}.", utils::title_case_string(&error.to_string())),
    })
}

pub fn render_parser_error<'a>(source: &'a str, error: &'a ParserError) -> impl fmt::Display + 'a {
    utils::delegate_fmt(move |fmt| fmt_parser_error(fmt, source, error))
}

pub fn fmt_parser_error(fmt: &mut Formatter<'_>, source: &str, error: &ParserError) -> fmt::Result {
    // Write error message
    let message = utils::title_case_string(&error.to_string());
    write!(fmt, "{}.\n\n", message)?;

    // Write source line
    match (error.location(), error.line()) {
        (Some(span), Some(lineno)) => fmt_source_line(fmt, source, lineno, span.index, span.length),
        _ => Ok(()),
    }
}

// the line containing `offset`, with a marker under the offending span
fn fmt_source_line(fmt: &mut Formatter<'_>, source: &str, lineno: usize, offset: usize, length: usize) -> fmt::Result {
    let offset = offset.min(source.len());
    let line_start = source[..offset].rfind('\n').map_or(0, |idx| idx + 1);
    let line_end = source[offset..].find('\n').map_or(source.len(), |idx| offset + idx);
    let source_line = source[line_start..line_end].trim_end();

    let start_col = source[line_start..offset].chars().count();
    let span_end = (offset + length).min(line_end);
    let width = source.get(offset..span_end).map_or(0, |text| text.chars().count()).max(1);

    let margin = format!("{: >3}|    ", lineno);

    let mut marker = String::new();
    marker.extend(iter::repeat(' ').take(margin.len() + start_col));
    marker.extend(iter::repeat('^').take(width));

    writeln!(fmt, "{}{}", margin, source_line)?;
    writeln!(fmt, "{}", marker)?;

    Ok(())
}
