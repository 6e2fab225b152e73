//! One stylesheet out of many.

use css_cascade::{merge_stylesheet, optimize_stylesheet};
use css_syntax::{SerializeOptions, parse_with_repair, serialize};
use log::info;

use crate::error::CssError;
use crate::options::ConsolidateOptions;

/// Concatenate `sources`, fold duplicate rules and drop overridden
/// declarations.
///
/// Every source is flattened to a single line first, so with
/// [`css_cascade::OrderingMode::Legacy`] the column of a rule alone tells
/// which source it came from.
///
/// # Errors
/// Returns [`CssError`] when the concatenation cannot be parsed or merged.
pub fn merge_and_optimize<S>(sources: &[S], options: &ConsolidateOptions) -> Result<String, CssError>
where
    S: AsRef<str>,
{
    let combined: String = sources.iter().map(|source| flatten(source.as_ref())).collect();
    let sheet = parse_with_repair(&combined)?;
    let merged = merge_stylesheet(&sheet, options.ordering)?;
    let optimized = optimize_stylesheet(&merged);
    info!(
        "Consolidated {} sources: {} rules in, {} rules out",
        sources.len(),
        sheet.rules.len(),
        optimized.rules.len()
    );
    Ok(serialize(
        &optimized,
        SerializeOptions {
            minify: options.minify,
        },
    ))
}

/// Line breaks become single spaces so selectors split over lines survive.
///
/// A break escaped by a trailing backslash is a string continuation and is
/// removed together with the backslash.
fn flatten(source: &str) -> String {
    let mut flat = String::with_capacity(source.len());
    let mut lines = source.lines().peekable();
    while let Some(line) = lines.next() {
        if lines.peek().is_none() {
            flat.push_str(line);
            break;
        }
        let backslashes = line.bytes().rev().take_while(|&byte| byte == b'\\').count();
        match line.strip_suffix('\\') {
            Some(continued) if backslashes % 2 == 1 => flat.push_str(continued),
            _ => {
                flat.push_str(line);
                flat.push(' ');
            }
        }
    }
    flat
}
