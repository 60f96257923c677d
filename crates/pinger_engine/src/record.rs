//! Comma-delimited records shared by host lists and result exports.

use std::borrow::Cow;

/// Splits one line into fields. Double-quoted fields may contain commas;
/// a doubled quote inside them stands for a literal quote.
pub(crate) fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => {
                in_quotes = !in_quotes;
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => {
                current.push(ch);
            }
        }
    }
    fields.push(current);
    fields
}

/// Quotes a field when it would otherwise not survive `split_record`.
pub(crate) fn quote_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

pub(crate) fn join_record(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|field| quote_field(field))
        .collect::<Vec<_>>()
        .join(",")
}
