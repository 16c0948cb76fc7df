use sparql_database::results::ResultSet;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

impl OutputFormat {
    /// Unknown names select JSON.
    pub fn from_name(name: &str) -> OutputFormat {
        match name.to_ascii_lowercase().as_str() {
            "table" => OutputFormat::Table,
            _ => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    Left,
    Right,
}

pub fn render<W: Write>(
    results: &ResultSet,
    format: OutputFormat,
    writer: &mut W,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Json => render_json(results, writer),
        OutputFormat::Table => render_table(results, writer),
    }
}

/// The complete results document, pretty printed with two space indentation and non-ASCII
/// characters written as `\uXXXX` escapes.
pub fn render_json<W: Write>(results: &ResultSet, writer: &mut W) -> std::io::Result<()> {
    let text = serde_json::to_string_pretty(results)?;
    writeln!(writer, "{}", escape_non_ascii(&text))
}

/// Outside of strings serialized JSON is pure ASCII, so every non-ASCII char sits in a string
/// and can be replaced by its UTF-16 escape.
fn escape_non_ascii(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    let mut units = [0u16; 2];
    for c in json.chars() {
        if c.is_ascii() {
            escaped.push(c);
        } else {
            for unit in c.encode_utf16(&mut units).iter() {
                escaped.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    escaped
}

/// An aligned text table with one column per projected variable.
///
/// Nothing is written when there are no solutions. Columns holding an unsigned integer or
/// decimal typed literal are right aligned, all others left aligned.
pub fn render_table<W: Write>(results: &ResultSet, writer: &mut W) -> std::io::Result<()> {
    let columns = results.vars();
    let bindings = results.bindings();
    if bindings.is_empty() {
        if let Some(boolean) = results.boolean {
            writeln!(writer, "{boolean}")?;
        }
        return Ok(());
    }

    let rows: Vec<Vec<&str>> = bindings
        .iter()
        .map(|b| {
            columns
                .iter()
                .map(|c| b.get(c).map(|t| t.value.as_str()).unwrap_or(""))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(c.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let alignments: Vec<Alignment> = columns
        .iter()
        .map(|c| {
            // literals carrying a datatype count too, so xsd:string "42" also aligns right
            let has_number = bindings.iter().any(|b| {
                b.get(c)
                    .is_some_and(|t| t.is_typed_literal() && is_unsigned_number(&t.value))
            });
            if has_number {
                Alignment::Right
            } else {
                Alignment::Left
            }
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| center(c, *w))
        .collect();
    writeln!(writer, " {}", header.join(" | "))?;

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(writer, "-{}-", rule.join("-+-"))?;

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(widths.iter().zip(&alignments))
            .map(|(cell, (w, a))| match a {
                Alignment::Left => format!("{cell:<w$}", w = *w),
                Alignment::Right => format!("{cell:>w$}", w = *w),
            })
            .collect();
        writeln!(writer, " {}", cells.join(" | "))?;
    }
    Ok(())
}

/// Digits, optionally followed by a dot and more digits.
fn is_unsigned_number(value: &str) -> bool {
    let (integer, fraction) = match value.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (value, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    all_digits(integer) && fraction.map_or(true, all_digits)
}

/// Centers like Python's `str.center`: with an odd margin the extra space goes left when the
/// width is odd.
fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(margin - left))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_numbers() {
        assert!(is_unsigned_number("42"));
        assert!(is_unsigned_number("3.14"));
        assert!(!is_unsigned_number("-1"));
        assert!(!is_unsigned_number("1."));
        assert!(!is_unsigned_number(".5"));
        assert!(!is_unsigned_number("1.2.3"));
        assert!(!is_unsigned_number("1e3"));
        assert!(!is_unsigned_number(""));
    }

    #[test]
    fn test_center() {
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(center("ab", 5), "  ab ");
        assert_eq!(center("abc", 6), " abc  ");
        assert_eq!(center("abcdef", 3), "abcdef");
    }

    #[test]
    fn test_escape_non_ascii() {
        assert_eq!(escape_non_ascii(r#"{"value": "abc"}"#), r#"{"value": "abc"}"#);
        assert_eq!(escape_non_ascii("\"Tromsø\""), r#""Troms\u00f8""#);
        assert_eq!(escape_non_ascii("\"😀\""), r#""\ud83d\ude00""#);
    }

    #[test]
    fn test_format_names() {
        assert_eq!(OutputFormat::from_name("table"), OutputFormat::Table);
        assert_eq!(OutputFormat::from_name("TABLE"), OutputFormat::Table);
        assert_eq!(OutputFormat::from_name("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_name("csv"), OutputFormat::Json);
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }
}
