//! Positional key-template interpolation.

use std::fmt;

/// Substitute positional arguments into a key template before lookup.
///
/// `{0}`, `{1}`, ... are replaced with the corresponding argument's display
/// form; e.g. `format_key("msg.{0}", &[&"x"])` yields `"msg.x"`. Placeholders
/// with no matching argument, and braces that are not positional
/// placeholders, are kept verbatim.
pub fn format_key(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let placeholder = after.find('}').and_then(|end| {
            let digits = &after[..end];
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            digits.parse::<usize>().ok().map(|index| (index, end))
        });

        match placeholder {
            Some((index, end)) => {
                match args.get(index) {
                    Some(arg) => out.push_str(&arg.to_string()),
                    None => {
                        out.push('{');
                        out.push_str(&after[..end]);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
