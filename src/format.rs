//! Message text formatting for the `print` and `printf` entry points.
//!
//! `format_print` concatenates operands using the default print spacing
//! rule. `format_printf` substitutes operands into a runtime format string
//! using `{}` (next argument) and `{N}` (argument `N`) placeholders.

use std::fmt::Write;

use crate::arg::LogArg;

/// Rendered in place of a placeholder that has no matching argument.
pub const MISSING_ARG: &str = "{!missing}";

/// Concatenate the display form of each argument.
///
/// A single space separates two adjacent operands when neither of them is
/// textual, so `("a", 1, 2, "b")` renders as `a1 2b`.
pub fn format_print(args: &[&dyn LogArg]) -> String {
    let mut out = String::new();
    let mut prev_textual = true;
    for (i, arg) in args.iter().enumerate() {
        let textual = arg.is_textual();
        if i > 0 && !textual && !prev_textual {
            out.push(' ');
        }
        let _ = write!(out, "{arg}");
        prev_textual = textual;
    }
    out
}

/// Substitute `args` into `format`.
///
/// Supported syntax:
///
/// * `{}` takes the next sequential argument.
/// * `{N}` takes argument `N` (zero-based) without moving the sequence.
/// * `{{` and `}}` produce literal braces; a lone `{` or `}` is copied through.
///
/// Any other brace content is copied verbatim. A placeholder with no
/// argument renders as [`MISSING_ARG`]; arguments never referenced are
/// appended as ` {!extra: a, b}`.
pub fn format_printf(format: &str, args: &[&dyn LogArg]) -> String {
    let mut out = String::with_capacity(format.len());
    let mut used = vec![false; args.len()];
    let mut next = 0usize;
    let mut rest = format;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("{{") {
            out.push('{');
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix("}}") {
            out.push('}');
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix('}') {
            out.push('}');
            rest = after;
            continue;
        }

        let Some(end) = tail.find('}') else {
            out.push_str(tail);
            rest = "";
            break;
        };
        let spec = &tail[1..end];
        if spec.contains('{') {
            // Unmatched `{`: keep it and rescan from the next character.
            out.push('{');
            rest = &tail[1..];
            continue;
        }
        let index = if spec.is_empty() {
            next += 1;
            Some(next - 1)
        } else {
            spec.parse::<usize>().ok()
        };
        match index {
            None => out.push_str(&tail[..=end]),
            Some(i) => match args.get(i) {
                Some(arg) => {
                    let _ = write!(out, "{arg}");
                    used[i] = true;
                }
                None => out.push_str(MISSING_ARG),
            },
        }
        rest = &tail[end + 1..];
    }
    out.push_str(rest);

    append_extra(&mut out, args, &used);
    out
}

fn append_extra(out: &mut String, args: &[&dyn LogArg], used: &[bool]) {
    let mut extra = args
        .iter()
        .zip(used)
        .filter(|(_, used)| !**used)
        .map(|(arg, _)| arg)
        .peekable();
    if extra.peek().is_none() {
        return;
    }
    out.push_str(" {!extra: ");
    for (i, arg) in extra.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{arg}");
    }
    out.push('}');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arg::Shown;
    use rstest::rstest;

    #[rstest]
    fn print_spaces_adjacent_values() {
        assert_eq!(format_print(&[&1, &2, &3]), "1 2 3");
    }

    #[rstest]
    fn print_does_not_space_around_text() {
        assert_eq!(format_print(&[&"a", &1, &2, &"b"]), "a1 2b");
        assert_eq!(format_print(&[&"hello", &"world"]), "helloworld");
    }

    #[rstest]
    fn print_of_nothing_is_empty() {
        assert_eq!(format_print(&[]), "");
    }

    #[rstest]
    fn print_treats_wrapped_display_as_value() {
        let addr: std::net::Ipv4Addr = "10.0.0.1".parse().expect("valid address");
        assert_eq!(format_print(&[&Shown(addr), &8080]), "10.0.0.1 8080");
    }

    #[rstest]
    #[case("x={} y={}", "x=1 y=two")]
    #[case("{1} then {0}", "two then 1")]
    #[case("{{literal}} {}", "{literal} 1 {!extra: two}")]
    #[case("no placeholders", "no placeholders {!extra: 1, two}")]
    #[case("{} {} {}", "1 two {!missing}")]
    #[case("{:?} {}", "{:?} 1 {!extra: two}")]
    #[case("dangling {", "dangling { {!extra: 1, two}")]
    #[case("close } brace {} {}", "close } brace 1 two")]
    #[case("a { {} b", "a { 1 b {!extra: two}")]
    #[case("{ {x {1}", "{ {x two {!extra: 1}")]
    fn printf_substitution(#[case] format: &str, #[case] expected: &str) {
        assert_eq!(format_printf(format, &[&1, &"two"]), expected);
    }

    #[rstest]
    fn printf_mixes_sequential_and_positional() {
        assert_eq!(format_printf("{} {0} {}", &[&"a", &"b"]), "a a b");
    }
}
