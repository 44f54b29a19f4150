//! `%{name}` template resolution.

use crate::args::RenderArgs;

/// Replacement text for substitution values that were not supplied.
///
/// A positional index past the end of the argument sequence, or a named
/// placeholder absent from the argument mapping, renders as this literal
/// text; it is never an error and the placeholder is never silently dropped.
pub const MISSING_VALUE: &str = "undefined";

/// Substitute all `%{name}` placeholders in `template`.
///
/// A placeholder is a literal `%{`, one or more non-`}` characters, and a
/// literal `}`. All occurrences are replaced in one left-to-right pass:
/// positional arguments by occurrence order (the captured name is only a
/// document-author hint), named arguments by captured name. With no
/// arguments the template is returned unchanged, placeholders and all.
///
/// Resolution is idempotent on placeholder-free input.
pub fn resolve(template: &str, args: &RenderArgs) -> String {
    match args {
        RenderArgs::None => template.to_string(),
        RenderArgs::Positional(values) => {
            substitute(template, |index, _| values.get(index).map(String::as_str))
        }
        RenderArgs::Named(values) => {
            substitute(template, |_, name| values.get(name).map(String::as_str))
        }
    }
}

/// Single-pass scanner behind [`resolve`].
///
/// `%{}` (empty capture) and an unterminated `%{` are not placeholders and
/// pass through verbatim.
fn substitute<'v>(template: &str, lookup: impl Fn(usize, &str) -> Option<&'v str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut occurrence = 0;

    while let Some(open) = rest.find("%{") {
        let after_open = &rest[open + 2..];
        match after_open.find('}') {
            Some(close) if close > 0 => {
                let name = &after_open[..close];
                out.push_str(&rest[..open]);
                out.push_str(lookup(occurrence, name).unwrap_or(MISSING_VALUE));
                occurrence += 1;
                rest = &after_open[close + 1..];
            }
            _ => {
                out.push_str(&rest[..open + 2]);
                rest = after_open;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_substitution_in_occurrence_order() {
        let out = resolve(
            "Who is %{first} %{last}?",
            &RenderArgs::positional(["John", "Doe"]),
        );
        assert_eq!(out, "Who is John Doe?");
    }

    #[test]
    fn test_positional_ignores_captured_names() {
        let out = resolve(
            "%{last} before %{first}",
            &RenderArgs::positional(["John", "Doe"]),
        );
        assert_eq!(out, "John before Doe");
    }

    #[test]
    fn test_named_substitution() {
        let out = resolve(
            "My name is %{name}",
            &RenderArgs::named([("name", "John")]),
        );
        assert_eq!(out, "My name is John");
    }

    #[test]
    fn test_named_placeholder_repeats() {
        let out = resolve("%{x} and %{x}", &RenderArgs::named([("x", "A")]));
        assert_eq!(out, "A and A");
    }

    #[test]
    fn test_missing_positional_value_uses_sentinel() {
        let out = resolve(
            "Who is %{first} %{last}?",
            &RenderArgs::positional(["John"]),
        );
        assert_eq!(out, format!("Who is John {MISSING_VALUE}?"));
    }

    #[test]
    fn test_missing_named_key_uses_sentinel() {
        let out = resolve(
            "Goodbye, %{name}. See you %{when}.",
            &RenderArgs::named([("name", "Bob")]),
        );
        assert_eq!(out, format!("Goodbye, Bob. See you {MISSING_VALUE}."));
    }

    #[test]
    fn test_no_args_leaves_placeholders_verbatim() {
        let template = "My name is %{name}";
        assert_eq!(resolve(template, &RenderArgs::None), template);
    }

    #[test]
    fn test_resolution_is_idempotent_without_placeholders() {
        let resolved = resolve(
            "Who is %{first} %{last}?",
            &RenderArgs::positional(["John", "Doe"]),
        );
        assert_eq!(resolve(&resolved, &RenderArgs::positional(["X"])), resolved);
        assert_eq!(resolve(&resolved, &RenderArgs::None), resolved);
    }

    #[test]
    fn test_extra_positional_values_are_unused() {
        let out = resolve("Hello %{name}", &RenderArgs::positional(["A", "B", "C"]));
        assert_eq!(out, "Hello A");
    }

    #[test]
    fn test_empty_capture_is_not_a_placeholder() {
        let out = resolve("100%{} done", &RenderArgs::positional(["x"]));
        assert_eq!(out, "100%{} done");
    }

    #[test]
    fn test_unterminated_open_passes_through() {
        let out = resolve("Hello %{name", &RenderArgs::named([("name", "X")]));
        assert_eq!(out, "Hello %{name");
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(resolve("Hello", &RenderArgs::positional(["x"])), "Hello");
    }
}
