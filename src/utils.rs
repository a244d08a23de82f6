use std::fmt::Display;

/// Make a trimmed copy of the provided `String`, or `None` if it is blank.
pub fn take_if_not_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Wrap a compound (space-containing) string representation in parentheses.
pub fn parenthesize(value: &str) -> String {
    if value.contains(' ') {
        format!("({value})")
    } else {
        value.to_string()
    }
}

/// Format items as a tuple, i.e. `()`, `(a,)` or `(a, b)`.
pub fn tuple_str<T: Display>(items: &[T]) -> String {
    match items {
        [] => "()".to_string(),
        [single] => format!("({single},)"),
        _ => {
            let items = items.iter().map(|i| i.to_string()).collect::<Vec<_>>();
            format!("({})", items.join(", "))
        }
    }
}
