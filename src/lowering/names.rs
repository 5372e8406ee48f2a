//! Unique temporary names
//!
//! Synthesized locals (`withBlock`, `oldArr`) must not collide with any name the
//! converted body can see, nor with a With-block temporary already in scope.

use super::context::ConversionContext;
use crate::vb::StatementNode;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static NON_IDENTIFIER_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}_]+").unwrap());

/// Turn arbitrary source text into a PascalCase identifier fragment:
/// `this.items` becomes `ThisItems`
pub fn to_pascal_case(text: &str) -> String {
    NON_IDENTIFIER_CHARS
        .split(text)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// `base` if it is free, otherwise `base1`, `base2`, ...
pub fn ensure_uniqueness(base: &str, reserved: &HashSet<String>) -> String {
    if !reserved.contains(base) {
        return base.to_string();
    }
    (1..)
        .map(|suffix| format!("{}{}", base, suffix))
        .find(|candidate| !reserved.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Allocate a name that is free everywhere inside `node` and in every enclosing With block
pub fn unique_name_in_scope(
    node: &StatementNode,
    base: &str,
    ctx: &ConversionContext<'_>,
) -> String {
    let mut reserved: HashSet<String> = ctx.with_block_names().iter().cloned().collect();
    for position in node.descendant_positions() {
        reserved.extend(ctx.oracle.visible_names_at(position));
    }

    let name = ensure_uniqueness(base, &reserved);
    debug!(
        "Allocated temporary `{}` at {} ({} names reserved)",
        name,
        node.span.start,
        reserved.len()
    );
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(to_pascal_case("arr"), "Arr");
        assert_eq!(to_pascal_case("this.items"), "ThisItems");
        assert_eq!(to_pascal_case("grid[i, j]"), "GridIJ");
        assert_eq!(to_pascal_case("_cache"), "_cache");
    }

    #[test]
    fn test_ensure_uniqueness_appends_counter() {
        let mut reserved = HashSet::new();
        assert_eq!(ensure_uniqueness("withBlock", &reserved), "withBlock");

        reserved.insert("withBlock".to_string());
        reserved.insert("withBlock1".to_string());
        assert_eq!(ensure_uniqueness("withBlock", &reserved), "withBlock2");
    }
}
