//! The documentation URL resolution engine.
//!
//! Pure and deterministic: a fully-qualified symbol name goes in, a URL or
//! `None` comes out. No I/O, no errors; absence of a mapping is a result,
//! not a failure.

use std::collections::HashMap;

use crate::docs::rules::SPECIAL_CASE_RULES;
use crate::docs::symbol::SplitSymbol;
use crate::docs::tables::{
    BUILTIN_CONSTANTS, DOCS_BASE, EXCEPTION_SUFFIXES, STD_TYPES, is_stdlib_module,
};

/// Resolve a symbol name to its documentation URL.
///
/// `user_urls` maps a library's root module to a URL template with
/// `{symbol_name}` and `{module_name}` placeholders; it is consulted only
/// when none of the built-in rules produce a page.
pub fn resolve_doc_url(symbol_name: &str, user_urls: &HashMap<String, String>) -> Option<String> {
    let symbol = SplitSymbol::split(symbol_name);

    for rule in SPECIAL_CASE_RULES {
        if let Some(url) = rule(&symbol) {
            return Some(url);
        }
    }

    let generic = if symbol.module() == "builtins" {
        builtins_fallback(&symbol)
    } else {
        stdlib_fallback(&symbol)
    };
    if generic.is_some() {
        return generic;
    }

    user_table_fallback(&symbol, user_urls)
}

/// Builtins have no module page of their own; symbols are classified onto
/// the stdtypes, constants, exceptions, or functions page.
fn builtins_fallback(symbol: &SplitSymbol<'_>) -> Option<String> {
    let head = symbol.member(0);

    if STD_TYPES.contains(&head) {
        return Some(format!(
            "{DOCS_BASE}/library/stdtypes.html#{}",
            symbol.rest()
        ));
    }

    if symbol.raw_segment_count() == 2 {
        let page = if BUILTIN_CONSTANTS.contains(&head) {
            "constants"
        } else if EXCEPTION_SUFFIXES
            .iter()
            .any(|suffix| head.ends_with(suffix))
        {
            "exceptions"
        } else {
            "functions"
        };
        return Some(format!("{DOCS_BASE}/library/{page}.html#{head}"));
    }

    None
}

/// A recognized standard-library module gets its own reference page, with
/// the anchor built from the documented module name. One leading underscore
/// is stripped so private accelerator aliases land on the public page.
fn stdlib_fallback(symbol: &SplitSymbol<'_>) -> Option<String> {
    let module = symbol.module();
    let module = module.strip_prefix('_').unwrap_or(module);
    let root = module.split('.').next().unwrap_or("");

    if !is_stdlib_module(root) {
        return None;
    }

    Some(format!(
        "{DOCS_BASE}/library/{module}.html#{module}.{}",
        symbol.rest()
    ))
}

/// Last resort: the caller-supplied table, keyed by the symbol's first raw
/// segment.
fn user_table_fallback(
    symbol: &SplitSymbol<'_>,
    user_urls: &HashMap<String, String>,
) -> Option<String> {
    let root = symbol.raw().split('.').next().unwrap_or("");
    let template = user_urls.get(root)?;
    Some(
        template
            .replace("{symbol_name}", symbol.raw())
            .replace("{module_name}", symbol.module()),
    )
}
