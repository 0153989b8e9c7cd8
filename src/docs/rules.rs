//! Ordered special-case rules of the URL resolution engine.
//!
//! Each rule is a predicate-plus-handler over a split symbol; the engine
//! tries them in the order of [`SPECIAL_CASE_RULES`] and the first one that
//! produces a URL wins. Keeping the rules as a flat ordered list keeps the
//! priority explicit and lets each one be tested in isolation.

use crate::docs::symbol::SplitSymbol;
use crate::docs::tables::{
    ABC_CLASSES, BUFFERED_IO_MEMBERS, CLASS_DUNDERS, DOCS_BASE, MAPPING_REEXPORTS, RAW_IO_MEMBERS,
    TEXT_IO_MEMBERS,
};

/// One rule of the cascade.
pub type UrlRule = fn(&SplitSymbol<'_>) -> Option<String>;

/// The special-case rules, in evaluation order.
pub const SPECIAL_CASE_RULES: &[UrlRule] = &[
    import_system,
    typing_io_mixins,
    list_prose_page,
    common_sequence_operations,
    frozenset_section,
    abc_shared_anchor,
    mapping_reexports,
    dunder_data_model,
];

/// Keyword-like constructs with no real module are reported under the
/// `__import_system__` pseudo-module and documented on the import-system
/// reference page, anchored without their leading double underscore.
fn import_system(symbol: &SplitSymbol<'_>) -> Option<String> {
    if symbol.module() != "__import_system__" {
        return None;
    }
    let name = symbol.member(0);
    let anchor = name.get(2..).unwrap_or("");
    Some(format!("{DOCS_BASE}/reference/import.html#{anchor}"))
}

/// `typing.IO` members are documented on one of four io mixin base
/// classes. The member sets are tested in a fixed order and a member in
/// more than one set resolves to the first.
fn typing_io_mixins(symbol: &SplitSymbol<'_>) -> Option<String> {
    if !symbol.resolved().starts_with("typing.IO.") {
        return None;
    }
    let member = symbol.member(1);
    let base = if RAW_IO_MEMBERS.contains(&member) {
        "RawIOBase"
    } else if BUFFERED_IO_MEMBERS.contains(&member) {
        "BufferedIOBase"
    } else if TEXT_IO_MEMBERS.contains(&member) {
        "TextIOBase"
    } else {
        "IOBase"
    };
    Some(format!("{DOCS_BASE}/library/io.html#io.{base}.{member}"))
}

/// `list` methods are documented in prose on the tutorial page, not under
/// per-method anchors.
fn list_prose_page(symbol: &SplitSymbol<'_>) -> Option<String> {
    if !symbol.resolved().starts_with("builtins.list.") {
        return None;
    }
    Some(format!(
        "{DOCS_BASE}/tutorial/datastructures.html#more-on-lists"
    ))
}

/// `tuple` methods and everything on `range` share one anchor.
fn common_sequence_operations(symbol: &SplitSymbol<'_>) -> Option<String> {
    let resolved = symbol.resolved();
    if !resolved.starts_with("builtins.tuple.") && !resolved.starts_with("builtins.range") {
        return None;
    }
    Some(format!(
        "{DOCS_BASE}/library/stdtypes.html#common-sequence-operations"
    ))
}

/// `set` shares its documented section with `frozenset`, and the anchors
/// carry the `frozenset` name.
fn frozenset_section(symbol: &SplitSymbol<'_>) -> Option<String> {
    if !symbol.resolved().starts_with("builtins.set.") {
        return None;
    }
    Some(format!(
        "{DOCS_BASE}/library/stdtypes.html#frozenset.{}",
        symbol.member(1)
    ))
}

/// Members of the abstract base classes are all documented in one table on
/// a single shared anchor.
fn abc_shared_anchor(symbol: &SplitSymbol<'_>) -> Option<String> {
    let module = symbol.module();
    if module != "typing" && module != "collections.abc" {
        return None;
    }
    if !ABC_CLASSES.contains(&symbol.member(0)) || symbol.member_count() != 2 {
        return None;
    }
    Some(abc_page_url())
}

/// `os.environ` and friends are Mapping re-exports; member access on them
/// lands on the shared ABC anchor too.
fn mapping_reexports(symbol: &SplitSymbol<'_>) -> Option<String> {
    let resolved = symbol.resolved();
    let matches = MAPPING_REEXPORTS.iter().any(|reexport| {
        resolved
            .strip_prefix(reexport)
            .and_then(|rest| rest.strip_prefix('.'))
            .is_some_and(|member| !member.is_empty())
    });
    if !matches {
        return None;
    }
    Some(abc_page_url())
}

/// Dunder members are documented on the data model reference, under
/// `class.` for the two metaclass hooks and `object.` for everything else.
fn dunder_data_model(symbol: &SplitSymbol<'_>) -> Option<String> {
    let last = symbol.last_raw_segment();
    if !last.starts_with("__") || !last.ends_with("__") {
        return None;
    }
    let owner = if CLASS_DUNDERS.contains(&last) {
        "class"
    } else {
        "object"
    };
    Some(format!(
        "{DOCS_BASE}/reference/datamodel.html#{owner}.{last}"
    ))
}

fn abc_page_url() -> String {
    format!("{DOCS_BASE}/library/collections.abc.html#collections-abstract-base-classes")
}
