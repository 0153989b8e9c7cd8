//! Splitting a fully-qualified symbol name into module and member path.
//!
//! A symbol name is an opaque dot-separated path (`os.path.join`,
//! `builtins.list.append`). Before the page rules run, the module portion is
//! canonicalized: private modules are renamed to their documented name,
//! modules documented under another module's page are redirected, and
//! submodules with their own page claim the longest matching dotted prefix.
//! Whatever remains after the module is the non-module path.

use crate::docs::tables::{MODULE_RENAMES, PAGE_REDIRECTS, SEPARATE_PAGE_SUBMODULES};

/// A symbol name split into its documented module and the member path
/// below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSymbol<'a> {
    raw: &'a str,
    module: String,
    rest: String,
}

impl<'a> SplitSymbol<'a> {
    /// Split `raw` into (module, non-module path).
    ///
    /// Missing pieces degrade to empty strings; this never fails.
    pub fn split(raw: &'a str) -> Self {
        for (private, public) in MODULE_RENAMES {
            if let Some(rest) = strip_dotted_prefix(raw, private) {
                return Self::new(raw, public, rest);
            }
        }

        for (actual, documented) in PAGE_REDIRECTS {
            if let Some(rest) = strip_dotted_prefix(raw, actual) {
                return Self::new(raw, documented, rest);
            }
        }

        // Longest-prefix match so nested entries (xml.dom.minidom) win over
        // their parents (xml.dom).
        let mut best: Option<(&str, &str)> = None;
        for submodule in SEPARATE_PAGE_SUBMODULES {
            if let Some(rest) = strip_dotted_prefix(raw, submodule) {
                if best.is_none_or(|(prev, _)| submodule.len() > prev.len()) {
                    best = Some((submodule, rest));
                }
            }
        }
        if let Some((submodule, rest)) = best {
            return Self::new(raw, submodule, rest);
        }

        let (module, rest) = raw.split_once('.').unwrap_or((raw, ""));
        Self::new(raw, module, rest)
    }

    fn new(raw: &'a str, module: &str, rest: &str) -> Self {
        Self {
            raw,
            module: module.to_string(),
            rest: rest.to_string(),
        }
    }

    /// The symbol name exactly as produced by the resolver.
    pub fn raw(&self) -> &str {
        self.raw
    }

    /// The canonicalized module name.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// The dotted path below the module, possibly empty.
    pub fn rest(&self) -> &str {
        &self.rest
    }

    /// `module.rest`, used for prefix checks against the resolved name.
    pub fn resolved(&self) -> String {
        format!("{}.{}", self.module, self.rest)
    }

    /// The `index`-th segment of the non-module path, or `""`.
    pub fn member(&self, index: usize) -> &str {
        self.rest.split('.').nth(index).unwrap_or("")
    }

    /// Number of segments in the non-module path (`""` counts as one empty
    /// segment, matching how the raw name degrades).
    pub fn member_count(&self) -> usize {
        self.rest.split('.').count()
    }

    /// The final segment of the raw symbol name.
    pub fn last_raw_segment(&self) -> &str {
        self.raw.rsplit('.').next().unwrap_or("")
    }

    /// Number of segments in the raw symbol name.
    pub fn raw_segment_count(&self) -> usize {
        self.raw.split('.').count()
    }
}

/// Strip `prefix` from `raw` respecting dot boundaries: matches the whole
/// name or the prefix followed by a dot, never a partial segment.
fn strip_dotted_prefix<'a>(raw: &'a str, prefix: &str) -> Option<&'a str> {
    if raw == prefix {
        return Some("");
    }
    raw.strip_prefix(prefix)?.strip_prefix('.')
}
