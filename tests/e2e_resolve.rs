//! Documentation URL resolution E2E tests
//!
//! Drives the public resolution surface the way the CLI does: a symbol name
//! in, a docs.python.org URL (or nothing) out, with the user configuration
//! supplying templates for third-party libraries.

use std::collections::HashMap;

use rstest::rstest;
use tempfile::TempDir;

use pyhelp::config::UserConfig;
use pyhelp::docs::resolve_doc_url;

fn resolve(symbol: &str) -> Option<String> {
    resolve_doc_url(symbol, &HashMap::new())
}

#[rstest]
// Builtins land on the functions, constants and exceptions pages.
#[case("builtins.print", "https://docs.python.org/3/library/functions.html#print")]
#[case("builtins.None", "https://docs.python.org/3/library/constants.html#None")]
#[case("builtins.ValueError", "https://docs.python.org/3/library/exceptions.html#ValueError")]
#[case("builtins.KeyboardInterrupt", "https://docs.python.org/3/library/exceptions.html#KeyboardInterrupt")]
// Members of built-in types live on the prose stdtypes page.
#[case("builtins.str.join", "https://docs.python.org/3/library/stdtypes.html#str.join")]
#[case("builtins.dict.update", "https://docs.python.org/3/library/stdtypes.html#dict.update")]
// Standard library symbols anchor into their module page.
#[case("os.getcwd", "https://docs.python.org/3/library/os.html#os.getcwd")]
#[case("json.dumps", "https://docs.python.org/3/library/json.html#json.dumps")]
#[case("datetime.datetime.now", "https://docs.python.org/3/library/datetime.html#datetime.datetime.now")]
fn resolves_standard_symbols(#[case] symbol: &str, #[case] url: &str) {
    assert_eq!(resolve(symbol).as_deref(), Some(url));
}

#[rstest]
// Implementation modules answer for their public page.
#[case("posixpath.join", "https://docs.python.org/3/library/os.path.html#os.path.join")]
#[case("ntpath.basename", "https://docs.python.org/3/library/os.path.html#os.path.basename")]
#[case("_collections_abc.Iterable", "https://docs.python.org/3/library/collections.abc.html#collections.abc.Iterable")]
#[case("_socket.socket", "https://docs.python.org/3/library/socket.html#socket.socket")]
// Submodules with their own page anchor there, not on the parent's page.
#[case("os.path.join", "https://docs.python.org/3/library/os.path.html#os.path.join")]
#[case("unittest.mock.patch", "https://docs.python.org/3/library/unittest.mock.html#unittest.mock.patch")]
#[case("concurrent.futures.ThreadPoolExecutor", "https://docs.python.org/3/library/concurrent.futures.html#concurrent.futures.ThreadPoolExecutor")]
fn resolves_aliased_and_nested_pages(#[case] symbol: &str, #[case] url: &str) {
    assert_eq!(resolve(symbol).as_deref(), Some(url));
}

#[rstest]
// Dunders documented in the data model, not on a library page.
#[case("builtins.object.__init__", "https://docs.python.org/3/reference/datamodel.html#object.__init__")]
#[case("builtins.type.__subclasscheck__", "https://docs.python.org/3/reference/datamodel.html#class.__subclasscheck__")]
#[case("__import_system__.__file__", "https://docs.python.org/3/reference/import.html#file__")]
// Abstract base class members share one anchor, including Mapping re-exports.
#[case("os.environ.get", "https://docs.python.org/3/library/collections.abc.html#collections-abstract-base-classes")]
#[case("builtins.list.append", "https://docs.python.org/3/tutorial/datastructures.html#more-on-lists")]
#[case("builtins.range.index", "https://docs.python.org/3/library/stdtypes.html#common-sequence-operations")]
#[case("builtins.set.union", "https://docs.python.org/3/library/stdtypes.html#frozenset.union")]
#[case("typing.IO.readline", "https://docs.python.org/3/library/io.html#io.TextIOBase.readline")]
fn resolves_special_cases(#[case] symbol: &str, #[case] url: &str) {
    assert_eq!(resolve(symbol).as_deref(), Some(url));
}

#[rstest]
#[case("numpy.ndarray")]
#[case("requests.get")]
#[case("builtins.property.getter")]
#[case("")]
#[case("...")]
fn unknown_symbols_resolve_to_nothing(#[case] symbol: &str) {
    assert_eq!(resolve(symbol), None);
}

#[test]
fn user_templates_cover_third_party_libraries() {
    let libraries = HashMap::from([(
        "numpy".to_string(),
        "https://numpy.org/doc/stable/search.html?q={symbol_name}&m={module_name}".to_string(),
    )]);

    assert_eq!(
        resolve_doc_url("numpy.linalg.norm", &libraries).as_deref(),
        Some("https://numpy.org/doc/stable/search.html?q=numpy.linalg.norm&m=numpy")
    );
    // Built-in pages win over user templates.
    assert_eq!(
        resolve_doc_url("os.getcwd", &libraries).as_deref(),
        Some("https://docs.python.org/3/library/os.html#os.getcwd")
    );
}

#[test]
fn user_config_round_trips_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"libraries": {"requests": "https://requests.readthedocs.io/en/latest/search/?q={symbol_name}"}}"#,
    )
    .unwrap();

    let config = UserConfig::load(&path).unwrap();
    assert_eq!(
        resolve_doc_url("requests.get", &config.libraries).as_deref(),
        Some("https://requests.readthedocs.io/en/latest/search/?q=requests.get")
    );
}
