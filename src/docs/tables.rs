//! Fixed page-mapping tables for docs.python.org.
//!
//! These tables are compiled in and never mutated at runtime. Entries are
//! hand-curated: the documentation site does not follow one rule per symbol,
//! so the irregular cases live here and the generic module-page rule only
//! covers the rest.

/// Root of the documentation site all URLs are built against.
pub const DOCS_BASE: &str = "https://docs.python.org/3";

/// Private implementation modules renamed to their public documented name.
pub const MODULE_RENAMES: &[(&str, &str)] = &[("_collections_abc", "collections.abc")];

/// Modules whose documentation lives under a different module's name
/// entirely. The position resolver reports the implementation module
/// (e.g. `posixpath.join` for `os.path.join`).
pub const PAGE_REDIRECTS: &[(&str, &str)] = &[
    ("genericpath", "os.path"),
    ("ntpath", "os.path"),
    ("posixpath", "os.path"),
];

/// Dotted submodules documented on a page separate from their parent.
pub const SEPARATE_PAGE_SUBMODULES: &[&str] = &[
    "collections.abc",
    "os.path",
    "logging.config",
    "logging.handlers",
    "curses.ascii",
    "curses.panel",
    "multiprocessing.shared_memory",
    "concurrent.futures",
    "html.parser",
    "html.entities",
    "xml.etree.elementtree",
    "xml.dom",
    "xml.dom.minidom",
    "xml.dom.pulldom",
    "xml.sax",
    "xml.sax.handler",
    "xml.sax.utils",
    "xml.sax.reader",
    "urllib.request",
    "urllib.parse",
    "urllib.error",
    "urllib.robotparser",
    "http.client",
    "http.server",
    "http.cookies",
    "http.cookiejar",
    "xmlrpc.server",
    "tkinter.colorchooser",
    "tkinter.font",
    "tkinter.messagebox",
    "tkinter.scrolledtext",
    "tkinter.dnd",
    "tkinter.ttk",
    "tkinter.tix",
    "unittest.mock",
];

/// Abstract base classes documented together on one shared anchor.
pub const ABC_CLASSES: &[&str] = &[
    "AsyncGenerator",
    "AsyncIterable",
    "AsyncIterator",
    "Awaitable",
    "ByteString",
    "Callable",
    "Collection",
    "Container",
    "Coroutine",
    "Generator",
    "Hashable",
    "ItemsView",
    "Iterable",
    "Iterator",
    "KeysView",
    "Mapping",
    "MappingView",
    "MutableMapping",
    "MutableSequence",
    "MutableSet",
    "Reversible",
    "Sequence",
    "Set",
    "Sized",
    "ValuesView",
];

/// Mapping-family objects re-exported outside `collections.abc` whose
/// members are documented on the shared ABC anchor.
pub const MAPPING_REEXPORTS: &[&str] = &["os.environ", "os.environb"];

// `typing.IO` members are documented on the io mixin base classes. The sets
// are tested in this order; `readinto` appears in two of them and resolves
// to the first.
pub const RAW_IO_MEMBERS: &[&str] = &["readinto", "read", "readall", "write"];
pub const BUFFERED_IO_MEMBERS: &[&str] = &["read1", "readinto", "readinto1"];
pub const TEXT_IO_MEMBERS: &[&str] = &["detach", "encoding", "errors", "newlines", "readline"];

/// Dunder names anchored under `class.` instead of `object.` on the data
/// model page.
pub const CLASS_DUNDERS: &[&str] = &["__instancecheck__", "__subclasscheck__"];

/// Elementary built-in types documented on the stdtypes page.
/// `"bytes, bytearray"` is a single entry; `bytes` and `bytearray` members
/// fall through to the generic path.
pub const STD_TYPES: &[&str] = &[
    "int",
    "float",
    "complex",
    "list",
    "tuple",
    "range",
    "str",
    "bytes, bytearray",
    "memoryview",
    "set",
    "frozenset",
    "dict",
];

/// Built-in constants documented on the constants page.
pub const BUILTIN_CONSTANTS: &[&str] = &[
    "False",
    "True",
    "None",
    "NotImplemented",
    "Ellipsis",
    "__debug__",
    "quit",
    "copyright",
    "credits",
    "license",
];

/// Name suffixes that classify a two-segment builtin as an exception.
pub const EXCEPTION_SUFFIXES: &[&str] = &["Exception", "Error", "Exit", "Warning", "Interrupt"];

/// Top-level standard-library module names, sorted for binary search.
const STDLIB_MODULES: &[&str] = &[
    "abc",
    "argparse",
    "array",
    "ast",
    "asyncio",
    "atexit",
    "base64",
    "bdb",
    "binascii",
    "bisect",
    "builtins",
    "bz2",
    "cProfile",
    "calendar",
    "cmath",
    "cmd",
    "code",
    "codecs",
    "codeop",
    "collections",
    "colorsys",
    "compileall",
    "concurrent",
    "configparser",
    "contextlib",
    "contextvars",
    "copy",
    "copyreg",
    "csv",
    "ctypes",
    "curses",
    "dataclasses",
    "datetime",
    "dbm",
    "decimal",
    "difflib",
    "dis",
    "doctest",
    "email",
    "encodings",
    "ensurepip",
    "enum",
    "errno",
    "faulthandler",
    "fcntl",
    "filecmp",
    "fileinput",
    "fnmatch",
    "fractions",
    "ftplib",
    "functools",
    "gc",
    "getopt",
    "getpass",
    "gettext",
    "glob",
    "graphlib",
    "grp",
    "gzip",
    "hashlib",
    "heapq",
    "hmac",
    "html",
    "http",
    "idlelib",
    "imaplib",
    "importlib",
    "inspect",
    "io",
    "ipaddress",
    "itertools",
    "json",
    "keyword",
    "linecache",
    "locale",
    "logging",
    "lzma",
    "mailbox",
    "marshal",
    "math",
    "mimetypes",
    "mmap",
    "modulefinder",
    "msvcrt",
    "multiprocessing",
    "netrc",
    "numbers",
    "operator",
    "optparse",
    "os",
    "pathlib",
    "pdb",
    "pickle",
    "pickletools",
    "pkgutil",
    "platform",
    "plistlib",
    "poplib",
    "posix",
    "pprint",
    "profile",
    "pstats",
    "pty",
    "pwd",
    "py_compile",
    "pyclbr",
    "pydoc",
    "queue",
    "quopri",
    "random",
    "re",
    "readline",
    "reprlib",
    "resource",
    "rlcompleter",
    "runpy",
    "sched",
    "secrets",
    "select",
    "selectors",
    "shelve",
    "shlex",
    "shutil",
    "signal",
    "site",
    "smtplib",
    "socket",
    "socketserver",
    "sqlite3",
    "ssl",
    "stat",
    "statistics",
    "string",
    "stringprep",
    "struct",
    "subprocess",
    "symtable",
    "sys",
    "sysconfig",
    "syslog",
    "tabnanny",
    "tarfile",
    "telnetlib",
    "tempfile",
    "termios",
    "test",
    "textwrap",
    "threading",
    "time",
    "timeit",
    "tkinter",
    "token",
    "tokenize",
    "tomllib",
    "trace",
    "traceback",
    "tracemalloc",
    "tty",
    "turtle",
    "turtledemo",
    "types",
    "typing",
    "unicodedata",
    "unittest",
    "urllib",
    "uuid",
    "venv",
    "warnings",
    "wave",
    "weakref",
    "webbrowser",
    "winreg",
    "winsound",
    "wsgiref",
    "xml",
    "xmlrpc",
    "zipapp",
    "zipfile",
    "zipimport",
    "zlib",
    "zoneinfo",
];

/// Whether `root` names a standard-library top-level module.
pub fn is_stdlib_module(root: &str) -> bool {
    STDLIB_MODULES.binary_search(&root).is_ok()
}
