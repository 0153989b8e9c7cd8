//! Wire codec for the resolver's line protocol.
//!
//! One JSON object per request line, one JSON value per response line. The
//! protocol carries no request identifiers, so pairing is purely positional
//! and enforced by the bridge's single-flight discipline.

use serde::Serialize;

use crate::jedi::error::BridgeError;

/// One request to the resolver: where the cursor is.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest<'a> {
    /// Absolute path of the source file.
    pub file: &'a str,
    /// 1-based line.
    pub line: u32,
    /// 1-based column.
    pub column: u32,
    /// Interpreter whose installed packages the resolver should inspect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python_executable: Option<&'a str>,
    /// Full buffer contents, used instead of reading the file from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_text: Option<&'a str>,
}

impl ResolveRequest<'_> {
    /// Serialize as a single newline-terminated line.
    pub fn to_line(&self) -> Result<String, BridgeError> {
        let mut line = serde_json::to_string(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        line.push('\n');
        Ok(line)
    }
}

/// Parse one response line: a JSON string (the symbol name) or JSON null
/// (no symbol at that position). Anything else is a malformed response.
pub fn parse_response(line: &str) -> Result<Option<String>, BridgeError> {
    serde_json::from_str::<Option<String>>(line.trim()).map_err(|_| {
        BridgeError::MalformedResponse {
            line: line.to_string(),
        }
    })
}
