use crate::error::BridgeError;

pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

pub fn parse_error(msg: &str, line: usize, column: usize) -> BridgeError {
    BridgeError::Parse {
        msg: msg.to_string(),
        line,
        column,
    }
}
