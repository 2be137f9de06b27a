//! WASM bindings for delimited-core.
//!
//! Exposes `reformat` and `to_json` as `#[wasm_bindgen]` functions callable
//! from JavaScript/TypeScript.
//!
//! ```sh
//! cargo build -p delimited-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/delimited_wasm.wasm
//! ```

use delimited_core::{Document, QuotingRule};
use wasm_bindgen::prelude::*;

/// Parse delimited text and serialize it again under `quoting`
/// (`"all_fields"`, `"all_text_fields"`, `"necessary_text_fields"` or `"none"`).
///
/// Throws a JS error for an unknown quoting rule or unparseable input.
#[wasm_bindgen]
pub fn reformat(text: &str, quoting: &str) -> std::result::Result<String, JsValue> {
    reformat_inner(text, quoting).map_err(|e| JsValue::from_str(&e))
}

/// Parse delimited text into a JSON array of rows of typed cells.
#[wasm_bindgen]
pub fn to_json(text: &str) -> std::result::Result<String, JsValue> {
    to_json_inner(text).map_err(|e| JsValue::from_str(&e))
}

fn reformat_inner(text: &str, quoting: &str) -> Result<String, String> {
    let rule: QuotingRule = serde_json::from_value(serde_json::Value::from(quoting))
        .map_err(|_| format!("unknown quoting rule: {}", quoting))?;
    let doc = Document::parse(text).map_err(|e| e.to_string())?;
    Ok(doc.with_quoting_rule(rule).to_delimited_string())
}

fn to_json_inner(text: &str) -> Result<String, String> {
    let doc = Document::parse(text).map_err(|e| e.to_string())?;
    let rows: Vec<_> = doc.rows().collect();
    serde_json::to_string(&rows).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reformat_applies_rule() {
        let out = reformat_inner("a,1\n", "all_fields").unwrap();
        assert_eq!(out, "\"a\",\"1\"\n");
    }

    #[test]
    fn reformat_rejects_unknown_rule() {
        let err = reformat_inner("a,1\n", "sometimes").unwrap_err();
        assert!(err.contains("sometimes"));
    }

    #[test]
    fn to_json_tags_cells() {
        let out = to_json_inner("x,2\n").unwrap();
        assert_eq!(
            out,
            r#"[[{"type":"Text","value":"x"},{"type":"Integer","value":2}]]"#
        );
    }
}
