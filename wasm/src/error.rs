use optcalc::OptionsError;
use wasm_bindgen::JsValue;

/// Errors cross the boundary as `"<Kind>: <message>"` so JS callers can
/// branch on the tag without parsing numbers.
pub(crate) fn to_js_err(e: OptionsError) -> JsValue {
    JsValue::from_str(&format!("{}: {e}", e.kind()))
}

pub(crate) fn json_err(e: serde_json::Error) -> JsValue {
    JsValue::from_str(&format!("InvalidParameter: {e}"))
}
