//! Error and option plumbing across the JS boundary.

use serde::de::DeserializeOwned;
use std::fmt::Display;
use wasm_bindgen::prelude::*;

/// Convert any core error into a JS `Error`, logging it to the console.
pub(crate) fn to_js_error(err: impl Display) -> JsValue {
    let message = err.to_string();

    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(&format!("retouch: {message}")));

    js_sys::Error::new(&message).into()
}

/// Deserialize an optional options object; `undefined` and `null` mean defaults.
pub(crate) fn parse_options<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(to_js_error)
}

/// Deserialize a required value.
pub(crate) fn parse_value<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(to_js_error)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use retouch_core::{EditError, EditOptions, ImageFormat};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_error_message_is_display_text() {
        let err = to_js_error(EditError::UnknownFilter("nope".into()));
        let err: js_sys::Error = err.dyn_into().unwrap();
        assert_eq!(String::from(err.message()), "Unknown filter: nope");
    }

    #[wasm_bindgen_test]
    fn test_undefined_options_are_default() {
        let opts: EditOptions = parse_options(JsValue::UNDEFINED).unwrap();
        assert_eq!(opts, EditOptions::default());
        let opts: EditOptions = parse_options(JsValue::NULL).unwrap();
        assert_eq!(opts.format, ImageFormat::Png);
    }
}
