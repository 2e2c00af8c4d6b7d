// Console and device helpers.

use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub fn cerr(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

/// Narrow screens and touch-capable devices get the mobile treatment:
/// tap modals instead of hover tooltips, plus on-screen zoom controls.
pub fn is_mobile_device() -> bool {
    let Some(win) = web_sys::window() else {
        return false;
    };
    let narrow = win
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .is_some_and(|w| w <= 768.0);
    narrow || win.navigator().max_touch_points() > 0
}

pub fn is_portrait() -> bool {
    let Some(win) = web_sys::window() else {
        return false;
    };
    let width = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    height > width
}
