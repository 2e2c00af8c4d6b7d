use yew::prelude::*;

use crate::util::is_mobile_device;

const SEEN_KEY: &str = "orientation-help-shown";

/// One-time hint for phones: rotate to landscape or pinch to zoom.
/// Dismissing it is remembered across visits.
#[function_component]
pub fn OrientationHelp() -> Html {
    let visible = use_state(|| {
        if !is_mobile_device() {
            return false;
        }
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                // Show only if the key is absent
                return store.get_item(SEEN_KEY).ok().flatten().is_none();
            }
        }
        true
    });

    if !*visible {
        return html! {};
    }

    let dismiss = {
        let visible = visible.clone();
        Callback::from(move |_| {
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    let _ = store.set_item(SEEN_KEY, "true");
                }
            }
            visible.set(false);
        })
    };

    html! {<div class="orientation-help" style="position:fixed; left:50%; bottom:84px; transform:translateX(-50%); background:rgba(22,27,34,0.95); border:1px solid #30363d; border-radius:10px; padding:12px 16px; z-index:45; max-width:320px; text-align:center;">
        <p style="margin:0 0 10px 0; font-size:13px; color:#c9d1d9;">{"For the best view, rotate your device to landscape. Pinch to zoom and drag to move around."}</p>
        <button class="dismiss-orientation" onclick={dismiss} style="padding:6px 14px; background:#238636; color:#ffffff; border:none; border-radius:6px; font-size:13px;">{"Got it"}</button>
    </div>}
}
