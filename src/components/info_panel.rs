use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

/// Info button plus the about panel it toggles. Clicking anywhere
/// outside the open panel closes it.
#[function_component]
pub fn InfoPanel() -> Html {
    let open = use_state(|| false);
    let panel_ref = use_node_ref();
    let button_ref = use_node_ref();

    {
        let open_handle = open.clone();
        let panel_ref = panel_ref.clone();
        let button_ref = button_ref.clone();
        use_effect_with(*open, move |is_open| -> Box<dyn FnOnce()> {
            if !*is_open {
                return Box::new(|| ());
            }
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return Box::new(|| ());
            };
            let onclick = Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                let Some(target) = e.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok())
                else {
                    return;
                };
                let inside = |node_ref: &NodeRef| {
                    node_ref
                        .get()
                        .is_some_and(|node| node.contains(Some(&target)))
                };
                if !inside(&panel_ref) && !inside(&button_ref) {
                    open_handle.set(false);
                }
            }) as Box<dyn FnMut(_)>);
            let _ = document
                .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref());
            Box::new(move || {
                let _ = document
                    .remove_event_listener_with_callback("click", onclick.as_ref().unchecked_ref());
            })
        });
    }

    let toggle = {
        let open = open.clone();
        Callback::from(move |_| open.set(!*open))
    };
    let close = {
        let open = open.clone();
        Callback::from(move |_| open.set(false))
    };

    html! {<>
        <button ref={button_ref} class="info-button" onclick={toggle} title="About this diagram" style="width:30px; height:30px; font-size:15px; background:#1c2128; color:#c9d1d9; border:1px solid #30363d; border-radius:50%;">{"i"}</button>
        if *open {
            <div ref={panel_ref} class="info-panel" style="position:absolute; top:52px; right:14px; width:300px; background:#161b22; color:#c9d1d9; border:1px solid #30363d; border-radius:10px; padding:14px 16px; z-index:40; font-size:13px; line-height:1.5;">
                <button class="close-info" onclick={close} style="float:right; background:none; border:none; color:#8b949e; font-size:16px; cursor:pointer;">{"×"}</button>
                <h3 style="margin:0 0 8px 0; font-size:14px;">{"About"}</h3>
                <p style="margin:0 0 8px 0;">{"An interactive map of roughly two hundred cognitive biases, grouped by the problem they help the mind work around. Scroll or pinch to zoom, drag to pan, and open any bias for its description."}</p>
                <p style="margin:0;">{"Based on the Cognitive Bias Codex by Buster Benson and John Manoogian III. Descriptions are drawn from Wikipedia."}</p>
            </div>
        }
    </>}
}
