use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ZoomControlsProps {
    pub on_zoom_in: Callback<()>,
    pub on_reset: Callback<()>,
    pub on_zoom_out: Callback<()>,
}

/// On-screen zoom buttons for touch devices without a scroll wheel.
#[function_component]
pub fn ZoomControls(props: &ZoomControlsProps) -> Html {
    let zoom_in = {
        let cb = props.on_zoom_in.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let zoom_out = {
        let cb = props.on_zoom_out.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {<div class="zoom-controls" style="position:fixed; right:14px; bottom:20px; display:flex; flex-direction:column; gap:8px; z-index:30;">
        <button onclick={zoom_in} style="width:44px; height:44px; font-size:20px; background:#1c2128; color:#c9d1d9; border:1px solid #30363d; border-radius:8px;">{"+"}</button>
        <button onclick={reset} style="width:44px; height:44px; font-size:11px; background:#1c2128; color:#c9d1d9; border:1px solid #30363d; border-radius:8px;">{"Reset"}</button>
        <button onclick={zoom_out} style="width:44px; height:44px; font-size:20px; background:#1c2128; color:#c9d1d9; border:1px solid #30363d; border-radius:8px;">{"−"}</button>
    </div>}
}
