use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LoadingIndicatorProps {
    pub message: AttrValue,
}

#[function_component]
pub fn LoadingIndicator(props: &LoadingIndicatorProps) -> Html {
    html! {<div class="loading-indicator" style="flex:1; display:flex; flex-direction:column; align-items:center; justify-content:center; gap:12px; color:#8b949e;">
        <div class="spinner" style="width:28px; height:28px; border:3px solid #30363d; border-top-color:#58a6ff; border-radius:50%; animation:spin 0.8s linear infinite;"></div>
        <p style="margin:0; font-size:14px;">{ props.message.clone() }</p>
    </div>}
}
