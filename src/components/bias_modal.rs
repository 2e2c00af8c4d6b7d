use yew::prelude::*;

/// What the modal shows for one bias.
#[derive(Clone, PartialEq)]
pub struct ModalContent {
    pub title: String,
    pub content_html: String,
    pub wiki_url: Option<String>,
}

#[derive(Properties, PartialEq, Clone)]
pub struct BiasModalProps {
    pub content: Option<ModalContent>,
    pub on_close: Callback<()>,
}

/// Full-screen bias description used on touch devices in place of the
/// hover tooltip. Tapping the backdrop or the close button dismisses it.
#[function_component]
pub fn BiasModal(props: &BiasModalProps) -> Html {
    let Some(content) = props.content.clone() else {
        return html! {};
    };

    let close_backdrop = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let close_button = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {<div class="bias-modal" onclick={close_backdrop} style="position:fixed; inset:0; background:rgba(1,4,9,0.7); display:flex; align-items:center; justify-content:center; z-index:50;">
        <div class="modal-content" onclick={keep_open} style="background:#161b22; color:#c9d1d9; border:1px solid #30363d; border-radius:12px; max-width:560px; width:calc(100% - 32px); max-height:80vh; overflow-y:auto; padding:18px 20px;">
            <button class="close-button" onclick={close_button} style="float:right; background:none; border:none; color:#8b949e; font-size:22px; cursor:pointer;">{"×"}</button>
            <h2 style="margin:0 0 10px 0; font-size:18px;">{ content.title.clone() }</h2>
            <div class="modal-body" style="font-size:14px; line-height:1.55;">
                { Html::from_html_unchecked(AttrValue::from(content.content_html.clone())) }
            </div>
            if let Some(url) = content.wiki_url.clone() {
                <div class="modal-footer" style="margin-top:14px; border-top:1px solid #30363d; padding-top:12px;">
                    <a href={url} target="_blank" class="wiki-button" style="color:#58a6ff; font-size:13px;">{"Read more on Wikipedia"}</a>
                </div>
            }
        </div>
    </div>}
}
