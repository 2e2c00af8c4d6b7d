use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::model::Language;

#[derive(Properties, PartialEq, Clone)]
pub struct LanguageSelectorProps {
    pub selected: Language,
    pub on_change: Callback<Language>,
}

#[function_component]
pub fn LanguageSelector(props: &LanguageSelectorProps) -> Html {
    let on_change = {
        let cb = props.on_change.clone();
        Callback::from(move |e: Event| {
            let Some(select) = e.target_dyn_into::<HtmlSelectElement>() else {
                return;
            };
            if let Some(lang) = Language::from_code(&select.value()) {
                cb.emit(lang);
            }
        })
    };

    html! {<select id="language-selector" onchange={on_change} style="margin-left:auto; padding:5px 8px; background:#1c2128; color:#c9d1d9; border:1px solid #30363d; border-radius:6px; font-size:13px;">
        { for Language::ALL.iter().map(|lang| html! {
            <option value={lang.code()} selected={*lang == props.selected}>{ lang.label() }</option>
        }) }
    </select>}
}
