use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{
    codex_view::CodexView, info_panel::InfoPanel, language_selector::LanguageSelector,
    loading_indicator::LoadingIndicator, orientation_help::OrientationHelp,
};
use crate::content;
use crate::model::{BiasCatalog, HistoryState, Language};
use crate::util::{cerr, clog};

/// A fetched diagram asset and the language it actually belongs to
/// (English when the requested translation was missing).
#[derive(Clone, PartialEq)]
struct Diagram {
    markup: AttrValue,
    language: Language,
}

#[derive(Clone, PartialEq)]
enum CatalogState {
    Pending,
    Ready(Rc<BiasCatalog>),
    Failed,
}

fn language_from_url() -> Language {
    let param = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
        .and_then(|params| params.get("lang"));
    Language::from_param(param.as_deref())
}

fn push_language_url(language: Language) {
    let Some(win) = web_sys::window() else {
        return;
    };
    let Ok(href) = win.location().href() else {
        return;
    };
    let Ok(url) = web_sys::Url::new(&href) else {
        return;
    };
    url.search_params().set("lang", language.code());
    let state = serde_json::to_string(&HistoryState { language }).unwrap_or_default();
    if let Ok(history) = win.history() {
        let _ = history.push_state_with_url(&JsValue::from_str(&state), "", Some(&url.href()));
    }
}

fn set_document_lang(language: Language) {
    if let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    {
        let _ = root.set_attribute("lang", language.code());
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let language = use_state(language_from_url);
    let diagram = use_state(|| Option::<Diagram>::None);
    let catalog = use_state(|| CatalogState::Pending);
    let error = use_state(|| Option::<String>::None);
    let booted = use_state_eq(|| false);

    // Load the bias descriptions once. The diagram does not wait for
    // them; a missing catalog just means no tooltips.
    {
        let catalog = catalog.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match content::load_catalog().await {
                    Ok(parsed) => {
                        clog(&format!("bias catalog ready: {} entries", parsed.len()));
                        catalog.set(CatalogState::Ready(Rc::new(parsed)));
                    }
                    Err(err) => {
                        cerr(&format!("bias catalog failed to load: {err:?}"));
                        catalog.set(CatalogState::Failed);
                    }
                }
            });
            || ()
        });
    }

    // (Re)load the diagram whenever the language changes.
    {
        let diagram = diagram.clone();
        let error = error.clone();
        let booted = booted.clone();
        use_effect_with(*language, move |lang| {
            let lang = *lang;
            diagram.set(None);
            error.set(None);
            set_document_lang(lang);
            spawn_local(async move {
                match content::load_diagram(lang).await {
                    Ok((markup, effective)) => {
                        if effective != lang {
                            set_document_lang(effective);
                        }
                        diagram.set(Some(Diagram {
                            markup: markup.into(),
                            language: effective,
                        }));
                        booted.set(true);
                    }
                    Err(err) => {
                        cerr(&format!("diagram failed to load: {err:?}"));
                        error.set(Some(String::from(
                            "Error loading content. Please try refreshing the page.",
                        )));
                    }
                }
            });
            || ()
        });
    }

    // Browser navigation restores the language the entry was pushed with.
    {
        let language = language.clone();
        use_effect_with((), move |_| {
            let win = web_sys::window();
            let onpop = Closure::wrap(Box::new(move |e: web_sys::PopStateEvent| {
                let lang = e
                    .state()
                    .as_string()
                    .and_then(|raw| serde_json::from_str::<HistoryState>(&raw).ok())
                    .map(|state| state.language)
                    .unwrap_or_else(language_from_url);
                language.set(lang);
            }) as Box<dyn FnMut(_)>);
            if let Some(win) = &win {
                let _ = win
                    .add_event_listener_with_callback("popstate", onpop.as_ref().unchecked_ref());
            }
            move || {
                if let Some(win) = win {
                    let _ = win.remove_event_listener_with_callback(
                        "popstate",
                        onpop.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let on_language = {
        let language = language.clone();
        Callback::from(move |lang: Language| {
            if lang != *language {
                push_language_url(lang);
                language.set(lang);
            }
        })
    };

    let settled_catalog = match &*catalog {
        CatalogState::Pending => None,
        CatalogState::Ready(parsed) => Some(parsed.clone()),
        CatalogState::Failed => Some(Rc::new(BiasCatalog::default())),
    };

    let body = if let Some(message) = (*error).clone() {
        html! {<div class="error" style="flex:1; display:flex; align-items:center; justify-content:center; color:#f85149;">
            <p style="margin:0; font-size:14px;">{ message }</p>
        </div>}
    } else if let (Some(diagram), Some(catalog)) = ((*diagram).clone(), settled_catalog) {
        html! {<CodexView markup={diagram.markup} language={diagram.language} catalog={catalog} />}
    } else {
        let message = if *booted {
            "Loading translation..."
        } else {
            "Loading Cognitive Bias Codex..."
        };
        html! {<LoadingIndicator message={message} />}
    };

    html! {<div id="container" style="height:100vh; display:flex; flex-direction:column; background:#0d1117; color:#c9d1d9; font-family:-apple-system,'Segoe UI',Roboto,sans-serif;">
        <header style="display:flex; align-items:center; gap:12px; padding:10px 16px; border-bottom:1px solid #30363d;">
            <h1 style="margin:0; font-size:16px; font-weight:600;">{"Cognitive Bias Codex"}</h1>
            <LanguageSelector selected={*language} on_change={on_language} />
            <InfoPanel />
        </header>
        { body }
        <OrientationHelp />
    </div>}
}
