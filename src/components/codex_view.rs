//! The diagram surface: renders the fetched SVG and owns every gesture
//! listener plus the per-bias tooltip/modal handlers.
//!
//! Listeners are attached imperatively so touchmove can call
//! `preventDefault` (the view region replaces native scrolling), and
//! they are torn down and rewired whenever a new diagram asset lands.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, MouseEvent, TouchEvent, WheelEvent};
use yew::prelude::*;

use crate::components::bias_modal::{BiasModal, ModalContent};
use crate::components::zoom_controls::ZoomControls;
use crate::model::{BiasCatalog, Language};
use crate::state::viewport::{STEP_IN_FACTOR, STEP_OUT_FACTOR};
use crate::state::{Gesture, ScreenPoint, Surface, ViewRegion, Viewport};
use crate::tooltip::Tooltip;
use crate::util::{clog, is_mobile_device, is_portrait};

/// Pointer-downs on these (or inside them) never start a gesture.
const OVERLAY_SELECTOR: &str = ".bias-tooltip, .bias-modal, .modal-content, .highlighted";

#[derive(Properties, PartialEq, Clone)]
pub struct CodexViewProps {
    pub markup: AttrValue,
    /// Language the markup actually belongs to, after any fallback.
    pub language: Language,
    pub catalog: Rc<BiasCatalog>,
}

fn apply_region(svg: &Element, region: ViewRegion) {
    let _ = svg.set_attribute("viewBox", &region.to_attribute());
}

fn svg_of(container_ref: &NodeRef) -> Option<Element> {
    container_ref
        .cast::<Element>()?
        .query_selector("svg")
        .ok()
        .flatten()
}

fn surface_metrics(container: &Element) -> (Surface, (f64, f64)) {
    let rect = container.get_bounding_client_rect();
    (
        Surface::new(rect.width(), rect.height()),
        (rect.left(), rect.top()),
    )
}

fn event_point(client_x: i32, client_y: i32, origin: (f64, f64)) -> ScreenPoint {
    ScreenPoint::new(client_x as f64 - origin.0, client_y as f64 - origin.1)
}

/// Ancestor-chain input filter. Reading-surface overlays always block
/// gestures; links block single-pointer begins but stay eligible for
/// two-finger ones.
fn gesture_allowed(target: Option<web_sys::EventTarget>, allow_links: bool) -> bool {
    let Some(element) = target.and_then(|t| t.dyn_into::<Element>().ok()) else {
        return true;
    };
    if element.closest(OVERLAY_SELECTOR).ok().flatten().is_some() {
        return false;
    }
    if !allow_links && element.closest("a").ok().flatten().is_some() {
        return false;
    }
    true
}

/// The first `text` descendant without a `systemLanguage` attribute
/// names the bias; translated variants carry the attribute.
fn anchor_name(anchor: &Element) -> Option<String> {
    let texts = anchor.query_selector_all("text").ok()?;
    let mut pick = None;
    for i in 0..texts.length() {
        let Some(el) = texts.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        if !el.has_attribute("systemLanguage") {
            pick = Some(el);
            break;
        }
        if pick.is_none() {
            pick = Some(el);
        }
    }
    let raw = pick?.text_content()?;
    let name = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    (!name.is_empty()).then_some(name)
}

#[function_component]
pub fn CodexView(props: &CodexViewProps) -> Html {
    let container_ref = use_node_ref();
    let viewport = use_mut_ref(Viewport::default);
    let modal = use_state_eq(|| Option::<ModalContent>::None);

    // Full rewire whenever a new asset (or its catalog) lands.
    {
        let container_ref = container_ref.clone();
        let viewport = viewport.clone();
        let modal_handle = modal.clone();
        let catalog = props.catalog.clone();
        let language = props.language;
        use_effect_with(
            (props.markup.clone(), language, props.catalog.clone()),
            move |_| -> Box<dyn FnOnce()> {
                let Some(win) = web_sys::window() else {
                    return Box::new(|| ());
                };
                let Some(document) = win.document() else {
                    return Box::new(|| ());
                };
                let Some(container) = container_ref.cast::<Element>() else {
                    return Box::new(|| ());
                };
                let Some(svg) = container.query_selector("svg").ok().flatten() else {
                    clog("fetched diagram contains no svg element");
                    return Box::new(|| ());
                };

                let initial = if is_mobile_device() && is_portrait() {
                    ViewRegion::portrait_preset()
                } else {
                    svg.get_attribute("viewBox")
                        .and_then(|attr| ViewRegion::parse_attribute(&attr))
                        .unwrap_or_else(ViewRegion::base)
                };
                *viewport.borrow_mut() = Viewport::new(initial);
                apply_region(&svg, initial);
                modal_handle.set(None);

                let mousedown = {
                    let viewport = viewport.clone();
                    let container = container.clone();
                    Closure::wrap(Box::new(move |e: MouseEvent| {
                        if !gesture_allowed(e.target(), false) {
                            return;
                        }
                        let (_, origin) = surface_metrics(&container);
                        viewport
                            .borrow_mut()
                            .begin_pan(event_point(e.client_x(), e.client_y(), origin));
                    }) as Box<dyn FnMut(_)>)
                };
                // Window-level so a drag keeps tracking outside the surface.
                let mousemove = {
                    let viewport = viewport.clone();
                    let container = container.clone();
                    let svg = svg.clone();
                    Closure::wrap(Box::new(move |e: MouseEvent| {
                        if !viewport.borrow().is_gesturing() {
                            return;
                        }
                        if !gesture_allowed(e.target(), false) {
                            return;
                        }
                        let (surface, origin) = surface_metrics(&container);
                        let point = event_point(e.client_x(), e.client_y(), origin);
                        let mut vp = viewport.borrow_mut();
                        if vp.pan_move(point, surface) {
                            apply_region(&svg, vp.region());
                        }
                    }) as Box<dyn FnMut(_)>)
                };
                let mouseup = {
                    let viewport = viewport.clone();
                    Closure::wrap(Box::new(move |_e: MouseEvent| {
                        viewport.borrow_mut().end();
                    }) as Box<dyn FnMut(_)>)
                };
                let wheel = {
                    let viewport = viewport.clone();
                    let container = container.clone();
                    let svg = svg.clone();
                    Closure::wrap(Box::new(move |e: WheelEvent| {
                        e.prevent_default();
                        let (surface, origin) = surface_metrics(&container);
                        let cursor = event_point(e.client_x(), e.client_y(), origin);
                        let mut vp = viewport.borrow_mut();
                        if vp.wheel_zoom(cursor, e.delta_y(), surface) {
                            apply_region(&svg, vp.region());
                        }
                    }) as Box<dyn FnMut(_)>)
                };
                let touchstart = {
                    let viewport = viewport.clone();
                    let container = container.clone();
                    Closure::wrap(Box::new(move |e: TouchEvent| {
                        let touches = e.touches();
                        let (_, origin) = surface_metrics(&container);
                        if touches.length() >= 2 {
                            let (Some(t0), Some(t1)) = (touches.item(0), touches.item(1))
                            else {
                                return;
                            };
                            if !gesture_allowed(e.target(), true) {
                                return;
                            }
                            viewport.borrow_mut().begin_pinch(
                                event_point(t0.client_x(), t0.client_y(), origin),
                                event_point(t1.client_x(), t1.client_y(), origin),
                            );
                            e.prevent_default();
                        } else if let Some(t0) = touches.item(0) {
                            if !gesture_allowed(e.target(), false) {
                                return;
                            }
                            viewport
                                .borrow_mut()
                                .begin_pan(event_point(t0.client_x(), t0.client_y(), origin));
                            e.prevent_default();
                        }
                    }) as Box<dyn FnMut(_)>)
                };
                let touchmove = {
                    let viewport = viewport.clone();
                    let container = container.clone();
                    let svg = svg.clone();
                    Closure::wrap(Box::new(move |e: TouchEvent| {
                        let gesture = viewport.borrow().gesture();
                        if !gesture.is_active() {
                            return;
                        }
                        // Suppress scrolling for the whole gesture, even for
                        // moves the filter drops.
                        e.prevent_default();
                        let allow_links = matches!(gesture, Gesture::Pinching { .. });
                        if !gesture_allowed(e.target(), allow_links) {
                            return;
                        }
                        let touches = e.touches();
                        let (surface, origin) = surface_metrics(&container);
                        let mut vp = viewport.borrow_mut();
                        let moved = match (touches.item(0), touches.item(1)) {
                            (Some(t0), Some(t1)) => vp.pinch_move(
                                event_point(t0.client_x(), t0.client_y(), origin),
                                event_point(t1.client_x(), t1.client_y(), origin),
                                surface,
                            ),
                            (Some(t0), None) => vp.pan_move(
                                event_point(t0.client_x(), t0.client_y(), origin),
                                surface,
                            ),
                            _ => false,
                        };
                        if moved {
                            apply_region(&svg, vp.region());
                        }
                    }) as Box<dyn FnMut(_)>)
                };
                // No preventDefault on the enders: taps must still synthesize
                // the click that opens the bias modal.
                let touchend = {
                    let viewport = viewport.clone();
                    Closure::wrap(Box::new(move |_e: TouchEvent| {
                        viewport.borrow_mut().end();
                    }) as Box<dyn FnMut(_)>)
                };
                let touchcancel = {
                    let viewport = viewport.clone();
                    Closure::wrap(Box::new(move |_e: TouchEvent| {
                        viewport.borrow_mut().end();
                    }) as Box<dyn FnMut(_)>)
                };

                let _ = container.add_event_listener_with_callback(
                    "mousedown",
                    mousedown.as_ref().unchecked_ref(),
                );
                let _ = win.add_event_listener_with_callback(
                    "mousemove",
                    mousemove.as_ref().unchecked_ref(),
                );
                let _ = win
                    .add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref());
                let _ = container
                    .add_event_listener_with_callback("wheel", wheel.as_ref().unchecked_ref());
                let _ = container.add_event_listener_with_callback(
                    "touchstart",
                    touchstart.as_ref().unchecked_ref(),
                );
                let _ = container.add_event_listener_with_callback(
                    "touchmove",
                    touchmove.as_ref().unchecked_ref(),
                );
                let _ = container.add_event_listener_with_callback(
                    "touchend",
                    touchend.as_ref().unchecked_ref(),
                );
                let _ = container.add_event_listener_with_callback(
                    "touchcancel",
                    touchcancel.as_ref().unchecked_ref(),
                );

                // Reading handlers only exist for the English asset, whose
                // node names match the extract document.
                let mobile = is_mobile_device();
                let wire_nodes = language == Language::En && !catalog.is_empty();
                let tooltip = (wire_nodes && !mobile)
                    .then(|| Tooltip::create(&document))
                    .flatten();
                let mut anchor_listeners: Vec<(
                    Element,
                    &'static str,
                    Closure<dyn FnMut(web_sys::Event)>,
                )> = Vec::new();
                let mut wired = 0usize;
                if wire_nodes {
                    if let Ok(anchors) = container.query_selector_all("svg a") {
                        for i in 0..anchors.length() {
                            let Some(anchor) =
                                anchors.item(i).and_then(|n| n.dyn_into::<Element>().ok())
                            else {
                                continue;
                            };
                            let Some(name) = anchor_name(&anchor) else {
                                continue;
                            };
                            let wiki_url = anchor
                                .get_attribute("xlink:href")
                                .or_else(|| anchor.get_attribute("href"));
                            // Prefer the catalog's casing of the name when it has
                            // an entry for this node.
                            let (title, content_html) = match catalog.find(&name) {
                                Some(entry) => {
                                    (entry.name.clone(), entry.content_html.clone())
                                }
                                None => (
                                    name.clone(),
                                    format!("<p>No detailed content available for {name}.</p>"),
                                ),
                            };

                            if mobile {
                                let click = {
                                    let modal = modal_handle.clone();
                                    Closure::wrap(Box::new(move |e: web_sys::Event| {
                                        e.prevent_default();
                                        modal.set(Some(ModalContent {
                                            title: title.clone(),
                                            content_html: content_html.clone(),
                                            wiki_url: wiki_url.clone(),
                                        }));
                                    })
                                        as Box<dyn FnMut(_)>)
                                };
                                let _ = anchor.add_event_listener_with_callback(
                                    "click",
                                    click.as_ref().unchecked_ref(),
                                );
                                anchor_listeners.push((anchor, "click", click));
                            } else if let Some(tooltip) = &tooltip {
                                let enter = {
                                    let tooltip = Rc::clone(tooltip);
                                    let anchor = anchor.clone();
                                    Closure::wrap(Box::new(move |_e: web_sys::Event| {
                                        tooltip.show_for(
                                            &anchor,
                                            &title,
                                            &content_html,
                                            wiki_url.as_deref(),
                                        );
                                    })
                                        as Box<dyn FnMut(_)>)
                                };
                                let leave = {
                                    let tooltip = Rc::clone(tooltip);
                                    Closure::wrap(Box::new(move |_e: web_sys::Event| {
                                        tooltip.schedule_hide();
                                    })
                                        as Box<dyn FnMut(_)>)
                                };
                                let _ = anchor.add_event_listener_with_callback(
                                    "mouseenter",
                                    enter.as_ref().unchecked_ref(),
                                );
                                let _ = anchor.add_event_listener_with_callback(
                                    "mouseleave",
                                    leave.as_ref().unchecked_ref(),
                                );
                                anchor_listeners.push((anchor.clone(), "mouseenter", enter));
                                anchor_listeners.push((anchor, "mouseleave", leave));
                            }
                            wired += 1;
                        }
                    }
                    clog(&format!("diagram ready: {wired} interactive nodes"));
                }

                let win_cleanup = win.clone();
                let container_cleanup = container.clone();
                Box::new(move || {
                    let _ = container_cleanup.remove_event_listener_with_callback(
                        "mousedown",
                        mousedown.as_ref().unchecked_ref(),
                    );
                    let _ = win_cleanup.remove_event_listener_with_callback(
                        "mousemove",
                        mousemove.as_ref().unchecked_ref(),
                    );
                    let _ = win_cleanup.remove_event_listener_with_callback(
                        "mouseup",
                        mouseup.as_ref().unchecked_ref(),
                    );
                    let _ = container_cleanup.remove_event_listener_with_callback(
                        "wheel",
                        wheel.as_ref().unchecked_ref(),
                    );
                    let _ = container_cleanup.remove_event_listener_with_callback(
                        "touchstart",
                        touchstart.as_ref().unchecked_ref(),
                    );
                    let _ = container_cleanup.remove_event_listener_with_callback(
                        "touchmove",
                        touchmove.as_ref().unchecked_ref(),
                    );
                    let _ = container_cleanup.remove_event_listener_with_callback(
                        "touchend",
                        touchend.as_ref().unchecked_ref(),
                    );
                    let _ = container_cleanup.remove_event_listener_with_callback(
                        "touchcancel",
                        touchcancel.as_ref().unchecked_ref(),
                    );
                    for (element, event, listener) in anchor_listeners {
                        let _ = element.remove_event_listener_with_callback(
                            event,
                            listener.as_ref().unchecked_ref(),
                        );
                    }
                    if let Some(tooltip) = tooltip {
                        tooltip.destroy();
                    }
                })
            },
        );
    }

    let zoom_in = {
        let viewport = viewport.clone();
        let container_ref = container_ref.clone();
        Callback::from(move |_| {
            let mut vp = viewport.borrow_mut();
            if vp.zoom_step(STEP_IN_FACTOR) {
                if let Some(svg) = svg_of(&container_ref) {
                    apply_region(&svg, vp.region());
                }
            }
        })
    };
    let zoom_out = {
        let viewport = viewport.clone();
        let container_ref = container_ref.clone();
        Callback::from(move |_| {
            let mut vp = viewport.borrow_mut();
            if vp.zoom_step(STEP_OUT_FACTOR) {
                if let Some(svg) = svg_of(&container_ref) {
                    apply_region(&svg, vp.region());
                }
            }
        })
    };
    let reset_view = {
        let viewport = viewport.clone();
        let container_ref = container_ref.clone();
        Callback::from(move |_| {
            let mut vp = viewport.borrow_mut();
            vp.reset();
            if let Some(svg) = svg_of(&container_ref) {
                apply_region(&svg, vp.region());
            }
        })
    };
    let close_modal = {
        let modal = modal.clone();
        Callback::from(move |_| modal.set(None))
    };

    html! {<>
        <div ref={container_ref} id="svg-container" style="position:relative; flex:1; min-height:0; overflow:hidden;">
            { Html::from_html_unchecked(props.markup.clone()) }
        </div>
        if is_mobile_device() {
            <ZoomControls on_zoom_in={zoom_in} on_reset={reset_view} on_zoom_out={zoom_out} />
        }
        <BiasModal content={(*modal).clone()} on_close={close_modal} />
    </>}
}
