//! Hover tooltip for the desktop reading flow.
//!
//! One tooltip node is appended to the document body and reused for
//! every bias the cursor visits. Hiding is delayed so the cursor can
//! travel from the diagram node onto the tooltip (following the
//! Wikipedia link keeps it open).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlElement};

const HIDE_DELAY_MS: i32 = 50;
const ANCHOR_GAP_PX: f64 = 12.0;

pub struct Tooltip {
    node: HtmlElement,
    highlighted: RefCell<Option<Element>>,
    hide_timer: Cell<Option<i32>>,
    locked: Cell<bool>,
    // Listener closures on the node plus the shared hide callback.
    // They hold an Rc back to this struct; destroy() drops them.
    listeners: RefCell<Vec<(&'static str, Closure<dyn FnMut(web_sys::Event)>)>>,
    hide_cb: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl Tooltip {
    pub fn create(document: &Document) -> Option<Rc<Self>> {
        let node: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
        node.set_class_name("bias-tooltip");
        node.set_attribute(
            "style",
            "position:absolute; display:none; max-width:320px; z-index:20; \
             background:#161b22; color:#c9d1d9; border:1px solid #30363d; \
             border-radius:6px; padding:10px 12px; font-size:14px;",
        )
        .ok()?;
        document.body()?.append_child(&node).ok()?;

        let tooltip = Rc::new(Tooltip {
            node,
            highlighted: RefCell::new(None),
            hide_timer: Cell::new(None),
            locked: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
            hide_cb: RefCell::new(None),
        });

        // Hovering the tooltip itself keeps it open.
        let enter = {
            let t = Rc::clone(&tooltip);
            Closure::wrap(Box::new(move |_e: web_sys::Event| {
                t.locked.set(true);
                t.cancel_hide();
            }) as Box<dyn FnMut(_)>)
        };
        let leave = {
            let t = Rc::clone(&tooltip);
            Closure::wrap(Box::new(move |_e: web_sys::Event| {
                t.locked.set(false);
                t.schedule_hide();
            }) as Box<dyn FnMut(_)>)
        };
        let _ = tooltip
            .node
            .add_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref());
        let _ = tooltip
            .node
            .add_event_listener_with_callback("mouseleave", leave.as_ref().unchecked_ref());
        tooltip
            .listeners
            .borrow_mut()
            .extend([("mouseenter", enter), ("mouseleave", leave)]);

        let hide = {
            let t = Rc::clone(&tooltip);
            Closure::wrap(Box::new(move || {
                t.hide_timer.set(None);
                if !t.locked.get() {
                    t.hide_now();
                }
            }) as Box<dyn FnMut()>)
        };
        *tooltip.hide_cb.borrow_mut() = Some(hide);

        Some(tooltip)
    }

    /// Fills and positions the tooltip below `anchor`, highlighting it.
    pub fn show_for(
        &self,
        anchor: &Element,
        name: &str,
        content_html: &str,
        wiki_url: Option<&str>,
    ) {
        self.cancel_hide();
        self.unhighlight();

        let mut markup = format!("<h3>{name}</h3><div class=\"tooltip-body\">{content_html}</div>");
        if let Some(url) = wiki_url {
            markup.push_str(&format!(
                "<div class=\"tooltip-footer\"><a href=\"{url}\" target=\"_blank\" \
                 class=\"wiki-link\">Read more on Wikipedia</a></div>"
            ));
        }
        self.node.set_inner_html(&markup);

        let _ = anchor.class_list().add_1("highlighted");
        *self.highlighted.borrow_mut() = Some(anchor.clone());

        let rect = anchor.get_bounding_client_rect();
        let (scroll_x, scroll_y) = web_sys::window()
            .map(|w| (w.scroll_x().unwrap_or(0.0), w.scroll_y().unwrap_or(0.0)))
            .unwrap_or((0.0, 0.0));
        let style = self.node.style();
        let _ = style.set_property("left", &format!("{}px", rect.left() + scroll_x));
        let _ = style.set_property(
            "top",
            &format!("{}px", rect.bottom() + scroll_y + ANCHOR_GAP_PX),
        );
        let _ = style.set_property("display", "block");
    }

    /// Hides after a short delay unless the cursor reaches the tooltip
    /// first (the timer callback checks the hover lock).
    pub fn schedule_hide(&self) {
        self.cancel_hide();
        let Some(win) = web_sys::window() else {
            return;
        };
        let cb = self.hide_cb.borrow();
        let Some(cb) = cb.as_ref() else {
            return;
        };
        if let Ok(handle) = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            HIDE_DELAY_MS,
        ) {
            self.hide_timer.set(Some(handle));
        }
    }

    pub fn cancel_hide(&self) {
        if let Some(handle) = self.hide_timer.take() {
            if let Some(win) = web_sys::window() {
                win.clear_timeout_with_handle(handle);
            }
        }
    }

    fn hide_now(&self) {
        let _ = self.node.style().set_property("display", "none");
        self.unhighlight();
    }

    fn unhighlight(&self) {
        if let Some(prev) = self.highlighted.borrow_mut().take() {
            let _ = prev.class_list().remove_1("highlighted");
        }
    }

    /// Detaches the node and drops every closure holding an `Rc` back
    /// to this tooltip.
    pub fn destroy(&self) {
        self.cancel_hide();
        self.unhighlight();
        for (event, cb) in self.listeners.borrow_mut().drain(..) {
            let _ = self
                .node
                .remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
        }
        self.hide_cb.borrow_mut().take();
        self.node.remove();
    }
}
