//! DOM element bindings.
//!
//! All fields are resolved once at startup. To add new UI elements, add a
//! field here and bind it in `Elements::bind()`.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

// ── Helpers ──

fn doc() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

pub fn set_input_value(el: &HtmlInputElement, val: &str) {
    el.set_value(val);
}

pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value().trim().to_string()
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

/// Show or hide a branch container via the `hidden` class.
pub fn set_hidden(el: &Element, hidden: bool) {
    toggle_class(el, "hidden", hidden);
}

pub fn create_element(tag: &str) -> Element {
    doc().create_element(tag).unwrap()
}

/// Query all matching elements within a parent element.
pub fn query_all_within(parent: &Element, selector: &str) -> Vec<Element> {
    let nl = parent.query_selector_all(selector).unwrap();
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

/// Blocking informational prompt.
pub fn alert(message: &str) {
    let _ = window().alert_with_message(message);
}

// ── Elements struct ──

/// All DOM element references used by the registrar UI.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    // Header badges
    pub network_badge: Element,
    pub wallet_badge: Element,

    // Branch containers
    pub connect_container: Element,
    pub switch_container: Element,
    pub form_container: Element,
    pub mint_container: Element,

    // Controls
    pub connect_btn: HtmlElement,
    pub switch_btn: HtmlElement,
    pub domain_input: HtmlInputElement,
    pub record_input: HtmlInputElement,
    pub mint_btn: HtmlButtonElement,
    pub update_btn: HtmlButtonElement,
    pub cancel_btn: HtmlElement,

    // Mint list
    pub mint_list: Element,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_input {
    ($id:expr) => {
        by_id_typed::<HtmlInputElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing input #{}", $id)))?
    };
}

macro_rules! get_button {
    ($id:expr) => {
        by_id_typed::<HtmlButtonElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing button #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            network_badge: get_el!("networkBadge"),
            wallet_badge: get_el!("walletBadge"),

            connect_container: get_el!("connectContainer"),
            switch_container: get_el!("switchContainer"),
            form_container: get_el!("formContainer"),
            mint_container: get_el!("mintContainer"),

            connect_btn: get_html!("connectBtn"),
            switch_btn: get_html!("switchBtn"),
            domain_input: get_input!("domainInput"),
            record_input: get_input!("recordInput"),
            mint_btn: get_button!("mintBtn"),
            update_btn: get_button!("updateBtn"),
            cancel_btn: get_html!("cancelBtn"),

            mint_list: get_el!("mintList"),
        })
    }
}
