use blogboard_core::{FormView, DESKTOP_BREAKPOINT};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    ScrollToOptions, Window,
};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn element(id: &str) -> Result<Element, JsValue> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", id)))
}

pub fn typed<T: JsCast>(id: &str) -> Result<T, JsValue> {
    element(id)?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{} has an unexpected element type", id)))
}

/// Register `handler` for `event` on `target` for the lifetime of the page.
pub fn on(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Value of an `<input>` or `<textarea>`.
pub fn field_value(id: &str) -> Result<String, JsValue> {
    let el = element(id)?;
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        Ok(input.value())
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        Ok(area.value())
    } else {
        Err(JsValue::from_str(&format!("#{} is not a form field", id)))
    }
}

pub fn set_field_value(id: &str, value: &str) -> Result<(), JsValue> {
    let el = element(id)?;
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
    Ok(())
}

/// Names of the files picked in a file input, in selection order.
pub fn file_names(id: &str) -> Result<Vec<String>, JsValue> {
    let input: HtmlInputElement = typed(id)?;
    let mut names = Vec::new();
    if let Some(files) = input.files() {
        for i in 0..files.length() {
            if let Some(file) = files.get(i) {
                names.push(file.name());
            }
        }
    }
    Ok(names)
}

/// Pin the date input to today.
pub fn set_date_bounds(today: &str) -> Result<(), JsValue> {
    let date: HtmlInputElement = typed("date")?;
    date.set_value(today);
    date.set_attribute("min", today)?;
    date.set_attribute("max", today)?;
    Ok(())
}

pub fn reset_form(id: &str) -> Result<(), JsValue> {
    typed::<HtmlFormElement>(id)?.reset();
    Ok(())
}

pub fn set_html(id: &str, html: &str) -> Result<(), JsValue> {
    element(id)?.set_inner_html(html);
    Ok(())
}

// Missing elements are skipped; the cancel and clear buttons are optional.
fn set_display(id: &str, visible: bool) -> Result<(), JsValue> {
    let Some(el) = document()?.get_element_by_id(id) else {
        return Ok(());
    };
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        el.style()
            .set_property("display", if visible { "block" } else { "none" })?;
    }
    Ok(())
}

fn set_text(id: &str, text: &str) -> Result<(), JsValue> {
    element(id)?.set_text_content(Some(text));
    Ok(())
}

pub fn apply_view(view: &FormView) -> Result<(), JsValue> {
    if let Some(button) = document()?.query_selector("#blog-form button[type='submit']")? {
        button.set_text_content(Some(view.submit_label));
    }
    set_text("form-heading", view.heading)?;
    set_text("toggle-create-blog", view.toggle_label)?;
    set_display("images-container", view.images_visible)?;
    set_display("create-blog", view.create_section_visible)?;
    set_display("cancel-edit", view.cancel_visible)?;
    set_display("clear-blog", view.clear_visible)?;
    Ok(())
}

pub fn viewport_width() -> u32 {
    window()
        .ok()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .map(|w| w as u32)
        .unwrap_or(DESKTOP_BREAKPOINT)
}

pub fn scroll_to_top() -> Result<(), JsValue> {
    let opts = ScrollToOptions::new();
    opts.set_top(0.0);
    opts.set_behavior(ScrollBehavior::Smooth);
    window()?.scroll_to_with_scroll_to_options(&opts);
    Ok(())
}

pub fn scroll_into_view(id: &str) -> Result<(), JsValue> {
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(ScrollBehavior::Smooth);
    opts.set_block(ScrollLogicalPosition::Start);
    element(id)?.scroll_into_view_with_scroll_into_view_options(&opts);
    Ok(())
}
