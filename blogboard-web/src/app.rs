use std::cell::RefCell;
use std::rc::Rc;

use blogboard_core::{
    filter_posts, iso_date, render_posts, today, Editor, FormInput, SubmitPlan, Toggle,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event};

use crate::console_log;
use crate::dom;
use crate::fetch::FetchClient;

const FORM_ID: &str = "blog-form";
const POSTS_ID: &str = "blog-posts";
const CREATE_SECTION_ID: &str = "create-blog";

/// State shared by every event handler.
#[derive(Clone)]
struct BlogApp {
    client: FetchClient,
    editor: Rc<RefCell<Editor>>,
}

pub fn mount(server_url: &str) -> Result<(), JsValue> {
    let app = BlogApp {
        client: FetchClient::new(server_url),
        editor: Rc::new(RefCell::new(Editor::new(dom::viewport_width()))),
    };

    dom::set_date_bounds(&iso_date(today()))?;
    app.bind_events()?;
    app.render_view();

    let loader = app.clone();
    spawn_local(async move { loader.refresh().await });

    console_log!("blogboard mounted against {}", server_url);
    Ok(())
}

impl BlogApp {
    fn bind_events(&self) -> Result<(), JsValue> {
        let app = self.clone();
        dom::on(&dom::element(FORM_ID)?, "submit", move |event: Event| {
            event.prevent_default();
            app.on_submit();
        })?;

        let app = self.clone();
        dom::on(&dom::element(POSTS_ID)?, "click", move |event: Event| {
            app.on_post_click(&event);
        })?;

        let app = self.clone();
        dom::on(&dom::element("search-bar")?, "input", move |_| {
            let query = dom::field_value("search-bar").unwrap_or_default();
            let app = app.clone();
            spawn_local(async move { app.search(&query).await });
        })?;

        let app = self.clone();
        dom::on(&dom::element("toggle-create-blog")?, "click", move |_| {
            app.on_toggle();
        })?;

        let document = dom::document()?;
        if let Some(cancel) = document.get_element_by_id("cancel-edit") {
            let app = self.clone();
            dom::on(&cancel, "click", move |_| app.on_cancel())?;
        }
        if let Some(clear) = document.get_element_by_id("clear-blog") {
            let app = self.clone();
            dom::on(&clear, "click", move |_| app.on_clear())?;
        }

        let app = self.clone();
        dom::on(&dom::window()?, "resize", move |_| {
            app.editor.borrow_mut().resize(dom::viewport_width());
            app.render_view();
        })?;

        Ok(())
    }

    fn render_view(&self) {
        let view = self.editor.borrow().view();
        if let Err(e) = dom::apply_view(&view) {
            console_log!("Error updating form: {:?}", e);
        }
    }

    fn reset_form(&self) {
        let result = dom::reset_form(FORM_ID)
            .and_then(|_| dom::set_field_value("date", &iso_date(today())));
        if let Err(e) = result {
            console_log!("Error resetting form: {:?}", e);
        }
    }

    fn read_form(&self) -> Result<FormInput, JsValue> {
        Ok(FormInput {
            title: dom::field_value("title")?,
            name: dom::field_value("name")?,
            content: dom::field_value("content")?,
            profile_picture_file: dom::file_names("profile-pic")?.into_iter().next(),
            image_files: dom::file_names("images")?,
        })
    }

    fn on_submit(&self) {
        let input = match self.read_form() {
            Ok(input) => input,
            Err(e) => {
                console_log!("Error reading the form: {:?}", e);
                return;
            }
        };

        let form = match input.validate() {
            Ok(form) => form,
            Err(rejection) => {
                let alerted = dom::window()
                    .and_then(|window| window.alert_with_message(&rejection.to_string()));
                if let Err(e) = alerted {
                    console_log!("Error showing validation message: {:?}", e);
                }
                return;
            }
        };

        if !form.blog_images.is_empty() {
            console_log!("Selected blog images: {:?}", form.blog_images);
        }

        let app = self.clone();
        spawn_local(async move {
            let existing = if app.editor.borrow().needs_post_list() {
                match app.client.list_posts().await {
                    Ok(posts) => Some(posts),
                    Err(e) => {
                        console_log!("Error fetching posts for ID generation: {:?}", e);
                        None
                    }
                }
            } else {
                None
            };

            let plan = app
                .editor
                .borrow()
                .plan_submit(form, existing.as_deref(), today());
            if let Err(e) = dom::set_field_value("date", &plan.payload().date) {
                console_log!("Error setting the date: {:?}", e);
            }

            let sent = match &plan {
                SubmitPlan::Create(payload) => app.client.create_post(payload).await,
                SubmitPlan::Update { id, payload } => app.client.update_post(id, payload).await,
            };

            match sent {
                Ok(()) => {
                    if matches!(plan, SubmitPlan::Update { .. }) {
                        app.editor.borrow_mut().complete_submit();
                    }
                    app.reset_form();
                    app.refresh().await;

                    let wide = app.editor.borrow().is_wide();
                    let scrolled = if wide {
                        dom::scroll_into_view(POSTS_ID)
                    } else {
                        dom::scroll_to_top()
                    };
                    if let Err(e) = scrolled {
                        console_log!("Error scrolling: {:?}", e);
                    }
                }
                Err(e) => console_log!("Error submitting the form: {:?}", e),
            }

            app.render_view();
        });
    }

    fn on_post_click(&self, event: &Event) {
        let button = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|el| el.closest("button[data-action]").ok().flatten());
        let Some(button) = button else {
            return;
        };
        let (Some(action), Some(id)) = (
            button.get_attribute("data-action"),
            button.get_attribute("data-post-id"),
        ) else {
            return;
        };

        let app = self.clone();
        match action.as_str() {
            "edit" => spawn_local(async move { app.edit(&id).await }),
            "delete" => spawn_local(async move { app.delete(&id).await }),
            other => console_log!("Unknown post action {}", other),
        }
    }

    fn on_toggle(&self) {
        let toggled = self.editor.borrow_mut().toggle_create_section();
        if toggled == Toggle::Closed {
            self.reset_form();
        }
        self.render_view();
        if toggled == Toggle::Opened {
            if let Err(e) = dom::scroll_into_view(CREATE_SECTION_ID) {
                console_log!("Error scrolling: {:?}", e);
            }
        }
    }

    fn on_cancel(&self) {
        self.reset_form();
        self.editor.borrow_mut().cancel_edit();
        self.render_view();
        if let Err(e) = dom::scroll_to_top() {
            console_log!("Error scrolling: {:?}", e);
        }
    }

    fn on_clear(&self) {
        self.reset_form();
        self.editor.borrow_mut().clear_form();
        self.render_view();
    }

    async fn refresh(&self) {
        match self.client.list_posts().await {
            Ok(posts) => self.show(&render_posts(&posts)),
            Err(e) => console_log!("Error fetching posts: {:?}", e),
        }
    }

    async fn search(&self, query: &str) {
        match self.client.list_posts().await {
            Ok(posts) => self.show(&render_posts(&filter_posts(&posts, query))),
            Err(e) => console_log!("Error filtering posts: {:?}", e),
        }
    }

    fn show(&self, html: &str) {
        if let Err(e) = dom::set_html(POSTS_ID, html) {
            console_log!("Error rendering posts: {:?}", e);
        }
    }

    async fn edit(&self, id: &str) {
        match self.client.get_post(id).await {
            Ok(post) => {
                let fields = self.editor.borrow_mut().begin_edit(&post, today());
                let filled = dom::set_field_value("title", &fields.title)
                    .and_then(|_| dom::set_field_value("name", &fields.name))
                    .and_then(|_| dom::set_field_value("content", &fields.content))
                    .and_then(|_| dom::set_field_value("date", &fields.date));
                if let Err(e) = filled {
                    console_log!("Error filling the form: {:?}", e);
                }
                self.render_view();
                if let Err(e) = dom::scroll_into_view(CREATE_SECTION_ID) {
                    console_log!("Error scrolling: {:?}", e);
                }
            }
            Err(e) => {
                console_log!("Error fetching post for editing: {:?}", e);
                self.render_view();
            }
        }
    }

    async fn delete(&self, id: &str) {
        match self.client.delete_post(id).await {
            Ok(()) => self.refresh().await,
            Err(e) => console_log!("Error deleting post {}: {:?}", id, e),
        }
    }
}
