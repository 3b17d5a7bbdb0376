//! Form state machine shared by every front-end.
//!
//! The editor never talks to the network. Front-ends read what to show from
//! [`Editor::view`] and perform the requests described by [`SubmitPlan`].

use chrono::NaiveDate;

use crate::date::iso_date;
use crate::form::ValidForm;
use crate::post::{next_post_id, Post, PostPayload};

/// Viewports at least this wide use the two-column layout.
pub const DESKTOP_BREAKPOINT: u32 = 992;

pub const CREATE_LABEL: &str = "Create Blog";
pub const UPDATE_LABEL: &str = "Update Blog";
pub const EDIT_HEADING: &str = "Edit Blog";
pub const TOGGLE_OPEN: &str = "×";
pub const TOGGLE_CLOSED: &str = "+";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Create,
    Edit {
        post_id: String,
        blog_images: Vec<String>,
        profile_picture: Option<String>,
    },
}

/// What a front-end should send after a valid submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitPlan {
    Create(PostPayload),
    Update { id: String, payload: PostPayload },
}

impl SubmitPlan {
    pub fn payload(&self) -> &PostPayload {
        match self {
            SubmitPlan::Create(payload) => payload,
            SubmitPlan::Update { payload, .. } => payload,
        }
    }
}

/// Values to copy into the form when editing starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditFields {
    pub title: String,
    pub name: String,
    pub content: String,
    pub date: String,
}

/// Result of pressing the narrow-viewport create toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Opened,
    /// Section closed; the form fields must be reset.
    Closed,
}

/// Labels and visibility of the form chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub images_visible: bool,
    pub create_section_visible: bool,
    pub toggle_label: &'static str,
    pub cancel_visible: bool,
    pub clear_visible: bool,
}

#[derive(Debug, Clone)]
pub struct Editor {
    mode: Mode,
    create_section_open: bool,
    viewport_width: u32,
}

impl Editor {
    pub fn new(viewport_width: u32) -> Self {
        let mut editor = Self {
            mode: Mode::Create,
            create_section_open: false,
            viewport_width,
        };
        editor.resize(viewport_width);
        editor
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Edit { .. })
    }

    pub fn editing_post_id(&self) -> Option<&str> {
        match &self.mode {
            Mode::Edit { post_id, .. } => Some(post_id.as_str()),
            Mode::Create => None,
        }
    }

    pub fn is_wide(&self) -> bool {
        self.viewport_width >= DESKTOP_BREAKPOINT
    }

    /// Whether a submit needs the current post list for id generation.
    pub fn needs_post_list(&self) -> bool {
        !self.is_editing()
    }

    pub fn resize(&mut self, viewport_width: u32) {
        self.viewport_width = viewport_width;
        self.create_section_open = self.is_wide();
    }

    pub fn begin_edit(&mut self, post: &Post, today: NaiveDate) -> EditFields {
        self.mode = Mode::Edit {
            post_id: post.id.clone(),
            blog_images: post.blog_images.clone(),
            profile_picture: post.profile_picture().map(str::to_string),
        };
        self.create_section_open = true;

        EditFields {
            title: post.title.clone(),
            name: post.name.clone(),
            content: post.content.clone(),
            date: iso_date(today),
        }
    }

    pub fn cancel_edit(&mut self) {
        self.mode = Mode::Create;
        if !self.is_wide() {
            self.create_section_open = false;
        }
    }

    pub fn clear_form(&mut self) {
        self.mode = Mode::Create;
    }

    pub fn toggle_create_section(&mut self) -> Toggle {
        if self.create_section_open {
            self.create_section_open = false;
            self.mode = Mode::Create;
            Toggle::Closed
        } else {
            self.create_section_open = true;
            Toggle::Opened
        }
    }

    /// Build the request for a validated form.
    ///
    /// `existing` is the freshly fetched post list in create mode, or `None`
    /// when it could not be fetched (the new id then falls back to "1").
    pub fn plan_submit(
        &self,
        form: ValidForm,
        existing: Option<&[Post]>,
        today: NaiveDate,
    ) -> SubmitPlan {
        let date = iso_date(today);
        match &self.mode {
            Mode::Edit {
                post_id,
                blog_images,
                profile_picture,
            } => SubmitPlan::Update {
                id: post_id.clone(),
                payload: PostPayload {
                    id: None,
                    title: form.title,
                    name: form.name,
                    content: form.content,
                    date,
                    profile_picture: form
                        .profile_picture
                        .or_else(|| profile_picture.clone())
                        .unwrap_or_default(),
                    blog_images: blog_images.clone(),
                },
            },
            Mode::Create => SubmitPlan::Create(PostPayload {
                id: Some(next_post_id(existing.unwrap_or(&[]))),
                title: form.title,
                name: form.name,
                content: form.content,
                date,
                profile_picture: form.profile_picture.unwrap_or_default(),
                blog_images: form.blog_images,
            }),
        }
    }

    /// Called once the server accepted a submit.
    pub fn complete_submit(&mut self) {
        self.mode = Mode::Create;
    }

    pub fn view(&self) -> FormView {
        let editing = self.is_editing();
        let wide = self.is_wide();
        FormView {
            heading: if editing { EDIT_HEADING } else { CREATE_LABEL },
            submit_label: if editing { UPDATE_LABEL } else { CREATE_LABEL },
            images_visible: !editing,
            create_section_visible: wide || self.create_section_open,
            toggle_label: match (wide, self.create_section_open) {
                (true, _) => "",
                (false, true) => TOGGLE_OPEN,
                (false, false) => TOGGLE_CLOSED,
            },
            cancel_visible: wide && editing,
            clear_visible: wide && !editing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDE: u32 = 1280;
    const NARROW: u32 = 600;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn stored(id: &str) -> Post {
        Post {
            id: id.into(),
            title: "Old title".into(),
            name: "Ada".into(),
            content: "Old content".into(),
            date: Some("2020-01-01".into()),
            profile_picture: Some("assets/ada.png".into()),
            blog_images: vec!["assets/x.jpg".into()],
        }
    }

    fn valid() -> ValidForm {
        ValidForm {
            title: "New".into(),
            name: "Grace".into(),
            content: "Body".into(),
            profile_picture: None,
            blog_images: vec!["assets/new.jpg".into()],
        }
    }

    #[test]
    fn starts_in_create_mode() {
        let view = Editor::new(WIDE).view();
        assert_eq!(view.heading, "Create Blog");
        assert_eq!(view.submit_label, "Create Blog");
        assert!(view.images_visible);
        assert!(view.create_section_visible);
        assert_eq!(view.toggle_label, "");
        assert!(view.clear_visible);
        assert!(!view.cancel_visible);
    }

    #[test]
    fn narrow_viewport_hides_form_and_buttons() {
        let view = Editor::new(NARROW).view();
        assert!(!view.create_section_visible);
        assert_eq!(view.toggle_label, "+");
        assert!(!view.clear_visible);
        assert!(!view.cancel_visible);
    }

    #[test]
    fn edit_then_cancel_restores_create_labels() {
        let mut editor = Editor::new(WIDE);
        let fields = editor.begin_edit(&stored("3"), day());
        assert_eq!(fields.title, "Old title");
        assert_eq!(fields.name, "Ada");
        assert_eq!(fields.content, "Old content");
        assert_eq!(fields.date, "2024-06-01");

        let view = editor.view();
        assert_eq!(view.heading, "Edit Blog");
        assert_eq!(view.submit_label, "Update Blog");
        assert!(!view.images_visible);
        assert!(view.cancel_visible);
        assert!(!view.clear_visible);

        editor.cancel_edit();
        assert_eq!(editor.view(), Editor::new(WIDE).view());
        assert_eq!(editor.editing_post_id(), None);
    }

    #[test]
    fn edit_on_narrow_viewport_opens_section() {
        let mut editor = Editor::new(NARROW);
        editor.begin_edit(&stored("3"), day());
        let view = editor.view();
        assert!(view.create_section_visible);
        assert_eq!(view.toggle_label, "×");

        editor.cancel_edit();
        let view = editor.view();
        assert!(!view.create_section_visible);
        assert_eq!(view.toggle_label, "+");
    }

    #[test]
    fn closing_toggle_leaves_edit_mode() {
        let mut editor = Editor::new(NARROW);
        assert_eq!(editor.toggle_create_section(), Toggle::Opened);
        editor.begin_edit(&stored("5"), day());
        assert_eq!(editor.toggle_create_section(), Toggle::Closed);
        assert!(!editor.is_editing());
        assert_eq!(editor.view().submit_label, "Create Blog");
    }

    #[test]
    fn resize_follows_breakpoint() {
        let mut editor = Editor::new(NARROW);
        editor.resize(DESKTOP_BREAKPOINT);
        assert!(editor.view().create_section_visible);
        editor.resize(DESKTOP_BREAKPOINT - 1);
        assert!(!editor.view().create_section_visible);
    }

    #[test]
    fn create_plan_uses_next_id_and_selected_images() {
        let editor = Editor::new(WIDE);
        assert!(editor.needs_post_list());
        let posts = vec![stored("2"), stored("7")];
        let plan = editor.plan_submit(valid(), Some(&posts), day());
        match plan {
            SubmitPlan::Create(payload) => {
                assert_eq!(payload.id.as_deref(), Some("8"));
                assert_eq!(payload.date, "2024-06-01");
                assert_eq!(payload.blog_images, vec!["assets/new.jpg"]);
                assert_eq!(payload.profile_picture, "");
            }
            other => panic!("expected create, got {:?}", other),
        }
    }

    #[test]
    fn create_plan_without_listing_falls_back_to_first_id() {
        let plan = Editor::new(WIDE).plan_submit(valid(), None, day());
        assert_eq!(plan.payload().id.as_deref(), Some("1"));
    }

    #[test]
    fn update_plan_keeps_existing_images_and_picture() {
        let mut editor = Editor::new(WIDE);
        editor.begin_edit(&stored("4"), day());
        assert!(!editor.needs_post_list());

        match editor.plan_submit(valid(), None, day()) {
            SubmitPlan::Update { id, payload } => {
                assert_eq!(id, "4");
                assert_eq!(payload.id, None);
                assert_eq!(payload.title, "New");
                assert_eq!(payload.blog_images, vec!["assets/x.jpg"]);
                assert_eq!(payload.profile_picture, "assets/ada.png");
                assert_eq!(payload.date, "2024-06-01");
            }
            other => panic!("expected update, got {:?}", other),
        }

        editor.complete_submit();
        assert!(!editor.is_editing());
    }

    #[test]
    fn new_profile_picture_replaces_old_one_on_update() {
        let mut editor = Editor::new(WIDE);
        editor.begin_edit(&stored("4"), day());
        let mut form = valid();
        form.profile_picture = Some("assets/new-face.png".into());
        let plan = editor.plan_submit(form, None, day());
        assert_eq!(plan.payload().profile_picture, "assets/new-face.png");
    }
}
