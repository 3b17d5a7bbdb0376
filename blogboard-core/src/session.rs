use anyhow::Result;
use log::{error, info, warn};

use crate::date::today;
use crate::editor::{EditFields, Editor, SubmitPlan};
use crate::error::BlogError;
use crate::form::FormInput;
use crate::post::{filter_posts, Post};
use crate::render::render_posts;
use crate::store::PostStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Rejected(BlogError),
    Created { id: String },
    Updated { id: String },
}

/// Handler-level operations over a store and the form state.
pub struct BlogSession<S> {
    store: S,
    editor: Editor,
    posts: Vec<Post>,
}

impl<S: PostStore> BlogSession<S> {
    pub fn new(store: S, viewport_width: u32) -> Self {
        Self {
            store,
            editor: Editor::new(viewport_width),
            posts: Vec::new(),
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Posts from the last successful fetch.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Fetch every post and render the container.
    pub fn refresh(&mut self) -> Result<String> {
        let posts = logged(self.store.list_posts(), "Error fetching posts")?;
        let html = render_posts(&posts);
        self.posts = posts;
        Ok(html)
    }

    /// Fetch every post and render the ones matching `query`.
    pub fn search(&mut self, query: &str) -> Result<String> {
        let posts = logged(self.store.list_posts(), "Error filtering posts")?;
        let found = filter_posts(&posts, query);
        info!("Search {:?} matched {} of {} posts", query, found.len(), posts.len());
        let html = render_posts(&found);
        self.posts = found;
        Ok(html)
    }

    pub fn submit(&mut self, input: &FormInput) -> Result<SubmitOutcome> {
        let form = match input.validate() {
            Ok(form) => form,
            Err(rejection) => return Ok(SubmitOutcome::Rejected(rejection)),
        };

        let existing = if self.editor.needs_post_list() {
            match self.store.list_posts() {
                Ok(posts) => Some(posts),
                Err(e) => {
                    warn!("Error fetching posts for ID generation: {:#}", e);
                    None
                }
            }
        } else {
            None
        };

        let plan = self
            .editor
            .plan_submit(form, existing.as_deref(), today());

        let outcome = match &plan {
            SubmitPlan::Create(payload) => {
                logged(self.store.create_post(payload), "Error submitting the form")?;
                SubmitOutcome::Created {
                    id: payload.id.clone().unwrap_or_default(),
                }
            }
            SubmitPlan::Update { id, payload } => {
                logged(self.store.update_post(id, payload), "Error submitting the form")?;
                SubmitOutcome::Updated { id: id.clone() }
            }
        };

        self.editor.complete_submit();
        Ok(outcome)
    }

    /// Fetch post `id` and switch the form to edit mode.
    pub fn edit(&mut self, id: &str) -> Result<EditFields> {
        let post = logged(self.store.get_post(id), "Error fetching post for editing")?;
        Ok(self.editor.begin_edit(&post, today()))
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        logged(self.store.delete_post(id), "Error deleting post")?;
        info!("Deleted post {}", id);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.editor.cancel_edit();
    }

    pub fn clear_form(&mut self) {
        self.editor.clear_form();
    }

    pub fn resize(&mut self, viewport_width: u32) {
        self.editor.resize(viewport_width);
    }
}

fn logged<T>(result: Result<T>, what: &str) -> Result<T> {
    if let Err(e) = &result {
        error!("{}: {:#}", what, e);
    }
    result
}
