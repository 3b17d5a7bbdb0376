// Module declarations
pub mod date;
pub mod editor;
pub mod error;
pub mod form;
pub mod post;
pub mod render;
pub mod session;
pub mod store;

#[cfg(not(target_arch = "wasm32"))]
pub mod conf;
#[cfg(not(target_arch = "wasm32"))]
pub mod rest;

pub use date::{display_date, iso_date, today};
pub use editor::{EditFields, Editor, FormView, Mode, SubmitPlan, Toggle, DESKTOP_BREAKPOINT};
pub use error::BlogError;
pub use form::{asset_path, FormInput, ValidForm};
pub use post::{filter_posts, next_post_id, Post, PostPayload};
pub use render::{render_post, render_posts};
pub use session::{BlogSession, SubmitOutcome};
pub use store::{MemoryStore, PostStore};

#[cfg(not(target_arch = "wasm32"))]
pub use conf::Config;
#[cfg(not(target_arch = "wasm32"))]
pub use rest::RestStore;
