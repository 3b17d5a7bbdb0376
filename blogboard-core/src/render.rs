use askama::Template;

use crate::date::display_date;
use crate::post::Post;

pub const DEFAULT_PROFILE_PICTURE: &str = "./assets/default-profile.jpg";
pub const EMPTY_MESSAGE: &str = r#"<p class="text-center">No posts found</p>"#;

/// Display-ready fields of one post. Templates escape every value.
struct PostView<'a> {
    id: &'a str,
    title: &'a str,
    name: &'a str,
    content: &'a str,
    avatar_src: &'a str,
    avatar_alt: String,
    date: Option<String>,
    blog_images: &'a [String],
}

impl<'a> From<&'a Post> for PostView<'a> {
    fn from(post: &'a Post) -> Self {
        let (avatar_src, avatar_alt) = match post.profile_picture() {
            Some(path) => (path, format!("{}'s profile picture", post.name)),
            None => (
                DEFAULT_PROFILE_PICTURE,
                "Default profile picture".to_string(),
            ),
        };

        Self {
            id: &post.id,
            title: &post.title,
            name: &post.name,
            content: &post.content,
            avatar_src,
            avatar_alt,
            date: post.date.as_deref().and_then(display_date),
            blog_images: &post.blog_images,
        }
    }
}

#[derive(Template)]
#[template(path = "post.html")]
struct PostTemplate<'a> {
    post: PostView<'a>,
}

#[derive(Template)]
#[template(path = "posts.html")]
struct PostsTemplate<'a> {
    posts: Vec<PostView<'a>>,
}

/// Render the whole posts container.
///
/// Every post is prepended, mirroring `insertAdjacentHTML("afterbegin")`,
/// so the last post of `posts` ends up on top.
pub fn render_posts(posts: &[Post]) -> String {
    if posts.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    PostsTemplate {
        posts: posts.iter().rev().map(PostView::from).collect(),
    }
    .to_string()
}

pub fn render_post(post: &Post) -> String {
    PostTemplate {
        post: PostView::from(post),
    }
    .to_string()
}
