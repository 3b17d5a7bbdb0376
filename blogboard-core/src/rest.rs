use anyhow::{Context, Result};
use log::debug;
use std::time::Duration;

use crate::error::BlogError;
use crate::post::{Post, PostPayload};
use crate::store::PostStore;

/// Blocking client for the posts resource.
#[derive(Debug, Clone)]
pub struct RestStore {
    base_url: String,
    timeout: Duration,
}

impl RestStore {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    fn check(response: attohttpc::Response, action: &'static str) -> Result<attohttpc::Response> {
        if !response.is_success() {
            return Err(BlogError::status(action, response.status().as_u16()).into());
        }
        Ok(response)
    }
}

impl PostStore for RestStore {
    fn list_posts(&self) -> Result<Vec<Post>> {
        debug!("GET {}", self.base_url);
        let response = attohttpc::get(&self.base_url)
            .timeout(self.timeout)
            .send()
            .context("Failed to fetch posts")?;
        let text = Self::check(response, "fetch posts")?.text()?;
        let posts: Vec<Post> = serde_json::from_str(&text).context("Invalid post list")?;
        Ok(posts)
    }

    fn get_post(&self, id: &str) -> Result<Post> {
        let url = self.post_url(id);
        debug!("GET {}", url);
        let response = attohttpc::get(&url)
            .timeout(self.timeout)
            .send()
            .with_context(|| format!("Failed to fetch post {}", id))?;
        let text = Self::check(response, "fetch post for editing")?.text()?;
        let post: Post = serde_json::from_str(&text).context("Invalid post")?;
        Ok(post)
    }

    fn create_post(&self, payload: &PostPayload) -> Result<()> {
        debug!("POST {}", self.base_url);
        let response = attohttpc::post(&self.base_url)
            .timeout(self.timeout)
            .json(payload)?
            .send()
            .context("Failed to create post")?;
        Self::check(response, "create post")?;
        Ok(())
    }

    fn update_post(&self, id: &str, payload: &PostPayload) -> Result<()> {
        let url = self.post_url(id);
        debug!("PUT {}", url);
        let response = attohttpc::put(&url)
            .timeout(self.timeout)
            .json(payload)?
            .send()
            .with_context(|| format!("Failed to update post {}", id))?;
        Self::check(response, "update post")?;
        Ok(())
    }

    fn delete_post(&self, id: &str) -> Result<()> {
        let url = self.post_url(id);
        debug!("DELETE {}", url);
        let response = attohttpc::delete(&url)
            .timeout(self.timeout)
            .send()
            .with_context(|| format!("Failed to delete post {}", id))?;
        Self::check(response, "delete post")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    struct Captured {
        request_line: String,
        body: String,
    }

    /// Answer exactly one request with `status` and `body`, handing back what was sent.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/posts", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            let mut content_length = 0;
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                let header = header.trim_end();
                if header.is_empty() {
                    break;
                }
                if let Some((name, value)) = header.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }
            let mut raw_body = vec![0; content_length];
            reader.read_exact(&mut raw_body).unwrap();

            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            )
            .unwrap();
            stream.flush().unwrap();

            Captured {
                request_line: request_line.trim_end().to_string(),
                body: String::from_utf8(raw_body).unwrap(),
            }
        });

        (url, handle)
    }

    fn store(url: &str) -> RestStore {
        RestStore::new(url, Duration::from_secs(5))
    }

    fn payload(id: Option<&str>) -> PostPayload {
        PostPayload {
            id: id.map(String::from),
            title: "Title".into(),
            name: "Ada".into(),
            content: "Body".into(),
            date: "2024-03-05".into(),
            profile_picture: "assets/me.jpg".into(),
            blog_images: vec!["assets/a.jpg".into()],
        }
    }

    #[test]
    fn post_urls_ignore_trailing_slash() {
        let store = RestStore::new("http://localhost:3000/posts/", Duration::from_secs(5));
        assert_eq!(store.base_url(), "http://localhost:3000/posts");
        assert_eq!(store.post_url("4"), "http://localhost:3000/posts/4");
    }

    #[test]
    fn lists_posts() {
        let (url, server) = serve_once("200 OK", r#"[{"id":"1","title":"Hello","name":null}]"#);
        let posts = store(&url).list_posts().unwrap();
        let sent = server.join().unwrap();

        assert_eq!(sent.request_line, "GET /posts HTTP/1.1");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Hello");
    }

    #[test]
    fn failed_delete_names_action_and_status() {
        let (url, server) = serve_once("404 Not Found", "{}");
        let err = store(&url).delete_post("9").unwrap_err();
        let sent = server.join().unwrap();

        assert_eq!(sent.request_line, "DELETE /posts/9 HTTP/1.1");
        assert_eq!(
            err.downcast_ref::<BlogError>(),
            Some(&BlogError::Status {
                action: "delete post",
                status: 404
            })
        );
        assert!(err.to_string().contains("delete post"));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn failed_listing_is_an_error() {
        let (url, server) = serve_once("500 Internal Server Error", "[]");
        let err = store(&url).list_posts().unwrap_err();
        server.join().unwrap();

        assert_eq!(
            err.downcast_ref::<BlogError>(),
            Some(&BlogError::status("fetch posts", 500))
        );
    }

    #[test]
    fn create_sends_id_in_body() {
        let (url, server) = serve_once("201 Created", "{}");
        store(&url).create_post(&payload(Some("13"))).unwrap();
        let sent = server.join().unwrap();

        assert_eq!(sent.request_line, "POST /posts HTTP/1.1");
        let body: serde_json::Value = serde_json::from_str(&sent.body).unwrap();
        assert_eq!(body["id"], "13");
        assert_eq!(body["profilePicture"], "assets/me.jpg");
        assert_eq!(body["blogImages"][0], "assets/a.jpg");
    }

    #[test]
    fn update_addresses_post_by_url_only() {
        let (url, server) = serve_once("200 OK", "{}");
        store(&url).update_post("4", &payload(None)).unwrap();
        let sent = server.join().unwrap();

        assert_eq!(sent.request_line, "PUT /posts/4 HTTP/1.1");
        let body: serde_json::Value = serde_json::from_str(&sent.body).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["title"], "Title");
    }
}
