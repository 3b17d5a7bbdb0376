use blogboard_core::{BlogError, Post, PostPayload};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

/// `fetch`-based client for the posts resource.
#[derive(Debug, Clone)]
pub struct FetchClient {
    base_url: String,
}

impl FetchClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn post_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, JsValue> {
        let resp = self.send("GET", &self.base_url, None).await?;
        let text = Self::text(Self::expect_ok(resp, "fetch posts")?).await?;
        serde_json::from_str(&text)
            .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))
    }

    pub async fn get_post(&self, id: &str) -> Result<Post, JsValue> {
        let resp = self.send("GET", &self.post_url(id), None).await?;
        let text = Self::text(Self::expect_ok(resp, "fetch post for editing")?).await?;
        serde_json::from_str(&text)
            .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))
    }

    pub async fn create_post(&self, payload: &PostPayload) -> Result<(), JsValue> {
        let body = Self::json(payload)?;
        let resp = self.send("POST", &self.base_url, Some(body)).await?;
        Self::expect_ok(resp, "create post")?;
        Ok(())
    }

    pub async fn update_post(&self, id: &str, payload: &PostPayload) -> Result<(), JsValue> {
        let body = Self::json(payload)?;
        let resp = self.send("PUT", &self.post_url(id), Some(body)).await?;
        Self::expect_ok(resp, "update post")?;
        Ok(())
    }

    pub async fn delete_post(&self, id: &str) -> Result<(), JsValue> {
        let resp = self.send("DELETE", &self.post_url(id), None).await?;
        Self::expect_ok(resp, "delete post")?;
        Ok(())
    }

    async fn send(&self, method: &str, url: &str, body: Option<String>) -> Result<Response, JsValue> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        if let Some(body) = body {
            let headers = Headers::new()?;
            headers.set("Content-Type", "application/json")?;
            opts.set_headers(&headers);
            opts.set_body(&JsValue::from_str(&body));
        }

        let request = Request::new_with_str_and_init(url, &opts)?;
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;
        Ok(resp)
    }

    fn expect_ok(resp: Response, action: &'static str) -> Result<Response, JsValue> {
        if !resp.ok() {
            let err = BlogError::status(action, resp.status());
            return Err(JsValue::from_str(&err.to_string()));
        }
        Ok(resp)
    }

    async fn text(resp: Response) -> Result<String, JsValue> {
        let text = JsFuture::from(resp.text()?).await?;
        Ok(text.as_string().unwrap_or_default())
    }

    fn json(payload: &PostPayload) -> Result<String, JsValue> {
        serde_json::to_string(payload)
            .map_err(|e| JsValue::from_str(&format!("JSON encode error: {}", e)))
    }
}
