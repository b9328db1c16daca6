use std::fmt;

use reqwest::Method;
use serde_json::Value as JsonValue;

/// One outbound call against the Raindrop REST API, fully shaped but not yet sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<JsonValue>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::GET, path: path.into(), query: Vec::new(), body: None }
    }

    pub fn post(path: impl Into<String>, body: JsonValue) -> Self {
        Self { method: Method::POST, path: path.into(), query: Vec::new(), body: Some(body) }
    }

    pub fn put(path: impl Into<String>, body: JsonValue) -> Self {
        Self { method: Method::PUT, path: path.into(), query: Vec::new(), body: Some(body) }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self { method: Method::DELETE, path: path.into(), query: Vec::new(), body: None }
    }

    pub fn with_body(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, query: Vec<(&'static str, String)>) -> Self {
        self.query = query;
        self
    }

    /// Path plus the form-encoded query string; this is the exact target sent on the wire.
    pub fn path_and_query(&self) -> Result<String, serde_urlencoded::ser::Error> {
        if self.query.is_empty() {
            return Ok(self.path.clone());
        }
        let qs = serde_urlencoded::to_string(&self.query)?;
        Ok(format!("{}?{}", self.path, qs))
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path_and_query() {
            Ok(target) => write!(f, "{} {}", self.method, target),
            Err(_) => write!(f, "{} {}", self.method, self.path),
        }
    }
}

/// Display styles a collection can be rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionView {
    List,
    Simple,
    Grid,
    Masonry,
}

impl CollectionView {
    pub const ALL: [CollectionView; 4] = [Self::List, Self::Simple, Self::Grid, Self::Masonry];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Simple => "simple",
            Self::Grid => "grid",
            Self::Masonry => "masonry",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_and_query_keeps_insertion_order() {
        let req = ApiRequest::get("/raindrops/0")
            .with_query(vec![("search", "foo".into()), ("page", "2".into())]);
        assert_eq!(req.path_and_query().unwrap(), "/raindrops/0?search=foo&page=2");
    }

    #[test]
    fn path_and_query_form_encodes_values() {
        let req = ApiRequest::get("/raindrops/0").with_query(vec![("search", "#rust tips".into())]);
        assert_eq!(req.path_and_query().unwrap(), "/raindrops/0?search=%23rust+tips");
    }

    #[test]
    fn path_and_query_escapes_reserved_and_non_ascii() {
        let req = ApiRequest::get("/raindrops/0")
            .with_query(vec![("search", "a&b=c/é".into()), ("page", "1".into())]);
        assert_eq!(
            req.path_and_query().unwrap(),
            "/raindrops/0?search=a%26b%3Dc%2F%C3%A9&page=1"
        );
    }

    #[test]
    fn display_shows_method_and_target() {
        let req = ApiRequest::post("/raindrop", json!({"link": "https://x.test"}));
        assert_eq!(req.to_string(), "POST /raindrop");
    }

    #[test]
    fn collection_view_names_cover_all_variants() {
        assert_eq!(CollectionView::names(), vec!["list", "simple", "grid", "masonry"]);
    }
}
