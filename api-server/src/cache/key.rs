use super::middleware::CacheableRequest;
use sha2::{Digest, Sha256};
use std::fmt;

/// Identity of a cacheable request.
///
/// Hashes the method, path, query string and body. The body is part of the
/// key because the posts route takes its parameters from the body, so two
/// requests to the same URI can produce different responses.
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn from_request(request: &CacheableRequest) -> Self {
        let mut hasher = Sha256::new();
        // Length prefixes keep field boundaries unambiguous.
        for part in [
            request.method.as_bytes(),
            request.path.as_bytes(),
            request.query.as_deref().unwrap_or_default().as_bytes(),
            request.body.as_slice(),
        ] {
            hasher.update((part.len() as u64).to_be_bytes());
            hasher.update(part);
        }
        hasher.update([request.query.is_some() as u8]);

        CacheKey(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, path: &str, query: Option<&str>, body: &str) -> CacheableRequest {
        CacheableRequest {
            method: method.to_string(),
            path: path.to_string(),
            query: query.map(str::to_string),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_same_request_same_key() {
        let a = CacheKey::from_request(&request("GET", "/api/posts", None, r#"{"tags":"tech"}"#));
        let b = CacheKey::from_request(&request("GET", "/api/posts", None, r#"{"tags":"tech"}"#));
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn test_body_is_part_of_the_key() {
        let a = CacheKey::from_request(&request("GET", "/api/posts", None, r#"{"tags":"tech"}"#));
        let b = CacheKey::from_request(&request("GET", "/api/posts", None, r#"{"tags":"history"}"#));
        assert_ne!(a, b);
    }

    #[test]
    fn test_method_path_and_query_are_part_of_the_key() {
        let base = CacheKey::from_request(&request("GET", "/api/posts", None, ""));
        assert_ne!(base, CacheKey::from_request(&request("POST", "/api/posts", None, "")));
        assert_ne!(base, CacheKey::from_request(&request("GET", "/api/other", None, "")));
        assert_ne!(base, CacheKey::from_request(&request("GET", "/api/posts", Some("tags=tech"), "")));
        assert_ne!(base, CacheKey::from_request(&request("GET", "/api/posts", Some(""), "")));
    }

    #[test]
    fn test_field_boundaries_do_not_collide() {
        let a = CacheKey::from_request(&request("GET", "/api/posts", Some("ab"), "c"));
        let b = CacheKey::from_request(&request("GET", "/api/posts", Some("a"), "bc"));
        assert_ne!(a, b);
    }
}
