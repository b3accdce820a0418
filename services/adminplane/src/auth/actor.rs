//! Actor identity carried on each request.
//!
//! The fronting auth layer authenticates the user and asserts their role in a
//! trusted header. An absent or unreadable header means the request is
//! unauthenticated.
use axum::http::HeaderMap;

/// Header carrying the authenticated actor's role name.
pub const ACTOR_ROLE_HEADER: &str = "x-warden-role";

/// The authenticated actor, as asserted by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub role: String,
}

/// Extract the actor from request headers, if any.
pub fn actor_from_headers(headers: &HeaderMap) -> Option<Actor> {
    let role = headers.get(ACTOR_ROLE_HEADER)?.to_str().ok()?.trim();
    if role.is_empty() {
        return None;
    }
    Some(Actor {
        role: role.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_role_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(ACTOR_ROLE_HEADER, HeaderValue::from_static("Viewer"));
        assert_eq!(
            actor_from_headers(&headers),
            Some(Actor {
                role: "Viewer".to_string()
            })
        );
    }

    #[test]
    fn missing_blank_or_unreadable_headers_mean_anonymous() {
        assert_eq!(actor_from_headers(&HeaderMap::new()), None);

        let mut blank = HeaderMap::new();
        blank.insert(ACTOR_ROLE_HEADER, HeaderValue::from_static("   "));
        assert_eq!(actor_from_headers(&blank), None);

        let mut bad = HeaderMap::new();
        bad.insert(
            ACTOR_ROLE_HEADER,
            HeaderValue::from_bytes(&[0xff, 0xfe]).expect("opaque bytes"),
        );
        assert_eq!(actor_from_headers(&bad), None);
    }
}
