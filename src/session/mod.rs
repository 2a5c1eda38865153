//! Session helper: token lookup and unverified claims decoding.
//!
//! The decoded claims only drive what the UI shows (welcome line, admin
//! links). No signature or expiry is checked here and nothing in this module
//! grants access to anything; the API stays the authority on every request.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::errors::ClientResult;
use crate::storage::TokenStore;

/// Storage key the token is written under.
pub const TOKEN_KEY: &str = "token";
/// Older pages stored the token here; still read as a fallback.
pub const LEGACY_TOKEN_KEY: &str = "jwt";

/// Name shown when the token carries neither `username` nor `sub`.
pub const FALLBACK_DISPLAY_NAME: &str = "user";

/// Return the stored token, preferring `token` over the legacy `jwt` key.
/// Empty when neither is set.
pub fn get_token(store: &dyn TokenStore) -> String {
    [TOKEN_KEY, LEGACY_TOKEN_KEY]
        .iter()
        .filter_map(|key| store.get_item(key))
        .find(|t| !t.is_empty())
        .unwrap_or_default()
}

pub fn set_token(store: &dyn TokenStore, token: &str) -> ClientResult<()> {
    store.set_item(TOKEN_KEY, token)
}

/// Remove the token under both keys.
pub fn clear_token(store: &dyn TokenStore) -> ClientResult<()> {
    store.remove_item(TOKEN_KEY)?;
    store.remove_item(LEGACY_TOKEN_KEY)
}

/// Claims read from a token payload. Every field is optional because
/// several generations of the server put roles in different places.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Claims {
    pub subject: Option<String>,
    pub username: Option<String>,
    /// `role`: usually a single string such as `"ADMIN"`
    pub role: Option<Value>,
    /// `roles`: only kept when it is an array
    pub roles: Option<Vec<Value>>,
    /// `authorities`: e.g. `"ROLE_ADMIN"` or a list of them
    pub authorities: Option<Value>,
    /// `auth`: consulted only when `authorities` is falsy
    pub auth: Option<Value>,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Claims {
    fn from_map(map: &Map<String, Value>) -> Self {
        let string_claim = |key: &str| {
            map.get(key).and_then(|v| match v {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
        };
        let timestamp_claim = |key: &str| {
            map.get(key)
                .and_then(Value::as_i64)
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        };

        Self {
            subject: string_claim("sub"),
            username: string_claim("username"),
            role: map.get("role").cloned(),
            roles: map.get("roles").and_then(Value::as_array).cloned(),
            authorities: map.get("authorities").cloned(),
            auth: map.get("auth").cloned(),
            issued_at: timestamp_claim("iat"),
            expires_at: timestamp_claim("exp"),
        }
    }

    /// `username`, else `sub`.
    pub fn display_name(&self) -> Option<&str> {
        self.username.as_deref().or(self.subject.as_deref())
    }
}

/// Decode the payload segment of a three-part token.
///
/// Returns `None` for anything that is not `header.payload.signature` with a
/// base64url JSON object in the middle. Standard-alphabet and padded payloads
/// are accepted too.
pub fn decode(token: &str) -> Option<Claims> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        tracing::debug!("Token has {} segments, expected 3", parts.len());
        return None;
    }

    let normalized: String = parts[1]
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = match URL_SAFE_NO_PAD.decode(normalized.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("Token payload is not base64url: {}", e);
            return None;
        }
    };

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Some(Claims::from_map(&map)),
        Ok(_) => {
            tracing::debug!("Token payload is not a JSON object");
            None
        }
        Err(e) => {
            tracing::debug!("Token payload is not JSON: {}", e);
            None
        }
    }
}

/// Case-insensitive "ADMIN" substring check over `role`, `roles`, and
/// `authorities` (falling back to `auth`).
pub fn is_admin(claims: &Claims) -> bool {
    let mentions_admin = |v: &Value| claim_text(v).to_uppercase().contains("ADMIN");

    if claims.role.as_ref().is_some_and(|r| truthy(r) && mentions_admin(r)) {
        return true;
    }
    if claims
        .roles
        .as_ref()
        .is_some_and(|roles| roles.iter().any(mentions_admin))
    {
        return true;
    }
    claims
        .authorities
        .as_ref()
        .filter(|v| truthy(v))
        .or(claims.auth.as_ref().filter(|v| truthy(v)))
        .is_some_and(mentions_admin)
}

/// Loosely stringify a claim value: arrays join with commas, null is empty.
fn claim_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Object(_) => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(claim_text).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Snapshot of the stored token and whatever its payload decoded to.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    claims: Option<Claims>,
}

impl Session {
    pub fn load(store: &dyn TokenStore) -> Self {
        Self::from_token(&get_token(store))
    }

    pub fn from_token(token: &str) -> Self {
        if token.is_empty() {
            return Self::default();
        }
        Self {
            token: Some(token.to_string()),
            claims: decode(token),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Token present and its payload decoded.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.claims.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.claims.as_ref().is_some_and(is_admin)
    }

    pub fn display_name(&self) -> String {
        self.claims
            .as_ref()
            .and_then(Claims::display_name)
            .unwrap_or(FALLBACK_DISPLAY_NAME)
            .to_string()
    }
}

/// Header line state: welcome text, logout button, admin navigation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderBar {
    pub welcome: Option<String>,
    pub show_logout: bool,
    pub show_admin_nav: bool,
}

impl From<&Session> for HeaderBar {
    fn from(session: &Session) -> Self {
        if !session.has_token() {
            return Self::default();
        }
        Self {
            welcome: Some(format!("Welcome, {}", session.display_name())),
            show_logout: true,
            show_admin_nav: session.is_admin(),
        }
    }
}

/// Which form the account panel shows while signed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelTab {
    #[default]
    Login,
    Register,
}

/// Account panel contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPanel {
    Account {
        username: String,
        show_admin_link: bool,
    },
    SignedOut(PanelTab),
}

impl AuthPanel {
    /// Profile view only when the token decodes; anything else gets the login form.
    pub fn for_session(session: &Session) -> Self {
        if session.is_authenticated() {
            AuthPanel::Account {
                username: session.display_name(),
                show_admin_link: session.is_admin(),
            }
        } else {
            AuthPanel::SignedOut(PanelTab::Login)
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AuthPanel::Account { .. } => "Account",
            AuthPanel::SignedOut(PanelTab::Login) => "Login",
            AuthPanel::SignedOut(PanelTab::Register) => "Register",
        }
    }
}

#[cfg(test)]
pub(crate) fn encode_test_token(payload: &Value) -> String {
    format!(
        "eyJhbGciOiJIUzI1NiJ9.{}.c2lnbmF0dXJl",
        URL_SAFE_NO_PAD.encode(payload.to_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    #[test]
    fn test_decode_malformed_tokens() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("not-a-token"), None);
        assert_eq!(decode("only.two"), None);
        assert_eq!(decode("a.b.c.d"), None);
        assert_eq!(decode("header.@@@.sig"), None);
        // valid base64url, but not JSON
        assert_eq!(decode("h.bm90IGpzb24.s"), None);
        // valid JSON, but not an object
        let array = URL_SAFE_NO_PAD.encode("[1,2]");
        assert_eq!(decode(&format!("h.{}.s", array)), None);
    }

    #[test]
    fn test_decode_reads_subject_and_role() {
        let token = encode_test_token(&json!({
            "sub": "alice",
            "role": "ADMIN",
            "roles": ["ADMIN"],
            "iat": 1_700_000_000,
            "exp": 1_700_003_600
        }));

        let claims = decode(&token).unwrap();
        assert_eq!(claims.subject.as_deref(), Some("alice"));
        assert_eq!(claims.display_name(), Some("alice"));
        assert_eq!(claims.roles.as_ref().map(Vec::len), Some(1));
        assert_eq!(
            claims.expires_at.map(|t| t.timestamp()),
            Some(1_700_003_600)
        );
    }

    #[test]
    fn test_decode_accepts_padding_and_standard_alphabet() {
        let payload = base64::engine::general_purpose::STANDARD
            .encode(json!({"username": "b?>>", "sub": "x"}).to_string());
        let claims = decode(&format!("h.{}.s", payload)).unwrap();
        assert_eq!(claims.display_name(), Some("b?>>"));
    }

    #[test]
    fn test_is_admin_claim_shapes() {
        let admin_shapes = [
            json!({"role": "ADMIN"}),
            json!({"role": "admin"}),
            json!({"roles": ["ADMIN", "USER"]}),
            json!({"roles": ["user", "Role_Admin"]}),
            json!({"authorities": "ROLE_ADMIN"}),
            json!({"authorities": ["ROLE_USER", "ROLE_ADMIN"]}),
            json!({"auth": "ROLE_ADMIN"}),
            json!({"authorities": "", "auth": "admin"}),
        ];
        for payload in admin_shapes {
            let claims = decode(&encode_test_token(&payload)).unwrap();
            assert!(is_admin(&claims), "expected admin for {}", payload);
        }

        let user_shapes = [
            json!({"role": "USER"}),
            json!({"roles": "ADMIN"}),
            json!({"roles": ["USER"]}),
            json!({"authorities": "ROLE_USER", "auth": "ROLE_ADMIN"}),
            json!({"sub": "admin"}),
        ];
        for payload in user_shapes {
            let claims = decode(&encode_test_token(&payload)).unwrap();
            assert!(!is_admin(&claims), "expected non-admin for {}", payload);
        }
    }

    #[test]
    fn test_get_token_prefers_current_key() {
        let store = MemoryStorage::new();
        assert_eq!(get_token(&store), "");

        store.set_item(LEGACY_TOKEN_KEY, "legacy").unwrap();
        assert_eq!(get_token(&store), "legacy");

        set_token(&store, "current").unwrap();
        assert_eq!(get_token(&store), "current");

        clear_token(&store).unwrap();
        assert_eq!(get_token(&store), "");
        assert_eq!(store.get_item(LEGACY_TOKEN_KEY), None);
    }

    #[test]
    fn test_header_for_undecodable_token() {
        let session = Session::from_token("garbage");
        assert!(session.has_token());
        assert!(!session.is_authenticated());

        let header = HeaderBar::from(&session);
        assert_eq!(header.welcome.as_deref(), Some("Welcome, user"));
        assert!(header.show_logout);
        assert!(!header.show_admin_nav);

        assert_eq!(
            AuthPanel::for_session(&session),
            AuthPanel::SignedOut(PanelTab::Login)
        );
    }

    #[test]
    fn test_panel_for_admin_session() {
        let token = encode_test_token(&json!({"sub": "root", "roles": ["ADMIN"]}));
        let session = Session::from_token(&token);

        let panel = AuthPanel::for_session(&session);
        assert_eq!(
            panel,
            AuthPanel::Account {
                username: "root".to_string(),
                show_admin_link: true
            }
        );
        assert_eq!(panel.title(), "Account");
        assert!(HeaderBar::from(&session).show_admin_nav);
    }

    #[test]
    fn test_signed_out_header_is_empty() {
        let session = Session::load(&MemoryStorage::new());
        assert_eq!(HeaderBar::from(&session), HeaderBar::default());
    }
}
