use serde::{Deserialize, Serialize};

/// Type of JWT: access or refresh.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT payload used for authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,     // username
    pub iat: usize,      // issued at (unix timestamp)
    pub exp: usize,      // expires at (unix timestamp)
    pub iss: String,     // issuer
    pub aud: String,     // audience
    pub kind: TokenKind, // token type
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_kind_uses_issued_spelling_only() {
        assert_eq!(serde_json::to_string(&TokenKind::Access).unwrap(), r#""access""#);
        assert_eq!(
            serde_json::from_str::<TokenKind>(r#""refresh""#).unwrap(),
            TokenKind::Refresh
        );
        assert!(serde_json::from_str::<TokenKind>(r#""Access""#).is_err());
        assert!(serde_json::from_str::<TokenKind>(r#""Refresh""#).is_err());
    }
}
