use crate::config::AppConfig;
use crate::models::users::entities::UserRole;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::{Error as JwtError, ErrorKind},
};
use serde::{Deserialize, Serialize};

pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // 用户 ID
    pub role: UserRole,
    pub token_type: TokenType,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64, JwtError> {
        self.sub
            .parse::<i64>()
            .map_err(|_| JwtError::from(ErrorKind::InvalidSubject))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn encoding_key() -> EncodingKey {
        EncodingKey::from_secret(AppConfig::get().jwt.secret.as_bytes())
    }

    fn decoding_key() -> DecodingKey {
        DecodingKey::from_secret(AppConfig::get().jwt.secret.as_bytes())
    }

    /// access token 有效期（秒）
    pub fn access_token_ttl_secs() -> i64 {
        AppConfig::get().jwt.access_token_expiry * 60
    }

    /// 勾选“记住我”时使用更长的 refresh token 有效期
    pub fn refresh_token_expiry(remember_me: bool) -> chrono::Duration {
        let jwt = &AppConfig::get().jwt;
        if remember_me {
            chrono::Duration::days(jwt.refresh_token_remember_me_expiry)
        } else {
            chrono::Duration::days(jwt.refresh_token_expiry)
        }
    }

    pub fn generate_token(
        user_id: i64,
        role: UserRole,
        token_type: TokenType,
        expiry: chrono::Duration,
    ) -> Result<String, JwtError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            token_type,
            exp: (now + expiry).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        encode(&Header::default(), &claims, &Self::encoding_key())
    }

    pub fn generate_access_token(user_id: i64, role: UserRole) -> Result<String, JwtError> {
        Self::generate_token(
            user_id,
            role,
            TokenType::Access,
            chrono::Duration::seconds(Self::access_token_ttl_secs()),
        )
    }

    pub fn generate_token_pair(
        user_id: i64,
        role: UserRole,
        refresh_token_expiry: Option<chrono::Duration>,
    ) -> Result<TokenPair, JwtError> {
        let refresh_expiry =
            refresh_token_expiry.unwrap_or_else(|| Self::refresh_token_expiry(false));
        Ok(TokenPair {
            access_token: Self::generate_access_token(user_id, role)?,
            refresh_token: Self::generate_token(
                user_id,
                role,
                TokenType::Refresh,
                refresh_expiry,
            )?,
        })
    }

    fn verify(token: &str, expected: TokenType) -> Result<Claims, JwtError> {
        let claims = decode::<Claims>(token, &Self::decoding_key(), &Validation::default())?.claims;
        if claims.token_type != expected {
            return Err(JwtError::from(ErrorKind::InvalidToken));
        }
        Ok(claims)
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, JwtError> {
        Self::verify(token, TokenType::Access)
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims, JwtError> {
        Self::verify(token, TokenType::Refresh)
    }

    /// 用 refresh token 换取新的 access token
    pub fn refresh_access_token(refresh_token: &str) -> Result<String, JwtError> {
        let claims = Self::verify_refresh_token(refresh_token)?;
        Self::generate_access_token(claims.user_id()?, claims.role)
    }

    fn refresh_cookie(value: String, max_age: actix_web::cookie::time::Duration) -> Cookie<'static> {
        Cookie::build(REFRESH_TOKEN_COOKIE, value)
            .path("/")
            .max_age(max_age)
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    pub fn create_refresh_token_cookie(refresh_token: &str, remember_me: bool) -> Cookie<'static> {
        let days = Self::refresh_token_expiry(remember_me).num_days();
        Self::refresh_cookie(
            refresh_token.to_string(),
            actix_web::cookie::time::Duration::days(days),
        )
    }

    /// 注销时用于覆盖浏览器中的 refresh token
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        Self::refresh_cookie(String::new(), actix_web::cookie::time::Duration::seconds(0))
    }

    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }

    /// 从 `Authorization: Bearer` 头中取出 token
    pub fn extract_bearer_token(req: &actix_web::HttpRequest) -> Option<String> {
        req.headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_pair_round_trip() {
        let pair = JwtUtils::generate_token_pair(3, UserRole::Student, None).unwrap();

        let access = JwtUtils::verify_access_token(&pair.access_token).unwrap();
        assert_eq!(access.user_id().unwrap(), 3);
        assert_eq!(access.role, UserRole::Student);
        assert_eq!(access.token_type, TokenType::Access);

        let refresh = JwtUtils::verify_refresh_token(&pair.refresh_token).unwrap();
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let pair = JwtUtils::generate_token_pair(1, UserRole::Professor, None).unwrap();
        assert!(JwtUtils::verify_access_token(&pair.refresh_token).is_err());
        assert!(JwtUtils::verify_refresh_token(&pair.access_token).is_err());
    }

    #[test]
    fn test_refresh_issues_access_token_for_same_user() {
        let pair = JwtUtils::generate_token_pair(2, UserRole::Professor, None).unwrap();
        let access = JwtUtils::refresh_access_token(&pair.refresh_token).unwrap();
        let claims = JwtUtils::verify_access_token(&access).unwrap();
        assert_eq!(claims.sub, "2");
        assert_eq!(claims.role, UserRole::Professor);
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = JwtUtils::generate_token(
            1,
            UserRole::Student,
            TokenType::Access,
            chrono::Duration::minutes(-10),
        )
        .unwrap();
        assert!(JwtUtils::verify_access_token(&token).is_err());
        assert!(JwtUtils::verify_access_token("not-a-token").is_err());
    }

    #[test]
    fn test_remember_me_extends_refresh_expiry() {
        assert!(JwtUtils::refresh_token_expiry(true) >= JwtUtils::refresh_token_expiry(false));
    }
}
