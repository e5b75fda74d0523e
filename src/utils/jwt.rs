use crate::config::JwtConfig;
use crate::errors::GradebookError;
use crate::models::users::entities::UserRole;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user ID)
    pub role: String,       // 用户角色
    pub token_type: String, // token类型，目前只签发 "access"
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

const ACCESS_TOKEN: &str = "access";

/// HS256 令牌签发与校验
#[derive(Clone)]
pub struct JwtUtils {
    secret: String,
    access_token_expiry: chrono::Duration,
}

impl JwtUtils {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            access_token_expiry: chrono::Duration::minutes(config.access_token_expiry),
        }
    }

    /// 访问令牌有效期（秒）
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_token_expiry.num_seconds()
    }

    // 生成 Access Token
    pub fn generate_access_token(
        &self,
        user_id: i64,
        role: UserRole,
    ) -> Result<String, GradebookError> {
        self.generate_token_with_expiry(user_id, role.as_str(), ACCESS_TOKEN, self.access_token_expiry)
            .map_err(|e| GradebookError::token_issue(format!("生成令牌失败: {e}")))
    }

    // 生成带自定义过期时间的 Token
    pub fn generate_token_with_expiry(
        &self,
        user_id: i64,
        role: &str,
        token_type: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());
        encode(&Header::default(), &claims, &encoding_key)
    }

    // 验证 JWT token
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());
        let validation = Validation::default();

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }

    // 验证 Access Token
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = self.verify_token(token)?;
        if claims.token_type != ACCESS_TOKEN {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utils(secret: &str) -> JwtUtils {
        JwtUtils::new(&JwtConfig {
            secret: secret.to_string(),
            access_token_expiry: 30,
        })
    }

    #[test]
    fn test_access_token_round_trip() {
        let jwt = utils("secret");
        let token = jwt.generate_access_token(7, UserRole::Teacher).unwrap();
        let claims = jwt.verify_access_token(&token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.role, "teacher");
        assert_eq!(jwt.access_token_expiry_secs(), 1800);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = utils("secret").generate_access_token(7, UserRole::Student).unwrap();
        assert!(utils("other").verify_access_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let jwt = utils("secret");
        let token = jwt
            .generate_token_with_expiry(7, "student", "access", chrono::Duration::hours(-1))
            .unwrap();
        assert!(jwt.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_non_access_token_is_rejected() {
        let jwt = utils("secret");
        let token = jwt
            .generate_token_with_expiry(7, "student", "refresh", chrono::Duration::hours(1))
            .unwrap();
        assert!(jwt.verify_token(&token).is_ok());
        assert!(jwt.verify_access_token(&token).is_err());
    }
}
