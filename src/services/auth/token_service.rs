//! 세션 토큰 관리 서비스 구현
//!
//! HMAC-SHA256 서명의 시간 제한 세션 토큰을 발급하고 검증합니다.
//! 토큰은 서버에 저장되지 않으며(무상태), 폐기 목록도 없습니다.
//! 발급된 토큰은 계정 상태가 바뀌어도 `exp`까지 유효합니다 (수용된 한계).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::config::JwtConfig;
use crate::domain::entities::users::user::User;
use crate::domain::token::TokenClaims;
use crate::errors::AppError;

/// 세션 토큰 발급/검증 서비스
///
/// 서명 비밀키와 유효 기간은 기동 시 주입되며 이후 변하지 않습니다.
pub struct TokenService {
    secret: String,
    token_expiry_secs: i64,
}

impl TokenService {
    /// 주입된 JWT 설정으로 서비스 생성
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            token_expiry_secs: config.token_expiry_secs,
        }
    }

    /// 사용자를 위한 세션 토큰 발급
    ///
    /// 클레임은 `{id, name, isAdmin}`에 발급/만료 시각을 더한 것이 전부입니다.
    /// 만료는 항상 설정되며, 무기한 토큰은 존재하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Internal` - 사용자 ID가 없거나 서명 실패
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(self.token_expiry_secs);

        let claims = TokenClaims {
            id: user
                .id_string()
                .ok_or_else(|| AppError::Internal("사용자 ID가 없습니다".to_string()))?,
            name: user.name.clone(),
            is_admin: user.is_admin,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let header = Header::default();
        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());

        encode(&header, &claims, &encoding_key)
            .map_err(|error| AppError::Internal(format!("세션 토큰 생성 실패: {}", error)))
    }

    /// 세션 토큰 검증 및 클레임 추출
    ///
    /// 서명 불일치, 형식 오류, 만료는 모두 같은 `InvalidToken`으로
    /// 수렴합니다. 세부 원인은 내부 메시지로만 구분됩니다.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AppError> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|error| AppError::InvalidToken(error.to_string()))
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 "Bearer {token}" 형식에서
    /// 토큰 부분만을 추출합니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) => Ok(token),
            None => Err(AppError::MissingBearer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_with_expiry(token_expiry_secs: i64) -> TokenService {
        TokenService::new(&JwtConfig {
            secret: "test-signing-secret".to_string(),
            token_expiry_secs,
        })
    }

    fn active_user() -> User {
        let mut user = User::new_pending("Luis".to_string(), "luis@example.com".to_string());
        user.id = Some(mongodb::bson::oid::ObjectId::new());
        user.is_active = true;
        user
    }

    #[test]
    fn test_issue_verify_round_trip() {
        let service = service_with_expiry(3600);
        let user = active_user();

        let token = service.issue(&user).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.id, user.id_string().unwrap());
        assert_eq!(claims.name, "Luis");
        assert!(!claims.is_admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_fails_verification() {
        // 과거 시각으로 만료된 토큰은 검증을 통과하지 못한다
        let service = service_with_expiry(-3600);
        let token = service.issue(&active_user()).unwrap();

        let result = service.verify(&token);

        assert!(matches!(result, Err(AppError::InvalidToken(_))));
    }

    #[test]
    fn test_tampered_token_fails_verification() {
        let service = service_with_expiry(3600);
        let mut token = service.issue(&active_user()).unwrap();
        token.push('x');

        assert!(matches!(
            service.verify(&token),
            Err(AppError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_token_signed_with_other_secret_fails() {
        let issuing = service_with_expiry(3600);
        let verifying = TokenService::new(&JwtConfig {
            secret: "a-different-secret".to_string(),
            token_expiry_secs: 3600,
        });

        let token = issuing.issue(&active_user()).unwrap();

        assert!(matches!(
            verifying.verify(&token),
            Err(AppError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_malformed_token_fails_verification() {
        let service = service_with_expiry(3600);

        assert!(matches!(
            service.verify("not.a.token"),
            Err(AppError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_issue_without_id_is_an_internal_error() {
        let service = service_with_expiry(3600);
        let user = User::new_pending("Luis".to_string(), "luis@example.com".to_string());

        assert!(matches!(service.issue(&user), Err(AppError::Internal(_))));
    }

    #[test]
    fn test_extract_bearer_token() {
        let service = service_with_expiry(3600);

        assert_eq!(
            service.extract_bearer_token("Bearer abc.def.ghi").unwrap(),
            "abc.def.ghi"
        );
        assert_eq!(
            service.extract_bearer_token("Basic abc"),
            Err(AppError::MissingBearer)
        );
    }
}
