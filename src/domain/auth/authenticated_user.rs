//! 인증된 사용자 요청 컨텍스트
//!
//! 인증 미들웨어가 토큰 검증에 성공하면 이 구조체를 요청 extensions에
//! 삽입하고, 다운스트림 핸들러는 `web::ReqData<AuthenticatedUser>`로 꺼냅니다.
//! 요청 객체에 임의 필드를 붙이는 대신 타입이 있는 컨텍스트를 사용합니다.

use serde::{Deserialize, Serialize};

use crate::domain::token::TokenClaims;

/// 요청 범위의 인증된 사용자 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 ID
    pub id: String,
    /// 표시 이름
    pub name: String,
    /// 관리자 여부
    pub is_admin: bool,
}

impl From<TokenClaims> for AuthenticatedUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            id: claims.id,
            name: claims.name,
            is_admin: claims.is_admin,
        }
    }
}
