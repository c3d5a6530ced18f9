//! 사용자 관련 응답 DTO
//!
//! 엔티티에서 민감 정보(비밀번호 해시, 활성화 키 해시)를 제거한
//! 공개 프로젝션만 내보냅니다.

use serde::{Deserialize, Serialize};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::entities::users::user::User;

/// 회원가입 성공 응답: `{user: {id, name, email}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserResponse {
    pub user: RegisteredUser,
}

/// 생성된 계정의 공개 프로젝션
///
/// 해시 필드는 어떤 경우에도 포함되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for RegisteredUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            name: user.name,
            email: user.email,
        }
    }
}

/// 단순 메시지 응답: `{message: "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// 토큰 검증 응답: `{userPayload: {id, name, isAdmin}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayloadResponse {
    #[serde(rename = "userPayload")]
    pub user_payload: UserPayload,
}

/// 검증된 세션의 신원 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
    pub id: String,
    pub name: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

impl From<AuthenticatedUser> for UserPayload {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            is_admin: user.is_admin,
        }
    }
}
