//! 세션 토큰 클레임 구조체
//!
//! RFC 7519 JWT 표준 클레임(iat/exp)과 이 서비스의 신원 클레임을 담습니다.

use serde::{Deserialize, Serialize};

/// 세션 토큰의 클레임(Payload) 구조체
///
/// 로그인 성공 시 발급되고 요청마다 미들웨어에서 검증됩니다.
/// 서버에는 저장되지 않는 무상태 토큰이므로 `exp`만이 유효성을 끝냅니다.
///
/// 와이어 형식은 `isAdmin` 카멜케이스를 사용합니다. 이 토큰을 읽는
/// 다운스트림 소비자와의 계약이므로 필드 이름을 바꾸면 안 됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 ID (계정 문서의 ObjectId 문자열)
    pub id: String,
    /// 표시 이름
    pub name: String,
    /// 관리자 여부 - 다운스트림의 인가 판단에 사용
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}
