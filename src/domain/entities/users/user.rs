//! User Entity Implementation
//!
//! 사용자 계정의 핵심 엔티티입니다.
//! 계정은 등록 → 활성화 대기 → 활성의 단방향 생명주기를 가집니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 활성화 키 유효 기간 (시간)
pub const ACTIVATION_KEY_TTL_HOURS: i64 = 24;

/// 사용자 엔티티
///
/// 시스템의 모든 사용자를 표현하는 핵심 도메인 엔티티입니다.
///
/// ## 생명주기 불변 조건
///
/// - `email`은 컬렉션 전체에서 유일하며 생성 후 변경되지 않습니다.
/// - `is_active == true`이면 `password_hash`는 반드시 존재합니다.
/// - `activation_key_hash`는 등록과 활성화 사이에만 존재하며,
///   활성화 성공 시 제거됩니다. 평문 키는 어디에도 저장/로깅되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 표시 이름
    pub name: String,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// 해시된 비밀번호 (활성화 전에는 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// 계정 활성화 여부 - 로그인을 막는 게이트
    pub is_active: bool,
    /// 관리자 여부 - 세션 클레임으로 전달됨
    pub is_admin: bool,
    /// 일회용 활성화 키의 해시 (활성화 대기 상태에서만 존재)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation_key_hash: Option<String>,
    /// 활성화 가능 기한 (등록 시점 + 24시간)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation_key_expires_at: Option<DateTime>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 활성화 대기 상태의 새 계정 생성
    ///
    /// 등록 시점에는 비밀번호가 없습니다. 비밀번호는 활성화 단계에서
    /// 사용자가 직접 정합니다.
    pub fn new_pending(name: String, email: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            email,
            password_hash: None,
            is_active: false,
            is_admin: false,
            activation_key_hash: None,
            activation_key_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 비밀번호 인증이 가능한 계정인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// 활성화 기한이 지났는지 확인
    ///
    /// 기한 정보가 없으면 지난 것으로 간주합니다 (fail closed).
    pub fn activation_window_expired(&self) -> bool {
        match self.activation_key_expires_at {
            Some(expires_at) => DateTime::now() > expires_at,
            None => true,
        }
    }
}
