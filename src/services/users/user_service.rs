//! # 사용자 계정 서비스 구현
//!
//! 계정 생명주기(등록 → 활성화 대기 → 활성)의 핵심 비즈니스 로직을
//! 구현합니다. 등록, 활성화, 로그인 인증의 세 플로우를 제공합니다.
//!
//! ## 보안 설계 원칙
//!
//! ### 1. 비밀번호 보안
//!
//! - **bcrypt 해싱**: 고정 cost 10, 솔트 자동 생성
//! - **활성화 키도 동일 경로**: 일회용 활성화 키 역시 해시로만 저장
//!
//! ### 2. 계정 열거 방지
//!
//! 존재하지 않는 이메일과 틀린 비밀번호는 동일한 공개 응답으로
//! 수렴합니다. 비활성 계정 안내만 별도 메시지를 사용합니다
//! (이메일+비밀번호가 맞는 계정에만 도달 가능한 상태이므로 수용).
//!
//! ### 3. 활성화 키
//!
//! - 키는 새 계정의 ID에서 유도되며, 등록 메일을 받은 당사자만 압니다
//! - 저장은 해시로만, 유효 기간은 24시간
//! - 활성화 성공 시 해시가 제거되어 재사용이 불가능합니다

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime};

use crate::domain::dto::users::request::{ActivateUserRequest, RegisterUserRequest};
use crate::domain::dto::users::response::{RegisterUserResponse, RegisteredUser};
use crate::domain::entities::users::user::{User, ACTIVATION_KEY_TTL_HOURS};
use crate::errors::AppError;
use crate::repositories::users::UserRepository;
use crate::services::email::EmailService;
use crate::utils::PasswordHasher;

/// 사용자 계정 비즈니스 로직 서비스
///
/// 리포지토리, 해셔, 이메일 서비스는 기동 시 주입됩니다.
pub struct UserService {
    /// 사용자 데이터 액세스 리포지토리
    user_repo: Arc<UserRepository>,
    /// 비밀번호/활성화 키 해셔
    hasher: PasswordHasher,
    /// 가입 안내 메일 발송 서비스
    email_service: Arc<EmailService>,
}

impl UserService {
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: PasswordHasher,
        email_service: Arc<EmailService>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            email_service,
        }
    }

    /// 새 계정 등록
    ///
    /// 비활성 상태의 계정을 만들고, 일회용 활성화 키를 발급해
    /// 해시만 저장한 뒤, 평문 키를 가입 메일로 보냅니다.
    ///
    /// 이메일 발송 실패는 가입을 되돌리지 않습니다. 계정은 활성화
    /// 대기 상태로 남고 실패는 경고 로그로만 보고됩니다 (운영자가
    /// 수동으로 재발송할 수 있습니다).
    ///
    /// # 반환값
    ///
    /// * `Ok(RegisterUserResponse)` - 생성된 계정의 공개 프로젝션
    /// * `Err(AppError::DuplicateKey)` - 이미 등록된 이메일
    /// * `Err(AppError::RegisterFailed)` - 그 외 예기치 못한 실패
    pub async fn register_user(
        &self,
        request: RegisterUserRequest,
    ) -> Result<RegisterUserResponse, AppError> {
        let created = self
            .user_repo
            .create(User::new_pending(request.name, request.email))
            .await
            .map_err(|error| match error {
                AppError::DuplicateKey => AppError::DuplicateKey,
                other => AppError::RegisterFailed(other.to_string()),
            })?;

        let id = created
            .id
            .ok_or_else(|| AppError::RegisterFailed("생성된 계정에 ID가 없습니다".to_string()))?;

        // 활성화 키 = 새 계정의 ID. 등록 메일 수신자만 알 수 있는 값이며,
        // 저장소에는 해시만 남는다.
        let activation_key = id.to_hex();
        let activation_key_hash = self.hasher.hash(&activation_key)?;
        let expires_at = DateTime::from_millis(
            DateTime::now().timestamp_millis() + ACTIVATION_KEY_TTL_HOURS * 3_600_000,
        );

        self.user_repo
            .set_activation_key(id, &activation_key_hash, expires_at)
            .await
            .map_err(|error| AppError::RegisterFailed(error.to_string()))?;

        // 발송 실패는 비치명적: 계정은 유지하고 경고만 남긴다
        if let Err(error) = self
            .email_service
            .send_registration_email(&created.email, &created.name, &activation_key)
            .await
        {
            log::warn!("가입 안내 메일 발송 실패 ({}): {}", created.email, error);
        }

        log::info!("새 계정 등록됨: {}", created.email);

        Ok(RegisterUserResponse {
            user: RegisteredUser::from(created),
        })
    }

    /// 활성화 키와 새 비밀번호로 계정을 활성화합니다
    ///
    /// 키 형식 오류, 계정 없음, 해시 불일치, 기한 만료는 모두 동일한
    /// `InvalidActivationKey`로 수렴합니다. 호출자는 원인을 구분할 수
    /// 없습니다.
    ///
    /// 활성화는 일회용 전이입니다. 성공 시 키 해시가 제거되므로 같은
    /// 키로 다시 호출하면 유효하지 않은 키와 똑같이 실패합니다.
    pub async fn activate_user(
        &self,
        activation_key: &str,
        request: ActivateUserRequest,
    ) -> Result<(), AppError> {
        // 키가 ObjectId 형식이 아니면 곧바로 통합 에러로 처리
        let id = ObjectId::parse_str(activation_key)
            .map_err(|_| AppError::InvalidActivationKey)?;

        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::InvalidActivationKey)?;

        let stored_hash = user
            .activation_key_hash
            .as_deref()
            .ok_or(AppError::InvalidActivationKey)?;

        if !self.hasher.compare(activation_key, stored_hash) {
            return Err(AppError::InvalidActivationKey);
        }

        if user.activation_window_expired() {
            log::debug!("만료된 활성화 키 사용 시도: {}", user.email);
            return Err(AppError::InvalidActivationKey);
        }

        let password_hash = self.hasher.hash(&request.password)?;

        self.user_repo.activate(id, &password_hash).await?;

        log::info!("계정 활성화됨: {}", user.email);

        Ok(())
    }

    /// 로그인 자격 증명 검증
    ///
    /// # 인증 과정
    ///
    /// 1. 이메일로 계정 조회 - 없으면 `UserNotFound`
    /// 2. bcrypt 해시 비교 - 불일치(또는 해시 미설정)면 `IncorrectPassword`
    /// 3. 활성 상태 확인 - 비활성이면 `InactiveUser`
    ///
    /// 1번과 2번은 공개 응답이 바이트 단위로 동일합니다. 순서상 활성
    /// 검사는 비밀번호 검증 뒤에 있으므로, 비활성 안내는 올바른 자격
    /// 증명을 가진 호출자에게만 도달합니다.
    pub async fn verify_password(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::UserNotFound)?;

        // 활성화 전 계정은 해시가 없다. 통합 에러로 수렴시킨다.
        let password_hash = user
            .password_hash
            .as_deref()
            .ok_or(AppError::IncorrectPassword)?;

        let verify_start = std::time::Instant::now();
        let is_valid = self.hasher.compare(password, password_hash);
        log::debug!("Password verification took: {:?}", verify_start.elapsed());

        if !is_valid {
            return Err(AppError::IncorrectPassword);
        }

        if !user.is_active {
            return Err(AppError::InactiveUser);
        }

        Ok(user)
    }
}
