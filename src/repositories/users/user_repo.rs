//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층입니다. `users` 컬렉션 하나를
//! 다루며, 이메일 유니크 제약은 컬렉션의 유니크 인덱스가 보장합니다.
//!
//! ## 동시성 정책
//!
//! 같은 이메일로 동시에 들어온 두 건의 가입은 사전 존재 확인 없이
//! 곧바로 insert하고, 유니크 인덱스가 정확히 한 건만 통과시킵니다.
//! 나머지 한 건은 중복 키 에러(E11000)로 돌아옵니다. 존재 확인 후
//! 삽입하는 방식은 그 사이에 레이스가 생기므로 사용하지 않습니다.

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::db::Database;
use crate::domain::entities::users::user::User;
use crate::errors::AppError;

/// 사용자 컬렉션 이름
const COLLECTION_NAME: &str = "users";

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 사용자 데이터 액세스 리포지토리
///
/// 조회는 저장된 `email`/`_id`와의 정확 일치만 지원합니다.
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(COLLECTION_NAME)
    }

    /// 새 사용자 생성
    ///
    /// 사전 중복 확인 없이 원자적으로 insert합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 생성된 사용자 (ID 포함)
    /// * `Err(AppError::DuplicateKey)` - 이메일 유니크 인덱스 충돌
    /// * `Err(AppError::Database)` - 그 외 데이터베이스 오류
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        let result = self
            .collection()
            .insert_one(&user)
            .await
            .map_err(|error| {
                if is_duplicate_key_error(&error) {
                    AppError::DuplicateKey
                } else {
                    AppError::Database(error.to_string())
                }
            })?;

        user.id = result.inserted_id.as_object_id();

        Ok(user)
    }

    /// 이메일 주소로 사용자 조회 (정확 일치)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|error| AppError::Database(error.to_string()))
    }

    /// ID로 사용자 조회
    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|error| AppError::Database(error.to_string()))
    }

    /// 활성화 키 해시와 활성화 기한을 기록합니다
    ///
    /// 가입 직후 한 번 호출되며, 계정을 활성화 대기 상태로 만듭니다.
    pub async fn set_activation_key(
        &self,
        id: ObjectId,
        activation_key_hash: &str,
        expires_at: DateTime,
    ) -> Result<Option<User>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection()
            .find_one_and_update(
                doc! { "_id": id },
                doc! {
                    "$set": {
                        "activation_key_hash": activation_key_hash,
                        "activation_key_expires_at": expires_at,
                        "updated_at": DateTime::now(),
                    }
                },
            )
            .with_options(options)
            .await
            .map_err(|error| AppError::Database(error.to_string()))
    }

    /// 계정을 활성 상태로 전환합니다
    ///
    /// 비밀번호 해시를 기록하고 활성화 키 관련 필드를 제거하므로
    /// 같은 키로 두 번째 활성화는 불가능합니다 (일회용 전이).
    pub async fn activate(
        &self,
        id: ObjectId,
        password_hash: &str,
    ) -> Result<Option<User>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection()
            .find_one_and_update(
                doc! { "_id": id },
                doc! {
                    "$set": {
                        "password_hash": password_hash,
                        "is_active": true,
                        "updated_at": DateTime::now(),
                    },
                    "$unset": {
                        "activation_key_hash": "",
                        "activation_key_expires_at": "",
                    }
                },
            )
            .with_options(options)
            .await
            .map_err(|error| AppError::Database(error.to_string()))
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 기동 시 한 번 호출됩니다. 이메일 유니크 인덱스가 곧
    /// 가입 동시성 제어의 전부입니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        self.collection()
            .create_indexes([email_index, created_at_index])
            .await
            .map_err(|error| AppError::Database(error.to_string()))?;

        Ok(())
    }
}

/// MongoDB 쓰기 에러가 유니크 인덱스 충돌(E11000)인지 확인
fn is_duplicate_key_error(error: &mongodb::error::Error) -> bool {
    match *error.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        _ => false,
    }
}
