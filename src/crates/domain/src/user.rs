use super::value::UserId;
use async_trait::async_trait;
use thiserror::Error;

/// 用户领域错误
#[derive(Error, Debug)]
pub enum UserError {
    #[error("{0}")]
    DbErr(String),
}

/// 用户
///
/// 凭证的签发与校验不在本服务内，这里只保存用于展示和存在性检查的字段。
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub fullname: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
}
