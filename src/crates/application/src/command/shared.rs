use crate::error::AppError;

/// 通用ID生成器接口，所有需要生成唯一ID的服务都可以使用此接口
#[async_trait::async_trait]
pub trait IdGenerator: Send + Sync {
    /// 生成下一个唯一数字ID
    async fn next_id(&self) -> Result<i64, AppError>;

    /// 生成带类型前缀的ID，如 `playlist-123456`
    async fn next_prefixed_id(&self, prefix: &str) -> Result<String, AppError> {
        Ok(format!("{}-{}", prefix, self.next_id().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::IdGenerator;
    use crate::command::testing::SequentialIdGenerator;

    #[tokio::test]
    async fn test_prefixed_id() {
        let generator = SequentialIdGenerator::default();
        assert_eq!(generator.next_prefixed_id("act").await.unwrap(), "act-1");
        assert_eq!(generator.next_prefixed_id("act").await.unwrap(), "act-2");
    }
}
