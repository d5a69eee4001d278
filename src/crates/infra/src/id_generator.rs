use application::command::shared::IdGenerator;
use application::error::AppError;
use async_trait::async_trait;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

const NODE_ID_BITS: i64 = 10;
const SEQUENCE_BITS: i64 = 12;
const MAX_NODE_ID: i64 = (1 << NODE_ID_BITS) - 1;
const MAX_SEQUENCE: i64 = (1 << SEQUENCE_BITS) - 1;
const TIMESTAMP_SHIFT: i64 = NODE_ID_BITS + SEQUENCE_BITS;
const NODE_ID_SHIFT: i64 = SEQUENCE_BITS;
const EPOCH: i64 = 1609459200000; // 2021-01-01 00:00:00 UTC

/// 上一次生成时的 (时间戳, 序列号)
#[derive(Default)]
struct State {
    last_timestamp: i64,
    sequence: i64,
}

/// 雪花算法ID生成器
///
/// 生成的数字 ID 作为各类实体字符串 ID 的后缀，如 `act-<n>`。
pub struct SnowflakeIdGenerator {
    node_id: i64,
    state: Mutex<State>,
}

impl SnowflakeIdGenerator {
    /// 创建新的雪花算法ID生成器
    pub fn new(node_id: i64) -> Result<Self, AppError> {
        if !(0..=MAX_NODE_ID).contains(&node_id) {
            return Err(AppError::InvalidInput(format!(
                "node id must be within 0..={}, got {}",
                MAX_NODE_ID, node_id
            )));
        }

        Ok(Self {
            node_id,
            state: Mutex::new(State::default()),
        })
    }

    /// 获取当前时间戳（毫秒）
    fn get_timestamp() -> Result<i64, AppError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .map_err(|e| AppError::UnknownError(format!("system clock error: {}", e)))
    }

    fn generate_id(&self, timestamp: i64, sequence: i64) -> i64 {
        ((timestamp - EPOCH) << TIMESTAMP_SHIFT) | (self.node_id << NODE_ID_SHIFT) | sequence
    }

    /// 等待下一个毫秒
    async fn wait_next_millis(last_timestamp: i64) -> Result<i64, AppError> {
        let mut timestamp = Self::get_timestamp()?;
        while timestamp <= last_timestamp {
            tokio::time::sleep(tokio::time::Duration::from_micros(100)).await;
            timestamp = Self::get_timestamp()?;
        }
        Ok(timestamp)
    }
}

#[async_trait]
impl IdGenerator for SnowflakeIdGenerator {
    async fn next_id(&self) -> Result<i64, AppError> {
        let mut state = self.state.lock().await;
        let mut timestamp = Self::get_timestamp()?;

        if timestamp < state.last_timestamp {
            return Err(AppError::UnknownError(
                "clock moved backwards, refusing to generate id".to_string(),
            ));
        }

        if timestamp == state.last_timestamp {
            state.sequence = (state.sequence + 1) & MAX_SEQUENCE;
            if state.sequence == 0 {
                timestamp = Self::wait_next_millis(state.last_timestamp).await?;
            }
        } else {
            state.sequence = 0;
        }

        state.last_timestamp = timestamp;
        Ok(self.generate_id(timestamp, state.sequence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_snowflake_ids_are_unique() {
        let generator = SnowflakeIdGenerator::new(1).unwrap();

        let mut ids = HashSet::new();
        for _ in 0..5000 {
            let id = generator.next_id().await.unwrap();
            assert!(ids.insert(id), "duplicate id: {}", id);
        }
    }

    #[tokio::test]
    async fn test_concurrent_prefixed_ids() {
        let generator = Arc::new(SnowflakeIdGenerator::new(7).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let generator = generator.clone();
                tokio::spawn(async move {
                    let mut ids = Vec::new();
                    for _ in 0..200 {
                        ids.push(generator.next_prefixed_id("albumlike").await.unwrap());
                    }
                    ids
                })
            })
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            for id in handle.await.unwrap() {
                assert!(id.starts_with("albumlike-"));
                assert!(all.insert(id));
            }
        }
        assert_eq!(all.len(), 1600);
    }

    #[test]
    fn test_node_id_range() {
        assert!(SnowflakeIdGenerator::new(MAX_NODE_ID).is_ok());
        assert!(SnowflakeIdGenerator::new(MAX_NODE_ID + 1).is_err());
        assert!(SnowflakeIdGenerator::new(-1).is_err());
    }
}
