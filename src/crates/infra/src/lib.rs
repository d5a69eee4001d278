pub mod repository;

pub mod id_generator;
pub use id_generator::SnowflakeIdGenerator;

pub mod cache;
pub use cache::MokaLikeCountCache;

pub mod config;
pub use config::{AppConfigImpl, LikeCountCacheConfig, ServerConfig};
