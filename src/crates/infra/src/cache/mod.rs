pub mod like_count;

pub use like_count::MokaLikeCountCache;
