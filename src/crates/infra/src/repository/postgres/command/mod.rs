pub mod activity;
pub mod album;
pub mod album_like;
pub mod collaboration;
pub mod db_data;
pub mod playlist;
pub mod song;
pub mod user;

pub use activity::ActivityRepositoryImpl;
pub use album::AlbumRepositoryImpl;
pub use album_like::AlbumLikeRepositoryImpl;
pub use collaboration::CollaborationRepositoryImpl;
pub use playlist::{PlaylistRepositoryImpl, PlaylistSongRepositoryImpl};
pub use song::SongRepositoryImpl;
pub use user::UserRepositoryImpl;
