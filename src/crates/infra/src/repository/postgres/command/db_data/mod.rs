pub mod activity;
pub mod album;
pub mod album_like;
pub mod collaboration;
pub mod playlist;
pub mod playlist_song;
pub mod song;
pub mod user;
