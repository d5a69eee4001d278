pub mod get_playlist;
