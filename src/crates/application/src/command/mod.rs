pub mod access;
pub mod activity;
pub mod album_like;
pub mod collaboration;
pub mod playlist;
pub mod shared;

#[cfg(test)]
pub(crate) mod testing;
