use std::fmt::{self, Display};

// Helper macro to define aggregate ID newtypes and common trait impls
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// 生成 ID 时使用的类型前缀
            pub const PREFIX: &'static str = $prefix;

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(UserId, "user");
define_id!(AlbumId, "album");
define_id!(SongId, "song");
define_id!(PlaylistId, "playlist");
define_id!(PlaylistSongId, "playlist_song");
define_id!(CollaborationId, "collab");
define_id!(AlbumLikeId, "albumlike");
define_id!(ActivityId, "act");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip_through_string() {
        let id = PlaylistId::from("playlist-42");
        assert_eq!(id.as_str(), "playlist-42");
        assert_eq!(id.to_string(), "playlist-42");
        let raw: String = id.clone().into();
        assert_eq!(PlaylistId::from(raw), id);
    }

    #[test]
    fn test_prefixes_are_distinct() {
        assert_eq!(AlbumLikeId::PREFIX, "albumlike");
        assert_ne!(PlaylistId::PREFIX, PlaylistSongId::PREFIX);
    }
}
