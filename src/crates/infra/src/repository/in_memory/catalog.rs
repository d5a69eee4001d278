use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use domain::activity::{ActivityError, ActivityLogEntry, ActivityRepository, ActivityView};
use domain::album::{Album, AlbumError, AlbumRepository};
use domain::album_like::{AlbumLike, AlbumLikeError, AlbumLikeRepository};
use domain::collaboration::{Collaboration, CollaborationError, CollaborationRepository};
use domain::playlist::{
    Playlist, PlaylistError, PlaylistRepository, PlaylistSong, PlaylistSongRepository,
    PlaylistSummary,
};
use domain::song::{Song, SongError, SongRepository, SongSummary};
use domain::user::{User, UserError, UserRepository};
use domain::value::{AlbumId, PlaylistId, PlaylistSongId, SongId, UserId};
use std::sync::Arc;

/// 进程内的关系存储，实现全部仓储接口
///
/// 点赞与协作按 `(id, user)` 组合键存放，重复插入与数据库唯一索引的行为一致。
/// 用户、专辑、歌曲只能通过 `seed_*` 写入。
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    users: Arc<DashMap<UserId, User>>,
    albums: Arc<DashMap<AlbumId, Album>>,
    songs: Arc<DashMap<SongId, Song>>,
    playlists: Arc<DashMap<PlaylistId, Playlist>>,
    playlist_songs: Arc<DashMap<PlaylistSongId, PlaylistSong>>,
    collaborations: Arc<DashMap<(PlaylistId, UserId), Collaboration>>,
    likes: Arc<DashMap<(AlbumId, UserId), AlbumLike>>,
    activities: Arc<DashMap<PlaylistId, Vec<ActivityLogEntry>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_user(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn seed_album(&self, album: Album) {
        self.albums.insert(album.id.clone(), album);
    }

    pub fn seed_song(&self, song: Song) {
        self.songs.insert(song.id.clone(), song);
    }

    fn username_of(&self, user_id: &UserId) -> Option<String> {
        self.users.get(user_id).map(|u| u.username.clone())
    }

    fn summarize(&self, playlist: &Playlist) -> PlaylistSummary {
        PlaylistSummary {
            id: playlist.id.clone(),
            name: playlist.name.clone(),
            username: self.username_of(&playlist.owner).unwrap_or_default(),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryCatalog {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.get(id).map(|v| v.clone()))
    }
}

#[async_trait]
impl AlbumRepository for InMemoryCatalog {
    async fn find_by_id(&self, id: &AlbumId) -> Result<Option<Album>, AlbumError> {
        Ok(self.albums.get(id).map(|v| v.clone()))
    }

    async fn exists(&self, id: &AlbumId) -> Result<bool, AlbumError> {
        Ok(self.albums.contains_key(id))
    }
}

#[async_trait]
impl SongRepository for InMemoryCatalog {
    async fn find_by_id(&self, id: &SongId) -> Result<Option<Song>, SongError> {
        Ok(self.songs.get(id).map(|v| v.clone()))
    }
}

#[async_trait]
impl PlaylistRepository for InMemoryCatalog {
    async fn find_by_id(&self, id: &PlaylistId) -> Result<Option<Playlist>, PlaylistError> {
        Ok(self.playlists.get(id).map(|v| v.clone()))
    }

    async fn insert(&self, playlist: &Playlist) -> Result<u64, PlaylistError> {
        match self.playlists.entry(playlist.id.clone()) {
            Entry::Occupied(_) => Err(PlaylistError::DbErr(format!(
                "duplicate playlist id {}",
                playlist.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(playlist.clone());
                Ok(1)
            }
        }
    }

    async fn delete(&self, id: &PlaylistId) -> Result<u64, PlaylistError> {
        if self.playlists.remove(id).is_none() {
            return Ok(0);
        }
        // 与外键级联删除一致
        self.playlist_songs.retain(|_, e| &e.playlist_id != id);
        self.collaborations.retain(|(pid, _), _| pid != id);
        self.activities.remove(id);
        Ok(1)
    }

    async fn find_accessible_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PlaylistSummary>, PlaylistError> {
        let playlists: Vec<Playlist> = self
            .playlists
            .iter()
            .filter(|p| {
                p.is_owned_by(user_id)
                    || self
                        .collaborations
                        .contains_key(&(p.id.clone(), user_id.clone()))
            })
            .map(|p| p.clone())
            .collect();

        let mut summaries: Vec<PlaylistSummary> =
            playlists.iter().map(|p| self.summarize(p)).collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.as_str().cmp(b.id.as_str())));
        Ok(summaries)
    }

    async fn find_summary_by_id(
        &self,
        id: &PlaylistId,
    ) -> Result<Option<PlaylistSummary>, PlaylistError> {
        let playlist = self.playlists.get(id).map(|v| v.clone());
        Ok(playlist.map(|p| self.summarize(&p)))
    }
}

#[async_trait]
impl PlaylistSongRepository for InMemoryCatalog {
    async fn add_song(&self, entry: &PlaylistSong) -> Result<u64, PlaylistError> {
        if !self.playlists.contains_key(&entry.playlist_id) {
            return Err(PlaylistError::DbErr(format!(
                "playlist {} does not exist",
                entry.playlist_id
            )));
        }
        self.playlist_songs.insert(entry.id.clone(), entry.clone());
        Ok(1)
    }

    async fn remove_song(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<u64, PlaylistError> {
        let before = self.playlist_songs.len();
        self.playlist_songs
            .retain(|_, e| !(&e.playlist_id == playlist_id && &e.song_id == song_id));
        Ok((before - self.playlist_songs.len()) as u64)
    }

    async fn find_songs(
        &self,
        playlist_id: &PlaylistId,
    ) -> Result<Vec<SongSummary>, PlaylistError> {
        let mut entries: Vec<PlaylistSong> = self
            .playlist_songs
            .iter()
            .filter(|e| &e.playlist_id == playlist_id)
            .map(|e| e.clone())
            .collect();
        entries.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

        Ok(entries
            .iter()
            .filter_map(|e| self.songs.get(&e.song_id).map(|s| SongSummary::from(s.clone())))
            .collect())
    }
}

#[async_trait]
impl CollaborationRepository for InMemoryCatalog {
    async fn exists(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<bool, CollaborationError> {
        Ok(self
            .collaborations
            .contains_key(&(playlist_id.clone(), user_id.clone())))
    }

    async fn insert(&self, collaboration: &Collaboration) -> Result<u64, CollaborationError> {
        let key = (
            collaboration.playlist_id.clone(),
            collaboration.user_id.clone(),
        );
        match self.collaborations.entry(key) {
            Entry::Occupied(_) => Err(CollaborationError::AlreadyExists {
                playlist_id: collaboration.playlist_id.clone(),
                user_id: collaboration.user_id.clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(collaboration.clone());
                Ok(1)
            }
        }
    }

    async fn delete(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<u64, CollaborationError> {
        let removed = self
            .collaborations
            .remove(&(playlist_id.clone(), user_id.clone()));
        Ok(removed.map_or(0, |_| 1))
    }
}

#[async_trait]
impl AlbumLikeRepository for InMemoryCatalog {
    async fn exists(&self, album_id: &AlbumId, user_id: &UserId) -> Result<bool, AlbumLikeError> {
        Ok(self
            .likes
            .contains_key(&(album_id.clone(), user_id.clone())))
    }

    async fn insert(&self, like: &AlbumLike) -> Result<u64, AlbumLikeError> {
        match self
            .likes
            .entry((like.album_id.clone(), like.user_id.clone()))
        {
            Entry::Occupied(_) => Err(AlbumLikeError::AlreadyExists {
                album_id: like.album_id.clone(),
                user_id: like.user_id.clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(like.clone());
                Ok(1)
            }
        }
    }

    async fn delete(&self, album_id: &AlbumId, user_id: &UserId) -> Result<u64, AlbumLikeError> {
        let removed = self.likes.remove(&(album_id.clone(), user_id.clone()));
        Ok(removed.map_or(0, |_| 1))
    }

    async fn count_by_album(&self, album_id: &AlbumId) -> Result<u64, AlbumLikeError> {
        Ok(self
            .likes
            .iter()
            .filter(|e| &e.key().0 == album_id)
            .count() as u64)
    }
}

#[async_trait]
impl ActivityRepository for InMemoryCatalog {
    async fn append(&self, entry: &ActivityLogEntry) -> Result<u64, ActivityError> {
        self.activities
            .entry(entry.playlist_id.clone())
            .or_default()
            .push(entry.clone());
        Ok(1)
    }

    async fn find_by_playlist(
        &self,
        playlist_id: &PlaylistId,
    ) -> Result<Vec<ActivityView>, ActivityError> {
        let entries = self
            .activities
            .get(playlist_id)
            .map(|v| v.clone())
            .unwrap_or_default();

        // 与 JOIN 语义一致：缺少用户或歌曲的记录不返回
        Ok(entries
            .into_iter()
            .filter_map(|e| {
                let username = self.username_of(&e.user_id)?;
                let title = self.songs.get(&e.song_id).map(|s| s.title.clone())?;
                Some(ActivityView {
                    username,
                    title,
                    action: e.action,
                    time: e.time,
                })
            })
            .collect())
    }
}
