//! 应用服务单元测试使用的内存替身

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::album_like::{CacheLookup, LikeCountCache};
use super::shared::IdGenerator;
use crate::error::AppError;
use async_trait::async_trait;
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
use domain::value::{
    AlbumId, CollaborationId, PlaylistId, SongId, UserId,
};

#[derive(Default)]
pub struct SequentialIdGenerator {
    next: AtomicI64,
}

#[async_trait]
impl IdGenerator for SequentialIdGenerator {
    async fn next_id(&self) -> Result<i64, AppError> {
        Ok(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    users: Mutex<HashMap<UserId, User>>,
    albums: Mutex<HashMap<AlbumId, Album>>,
    songs: Mutex<HashMap<SongId, Song>>,
    playlists: Mutex<Vec<Playlist>>,
    playlist_songs: Mutex<Vec<PlaylistSong>>,
    collaborations: Mutex<Vec<Collaboration>>,
    likes: Mutex<Vec<AlbumLike>>,
    activities: Mutex<Vec<ActivityLogEntry>>,
    count_queries: AtomicUsize,
    hide_likes: AtomicBool,
    silent_like_insert_failure: AtomicBool,
    silent_activity_failure: AtomicBool,
    broken_collaboration_lookup: AtomicBool,
}

impl FakeCatalog {
    pub fn add_user(&self, id: &str, username: &str) {
        self.users.lock().unwrap().insert(
            UserId::from(id),
            User {
                id: UserId::from(id),
                username: username.to_string(),
                fullname: username.to_string(),
            },
        );
    }

    pub fn add_album(&self, id: &str) {
        self.albums.lock().unwrap().insert(
            AlbumId::from(id),
            Album {
                id: AlbumId::from(id),
                name: format!("Album {}", id),
                year: 2008,
            },
        );
    }

    pub fn add_song(&self, id: &str, title: &str) {
        self.songs.lock().unwrap().insert(
            SongId::from(id),
            Song {
                id: SongId::from(id),
                title: title.to_string(),
                performer: "Various".to_string(),
                album_id: None,
            },
        );
    }

    pub fn add_playlist(&self, id: &str, owner: &str) {
        self.playlists.lock().unwrap().push(Playlist::new(
            PlaylistId::from(id),
            "Favourites",
            UserId::from(owner),
        ));
    }

    pub fn add_collaborator(&self, playlist_id: &str, user_id: &str) {
        self.collaborations.lock().unwrap().push(Collaboration::new(
            CollaborationId::from(format!("collab-{}-{}", playlist_id, user_id)),
            PlaylistId::from(playlist_id),
            UserId::from(user_id),
        ));
    }

    pub fn count_queries(&self) -> usize {
        self.count_queries.load(Ordering::SeqCst)
    }

    pub fn like_rows(&self, album_id: &str) -> usize {
        self.likes
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.album_id.as_str() == album_id)
            .count()
    }

    pub fn activity_rows(&self) -> Vec<ActivityLogEntry> {
        self.activities.lock().unwrap().clone()
    }

    pub fn playlist_song_rows(&self, playlist_id: &str) -> usize {
        self.playlist_songs
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.playlist_id.as_str() == playlist_id)
            .count()
    }

    pub fn hide_likes_from_exists_check(&self) {
        self.hide_likes.store(true, Ordering::SeqCst);
    }

    pub fn fail_like_inserts_silently(&self) {
        self.silent_like_insert_failure.store(true, Ordering::SeqCst);
    }

    pub fn fail_activity_inserts_silently(&self) {
        self.silent_activity_failure.store(true, Ordering::SeqCst);
    }

    pub fn break_collaboration_lookup(&self) {
        self.broken_collaboration_lookup.store(true, Ordering::SeqCst);
    }

    fn username_of(&self, user_id: &UserId) -> String {
        self.users
            .lock()
            .unwrap()
            .get(user_id)
            .map(|u| u.username.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl UserRepository for FakeCatalog {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }
}

#[async_trait]
impl AlbumRepository for FakeCatalog {
    async fn find_by_id(&self, id: &AlbumId) -> Result<Option<Album>, AlbumError> {
        Ok(self.albums.lock().unwrap().get(id).cloned())
    }
}

#[async_trait]
impl SongRepository for FakeCatalog {
    async fn find_by_id(&self, id: &SongId) -> Result<Option<Song>, SongError> {
        Ok(self.songs.lock().unwrap().get(id).cloned())
    }
}

#[async_trait]
impl AlbumLikeRepository for FakeCatalog {
    async fn exists(&self, album_id: &AlbumId, user_id: &UserId) -> Result<bool, AlbumLikeError> {
        if self.hide_likes.load(Ordering::SeqCst) {
            return Ok(false);
        }
        Ok(self
            .likes
            .lock()
            .unwrap()
            .iter()
            .any(|l| &l.album_id == album_id && &l.user_id == user_id))
    }

    async fn insert(&self, like: &AlbumLike) -> Result<u64, AlbumLikeError> {
        if self.silent_like_insert_failure.load(Ordering::SeqCst) {
            return Ok(0);
        }
        let mut likes = self.likes.lock().unwrap();
        if likes
            .iter()
            .any(|l| l.album_id == like.album_id && l.user_id == like.user_id)
        {
            return Err(AlbumLikeError::AlreadyExists {
                album_id: like.album_id.clone(),
                user_id: like.user_id.clone(),
            });
        }
        likes.push(like.clone());
        Ok(1)
    }

    async fn delete(&self, album_id: &AlbumId, user_id: &UserId) -> Result<u64, AlbumLikeError> {
        let mut likes = self.likes.lock().unwrap();
        let before = likes.len();
        likes.retain(|l| !(&l.album_id == album_id && &l.user_id == user_id));
        Ok((before - likes.len()) as u64)
    }

    async fn count_by_album(&self, album_id: &AlbumId) -> Result<u64, AlbumLikeError> {
        self.count_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .likes
            .lock()
            .unwrap()
            .iter()
            .filter(|l| &l.album_id == album_id)
            .count() as u64)
    }
}

#[async_trait]
impl PlaylistRepository for FakeCatalog {
    async fn find_by_id(&self, id: &PlaylistId) -> Result<Option<Playlist>, PlaylistError> {
        Ok(self
            .playlists
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.id == id)
            .cloned())
    }

    async fn insert(&self, playlist: &Playlist) -> Result<u64, PlaylistError> {
        self.playlists.lock().unwrap().push(playlist.clone());
        Ok(1)
    }

    async fn delete(&self, id: &PlaylistId) -> Result<u64, PlaylistError> {
        let mut playlists = self.playlists.lock().unwrap();
        let before = playlists.len();
        playlists.retain(|p| &p.id != id);
        Ok((before - playlists.len()) as u64)
    }

    async fn find_accessible_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PlaylistSummary>, PlaylistError> {
        let collaborations = self.collaborations.lock().unwrap().clone();
        let playlists = self.playlists.lock().unwrap().clone();
        Ok(playlists
            .into_iter()
            .filter(|p| {
                p.is_owned_by(user_id)
                    || collaborations
                        .iter()
                        .any(|c| c.playlist_id == p.id && &c.user_id == user_id)
            })
            .map(|p| PlaylistSummary {
                username: self.username_of(&p.owner),
                id: p.id,
                name: p.name,
            })
            .collect())
    }

    async fn find_summary_by_id(
        &self,
        id: &PlaylistId,
    ) -> Result<Option<PlaylistSummary>, PlaylistError> {
        let playlist = PlaylistRepository::find_by_id(self, id).await?;
        Ok(playlist.map(|p| PlaylistSummary {
            username: self.username_of(&p.owner),
            id: p.id,
            name: p.name,
        }))
    }
}

#[async_trait]
impl PlaylistSongRepository for FakeCatalog {
    async fn add_song(&self, entry: &PlaylistSong) -> Result<u64, PlaylistError> {
        self.playlist_songs.lock().unwrap().push(entry.clone());
        Ok(1)
    }

    async fn remove_song(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<u64, PlaylistError> {
        let mut entries = self.playlist_songs.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| !(&e.playlist_id == playlist_id && &e.song_id == song_id));
        Ok((before - entries.len()) as u64)
    }

    async fn find_songs(
        &self,
        playlist_id: &PlaylistId,
    ) -> Result<Vec<SongSummary>, PlaylistError> {
        let entries = self.playlist_songs.lock().unwrap().clone();
        let songs = self.songs.lock().unwrap();
        Ok(entries
            .iter()
            .filter(|e| &e.playlist_id == playlist_id)
            .filter_map(|e| songs.get(&e.song_id).cloned().map(SongSummary::from))
            .collect())
    }
}

#[async_trait]
impl CollaborationRepository for FakeCatalog {
    async fn exists(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<bool, CollaborationError> {
        if self.broken_collaboration_lookup.load(Ordering::SeqCst) {
            return Err(CollaborationError::DbErr("connection reset".to_string()));
        }
        Ok(self
            .collaborations
            .lock()
            .unwrap()
            .iter()
            .any(|c| &c.playlist_id == playlist_id && &c.user_id == user_id))
    }

    async fn insert(&self, collaboration: &Collaboration) -> Result<u64, CollaborationError> {
        let mut collaborations = self.collaborations.lock().unwrap();
        if collaborations.iter().any(|c| {
            c.playlist_id == collaboration.playlist_id && c.user_id == collaboration.user_id
        }) {
            return Err(CollaborationError::AlreadyExists {
                playlist_id: collaboration.playlist_id.clone(),
                user_id: collaboration.user_id.clone(),
            });
        }
        collaborations.push(collaboration.clone());
        Ok(1)
    }

    async fn delete(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<u64, CollaborationError> {
        let mut collaborations = self.collaborations.lock().unwrap();
        let before = collaborations.len();
        collaborations.retain(|c| !(&c.playlist_id == playlist_id && &c.user_id == user_id));
        Ok((before - collaborations.len()) as u64)
    }
}

#[async_trait]
impl ActivityRepository for FakeCatalog {
    async fn append(&self, entry: &ActivityLogEntry) -> Result<u64, ActivityError> {
        if self.silent_activity_failure.load(Ordering::SeqCst) {
            return Ok(0);
        }
        self.activities.lock().unwrap().push(entry.clone());
        Ok(1)
    }

    async fn find_by_playlist(
        &self,
        playlist_id: &PlaylistId,
    ) -> Result<Vec<ActivityView>, ActivityError> {
        let entries = self.activities.lock().unwrap().clone();
        let songs = self.songs.lock().unwrap().clone();
        Ok(entries
            .into_iter()
            .filter(|e| &e.playlist_id == playlist_id)
            .map(|e| ActivityView {
                username: self.username_of(&e.user_id),
                title: songs
                    .get(&e.song_id)
                    .map(|s| s.title.clone())
                    .unwrap_or_default(),
                action: e.action,
                time: e.time,
            })
            .collect())
    }
}

#[derive(Default)]
pub struct FakeLikeCountCache {
    entries: Mutex<HashMap<String, i64>>,
    delete_calls: AtomicUsize,
    fail_reads: AtomicBool,
    fail_deletes: AtomicBool,
}

impl FakeLikeCountCache {
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    pub fn restore_deletes(&self) {
        self.fail_deletes.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl LikeCountCache for FakeLikeCountCache {
    async fn get(&self, key: &str) -> Result<CacheLookup, AppError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::CacheError("cache unavailable".to_string()));
        }
        Ok(match self.entries.lock().unwrap().get(key) {
            Some(count) => CacheLookup::Hit(*count),
            None => CacheLookup::Miss,
        })
    }

    async fn set(&self, key: &str, value: i64, _ttl: Duration) -> Result<(), AppError> {
        self.entries.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::CacheError("cache unavailable".to_string()));
        }
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
