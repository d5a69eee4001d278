use super::db_data::{
    playlist::{self, ActiveModel, Entity},
    playlist_song,
};
use async_trait::async_trait;
use domain::playlist::{
    Playlist, PlaylistError, PlaylistRepository, PlaylistSong, PlaylistSongRepository,
    PlaylistSummary,
};
use domain::song::SongSummary;
use domain::value::{PlaylistId, SongId, UserId};
use sea_orm::*;

#[derive(Clone)]
pub struct PlaylistRepositoryImpl {
    db: DbConn,
}

impl PlaylistRepositoryImpl {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[derive(Debug, Clone, FromQueryResult)]
struct PlaylistRow {
    pub id: String,
    pub name: String,
    pub username: Option<String>,
}

impl From<PlaylistRow> for PlaylistSummary {
    fn from(row: PlaylistRow) -> Self {
        PlaylistSummary {
            id: PlaylistId::from(row.id),
            name: row.name,
            username: row.username.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl PlaylistRepository for PlaylistRepositoryImpl {
    async fn find_by_id(&self, id: &PlaylistId) -> Result<Option<Playlist>, PlaylistError> {
        let result = Entity::find_by_id(id.as_str())
            .one(&self.db)
            .await
            .map_err(|e| PlaylistError::DbErr(e.to_string()))?;
        Ok(result.map(Playlist::from))
    }

    async fn insert(&self, playlist: &Playlist) -> Result<u64, PlaylistError> {
        let active_model: ActiveModel = playlist.into();
        Entity::insert(active_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| PlaylistError::DbErr(e.to_string()))
    }

    async fn delete(&self, id: &PlaylistId) -> Result<u64, PlaylistError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PlaylistError::DbErr(e.to_string()))?;

        // 先删除歌曲关联
        playlist_song::Entity::delete_many()
            .filter(playlist_song::Column::PlaylistId.eq(id.as_str()))
            .exec(&txn)
            .await
            .map_err(|e| PlaylistError::DbErr(e.to_string()))?;

        let result = Entity::delete_many()
            .filter(playlist::Column::Id.eq(id.as_str()))
            .exec(&txn)
            .await
            .map_err(|e| PlaylistError::DbErr(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| PlaylistError::DbErr(e.to_string()))?;
        Ok(result.rows_affected)
    }

    async fn find_accessible_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PlaylistSummary>, PlaylistError> {
        let rows: Vec<PlaylistRow> = PlaylistRow::find_by_statement(
            Statement::from_sql_and_values(
                DbBackend::Postgres,
                r#"
                SELECT DISTINCT p.id, p.name, u.username
                FROM playlists p
                LEFT JOIN users u ON u.id = p.owner
                LEFT JOIN collaborations c ON c.playlist_id = p.id
                WHERE p.owner = $1 OR c.user_id = $1
                ORDER BY p.name, p.id
                "#,
                vec![user_id.as_str().into()],
            ),
        )
        .all(&self.db)
        .await
        .map_err(|e| PlaylistError::DbErr(e.to_string()))?;

        Ok(rows.into_iter().map(PlaylistSummary::from).collect())
    }

    async fn find_summary_by_id(
        &self,
        id: &PlaylistId,
    ) -> Result<Option<PlaylistSummary>, PlaylistError> {
        let row: Option<PlaylistRow> = PlaylistRow::find_by_statement(
            Statement::from_sql_and_values(
                DbBackend::Postgres,
                r#"
                SELECT p.id, p.name, u.username
                FROM playlists p
                LEFT JOIN users u ON u.id = p.owner
                WHERE p.id = $1
                "#,
                vec![id.as_str().into()],
            ),
        )
        .one(&self.db)
        .await
        .map_err(|e| PlaylistError::DbErr(e.to_string()))?;

        Ok(row.map(PlaylistSummary::from))
    }
}

#[derive(Clone)]
pub struct PlaylistSongRepositoryImpl {
    db: DbConn,
}

impl PlaylistSongRepositoryImpl {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[derive(Debug, Clone, FromQueryResult)]
struct SongRow {
    pub id: String,
    pub title: String,
    pub performer: String,
}

#[async_trait]
impl PlaylistSongRepository for PlaylistSongRepositoryImpl {
    async fn add_song(&self, entry: &PlaylistSong) -> Result<u64, PlaylistError> {
        let active_model: playlist_song::ActiveModel = entry.into();
        playlist_song::Entity::insert(active_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| PlaylistError::DbErr(e.to_string()))
    }

    async fn remove_song(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<u64, PlaylistError> {
        let result = playlist_song::Entity::delete_many()
            .filter(playlist_song::Column::PlaylistId.eq(playlist_id.as_str()))
            .filter(playlist_song::Column::SongId.eq(song_id.as_str()))
            .exec(&self.db)
            .await
            .map_err(|e| PlaylistError::DbErr(e.to_string()))?;
        Ok(result.rows_affected)
    }

    async fn find_songs(
        &self,
        playlist_id: &PlaylistId,
    ) -> Result<Vec<SongSummary>, PlaylistError> {
        let rows: Vec<SongRow> = SongRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT s.id, s.title, s.performer
            FROM playlist_songs ps
            JOIN songs s ON s.id = ps.song_id
            WHERE ps.playlist_id = $1
            ORDER BY ps.id
            "#,
            vec![playlist_id.as_str().into()],
        ))
        .all(&self.db)
        .await
        .map_err(|e| PlaylistError::DbErr(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| SongSummary {
                id: SongId::from(row.id),
                title: row.title,
                performer: row.performer,
            })
            .collect())
    }
}
