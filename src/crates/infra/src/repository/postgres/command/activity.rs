use super::db_data::activity::{ActiveModel, Entity};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use domain::activity::{ActivityAction, ActivityError, ActivityLogEntry, ActivityRepository, ActivityView};
use domain::value::PlaylistId;
use sea_orm::*;

#[derive(Clone)]
pub struct ActivityRepositoryImpl {
    db: DbConn,
}

impl ActivityRepositoryImpl {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[derive(Debug, Clone, FromQueryResult)]
struct ActivityRow {
    pub username: String,
    pub title: String,
    pub action: String,
    pub time: NaiveDateTime,
}

impl TryFrom<ActivityRow> for ActivityView {
    type Error = ActivityError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        Ok(ActivityView {
            username: row.username,
            title: row.title,
            action: row.action.parse::<ActivityAction>()?,
            time: row.time,
        })
    }
}

#[async_trait]
impl ActivityRepository for ActivityRepositoryImpl {
    async fn append(&self, entry: &ActivityLogEntry) -> Result<u64, ActivityError> {
        let active_model: ActiveModel = entry.into();
        Entity::insert(active_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| ActivityError::DbErr(e.to_string()))
    }

    async fn find_by_playlist(
        &self,
        playlist_id: &PlaylistId,
    ) -> Result<Vec<ActivityView>, ActivityError> {
        let rows: Vec<ActivityRow> = ActivityRow::find_by_statement(
            Statement::from_sql_and_values(
                DbBackend::Postgres,
                r#"
                SELECT u.username, s.title, a.action, a.time
                FROM playlist_song_activities a
                JOIN songs s ON s.id = a.song_id
                JOIN users u ON u.id = a.user_id
                WHERE a.playlist_id = $1
                ORDER BY a.time
                "#,
                vec![playlist_id.as_str().into()],
            ),
        )
        .all(&self.db)
        .await
        .map_err(|e| ActivityError::DbErr(e.to_string()))?;

        rows.into_iter().map(ActivityView::try_from).collect()
    }
}
