use domain::activity::ActivityLogEntry;
use sea_orm::entity::prelude::*;
use sea_orm::Set;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "playlist_song_activities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub playlist_id: String,
    pub song_id: String,
    pub user_id: String,
    /// `add` 或 `delete`
    pub action: String,
    pub time: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&ActivityLogEntry> for ActiveModel {
    fn from(entry: &ActivityLogEntry) -> Self {
        ActiveModel {
            id: Set(entry.id.as_str().to_string()),
            playlist_id: Set(entry.playlist_id.as_str().to_string()),
            song_id: Set(entry.song_id.as_str().to_string()),
            user_id: Set(entry.user_id.as_str().to_string()),
            action: Set(entry.action.name().to_string()),
            time: Set(entry.time),
        }
    }
}
