use domain::playlist::PlaylistSong;
use sea_orm::entity::prelude::*;
use sea_orm::Set;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "playlist_songs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub playlist_id: String,
    pub song_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Playlist,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Playlist => Entity::belongs_to(super::playlist::Entity)
                .from(Column::PlaylistId)
                .to(super::playlist::Column::Id)
                .into(),
        }
    }
}

impl Related<super::playlist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Playlist.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&PlaylistSong> for ActiveModel {
    fn from(entry: &PlaylistSong) -> Self {
        ActiveModel {
            id: Set(entry.id.as_str().to_string()),
            playlist_id: Set(entry.playlist_id.as_str().to_string()),
            song_id: Set(entry.song_id.as_str().to_string()),
        }
    }
}
