use domain::playlist::Playlist;
use domain::value::{PlaylistId, UserId};
use sea_orm::entity::prelude::*;
use sea_orm::Set;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "playlists")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub owner: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    PlaylistSong,
    Collaboration,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::PlaylistSong => Entity::has_many(super::playlist_song::Entity)
                .from(Column::Id)
                .to(super::playlist_song::Column::PlaylistId)
                .into(),
            Self::Collaboration => Entity::has_many(super::collaboration::Entity)
                .from(Column::Id)
                .to(super::collaboration::Column::PlaylistId)
                .into(),
        }
    }
}

impl Related<super::playlist_song::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlaylistSong.def()
    }
}

impl Related<super::collaboration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Collaboration.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Playlist> for ActiveModel {
    fn from(playlist: &Playlist) -> Self {
        Self {
            id: Set(playlist.id.as_str().to_string()),
            name: Set(playlist.name.clone()),
            owner: Set(playlist.owner.as_str().to_string()),
        }
    }
}

impl From<Model> for Playlist {
    fn from(model: Model) -> Self {
        Playlist {
            id: PlaylistId::from(model.id),
            name: model.name,
            owner: UserId::from(model.owner),
        }
    }
}
