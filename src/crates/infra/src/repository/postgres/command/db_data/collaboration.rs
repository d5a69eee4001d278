use domain::collaboration::Collaboration;
use sea_orm::entity::prelude::*;
use sea_orm::Set;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "collaborations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub playlist_id: String,
    pub user_id: String,
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

impl From<&Collaboration> for ActiveModel {
    fn from(collaboration: &Collaboration) -> Self {
        ActiveModel {
            id: Set(collaboration.id.as_str().to_string()),
            playlist_id: Set(collaboration.playlist_id.as_str().to_string()),
            user_id: Set(collaboration.user_id.as_str().to_string()),
        }
    }
}
