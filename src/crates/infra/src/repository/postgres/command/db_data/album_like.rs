use domain::album_like::AlbumLike;
use sea_orm::entity::prelude::*;
use sea_orm::Set;

/// `(album_id, user_id)` 上有唯一索引
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_album_likes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub album_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Album,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Album => Entity::belongs_to(super::album::Entity)
                .from(Column::AlbumId)
                .to(super::album::Column::Id)
                .into(),
        }
    }
}

impl Related<super::album::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Album.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&AlbumLike> for ActiveModel {
    fn from(like: &AlbumLike) -> Self {
        ActiveModel {
            id: Set(like.id.as_str().to_string()),
            user_id: Set(like.user_id.as_str().to_string()),
            album_id: Set(like.album_id.as_str().to_string()),
        }
    }
}
