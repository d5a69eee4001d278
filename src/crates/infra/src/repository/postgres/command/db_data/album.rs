use domain::album::Album;
use domain::value::AlbumId;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "albums")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub year: i32,
    pub cover_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    AlbumLike,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::AlbumLike => Entity::has_many(super::album_like::Entity)
                .from(Column::Id)
                .to(super::album_like::Column::AlbumId)
                .into(),
        }
    }
}

impl Related<super::album_like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AlbumLike.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Album {
    fn from(model: Model) -> Self {
        Album {
            id: AlbumId::from(model.id),
            name: model.name,
            year: model.year,
        }
    }
}
