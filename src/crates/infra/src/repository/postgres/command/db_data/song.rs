use domain::song::Song;
use domain::value::{AlbumId, SongId};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "songs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub year: i32,
    pub performer: String,
    pub genre: Option<String>,
    pub duration: Option<i32>,
    pub album_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Song {
    fn from(model: Model) -> Self {
        Song {
            id: SongId::from(model.id),
            title: model.title,
            performer: model.performer,
            album_id: model.album_id.map(AlbumId::from),
        }
    }
}
