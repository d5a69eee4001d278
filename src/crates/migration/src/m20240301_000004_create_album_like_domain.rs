use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create user_album_likes table
        manager
            .create_table(
                Table::create()
                    .table(UserAlbumLikes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserAlbumLikes::Id)
                            .string_len(50)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserAlbumLikes::UserId)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserAlbumLikes::AlbumId)
                            .string_len(50)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_album_likes_user_id")
                            .from(UserAlbumLikes::Table, UserAlbumLikes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_album_likes_album_id")
                            .from(UserAlbumLikes::Table, UserAlbumLikes::AlbumId)
                            .to(Albums::Table, Albums::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 每个用户对同一专辑最多一条点赞
        manager
            .create_index(
                Index::create()
                    .name("uq_user_album_likes_album_user")
                    .table(UserAlbumLikes::Table)
                    .col(UserAlbumLikes::AlbumId)
                    .col(UserAlbumLikes::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserAlbumLikes::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum UserAlbumLikes {
    Table,
    Id,
    UserId,
    AlbumId,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Albums {
    Table,
    Id,
}
