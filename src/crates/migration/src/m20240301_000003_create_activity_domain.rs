use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create playlist_song_activities table (append-only)
        manager
            .create_table(
                Table::create()
                    .table(PlaylistSongActivities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlaylistSongActivities::Id)
                            .string_len(50)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PlaylistSongActivities::PlaylistId)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlaylistSongActivities::SongId)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlaylistSongActivities::UserId)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlaylistSongActivities::Action)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlaylistSongActivities::Time)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_playlist_song_activities_playlist_id")
                            .from(
                                PlaylistSongActivities::Table,
                                PlaylistSongActivities::PlaylistId,
                            )
                            .to(Playlists::Table, Playlists::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_playlist_song_activities_playlist_time")
                    .table(PlaylistSongActivities::Table)
                    .col(PlaylistSongActivities::PlaylistId)
                    .col(PlaylistSongActivities::Time)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PlaylistSongActivities::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum PlaylistSongActivities {
    Table,
    Id,
    PlaylistId,
    SongId,
    UserId,
    Action,
    Time,
}

#[derive(DeriveIden)]
enum Playlists {
    Table,
    Id,
}
