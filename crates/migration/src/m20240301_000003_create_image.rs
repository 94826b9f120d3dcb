//! Create `image` table.
//! Each row is one picture URL belonging to a home.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Image::Table)
                    .if_not_exists()
                    .col(pk_auto(Image::Id))
                    .col(string_len(Image::Url, 1024).not_null())
                    .col(integer(Image::HomeId).not_null())
                    .col(timestamp_with_time_zone(Image::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Image::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_image_home")
                            .from(Image::Table, Image::HomeId)
                            .to(Home::Table, Home::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Image::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Image { Table, Id, Url, HomeId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Home { Table, Id }
