//! Create `home` table with FK to the owning realtor in `user`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Home::Table)
                    .if_not_exists()
                    .col(pk_auto(Home::Id))
                    .col(string_len(Home::Address, 255).not_null())
                    .col(string_len(Home::City, 128).not_null())
                    .col(double(Home::Price).not_null())
                    .col(double(Home::LandSize).not_null())
                    .col(integer(Home::NumberOfBedrooms).not_null())
                    .col(double(Home::NumberOfBathrooms).not_null())
                    .col(string_len(Home::PropertyType, 16).not_null())
                    .col(timestamp_with_time_zone(Home::ListedDate).not_null())
                    .col(integer(Home::RealtorId).not_null())
                    .col(timestamp_with_time_zone(Home::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Home::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_home_realtor")
                            .from(Home::Table, Home::RealtorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Home::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Home {
    Table,
    Id,
    Address,
    City,
    Price,
    LandSize,
    NumberOfBedrooms,
    NumberOfBathrooms,
    PropertyType,
    ListedDate,
    RealtorId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
