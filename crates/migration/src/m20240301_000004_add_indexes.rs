use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Home: listing filters hit city, price and property_type
        manager
            .create_index(
                Index::create()
                    .name("idx_home_city")
                    .table(Home::Table)
                    .col(Home::City)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_home_price")
                    .table(Home::Table)
                    .col(Home::Price)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_home_property_type")
                    .table(Home::Table)
                    .col(Home::PropertyType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_home_realtor")
                    .table(Home::Table)
                    .col(Home::RealtorId)
                    .to_owned(),
            )
            .await?;

        // Image: lookups and cascade deletes go through home_id
        manager
            .create_index(
                Index::create()
                    .name("idx_image_home")
                    .table(Image::Table)
                    .col(Image::HomeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_image_home").table(Image::Table).to_owned())
            .await?;
        for name in ["idx_home_realtor", "idx_home_property_type", "idx_home_price", "idx_home_city"] {
            manager
                .drop_index(Index::drop().name(name).table(Home::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Home { Table, City, Price, PropertyType, RealtorId }

#[derive(DeriveIden)]
enum Image { Table, HomeId }
