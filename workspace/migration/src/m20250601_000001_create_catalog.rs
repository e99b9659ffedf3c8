use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create hotels table
        manager
            .create_table(
                Table::create()
                    .table(Hotels::Table)
                    .if_not_exists()
                    .col(pk_auto(Hotels::Id))
                    .col(string(Hotels::Name).unique_key())
                    .to_owned(),
            )
            .await?;

        // Create room_types table
        manager
            .create_table(
                Table::create()
                    .table(RoomTypes::Table)
                    .if_not_exists()
                    .col(pk_auto(RoomTypes::Id))
                    .col(string(RoomTypes::Name).unique_key())
                    .to_owned(),
            )
            .await?;

        // Create hotel_room_map table (join table)
        manager
            .create_table(
                Table::create()
                    .table(HotelRoomMap::Table)
                    .if_not_exists()
                    .col(integer(HotelRoomMap::HotelId))
                    .col(integer(HotelRoomMap::RoomTypeId))
                    .primary_key(
                        Index::create()
                            .name("pk_hotel_room_map")
                            .col(HotelRoomMap::HotelId)
                            .col(HotelRoomMap::RoomTypeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_hotel_room_map_hotel")
                            .from(HotelRoomMap::Table, HotelRoomMap::HotelId)
                            .to(Hotels::Table, Hotels::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_hotel_room_map_room_type")
                            .from(HotelRoomMap::Table, HotelRoomMap::RoomTypeId)
                            .to(RoomTypes::Table, RoomTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HotelRoomMap::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RoomTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Hotels::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Hotels {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum RoomTypes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum HotelRoomMap {
    Table,
    HotelId,
    RoomTypeId,
}
