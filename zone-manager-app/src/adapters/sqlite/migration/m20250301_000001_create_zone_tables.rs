use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // zones 表
        manager
            .create_table(
                Table::create()
                    .table(Zone::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Zone::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Zone::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Zone::Ttl).big_integer().not_null())
                    .col(ColumnDef::new(Zone::Serial).big_integer().not_null())
                    .col(
                        ColumnDef::new(Zone::Nameservers)
                            .string()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Zone::CreatedAt).string().not_null())
                    .col(ColumnDef::new(Zone::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // records 表
        manager
            .create_table(
                Table::create()
                    .table(Record::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Record::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Record::ZoneId).integer().not_null())
                    .col(ColumnDef::new(Record::Position).integer().not_null())
                    .col(ColumnDef::new(Record::RecordType).string().not_null())
                    .col(ColumnDef::new(Record::Name).string().not_null())
                    .col(ColumnDef::new(Record::Value).string().not_null())
                    .col(ColumnDef::new(Record::Ttl).big_integer().not_null())
                    .col(ColumnDef::new(Record::Priority).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_records_zone_id")
                            .from(Record::Table, Record::ZoneId)
                            .to(Zone::Table, Zone::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_records_zone_id")
                    .table(Record::Table)
                    .col(Record::ZoneId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Record::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Zone::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Zone {
    #[sea_orm(iden = "zones")]
    Table,
    Id,
    Name,
    Ttl,
    Serial,
    Nameservers,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Record {
    #[sea_orm(iden = "records")]
    Table,
    Id,
    ZoneId,
    Position,
    RecordType,
    Name,
    Value,
    Ttl,
    Priority,
}
