//! Initial schema migration - creates all tables from scratch.
//!
//! - `users`: authentication
//! - `coops`: chicken enclosures with denormalized ledger counters
//! - `chicken_transactions`: IN/OUT movements attributed to a coop
//! - `feeds`: feed/vaccine/vitamin applications, optionally attributed to a coop
//! - `products`: farm shop catalog
//! - `orders`: customer orders with a fulfillment status
//! - `stores`: physical store locations

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Email,
    PasswordDigest,
    FullName,
    Phone,
    Role,
    Token,
    CreatedAt,
}

#[derive(Iden)]
enum Coops {
    Table,
    Id,
    Name,
    Chickens,
    Location,
    Notes,
    TotalChickenCost,
    TotalFeedCost,
    TotalRevenue,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ChickenTransactions {
    Table,
    Id,
    CoopId,
    Kind,
    Quantity,
    Reason,
    Breed,
    Note,
    StartDate,
    ChickPrice,
    Supplier,
    SalePrice,
    CreatedAt,
}

#[derive(Iden)]
enum Feeds {
    Table,
    Id,
    Name,
    Kind,
    CoopId,
    Ingredients,
    TotalCost,
    CreatedAt,
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
    Name,
    Category,
    Price,
    Description,
    ImageUrl,
    InStock,
    Quantity,
    Rating,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
    OrderNumber,
    CustomerName,
    CustomerPhone,
    CustomerAddress,
    StoreId,
    StoreName,
    Items,
    TotalAmount,
    Status,
    PaymentMethod,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Stores {
    Table,
    Id,
    Name,
    Address,
    Lat,
    Lng,
    Phone,
    Image,
    OpeningHours,
    Status,
    Description,
    Rating,
    CreatedAt,
    UpdatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordDigest).string().not_null())
                    .col(ColumnDef::new(Users::FullName).string().not_null())
                    .col(ColumnDef::new(Users::Phone).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Token).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-token")
                    .table(Users::Table)
                    .col(Users::Token)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Coops
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Coops::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Coops::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Coops::Name).string().not_null())
                    .col(
                        ColumnDef::new(Coops::Chickens)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Coops::Location).string().not_null())
                    .col(ColumnDef::new(Coops::Notes).string().not_null())
                    .col(
                        ColumnDef::new(Coops::TotalChickenCost)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Coops::TotalFeedCost)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Coops::TotalRevenue)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Coops::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Coops::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-coops-name-unique")
                    .table(Coops::Table)
                    .col(Coops::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Chicken transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(ChickenTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChickenTransactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ChickenTransactions::CoopId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ChickenTransactions::Kind).string().not_null())
                    .col(
                        ColumnDef::new(ChickenTransactions::Quantity)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChickenTransactions::Reason)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChickenTransactions::Breed)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ChickenTransactions::Note).string().not_null())
                    .col(
                        ColumnDef::new(ChickenTransactions::StartDate)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChickenTransactions::ChickPrice)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChickenTransactions::Supplier)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChickenTransactions::SalePrice)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChickenTransactions::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    // No foreign key to coops: a deleted coop leaves its
                    // log rows behind, orphans are handled on delete.
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-chicken_transactions-coop_id-created_at")
                    .table(ChickenTransactions::Table)
                    .col(ChickenTransactions::CoopId)
                    .col(ChickenTransactions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Feeds
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Feeds::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Feeds::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Feeds::Name).string().not_null())
                    .col(ColumnDef::new(Feeds::Kind).string().not_null())
                    .col(ColumnDef::new(Feeds::CoopId).string())
                    .col(ColumnDef::new(Feeds::Ingredients).string().not_null())
                    .col(
                        ColumnDef::new(Feeds::TotalCost)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Feeds::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-feeds-coop_id")
                    .table(Feeds::Table)
                    .col(Feeds::CoopId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Products
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Name).string().not_null())
                    .col(ColumnDef::new(Products::Category).string().not_null())
                    .col(ColumnDef::new(Products::Price).big_integer().not_null())
                    .col(ColumnDef::new(Products::Description).string().not_null())
                    .col(ColumnDef::new(Products::ImageUrl).string().not_null())
                    .col(ColumnDef::new(Products::InStock).boolean().not_null())
                    .col(ColumnDef::new(Products::Quantity).big_integer().not_null())
                    .col(ColumnDef::new(Products::Rating).double().not_null())
                    .col(ColumnDef::new(Products::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Products::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Orders
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Orders::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Orders::OrderNumber).string().not_null())
                    .col(ColumnDef::new(Orders::CustomerName).string().not_null())
                    .col(ColumnDef::new(Orders::CustomerPhone).string().not_null())
                    .col(ColumnDef::new(Orders::CustomerAddress).string().not_null())
                    .col(ColumnDef::new(Orders::StoreId).string())
                    .col(ColumnDef::new(Orders::StoreName).string())
                    .col(ColumnDef::new(Orders::Items).string().not_null())
                    .col(ColumnDef::new(Orders::TotalAmount).big_integer().not_null())
                    .col(ColumnDef::new(Orders::Status).string().not_null())
                    .col(ColumnDef::new(Orders::PaymentMethod).string().not_null())
                    .col(ColumnDef::new(Orders::Notes).string().not_null())
                    .col(ColumnDef::new(Orders::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Orders::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-orders-order_number-unique")
                    .table(Orders::Table)
                    .col(Orders::OrderNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-orders-customer_phone")
                    .table(Orders::Table)
                    .col(Orders::CustomerPhone)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 7. Stores
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Stores::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Stores::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Stores::Name).string().not_null())
                    .col(ColumnDef::new(Stores::Address).string().not_null())
                    .col(ColumnDef::new(Stores::Lat).double().not_null())
                    .col(ColumnDef::new(Stores::Lng).double().not_null())
                    .col(ColumnDef::new(Stores::Phone).string().not_null())
                    .col(ColumnDef::new(Stores::Image).string().not_null())
                    .col(ColumnDef::new(Stores::OpeningHours).string().not_null())
                    .col(ColumnDef::new(Stores::Status).string().not_null())
                    .col(ColumnDef::new(Stores::Description).string().not_null())
                    .col(ColumnDef::new(Stores::Rating).double().not_null())
                    .col(ColumnDef::new(Stores::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Stores::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(Stores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Feeds::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ChickenTransactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Coops::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
