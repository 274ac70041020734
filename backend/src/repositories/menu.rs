//! Menu repository for database operations

use super::{MenuStore, StoreError, StoreResult};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hotel_shared::models::{MenuItem, Taste};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Input for creating a menu item
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub name: String,
    pub price: Decimal,
    pub taste: Taste,
    pub is_drink: bool,
    pub ingredients: Vec<String>,
    pub num_sales: i32,
}

/// Partial update; `None` leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct MenuChanges {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub taste: Option<Taste>,
    pub is_drink: Option<bool>,
    pub ingredients: Option<Vec<String>>,
    pub num_sales: Option<i32>,
}

#[derive(Debug, sqlx::FromRow)]
struct MenuRow {
    id: Uuid,
    name: String,
    price: Decimal,
    taste: String,
    is_drink: bool,
    ingredients: Vec<String>,
    num_sales: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MenuRow> for MenuItem {
    type Error = StoreError;

    fn try_from(row: MenuRow) -> Result<Self, Self::Error> {
        let taste = row
            .taste
            .parse::<Taste>()
            .context("Stored taste is not recognised")?;

        Ok(MenuItem {
            id: row.id,
            name: row.name,
            price: row.price,
            taste,
            is_drink: row.is_drink,
            ingredients: row.ingredients,
            num_sales: row.num_sales,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const MENU_COLUMNS: &str =
    "id, name, price, taste, is_drink, ingredients, num_sales, created_at, updated_at";

/// PostgreSQL-backed menu store
#[derive(Clone)]
pub struct PgMenuStore {
    pool: PgPool,
}

impl PgMenuStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MenuStore for PgMenuStore {
    async fn insert(&self, item: NewMenuItem) -> StoreResult<MenuItem> {
        let row = sqlx::query_as::<_, MenuRow>(&format!(
            r#"
            INSERT INTO menu_items (name, price, taste, is_drink, ingredients, num_sales)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {MENU_COLUMNS}
            "#
        ))
        .bind(&item.name)
        .bind(item.price)
        .bind(item.taste.as_str())
        .bind(item.is_drink)
        .bind(&item.ingredients)
        .bind(item.num_sales)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<MenuItem>> {
        let row = sqlx::query_as::<_, MenuRow>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(MenuItem::try_from).transpose()
    }

    async fn find_all(&self, taste: Option<Taste>) -> StoreResult<Vec<MenuItem>> {
        let rows = sqlx::query_as::<_, MenuRow>(&format!(
            r#"
            SELECT {MENU_COLUMNS}
            FROM menu_items
            WHERE $1::TEXT IS NULL OR taste = $1
            ORDER BY created_at, id
            "#
        ))
        .bind(taste.map(|t| t.as_str()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MenuItem::try_from).collect()
    }

    async fn update(&self, id: Uuid, changes: MenuChanges) -> StoreResult<Option<MenuItem>> {
        let row = sqlx::query_as::<_, MenuRow>(&format!(
            r#"
            UPDATE menu_items SET
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                taste = COALESCE($4, taste),
                is_drink = COALESCE($5, is_drink),
                ingredients = COALESCE($6, ingredients),
                num_sales = COALESCE($7, num_sales),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {MENU_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.price)
        .bind(changes.taste.map(|t| t.as_str()))
        .bind(changes.is_drink)
        .bind(changes.ingredients)
        .bind(changes.num_sales)
        .fetch_optional(&self.pool)
        .await?;

        row.map(MenuItem::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
