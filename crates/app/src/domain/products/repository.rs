//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::products::{
    data::NewProduct,
    models::{Product, ProductId},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const LIST_HOT_PRODUCTS_SQL: &str = include_str!("sql/list_hot_products.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_hot_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: u32,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LIST_HOT_PRODUCTS_SQL)
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<Product, sqlx::Error> {
        let price = i64::try_from(product.price).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        let stock_quantity =
            i32::try_from(product.stock_quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "stock_quantity".to_string(),
                source: Box::new(e),
            })?;

        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(product.name)
            .bind(product.description)
            .bind(price)
            .bind(product.category)
            .bind(product.image_url)
            .bind(product.is_hot)
            .bind(stock_quantity)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price_i64: i64 = row.try_get("price")?;

        let price = u64::try_from(price_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        let stock_i32: i32 = row.try_get("stock_quantity")?;

        let stock_quantity = u32::try_from(stock_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "stock_quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: ProductId::from_i64(row.try_get("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price,
            category: row.try_get("category")?,
            image_url: row.try_get("image_url")?,
            is_hot: row.try_get("is_hot")?,
            stock_quantity,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
