//! MongoDB product store.

use anyhow::Result;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Client, Collection, IndexModel};
use uuid::Uuid;

use super::model::RawProduct;
use super::store::ProductStore;

const PRODUCTS_COLLECTION: &str = "raw_products";

pub struct MongoProductStore {
    products: Collection<RawProduct>,
}

impl MongoProductStore {
    /// Create a store over the given database.
    pub async fn new(client: &Client, database_name: &str) -> Result<Self> {
        let products = client.database(database_name).collection(PRODUCTS_COLLECTION);
        let store = Self { products };
        store.init().await?;
        Ok(store)
    }

    /// Initialize indexes for the supplier lookup path.
    async fn init(&self) -> Result<()> {
        let supplier_index = IndexModel::builder()
            .keys(doc! { "supplier_id": 1, "ingested_at": -1 })
            .build();
        self.products.create_index(supplier_index).await?;
        Ok(())
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn insert_many(&self, products: &[RawProduct]) -> Result<u64> {
        if products.is_empty() {
            return Ok(0);
        }

        let result = self.products.insert_many(products.to_vec()).await?;
        Ok(result.inserted_ids.len() as u64)
    }

    async fn find_by_supplier(&self, supplier_id: Uuid) -> Result<Vec<RawProduct>> {
        let cursor = self
            .products
            .find(doc! { "supplier_id": supplier_id.to_string() })
            .sort(doc! { "ingested_at": -1 })
            .await?;

        cursor.try_collect().await.map_err(Into::into)
    }
}
