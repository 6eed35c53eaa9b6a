//! Table access behind a small trait so handlers can run against memory in tests.

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::Client;

use crate::error::CrudError;
use crate::item::{key, Item};

/// The three table operations the API needs.
#[async_trait]
pub(crate) trait ItemStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Item>, CrudError>;

    /// Writes the whole item, replacing any row with the same id.
    async fn put(&self, item: &Item) -> Result<(), CrudError>;

    /// Removes the row. Deleting an id that is not there is not an error.
    async fn delete(&self, id: &str) -> Result<(), CrudError>;
}

pub(crate) struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    pub(crate) fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

fn store_error<E: std::error::Error>(err: E) -> CrudError {
    CrudError::Store(DisplayErrorContext(err).to_string())
}

#[async_trait]
impl ItemStore for DynamoStore {
    async fn get(&self, id: &str) -> Result<Option<Item>, CrudError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key(id)))
            .send()
            .await
            .map_err(store_error)?;

        match result.item() {
            Some(row) => Item::from_attributes(row).map(Some),
            None => Ok(None),
        }
    }

    async fn put(&self, item: &Item) -> Result<(), CrudError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item.to_attributes()))
            .send()
            .await
            .map_err(store_error)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), CrudError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(key(id)))
            .send()
            .await
            .map_err(store_error)?;
        Ok(())
    }
}
