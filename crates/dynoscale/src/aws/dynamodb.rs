use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use dynoscale_core::cloud::{Result, TableCatalog};

use super::error::map_list_tables_error;

/// DynamoDB-backed [`TableCatalog`].
pub struct DynamoDbCatalog {
    client: Client,
}

impl DynamoDbCatalog {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TableCatalog for DynamoDbCatalog {
    async fn list_table_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut start: Option<String> = None;

        loop {
            let output = self
                .client
                .list_tables()
                .set_exclusive_start_table_name(start.take())
                .send()
                .await
                .map_err(map_list_tables_error)?;

            names.extend(output.table_names().iter().cloned());
            match output.last_evaluated_table_name() {
                Some(last) => start = Some(last.to_string()),
                None => break,
            }
        }

        Ok(names)
    }
}
