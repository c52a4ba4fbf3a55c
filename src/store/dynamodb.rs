use crate::store::{Cursor, Page, Product, ProductStore, Result, StoreError};
use crate::{common, read, write};

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::{
    delete_item::DeleteItemOutput, get_item::GetItemOutput, scan::ScanOutput,
    update_item::UpdateItemOutput,
};
use aws_sdk_dynamodb::{Client, error, types};
use serde_dynamo::from_item;
use serde_json::Value;

fn request_error<E: std::error::Error + 'static>(operation: &'static str, err: E) -> StoreError {
    StoreError::Request {
        operation,
        message: error::DisplayErrorContext(err).to_string(),
    }
}

fn product_key(product_id: &str) -> common::key::Key<Value> {
    common::key::Key::product(Value::String(product_id.to_string()))
}

fn product_from(output: GetItemOutput) -> Result<Option<Product>> {
    let product: Option<Product> = output.item.map(from_item).transpose()?;
    Ok(product)
}

/// An empty `LastEvaluatedKey` ends the scan like a missing one.
fn page_from(output: ScanOutput) -> Result<Page> {
    let items = output
        .items
        .unwrap_or_default()
        .into_iter()
        .map(from_item)
        .collect::<serde_dynamo::Result<Vec<Product>>>()?;
    let last_evaluated_key: Option<Cursor> = output
        .last_evaluated_key
        .filter(|key| !key.is_empty())
        .map(from_item)
        .transpose()?;
    Ok(Page {
        items,
        last_evaluated_key,
    })
}

fn updated_attributes_from(output: UpdateItemOutput) -> Result<Product> {
    let attributes: Option<Product> = output.attributes.map(from_item).transpose()?;
    Ok(attributes.unwrap_or_default())
}

fn deleted_product_from(output: DeleteItemOutput) -> Result<Option<Product>> {
    let product: Option<Product> = output.attributes.map(from_item).transpose()?;
    Ok(product)
}

/// Product store backed by a DynamoDB table.
///
/// The client is created once per process and shared by every invocation.
#[derive(Clone, Debug)]
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    /// Creates a store over `table_name` using an existing client.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn write_args(&self, return_values: Option<types::ReturnValue>) -> write::common::WriteArgs {
        write::common::WriteArgs {
            return_values,
            table_name: self.table_name.clone(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl ProductStore for DynamoDbStore {
    async fn get_product(&self, product_id: &str) -> Result<Option<Product>> {
        let get_item = read::get_item::GetItem {
            key: product_key(product_id),
            single_read_args: read::common::SingleReadArgs {
                consistent_read: Some(true),
                table_name: self.table_name.clone(),
            },
        };
        let output = get_item
            .send(&self.client)
            .await
            .map_err(|err| request_error("GetItem", err))?;
        product_from(output)
    }

    async fn scan_products(
        &self,
        exclusive_start_key: Option<Cursor>,
        limit: Option<i32>,
    ) -> Result<Page> {
        let scan = read::scan::Scan {
            multiple_read_args: read::common::MultipleReadArgs {
                consistent_read: Some(true),
                exclusive_start_key,
                limit,
                table_name: self.table_name.clone(),
            },
        };
        let output = scan
            .send(&self.client)
            .await
            .map_err(|err| request_error("Scan", err))?;
        page_from(output)
    }

    async fn put_product(&self, product: Product) -> Result<()> {
        let put_item = write::put_item::PutItem {
            item: product,
            write_args: self.write_args(None),
        };
        put_item
            .send(&self.client)
            .await
            .map_err(|err| request_error("PutItem", err))?;
        Ok(())
    }

    async fn update_product(
        &self,
        product_id: &str,
        attribute: &str,
        value: Value,
    ) -> Result<Product> {
        let update_item = write::update_item::UpdateItem {
            key: product_key(product_id),
            assignments: write::update_item::Assignments(vec![(attribute.to_string(), value)]),
            write_args: self.write_args(Some(types::ReturnValue::UpdatedNew)),
        };
        let output = update_item
            .send(&self.client)
            .await
            .map_err(|err| request_error("UpdateItem", err))?;
        updated_attributes_from(output)
    }

    async fn delete_product(&self, product_id: &str) -> Result<Option<Product>> {
        let delete_item = write::delete_item::DeleteItem {
            key: product_key(product_id),
            write_args: self.write_args(Some(types::ReturnValue::AllOld)),
        };
        let output = delete_item
            .send(&self.client)
            .await
            .map_err(|err| request_error("DeleteItem", err))?;
        deleted_product_from(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::json;
    use std::collections;

    fn s(value: &str) -> types::AttributeValue {
        types::AttributeValue::S(value.to_string())
    }

    fn n(value: &str) -> types::AttributeValue {
        types::AttributeValue::N(value.to_string())
    }

    fn item(
        attributes: &[(&str, types::AttributeValue)],
    ) -> collections::HashMap<String, types::AttributeValue> {
        attributes
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    fn lamp() -> collections::HashMap<String, types::AttributeValue> {
        item(&[
            ("productId", s("p-1")),
            ("price", n("19.5")),
            ("stock", n("42")),
            ("tags", types::AttributeValue::L(vec![s("home"), s("light")])),
            (
                "dimensions",
                types::AttributeValue::M(item(&[("height", n("40"))])),
            ),
            ("discontinued", types::AttributeValue::Null(true)),
            ("inStock", types::AttributeValue::Bool(true)),
        ])
    }

    fn lamp_json() -> Value {
        json!({
            "productId": "p-1",
            "price": 19.5,
            "stock": 42,
            "tags": ["home", "light"],
            "dimensions": {"height": 40},
            "discontinued": null,
            "inStock": true
        })
    }

    #[test]
    fn test_request_error_keeps_operation() {
        let err = std::io::Error::other("connection reset");
        match request_error("Scan", err) {
            StoreError::Request { operation, message } => {
                assert_eq!(operation, "Scan");
                assert!(message.starts_with("connection reset"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_product_key() {
        let key = product_key("p-1");
        assert_eq!(key.name, "productId");
        assert_eq!(key.value, Value::String("p-1".to_string()));
    }

    #[rstest]
    #[case::found(GetItemOutput::builder().set_item(Some(lamp())).build(), Some(lamp_json()))]
    #[case::missing(GetItemOutput::builder().build(), None)]
    fn test_product_from(#[case] output: GetItemOutput, #[case] expected: Option<Value>) {
        let actual = product_from(output).unwrap().map(Value::Object);
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::missing_cursor(
        ScanOutput::builder().items(lamp()).build(),
        vec![lamp_json()],
        None
    )]
    #[case::empty_cursor(
        ScanOutput::builder()
            .items(lamp())
            .set_last_evaluated_key(Some(collections::HashMap::new()))
            .build(),
        vec![lamp_json()],
        None
    )]
    #[case::present_cursor(
        ScanOutput::builder()
            .items(lamp())
            .set_last_evaluated_key(Some(item(&[("productId", s("p-1"))])))
            .build(),
        vec![lamp_json()],
        Some(json!({"productId": "p-1"}))
    )]
    #[case::empty_page_with_cursor(
        ScanOutput::builder()
            .set_last_evaluated_key(Some(item(&[("productId", s("p-9"))])))
            .build(),
        vec![],
        Some(json!({"productId": "p-9"}))
    )]
    #[case::no_items(ScanOutput::builder().build(), vec![], None)]
    fn test_page_from(
        #[case] output: ScanOutput,
        #[case] expected_items: Vec<Value>,
        #[case] expected_cursor: Option<Value>,
    ) {
        let page = page_from(output).unwrap();
        let items: Vec<Value> = page.items.into_iter().map(Value::Object).collect();
        assert_eq!(items, expected_items);
        let cursor = page
            .last_evaluated_key
            .map(|cursor| Value::Object(cursor.into_iter().collect()));
        assert_eq!(cursor, expected_cursor);
    }

    #[rstest]
    #[case::number(item(&[("price", n("42"))]), json!({"price": 42}))]
    #[case::list(
        item(&[("tags", types::AttributeValue::L(vec![s("a"), n("1")]))]),
        json!({"tags": ["a", 1]})
    )]
    #[case::map(
        item(&[("size", types::AttributeValue::M(item(&[("width", n("2.5"))])))]),
        json!({"size": {"width": 2.5}})
    )]
    #[case::null(
        item(&[("note", types::AttributeValue::Null(true))]),
        json!({"note": null})
    )]
    fn test_updated_attributes_from(
        #[case] attributes: collections::HashMap<String, types::AttributeValue>,
        #[case] expected: Value,
    ) {
        let output = UpdateItemOutput::builder()
            .set_attributes(Some(attributes))
            .build();
        let actual = updated_attributes_from(output).unwrap();
        assert_eq!(Value::Object(actual), expected);
    }

    #[test]
    fn test_updated_attributes_from_missing_attributes() {
        let actual = updated_attributes_from(UpdateItemOutput::builder().build()).unwrap();
        assert!(actual.is_empty());
    }

    #[rstest]
    #[case::prior_item(
        DeleteItemOutput::builder().set_attributes(Some(lamp())).build(),
        Some(lamp_json())
    )]
    #[case::missing_attributes(DeleteItemOutput::builder().build(), None)]
    fn test_deleted_product_from(
        #[case] output: DeleteItemOutput,
        #[case] expected: Option<Value>,
    ) {
        let actual = deleted_product_from(output).unwrap().map(Value::Object);
        assert_eq!(actual, expected);
    }
}
