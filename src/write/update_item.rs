use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::{Error, Result, to_attribute_value};
use std::collections;

/// SET assignments for an update expression.
///
/// Both the attribute names and the values go through placeholders, so the
/// resulting expression never contains caller-supplied text.
///
/// ```rust
/// use product_inventory::write::update_item;
///
/// let assignments = update_item::Assignments(vec![
///     ("price".to_string(), 42),
/// ]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignments<T>(pub Vec<(String, T)>);

impl<T: Serialize> TryFrom<Assignments<T>> for common::ExpressionInput {
    type Error = Error;

    fn try_from(assignments: Assignments<T>) -> Result<Self> {
        let mut operations = Vec::with_capacity(assignments.0.len());
        for (index, (name, value)) in assignments.0.into_iter().enumerate() {
            let placeholder = common::add_placeholder(index);
            let value_placeholder = format!(":set{index}");
            let value = to_attribute_value(value)?;
            let expression = format!("{placeholder} = {value_placeholder}");
            let operation = common::ExpressionInput {
                expression,
                expression_attribute_names: collections::HashMap::from([(placeholder, name)]),
                expression_attribute_values: collections::HashMap::from([(
                    value_placeholder,
                    value,
                )]),
            };
            operations.push(operation);
        }
        let mut operation = common::ExpressionInput::merge(", ", operations);
        if !operation.expression.is_empty() {
            operation.expression = format!("SET {}", operation.expression);
        }
        Ok(operation)
    }
}

/// update item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct UpdateItemInput {
    key: collections::HashMap<String, types::AttributeValue>,
    update_expression: String,
    write_operation: write::common::WriteInput,
}

/// Update item operation.
///
/// Creates the item when no item with the key exists.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::{Client, types};
/// use product_inventory::{common, write};
/// use serde_json::{Value, json};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let update_item = write::update_item::UpdateItem {
///     key: common::key::Key::product(Value::String("1".to_string())),
///     assignments: write::update_item::Assignments(vec![
///         ("price".to_string(), json!(42)),
///     ]),
///     write_args: write::common::WriteArgs {
///         return_values: Some(types::ReturnValue::UpdatedNew),
///         table_name: "product-inventory".to_string(),
///         ..Default::default()
///     },
/// };
/// update_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateItem<T> {
    /// The key of the item to update.
    pub key: common::key::Key<T>,
    /// The attributes to set.
    pub assignments: Assignments<T>,
    /// Additional write operation arguments (table name, return values, etc.).
    pub write_args: write::common::WriteArgs,
}

impl<T: Serialize> TryFrom<UpdateItem<T>> for UpdateItemInput {
    type Error = Error;

    fn try_from(update_item: UpdateItem<T>) -> Result<Self> {
        let key = update_item.key.try_into()?;
        let mut write_operation: write::common::WriteInput = update_item.write_args.into();
        let operation = update_item.assignments.try_into()?;
        let update_expression = write_operation.merge_expression(operation);
        let operation = Self {
            key,
            update_expression,
            write_operation,
        };
        Ok(operation)
    }
}

impl<T: Serialize + std::fmt::Debug> UpdateItem<T> {
    /// Execute the update item operation.
    #[tracing::instrument(name = "product_inventory.update_item", skip(client), err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::update_item::UpdateItemOutput,
        error::SdkError<operation::update_item::UpdateItemError>,
    > {
        let update_item: UpdateItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client
            .update_item()
            .set_key(Some(update_item.key))
            .update_expression(update_item.update_expression);
        let builder = crate::apply_expression_attributes!(builder, update_item.write_operation);
        crate::apply_write_operation!(builder, update_item.write_operation)
            .send()
            .await
    }
}
