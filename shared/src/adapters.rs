use crate::core::{CastMember, CastRepository, Movie, MovieRepository};
use crate::document::{unmarshall_item, MarshallOptions, TranslateConfig, UnmarshallOptions};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;

/// Builds the process-wide DynamoDB client. `region` overrides the default
/// provider chain when set.
pub async fn dynamodb_client(region: Option<String>) -> Client {
    let region_provider =
        RegionProviderChain::first_try(region.map(Region::new)).or_default_provider();
    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await;
    Client::new(&sdk_config)
}

fn document_translate_config() -> TranslateConfig {
    TranslateConfig {
        marshall: MarshallOptions {
            convert_empty_values: true,
            remove_undefined_values: true,
            convert_class_instance_to_map: true,
        },
        unmarshall: UnmarshallOptions { wrap_numbers: false },
    }
}

#[derive(Debug)]
pub struct DynamoDbMovieRepository {
    table_name: String,
    dynamodb_client: Client,
    translate: TranslateConfig,
}

impl DynamoDbMovieRepository {
    pub fn new(table_name: String, dynamodb_client: Client) -> Self {
        Self {
            table_name,
            dynamodb_client,
            translate: document_translate_config(),
        }
    }
}

#[async_trait]
impl MovieRepository for DynamoDbMovieRepository {
    async fn get_movie(&self, movie_id: u64) -> Result<Option<Movie>, String> {
        let record = self
            .dynamodb_client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::N(movie_id.to_string()))
            .send()
            .await
            .map_err(|e| format!("Error getting movie {}: {:?}", movie_id, e))?;

        match record.item {
            Some(item) => movie_from_item(&item, &self.translate.unmarshall).map(Some),
            None => Ok(None),
        }
    }

    async fn delete_movie(&self, movie_id: u64) -> Result<Option<Movie>, String> {
        let record = self
            .dynamodb_client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::N(movie_id.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| format!("Error deleting movie {}: {:?}", movie_id, e))?;

        match record.attributes {
            Some(item) => movie_from_item(&item, &self.translate.unmarshall).map(Some),
            None => Ok(None),
        }
    }
}

#[derive(Debug)]
pub struct DynamoDbCastRepository {
    table_name: String,
    dynamodb_client: Client,
    translate: TranslateConfig,
}

impl DynamoDbCastRepository {
    pub fn new(table_name: String, dynamodb_client: Client) -> Self {
        Self {
            table_name,
            dynamodb_client,
            translate: document_translate_config(),
        }
    }
}

#[async_trait]
impl CastRepository for DynamoDbCastRepository {
    async fn list_cast_members(&self, movie_id: u64) -> Result<Vec<CastMember>, String> {
        let result = self
            .dynamodb_client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("movieId = :m")
            .expression_attribute_values(":m", AttributeValue::N(movie_id.to_string()))
            .send()
            .await
            .map_err(|e| format!("Error querying cast for movie {}: {:?}", movie_id, e))?;

        let mut cast_members = vec![];
        if let Some(items) = result.items {
            for item in items {
                // ignore items that cannot be properly translated
                if let Ok(cast_member) = cast_member_from_item(&item, &self.translate.unmarshall) {
                    cast_members.push(cast_member);
                }
            }
        }
        Ok(cast_members)
    }
}

fn movie_from_item(
    item: &HashMap<String, AttributeValue>,
    options: &UnmarshallOptions,
) -> Result<Movie, String> {
    let mut attributes = unmarshall_item(item, options)?;
    let id = attributes
        .remove("id")
        .ok_or_else(|| "id not found".to_string())?
        .as_u64()
        .ok_or_else(|| "id is not a positive number".to_string())?;

    Ok(Movie::new(id, attributes))
}

fn cast_member_from_item(
    item: &HashMap<String, AttributeValue>,
    options: &UnmarshallOptions,
) -> Result<CastMember, String> {
    let mut attributes = unmarshall_item(item, options)?;
    let movie_id = attributes
        .remove("movieId")
        .ok_or_else(|| "movieId not found".to_string())?
        .as_u64()
        .ok_or_else(|| "movieId is not a positive number".to_string())?;

    Ok(CastMember::new(movie_id, attributes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options() -> UnmarshallOptions {
        UnmarshallOptions { wrap_numbers: false }
    }

    #[test]
    fn when_item_has_id_and_attributes_should_translate() {
        let mut item = HashMap::new();
        item.insert("id".to_string(), AttributeValue::N("42".to_string()));
        item.insert(
            "title".to_string(),
            AttributeValue::S("Example".to_string()),
        );
        item.insert("adult".to_string(), AttributeValue::Bool(false));

        let movie = movie_from_item(&item, &options()).unwrap();

        assert_eq!(movie.id, 42);
        assert_eq!(movie.attributes.get("title"), Some(&json!("Example")));
        assert_eq!(movie.attributes.get("adult"), Some(&json!(false)));
    }

    #[test]
    fn when_item_has_no_id_should_error() {
        let mut item = HashMap::new();
        item.insert(
            "title".to_string(),
            AttributeValue::S("Example".to_string()),
        );

        assert!(movie_from_item(&item, &options()).is_err());
    }

    #[test]
    fn when_id_is_not_a_number_should_error() {
        let mut item = HashMap::new();
        item.insert("id".to_string(), AttributeValue::S("42".to_string()));

        assert!(movie_from_item(&item, &options()).is_err());
    }

    #[test]
    fn when_cast_item_has_movie_id_should_translate() {
        let mut item = HashMap::new();
        item.insert("movieId".to_string(), AttributeValue::N("42".to_string()));
        item.insert(
            "actorName".to_string(),
            AttributeValue::S("Joe Bloggs".to_string()),
        );
        item.insert(
            "roleName".to_string(),
            AttributeValue::S("Male Character 1".to_string()),
        );

        let cast_member = cast_member_from_item(&item, &options()).unwrap();

        assert_eq!(cast_member.movie_id, 42);
        assert_eq!(
            cast_member.attributes.get("actorName"),
            Some(&json!("Joe Bloggs"))
        );
    }

    #[test]
    fn when_cast_item_has_no_movie_id_should_error() {
        let mut item = HashMap::new();
        item.insert(
            "actorName".to_string(),
            AttributeValue::S("Joe Bloggs".to_string()),
        );

        assert!(cast_member_from_item(&item, &options()).is_err());
    }
}
