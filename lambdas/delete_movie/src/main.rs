use crate::config::Config;
use crate::http_handler::{function_handler, HandlerDeps};
use lambda_http::{run, service_fn, tracing, Error};
use shared::adapters::{dynamodb_client, DynamoDbMovieRepository};

mod config;
mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let env = Config::load()?;
    let dynamodb_client = dynamodb_client(env.region).await;
    let movie_repo = DynamoDbMovieRepository::new(env.table_name, dynamodb_client);
    let deps = HandlerDeps { movie_repo };

    run(service_fn(|event| function_handler(&deps, event))).await
}
