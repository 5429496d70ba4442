//! AWS Lambda entry point. Serves the same schema as the standalone server.
//!
//! The process (and with it the lazily opened database connection) is reused
//! across warm invocations.

use bandhub::config::Config;
use bandhub::graphql::GraphQLService;
use bandhub::logging;
use bandhub::storage::MongoStorage;
use async_graphql::http::GraphiQLSource;
use lambda_http::http::{header, Method, StatusCode};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use std::sync::Arc;
use tracing::warn;

async fn handle(service: GraphQLService, event: Request) -> Result<Response<Body>, Error> {
    if event.method() == Method::GET {
        let html = GraphiQLSource::build().endpoint("/graphql").finish();
        return Ok(Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
            .body(Body::from(html))?);
    }

    let request: async_graphql::Request = match serde_json::from_slice(event.body().as_ref()) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected malformed GraphQL request: {}", e);
            let body = serde_json::json!({ "errors": [{ "message": format!("Invalid request: {e}") }] });
            return Ok(Response::builder()
                .status(StatusCode::BAD_REQUEST)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?);
        }
    };

    let response = service.execute(request).await;
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&response)?))?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();

    let config = Config::load(None)?;
    logging::init_lambda_logging(&config.logging);

    let service = GraphQLService::new(Arc::new(MongoStorage::from_config(&config.database)));

    run(service_fn(move |event: Request| {
        let service = service.clone();
        async move { handle(service, event).await }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandhub::storage::InMemoryStorage;
    use serde_json::Value;

    fn service() -> GraphQLService {
        GraphQLService::new(Arc::new(InMemoryStorage::new()))
    }

    fn request(method: Method, body: &str) -> Request {
        lambda_http::http::Request::builder()
            .method(method)
            .uri("/graphql")
            .body(Body::from(body))
            .unwrap()
    }

    fn body_text(response: &Response<Body>) -> String {
        String::from_utf8(response.body().as_ref().to_vec()).unwrap()
    }

    #[tokio::test]
    async fn get_serves_graphiql() {
        let response = handle(service(), request(Method::GET, "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert!(body_text(&response).contains("/graphql"));
    }

    #[tokio::test]
    async fn post_executes_the_request() {
        let service = service();
        let create = r#"{"query":"mutation { newBand(input: { name: \"Lambda\" }) { name } }"}"#;
        let response = handle(service.clone(), request(Method::POST, create))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let list = r#"{"query":"{ getBands { name } }"}"#;
        let response = handle(service, request(Method::POST, list)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_text(&response)).unwrap();
        assert_eq!(body["data"]["getBands"][0]["name"], "Lambda");
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request() {
        let response = handle(service(), request(Method::POST, "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body_text(&response)).unwrap();
        assert!(body["errors"][0]["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request"));
    }
}
