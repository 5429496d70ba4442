use crate::config::ServerConfig;
use crate::graphql::GraphQLService;
use async_graphql::http::{playground_source, GraphQLPlaygroundConfig, GraphiQLSource};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    http::Method,
    response::{Html, IntoResponse, Json},
    routing::get,
    Extension, Router,
};
use hyper::Server;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "bandhub",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GraphQL handler
async fn graphql_handler(
    Extension(service): Extension<GraphQLService>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    service.execute(req.into_inner()).await.into()
}

/// GraphiQL IDE endpoint
async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// GraphQL Playground endpoint
async fn playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}

/// Create the HTTP router with the GraphQL endpoints
pub fn create_server(service: GraphQLService, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let graphql_route = if config.graphiql {
        get(graphiql).post(graphql_handler)
    } else {
        get(graphql_handler).post(graphql_handler)
    };

    let mut router = Router::new()
        .route("/health", get(health))
        .route("/graphql", graphql_route);

    if config.graphiql {
        router = router
            .route("/graphiql", get(graphiql))
            .route("/playground", get(playground));
    }

    router
        .layer(Extension(service))
        .layer(ServiceBuilder::new().layer(cors))
}

/// Start the HTTP server and run until Ctrl-C
pub async fn start_server(service: GraphQLService, config: &ServerConfig) -> anyhow::Result<()> {
    let app = create_server(service, config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("HTTP server running on http://{}", addr);
    info!("GraphQL: http://{}/graphql", addr);
    if config.graphiql {
        info!("GraphiQL UI: http://{}/graphiql", addr);
        info!("Playground UI: http://{}/playground", addr);
    }

    Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router() -> Router {
        let service = GraphQLService::new(Arc::new(InMemoryStorage::new()));
        create_server(service, &ServerConfig::default())
    }

    #[tokio::test]
    async fn health_reports_service_name() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["service"], "bandhub");
    }

    #[tokio::test]
    async fn graphql_post_executes_queries() {
        let request = Request::post("/graphql")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"query":"{ getBands { id } }"}"#))
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["getBands"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn playground_is_disabled_with_graphiql_off() {
        let service = GraphQLService::new(Arc::new(InMemoryStorage::new()));
        let config = ServerConfig {
            graphiql: false,
            ..ServerConfig::default()
        };
        let response = create_server(service, &config)
            .oneshot(Request::get("/playground").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
