use super::error::ProductError;
use super::model::{ProductCreateRequest, ProductId, ProductResponse, ProductUpdateRequest};
use super::service::ProductService;
use crate::DeriveInjectable as Injectable;
use crate::common::{JsonBody, PathParam};
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use std::sync::Arc;

/// HTTP routes for products
///
/// | Method | Path              | Success |
/// |--------|-------------------|---------|
/// | POST   | `/products/`      | 201     |
/// | GET    | `/products/`      | 200     |
/// | GET    | `/products/{id}`  | 200     |
/// | PUT    | `/products/{id}`  | 200     |
/// | DELETE | `/products/{id}`  | 204     |
#[derive(Injectable)]
pub struct ProductController {
    service: Arc<ProductService>,
}

type Controller = State<Arc<ProductController>>;

impl ProductController {
    pub fn base_path() -> &'static str {
        "/products"
    }

    pub fn router(controller: Arc<Self>) -> Router {
        Router::new()
            .route("/products", get(Self::list).post(Self::create))
            .route("/products/", get(Self::list).post(Self::create))
            .route(
                "/products/{id}",
                get(Self::get_one).put(Self::update).delete(Self::delete),
            )
            .with_state(controller)
    }

    async fn create(
        State(controller): Controller,
        JsonBody(req): JsonBody<ProductCreateRequest>,
    ) -> Result<(StatusCode, Json<ProductResponse>), ProductError> {
        let product = controller.service.create(req).await?;
        Ok((StatusCode::CREATED, Json(product)))
    }

    async fn get_one(
        State(controller): Controller,
        PathParam(id): PathParam<ProductId>,
    ) -> Result<Json<ProductResponse>, ProductError> {
        controller.service.find_by_id(id).await.map(Json)
    }

    async fn list(
        State(controller): Controller,
    ) -> Result<Json<Vec<ProductResponse>>, ProductError> {
        controller.service.find_all().await.map(Json)
    }

    async fn update(
        State(controller): Controller,
        PathParam(id): PathParam<ProductId>,
        JsonBody(req): JsonBody<ProductUpdateRequest>,
    ) -> Result<Json<ProductResponse>, ProductError> {
        controller.service.update(id, req).await.map(Json)
    }

    async fn delete(
        State(controller): Controller,
        PathParam(id): PathParam<ProductId>,
    ) -> Result<StatusCode, ProductError> {
        controller.service.delete(id).await?;
        Ok(StatusCode::NO_CONTENT)
    }
}
