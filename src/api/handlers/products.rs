//! Product registry request handlers.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::PRODUCT_TAG;
use crate::api::dto::{
    CreateProductRequest, PagedResponse, PaginationParams, ProductListParams, ProductResponse,
    UpdateProductRequest,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Creates the publicly readable product routes.
///
/// Routes:
/// - GET /      - List products
/// - GET /{id}  - Get product by ID
pub fn product_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_products))
        .routes(routes!(get_product))
}

/// Creates the admin-only product routes.
///
/// Routes:
/// - POST /        - Create product
/// - PUT /{id}     - Update product
/// - DELETE /{id}  - Delete product
pub fn product_admin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_product))
        .routes(routes!(update_product))
        .routes(routes!(delete_product))
}

/// GET /api/products - List products
#[utoipa::path(
    get,
    path = "/",
    tag = PRODUCT_TAG,
    params(ProductListParams),
    responses(
        (status = 200, description = "Paginated list of products", body = PagedResponse<ProductResponse>)
    )
)]
async fn list_products(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ProductListParams>,
) -> AppResult<Json<PagedResponse<ProductResponse>>> {
    let (products, total) = state
        .services
        .products
        .list_products(
            params.offset() as i64,
            params.limit() as i64,
            params.category.as_deref(),
            params.available,
        )
        .await?;

    let responses: Vec<ProductResponse> =
        products.into_iter().map(ProductResponse::from).collect();
    let page_params = PaginationParams {
        page: params.page,
        page_size: params.page_size,
    };
    Ok(Json(PagedResponse::new(responses, &page_params, total as u64)))
}

/// GET /api/products/:id - Get product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 404, description = "Product not found")
    )
)]
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.services.products.get_product(id).await?;
    Ok(Json(ProductResponse::from(product)))
}

/// POST /api/products - Create product (admin)
#[utoipa::path(
    post,
    path = "/",
    tag = PRODUCT_TAG,
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid request"),
        (status = 403, description = "Administrator privileges required")
    ),
    security(("bearerAuth" = []))
)]
async fn create_product(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    auth_user.require_admin()?;

    let product = state
        .services
        .products
        .create_product(payload.into_new_product())
        .await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// PUT /api/products/:id - Update product (admin)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "Product not found")
    ),
    security(("bearerAuth" = []))
)]
async fn update_product(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> AppResult<Json<ProductResponse>> {
    auth_user.require_admin()?;

    let product = state
        .services
        .products
        .update_product(id, payload.into_update_product())
        .await?;
    Ok(Json(ProductResponse::from(product)))
}

/// DELETE /api/products/:id - Delete product (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "Product not found")
    ),
    security(("bearerAuth" = []))
)]
async fn delete_product(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    auth_user.require_admin()?;

    state.services.products.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
