use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, QueryParams, ValidatedForm,
    errors::responses::{
        BadRequestIdResponse, BadRequestQueryResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::error::ItemResult;
use crate::models::{Item, ItemFilter, NewItem, UpdateItem};
use crate::service::ItemOperations;

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(list_items, get_item, add_form, add_item, edit_form, edit_item),
    components(
        schemas(Item, NewItem, UpdateItem, ItemFilter, ItemDetail),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            BadRequestQueryResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Items", description = "Item catalogue endpoints")
    )
)]
pub struct ApiDoc;

/// Query flag set on the redirect after a successful add
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    /// `true` right after the item was created
    pub status: Option<bool>,
}

/// Single item plus the optional creation flag
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemDetail {
    #[serde(flatten)]
    pub item: Item,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

/// Create the items router with all HTTP endpoints
pub fn router<S: ItemOperations + 'static>(service: S) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items::<S>))
        .route("/add", get(add_form).post(add_item::<S>))
        .route("/{id}", get(get_item::<S>))
        .route("/{id}/edit", get(edit_form::<S>).post(edit_item::<S>))
        .with_state(shared_service)
}

/// List items matching the optional name and price filters
#[utoipa::path(
    get,
    path = "",
    tag = "Items",
    params(ItemFilter),
    responses(
        (status = 200, description = "Items in storage order", body = Vec<Item>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<S: ItemOperations>(
    State(service): State<Arc<S>>,
    QueryParams(filter): QueryParams<ItemFilter>,
) -> ItemResult<Json<Vec<Item>>> {
    let items = service.find_items(filter).await?;
    Ok(Json(items))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Item ID"),
        StatusQuery
    ),
    responses(
        (status = 200, description = "Item found", body = ItemDetail),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<S: ItemOperations>(
    State(service): State<Arc<S>>,
    IdPath(id): IdPath,
    QueryParams(query): QueryParams<StatusQuery>,
) -> ItemResult<Json<ItemDetail>> {
    let item = service.get_item(id).await?;
    Ok(Json(ItemDetail {
        item,
        status: query.status,
    }))
}

/// Empty add form
#[utoipa::path(
    get,
    path = "/add",
    tag = "Items",
    responses(
        (status = 200, description = "Blank form values", body = NewItem)
    )
)]
async fn add_form() -> Json<NewItem> {
    Json(NewItem::default())
}

/// Add a new item from a submitted form
#[utoipa::path(
    post,
    path = "/add",
    tag = "Items",
    request_body(content = NewItem, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Item created; Location points at the item", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_item<S: ItemOperations>(
    State(service): State<Arc<S>>,
    ValidatedForm(input): ValidatedForm<NewItem>,
) -> ItemResult<impl IntoResponse> {
    let item = service.save(input).await?;
    let location = format!("/api/items/{}?status=true", item.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(item)))
}

/// Edit form pre-filled with the current values
#[utoipa::path(
    get,
    path = "/{id}/edit",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Current item values", body = Item),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn edit_form<S: ItemOperations>(
    State(service): State<Arc<S>>,
    IdPath(id): IdPath,
) -> ItemResult<Json<Item>> {
    let item = service.get_item(id).await?;
    Ok(Json(item))
}

/// Replace name, price and quantity of an item
#[utoipa::path(
    post,
    path = "/{id}/edit",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body(content = UpdateItem, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn edit_item<S: ItemOperations>(
    State(service): State<Arc<S>>,
    IdPath(id): IdPath,
    ValidatedForm(input): ValidatedForm<UpdateItem>,
) -> ItemResult<Json<Item>> {
    service.update(id, input).await?;
    let item = service.get_item(id).await?;
    Ok(Json(item))
}
