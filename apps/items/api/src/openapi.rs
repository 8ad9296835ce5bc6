use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Items API",
        version = "0.1.0",
        description = "Item catalogue with interchangeable storage backends"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/items", api = domain_items::ApiDoc)
    )
)]
pub struct ApiDoc;
