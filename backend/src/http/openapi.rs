//! OpenAPI document and the Swagger UI page that renders it.
//!
//! The document is derived from the `#[utoipa::path]` annotations on the
//! handlers. `/swagger/` serves a Swagger UI page that loads
//! `/swagger/openapi.json`.

use axum::{response::Html, Json};
use utoipa::{OpenApi, ToSchema};

use super::dto::{ApiError, ErrorResponse, Pet, PetFields, PetId, SearchPets};
use super::handlers;

/// `{"data": Pet}`
#[derive(ToSchema)]
pub struct PetResponse {
    pub data: Pet,
}

/// `{"data": [Pet]}`
#[derive(ToSchema)]
pub struct PetListResponse {
    pub data: Vec<Pet>,
}

/// `{"data": null}`
#[derive(ToSchema)]
pub struct EmptyResponse {
    #[schema(value_type = Option<Object>)]
    pub data: Option<()>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Pets API", version = "1.0.0", description = "Pet breed records"),
    tags(
        (name = "Pets", description = "Create, read, update, delete and search pet breeds"),
        (name = "Health", description = "Liveness check")
    ),
    paths(
        handlers::health_check,
        handlers::create_pet,
        handlers::get_pets,
        handlers::get_pet,
        handlers::update_pet,
        handlers::delete_pet,
        handlers::search_pets,
    ),
    components(schemas(
        Pet,
        PetId,
        PetFields,
        SearchPets,
        PetResponse,
        PetListResponse,
        EmptyResponse,
        ErrorResponse,
        ApiError,
    ))
)]
pub struct ApiDoc;

const SWAGGER_UI: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Pets API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui.css" />
    <style>
        body { margin: 0; background: #fafafa; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = function() {
            window.ui = SwaggerUIBundle({
                url: '/swagger/openapi.json',
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout"
            });
        };
    </script>
</body>
</html>
"#;

/// GET /swagger/
pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI)
}

/// GET /swagger/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in ["/health", "/v1/pets", "/v1/pets/search", "/v1/pets/{id}"] {
            assert!(paths.contains(&expected), "missing {} in {:?}", expected, paths);
        }
    }

    #[test]
    fn test_document_carries_pet_schema() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let pet = &json["components"]["schemas"]["Pet"]["properties"];
        assert!(pet.get("average_male_adult_weight").is_some(), "{}", pet);
        assert!(json["components"]["schemas"].get("ErrorResponse").is_some());
    }
}
