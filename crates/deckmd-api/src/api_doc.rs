//! OpenAPI document for the conversion API.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "deckmd API",
        description = "Converts an uploaded PPTX presentation to Markdown and returns a ZIP archive with the document and extracted images."
    ),
    paths(handlers::convert::convert_presentation),
    components(schemas(ErrorResponse)),
    tags(
        (name = "convert", description = "Presentation conversion")
    )
)]
pub struct ApiDoc;
