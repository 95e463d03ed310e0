//! Static page handlers. Plain embedded templates; all interesting work
//! happens in the `/api/convert` endpoint.

use axum::response::Html;

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../templates/index.html"))
}

pub async fn convert_page() -> Html<&'static str> {
    Html(include_str!("../../templates/convert.html"))
}

pub async fn edit_page() -> Html<&'static str> {
    Html(include_str!("../../templates/edit.html"))
}

pub async fn preview_page() -> Html<&'static str> {
    Html(include_str!("../../templates/preview.html"))
}
