use askama::Template;
use axum::http::header;
use axum::response::{ErrorResponse, IntoResponse, Response};

/// Render a [`Template`] into a [`Response`] carrying its declared content
/// type. Rendering failures become an error response, scoped to the one
/// request.
pub fn into_response<T: ?Sized + Template>(tmpl: &T) -> Response {
    render(tmpl)
        .map_err(|err| ErrorResponse::from(err.to_string()))
        .into_response()
}

fn render<T: ?Sized + Template>(tmpl: &T) -> Result<Response, askama::Error> {
    let body = tmpl.render()?.into();
    Response::builder()
        .header(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static(T::MIME_TYPE),
        )
        .body(body)
        .map_err(|err| askama::Error::Custom(err.into()))
}
