use lambda_http::http::StatusCode;
use lambda_http::{Error, Response};
use serde::Serialize;

pub fn json_response(
    status: &StatusCode,
    body: &impl Serialize,
) -> Result<Response<String>, Error> {
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(serde_json::to_string(&body).unwrap())
        .map_err(Box::new)?;

    Ok(response)
}
