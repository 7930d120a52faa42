use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};
use crate::http_handler::http_response::status::StatusResponse;

#[derive(Debug)]
pub struct StatusRequest {}

impl NoBodyHTTPRequestType for StatusRequest {}

impl HTTPRequestType for StatusRequest {
    type Response = StatusResponse;
    fn endpoint(&self) -> &'static str {
        "/api/status"
    }
    fn request_method(&self) -> HTTPRequestMethod {
        HTTPRequestMethod::Get
    }
}
