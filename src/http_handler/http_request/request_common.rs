use crate::http_handler::http_client::HTTPClient;
use crate::http_handler::http_response::response_common::{HTTPResponseType, ResponseError};

pub(crate) enum HTTPRequestMethod {
    Get,
    Post,
    Put,
    Delete,
}

pub(crate) trait HTTPRequestType {
    type Response: HTTPResponseType;
    fn endpoint(&self) -> &str;
    fn request_method(&self) -> HTTPRequestMethod;
    fn header_params(&self) -> reqwest::header::HeaderMap {
        reqwest::header::HeaderMap::default()
    }
}

/// Request types without a body. Provides the ready-made `send_request`
/// which builds the URL from the client's base, dispatches, and hands the
/// response to the associated response type for code checking and parsing.
pub(crate) trait NoBodyHTTPRequestType: HTTPRequestType {
    async fn send_request(
        &self,
        client: &HTTPClient,
    ) -> Result<<Self::Response as HTTPResponseType>::ParsedResponseType, ResponseError> {
        let url = format!("{}{}", client.url(), self.endpoint());
        let request = match self.request_method() {
            HTTPRequestMethod::Get => client.client().get(url),
            HTTPRequestMethod::Post => client.client().post(url),
            HTTPRequestMethod::Put => client.client().put(url),
            HTTPRequestMethod::Delete => client.client().delete(url),
        };
        let response = request.headers(self.header_params()).send().await?;
        Self::Response::read_response(response).await
    }
}
