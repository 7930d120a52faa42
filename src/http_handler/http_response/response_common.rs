use strum_macros::Display;

pub(crate) trait JSONBodyHTTPResponseType: HTTPResponseType {
    async fn parse_json_body(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>
    where Self::ParsedResponseType: for<'de> serde::Deserialize<'de> {
        Ok(response.json::<Self::ParsedResponseType>().await?)
    }
}

pub(crate) trait SerdeJSONBodyHTTPResponseType {}

impl<T> JSONBodyHTTPResponseType for T
where
    T: SerdeJSONBodyHTTPResponseType,
    for<'de> T: serde::Deserialize<'de>,
{
}

impl<T> HTTPResponseType for T
where
    T: SerdeJSONBodyHTTPResponseType,
    for<'de> T: serde::Deserialize<'de>,
{
    type ParsedResponseType = T;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        let resp = Self::unwrap_return_code(response).await?;
        Self::parse_json_body(resp).await
    }
}

pub(crate) trait HTTPResponseType {
    type ParsedResponseType;
    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>;

    async fn unwrap_return_code(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ResponseError> {
        if response.status().is_success() {
            Ok(response)
        } else if response.status().is_server_error() {
            Err(ResponseError::InternalServer)
        } else if response.status().is_client_error() {
            Err(ResponseError::BadRequest(response.json().await?))
        } else {
            Err(ResponseError::Unknown)
        }
    }
}

/// Error body the status backend attaches to client-error responses,
/// e.g. `{"error": "no data"}` while the collector has nothing yet.
#[derive(Debug, serde::Deserialize)]
pub struct ErrorReturn {
    #[serde(default)]
    error: Option<String>,
}

impl ErrorReturn {
    pub fn error(&self) -> Option<&str> { self.error.as_deref() }
}

#[derive(Debug, Display)]
pub enum ResponseError {
    InternalServer,
    BadRequest(ErrorReturn),
    NoConnection,
    Decode,
    Unknown,
}

impl std::error::Error for ResponseError {}
impl From<reqwest::Error> for ResponseError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            ResponseError::Decode
        } else if value.is_request() {
            ResponseError::BadRequest(ErrorReturn { error: None })
        } else if value.is_timeout() || value.is_redirect() {
            ResponseError::InternalServer
        } else if value.is_connect() {
            ResponseError::NoConnection
        } else {
            ResponseError::Unknown
        }
    }
}
