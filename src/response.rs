use serde::Serialize;
use utoipa::ToSchema;

/// Envelope metadata. The storefront endpoints are single-resource reads, so
/// only the site origin is reported today.
#[derive(Debug, Serialize, ToSchema, Clone, Default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

impl Meta {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn for_site(base_url: &str) -> Self {
        Self {
            site: Some(base_url.to_string()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}
