use crate::item::{CATEGORY_ATTRIBUTE, ID_ATTRIBUTE};

use super::{RouteError, RouteRequest};

pub const GET: &str = "GET";
pub const POST: &str = "POST";
pub const DELETE: &str = "DELETE";
pub const PUT: &str = "PUT";

const MISSING_METHOD: &str = "<missing method>";

/// The operation selected for an inbound event, with the inputs it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `GET` with a path `id`.
    GetItem { id: String },
    /// `GET` with neither path nor query parameters.
    ScanItems,
    /// `GET` with query parameters.
    QueryByCategory { id: String, category: String },
    /// `POST`.
    CreateItem { body: String },
    /// `DELETE`.
    DeleteItem { id: String },
    /// `PUT`.
    UpdateItem { id: String, body: String },
}

impl Route {
    /// Selects a route from the method, then from the shape of the parameters.
    ///
    /// Query parameters take precedence over path parameters for `GET`. A
    /// request without a method is an unsupported route like any other.
    pub fn from_request(request: &RouteRequest) -> Result<Self, RouteError> {
        let Some(method) = request.method.as_deref() else {
            return Err(RouteError::UnsupportedRoute(MISSING_METHOD.to_string()));
        };

        match method {
            GET => {
                if request.query_parameters.is_some() {
                    Ok(Self::QueryByCategory {
                        id: required_path_id(request)?,
                        category: request
                            .query_parameter(CATEGORY_ATTRIBUTE)
                            .ok_or(RouteError::MissingQueryParameter(CATEGORY_ATTRIBUTE))?
                            .to_string(),
                    })
                } else if request.path_parameters.is_some() {
                    Ok(Self::GetItem {
                        id: required_path_id(request)?,
                    })
                } else {
                    Ok(Self::ScanItems)
                }
            }
            POST => Ok(Self::CreateItem {
                body: required_body(request)?,
            }),
            DELETE => Ok(Self::DeleteItem {
                id: required_path_id(request)?,
            }),
            PUT => Ok(Self::UpdateItem {
                id: required_path_id(request)?,
                body: required_body(request)?,
            }),
            other => Err(RouteError::UnsupportedRoute(other.to_string())),
        }
    }

    /// Short operation name used in logs.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::GetItem { .. } => "get-by-id",
            Self::ScanItems => "scan-all",
            Self::QueryByCategory { .. } => "query-by-id-and-category",
            Self::CreateItem { .. } => "create",
            Self::DeleteItem { .. } => "delete-by-id",
            Self::UpdateItem { .. } => "update-by-id",
        }
    }
}

fn required_path_id(request: &RouteRequest) -> Result<String, RouteError> {
    request
        .path_parameter(ID_ATTRIBUTE)
        .map(str::to_string)
        .ok_or(RouteError::MissingPathParameter(ID_ATTRIBUTE))
}

fn required_body(request: &RouteRequest) -> Result<String, RouteError> {
    request.body.clone().ok_or(RouteError::MissingBody)
}
