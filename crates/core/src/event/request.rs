use std::collections::HashMap;

/// Transport-neutral view of an inbound request.
///
/// Adapters build this from whatever their transport delivers. The method is
/// optional because an event may arrive without one, and the body is already
/// decoded text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRequest {
    pub method: Option<String>,
    pub path: Option<String>,
    pub resource: Option<String>,
    pub path_parameters: Option<HashMap<String, String>>,
    pub query_parameters: Option<HashMap<String, String>>,
    pub body: Option<String>,
}

impl RouteRequest {
    /// Creates a request with the given method and nothing else.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: Some(method.into()),
            ..Self::default()
        }
    }

    /// Sets the request path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Adds a path parameter.
    pub fn with_path_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Adds a query string parameter.
    pub fn with_query_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.query_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn method(&self) -> &str {
        self.method.as_deref().unwrap_or_default()
    }

    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }

    pub fn query_parameter(&self, name: &str) -> Option<&str> {
        self.query_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let request = RouteRequest::new("GET")
            .with_path("/product/1")
            .with_path_parameter("id", "1")
            .with_query_parameter("category", "tools");

        assert_eq!(request.method(), "GET");
        assert_eq!(request.path.as_deref(), Some("/product/1"));
        assert_eq!(request.path_parameter("id"), Some("1"));
        assert_eq!(request.query_parameter("category"), Some("tools"));
        assert_eq!(request.query_parameter("missing"), None);
    }

    #[test]
    fn test_default_has_no_method() {
        let request = RouteRequest::default();
        assert_eq!(request.method, None);
        assert_eq!(request.method(), "");
    }
}
