//! API info at the root path.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::config::ServerConfig;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Endpoints {
    /// The storefront site when `FRONTEND_URL` is set, else the public API.
    pub frontend: String,
    pub admin: &'static str,
    pub api: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ApiInfo {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

impl ApiInfo {
    fn for_config(config: &ServerConfig) -> Self {
        Self {
            status: "OK",
            message: "Royal Trust BD API is running",
            version: env!("CARGO_PKG_VERSION"),
            endpoints: Endpoints {
                frontend: config
                    .frontend_url
                    .clone()
                    .unwrap_or_else(|| "/api/frontend".to_owned()),
                admin: "/admin",
                api: "/api",
            },
        }
    }
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Json<ApiInfo> {
    Json(ApiInfo::for_config(state.config()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::test_config;

    #[test]
    fn test_frontend_endpoint_uses_storefront_url() {
        let mut config = test_config();
        config.frontend_url = Some("https://shop.royaltrustbd.com".to_owned());

        let info = ApiInfo::for_config(&config);
        assert_eq!(info.message, "Royal Trust BD API is running");
        assert_eq!(info.endpoints.frontend, "https://shop.royaltrustbd.com");
        assert_eq!(info.endpoints.admin, "/admin");
    }

    #[test]
    fn test_frontend_endpoint_falls_back_to_api_path() {
        let info = ApiInfo::for_config(&test_config());
        assert_eq!(info.endpoints.frontend, "/api/frontend");
    }
}
