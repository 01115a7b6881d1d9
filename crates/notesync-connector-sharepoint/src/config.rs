//! SharePoint connector configuration.

use secrecy::SecretString;

const DEFAULT_LOGIN_BASE_URL: &str = "https://login.microsoftonline.com";
const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com";

/// Credentials from the Azure AD app registration.
#[derive(Debug, Clone)]
pub struct SharePointCredentials {
    pub client_id: String,
    pub client_secret: SecretString,
}

/// Connection settings for one document-library folder.
#[derive(Debug, Clone)]
pub struct SharePointConfig {
    /// Azure AD tenant id (or domain) used for the token endpoint.
    pub tenant_id: String,
    /// Drive backing the document library.
    pub drive_id: String,
    /// Folder item whose children are synchronized.
    pub folder_id: String,
    /// Login endpoint base; overridable for tests.
    pub login_base_url: String,
    /// Graph endpoint base; overridable for tests.
    pub graph_base_url: String,
}

impl SharePointConfig {
    pub fn new(
        tenant_id: impl Into<String>,
        drive_id: impl Into<String>,
        folder_id: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            drive_id: drive_id.into(),
            folder_id: folder_id.into(),
            login_base_url: DEFAULT_LOGIN_BASE_URL.to_string(),
            graph_base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
        }
    }

    /// Points the connector at a different Graph deployment (tests).
    #[must_use]
    pub fn with_base_urls(
        mut self,
        login_base_url: impl Into<String>,
        graph_base_url: impl Into<String>,
    ) -> Self {
        self.login_base_url = login_base_url.into();
        self.graph_base_url = graph_base_url.into();
        self
    }

    /// Token endpoint for this tenant.
    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}/{}/oauth2/v2.0/token", self.login_base_url, self.tenant_id)
    }

    /// Default scope for the client credentials grant.
    #[must_use]
    pub fn scope(&self) -> String {
        format!("{}/.default", self.graph_base_url)
    }

    /// Graph v1.0 API root.
    #[must_use]
    pub fn api_base(&self) -> String {
        format!("{}/v1.0", self.graph_base_url)
    }
}
