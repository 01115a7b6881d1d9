//! NotebookLM connector configuration.

const DEFAULT_API_BASE_URL: &str = "https://global-discoveryengine.googleapis.com";
const DEFAULT_METADATA_BASE_URL: &str = "http://metadata.google.internal";
const DEFAULT_IAM_BASE_URL: &str = "https://iamcredentials.googleapis.com";
const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Connection settings for one notebook.
#[derive(Debug, Clone)]
pub struct NotebookLmConfig {
    /// Numeric project identifier owning the notebook.
    pub project_number: String,
    /// Notebook location, usually `global`.
    pub location: String,
    /// Notebook identifier.
    pub notebook_id: String,
    /// Service account with domain-wide delegation configured; `iss` of
    /// the delegation JWT.
    pub delegator_email: String,
    /// User impersonated via delegation; `sub` of the delegation JWT.
    pub impersonated_user: String,
    /// OAuth scopes asserted in the delegation JWT.
    pub scopes: Vec<String>,
    /// Discovery Engine endpoint base; overridable for tests.
    pub api_base_url: String,
    /// GCE metadata server base; overridable for tests.
    pub metadata_base_url: String,
    /// IAM Credentials endpoint base; overridable for tests.
    pub iam_base_url: String,
    /// OAuth token exchange endpoint; overridable for tests.
    pub token_url: String,
}

impl NotebookLmConfig {
    pub fn new(
        project_number: impl Into<String>,
        location: impl Into<String>,
        notebook_id: impl Into<String>,
        delegator_email: impl Into<String>,
        impersonated_user: impl Into<String>,
    ) -> Self {
        Self {
            project_number: project_number.into(),
            location: location.into(),
            notebook_id: notebook_id.into(),
            delegator_email: delegator_email.into(),
            impersonated_user: impersonated_user.into(),
            scopes: vec![DEFAULT_SCOPE.to_string()],
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            metadata_base_url: DEFAULT_METADATA_BASE_URL.to_string(),
            iam_base_url: DEFAULT_IAM_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }

    /// Points every endpoint at the given base URL (tests).
    #[must_use]
    pub fn with_base_url(mut self, base: &str) -> Self {
        self.api_base_url = base.to_string();
        self.metadata_base_url = base.to_string();
        self.iam_base_url = base.to_string();
        self.token_url = format!("{base}/token");
        self
    }

    /// Resource path of the configured notebook.
    #[must_use]
    pub fn notebook_path(&self) -> String {
        format!(
            "projects/{}/locations/{}/notebooks/{}",
            self.project_number, self.location, self.notebook_id
        )
    }

    /// Full resource name for a source in this notebook.
    #[must_use]
    pub fn source_name(&self, source_id: &str) -> String {
        format!("{}/sources/{}", self.notebook_path(), source_id)
    }

    /// URL for the raw-byte upload endpoint.
    #[must_use]
    pub fn upload_url(&self) -> String {
        format!(
            "{}/upload/v1alpha/{}/sources:uploadFile",
            self.api_base_url,
            self.notebook_path()
        )
    }

    /// URL for fetching one source.
    #[must_use]
    pub fn source_url(&self, source_id: &str) -> String {
        format!("{}/v1alpha/{}", self.api_base_url, self.source_name(source_id))
    }

    /// URL for the batch delete endpoint.
    #[must_use]
    pub fn batch_delete_url(&self) -> String {
        format!(
            "{}/v1alpha/{}/sources:batchDelete",
            self.api_base_url,
            self.notebook_path()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NotebookLmConfig {
        NotebookLmConfig::new("42", "global", "nb-1", "sa@proj.iam", "user@corp.example")
    }

    #[test]
    fn resource_paths_are_assembled_from_parts() {
        let c = config();
        assert_eq!(c.notebook_path(), "projects/42/locations/global/notebooks/nb-1");
        assert_eq!(
            c.source_name("abc"),
            "projects/42/locations/global/notebooks/nb-1/sources/abc"
        );
    }

    #[test]
    fn upload_and_api_urls_differ_in_prefix() {
        let c = config().with_base_url("http://localhost:1");
        assert_eq!(
            c.upload_url(),
            "http://localhost:1/upload/v1alpha/projects/42/locations/global/notebooks/nb-1/sources:uploadFile"
        );
        assert_eq!(
            c.source_url("abc"),
            "http://localhost:1/v1alpha/projects/42/locations/global/notebooks/nb-1/sources/abc"
        );
        assert_eq!(
            c.batch_delete_url(),
            "http://localhost:1/v1alpha/projects/42/locations/global/notebooks/nb-1/sources:batchDelete"
        );
    }
}
