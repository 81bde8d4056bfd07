use serde::{Deserialize, Serialize};

/// Deployment information echoed in the full health report.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Metadata {
    /// Name of the deployment environment, for example `production`. It is
    /// usually taken from the `NODE_ENV` variable shared with the frontend.
    #[serde(default = "Metadata::default_environment")]
    pub environment: String,

    /// Version of the deployed backend. Overridden by `APP_VERSION`.
    #[serde(default = "Metadata::default_version")]
    pub version: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            environment: Self::default_environment(),
            version: Self::default_version(),
        }
    }
}

impl Metadata {
    fn default_environment() -> String {
        String::from("development")
    }

    fn default_version() -> String {
        String::from(env!("CARGO_PKG_VERSION"))
    }
}
