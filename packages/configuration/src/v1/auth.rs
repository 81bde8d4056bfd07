use serde::{Deserialize, Serialize};
use url::Url;

/// Firebase Authentication settings.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Auth {
    /// Firebase project id.
    #[serde(default)]
    pub project_id: String,

    /// Web API key of the Firebase project.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the Identity Toolkit API. Point it to the auth emulator
    /// for local development.
    #[serde(default = "Auth::default_endpoint")]
    pub endpoint: Url,
}

impl Default for Auth {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            api_key: String::new(),
            endpoint: Self::default_endpoint(),
        }
    }
}

impl Auth {
    fn default_endpoint() -> Url {
        Url::parse("https://identitytoolkit.googleapis.com").expect("the default Identity Toolkit endpoint should be a valid URL")
    }
}
