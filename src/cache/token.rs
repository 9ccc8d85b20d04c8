/// Bearer token issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    /// lifetime in seconds, as announced by the token endpoint
    pub expires_in: Option<u64>,
}

impl AccessToken {
    pub fn new(value: String, expires_in: Option<u64>) -> Self {
        Self { value, expires_in }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.value)
    }
}
