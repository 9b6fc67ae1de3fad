pub type FxResult<T> = Result<T, FxError>;

#[derive(thiserror::Error, Debug)]
pub enum FxError {
    #[error("missing element: {0}")]
    MissingElement(String),

    #[error("setup error: {0}")]
    Setup(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("js error: {0}")]
    Js(String),
}

impl FxError {
    pub fn missing(selector: impl Into<String>) -> Self {
        Self::MissingElement(selector.into())
    }

    pub fn setup(msg: impl Into<String>) -> Self {
        Self::Setup(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn js(msg: impl Into<String>) -> Self {
        Self::Js(msg.into())
    }
}

impl From<serde_json::Error> for FxError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(FxError::missing("#x").to_string().contains("missing element:"));
        assert!(FxError::setup("x").to_string().contains("setup error:"));
        assert!(FxError::config("x").to_string().contains("config error:"));
        assert!(FxError::js("x").to_string().contains("js error:"));
    }

    #[test]
    fn json_errors_become_config_errors() {
        let err: FxError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, FxError::Config(_)));
    }
}
