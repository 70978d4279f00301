use crate::domain::ports::GenerativeProvider;
use crate::utils::error::{OracleError, Result};
use async_trait::async_trait;

/// 回傳預先準備好的文字；用於離線執行與測試
#[derive(Debug, Clone)]
pub enum CannedProvider {
    Respond(String),
    Empty,
    Fail(String),
}

impl CannedProvider {
    pub fn respond(text: impl Into<String>) -> Self {
        CannedProvider::Respond(text.into())
    }
}

#[async_trait]
impl GenerativeProvider for CannedProvider {
    async fn complete(&self, _system_prompt: &str, _user_prompt: &str) -> Result<Option<String>> {
        match self {
            CannedProvider::Respond(text) => Ok(Some(text.clone())),
            CannedProvider::Empty => Ok(None),
            CannedProvider::Fail(message) => Err(OracleError::ProviderError {
                message: message.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    #[test]
    fn test_canned_responses() {
        let text = block_on(CannedProvider::respond("{}").complete("sys", "user")).unwrap();
        assert_eq!(text.as_deref(), Some("{}"));

        let empty = block_on(CannedProvider::Empty.complete("sys", "user")).unwrap();
        assert_eq!(empty, None);

        let failed = block_on(CannedProvider::Fail("down".to_string()).complete("sys", "user"));
        assert!(matches!(failed, Err(OracleError::ProviderError { .. })));
    }
}
