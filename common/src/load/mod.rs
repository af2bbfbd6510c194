//! Progress of a single read request issued by a wizard step.

/// `Loading`, `Failed` and an empty `Loaded` are distinct states so that the
/// views can tell "still waiting", "the request failed" and "nothing found"
/// apart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for LoadState<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => LoadState::Loaded(value),
            Err(err) => LoadState::Failed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn empty_result_is_not_an_error() {
        let state: LoadState<Vec<String>> = Ok::<_, ApiError>(Vec::new()).into();
        assert_eq!(state.loaded().map(Vec::len), Some(0));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn errors_keep_their_message() {
        let state: LoadState<Vec<String>> = Err(ApiError::Network("offline".into())).into();
        assert_eq!(state.error(), Some("Network error: offline"));
        assert!(!state.is_loading());
    }
}
