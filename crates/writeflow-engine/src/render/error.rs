/// Failure raised by a component while rendering.
///
/// The engine itself never produces one: every block resolves to some
/// component. Errors come from catalog or override functions and travel to
/// the caller of `render` untouched.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("{block_type} component failed: {message}")]
    Component { block_type: String, message: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RenderError {
    pub fn component(block_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Component {
            block_type: block_type.into(),
            message: message.into(),
        }
    }
}

pub type RenderResult<T> = Result<T, RenderError>;
