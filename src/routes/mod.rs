mod frontend;
mod health_check;
mod inquiry;
mod newsletter;
mod unsubscribe;

pub use frontend::*;
pub use health_check::*;
pub use inquiry::*;
pub use newsletter::*;
pub use unsubscribe::*;

/// Body of every non-listing response: `{"message": "..."}`.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
