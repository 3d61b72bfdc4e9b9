use std::{fmt, io, path::PathBuf};
use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Pipeline stage a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Load,
    Transform,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Config => "config",
            Stage::Load => "load",
            Stage::Transform => "transform",
            Stage::Write => "write",
        })
    }
}

/// Every failure is fatal; the message starts with the stage that failed.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("load: cannot read input {}: {source}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{stage}: malformed input: {message}")]
    MalformedInput { stage: Stage, message: String },

    #[error("transform: input table has no data rows")]
    EmptyInput,

    #[error("write: cannot write output {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config: {message}")]
    InvalidConfig { message: String },
}

impl ConvertError {
    pub fn malformed(stage: Stage, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            stage,
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn output_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            Self::InputNotFound { .. } => Stage::Load,
            Self::MalformedInput { stage, .. } => *stage,
            Self::EmptyInput => Stage::Transform,
            Self::OutputWrite { .. } => Stage::Write,
            Self::InvalidConfig { .. } => Stage::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_stage() {
        let e = ConvertError::malformed(Stage::Load, "line 3, column 4: range is not numeric");
        assert_eq!(
            e.to_string(),
            "load: malformed input: line 3, column 4: range is not numeric"
        );
        assert_eq!(e.stage(), Stage::Load);

        let e = ConvertError::EmptyInput;
        assert!(e.to_string().starts_with("transform:"));
        assert_eq!(e.stage(), Stage::Transform);

        let e = ConvertError::output_write("out/x.csv", io::Error::from(io::ErrorKind::NotFound));
        assert!(e.to_string().starts_with("write: cannot write output out/x.csv"));
        assert_eq!(e.stage(), Stage::Write);
    }
}
