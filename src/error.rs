use std::error::Error;
use std::fmt;

use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
use aws_smithy_runtime_api::client::result::SdkError;
use serde_json::Value;

use crate::handler::PowerAction;

#[derive(Debug)]
pub enum AppError {
    MissingInstanceId,
    InvalidInstanceId(Value),
    Provider {
        action: PowerAction,
        source: Box<dyn Error + Send + Sync + 'static>,
    },
}

impl AppError {
    pub(crate) fn provider<E>(action: PowerAction, error: SdkError<E, HttpResponse>) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        AppError::Provider {
            action,
            source: Box::new(error),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingInstanceId => {
                write!(f, "App Error: no event field named 'instance_id'")
            }
            AppError::InvalidInstanceId(value) => {
                write!(f, "App Error: 'instance_id' must be a string, got {}", value)
            }
            AppError::Provider { action, source } => {
                write!(f, "App Error: {} Instances Error: {:?}", action.operation(), source)
            }
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Provider { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
