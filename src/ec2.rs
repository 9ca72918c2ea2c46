use async_trait::async_trait;
use aws_sdk_ec2::types::InstanceStateChange;

use crate::error::AppError;
use crate::handler::PowerAction;

/// A transition EC2 reported back for one instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateChange {
    pub instance_id: Option<String>,
    pub previous_state: Option<String>,
    pub current_state: Option<String>,
}

impl From<&InstanceStateChange> for StateChange {
    fn from(change: &InstanceStateChange) -> Self {
        StateChange {
            instance_id: change.instance_id().map(String::from),
            previous_state: change
                .previous_state()
                .and_then(|state| state.name())
                .map(|name| name.as_str().to_string()),
            current_state: change
                .current_state()
                .and_then(|state| state.name())
                .map(|name| name.as_str().to_string()),
        }
    }
}

/// The two EC2 capabilities the handlers need.
#[async_trait]
pub trait InstancePower: Send + Sync {
    async fn request_start(
        &self,
        instance_ids: Vec<String>,
    ) -> Result<Vec<StateChange>, AppError>;

    async fn request_stop(
        &self,
        instance_ids: Vec<String>,
    ) -> Result<Vec<StateChange>, AppError>;
}

#[async_trait]
impl InstancePower for aws_sdk_ec2::Client {
    async fn request_start(
        &self,
        instance_ids: Vec<String>,
    ) -> Result<Vec<StateChange>, AppError> {
        let output = self
            .start_instances()
            .set_instance_ids(Some(instance_ids))
            .send()
            .await
            .map_err(|e| AppError::provider(PowerAction::Start, e))?;

        Ok(output
            .starting_instances()
            .iter()
            .map(StateChange::from)
            .collect())
    }

    async fn request_stop(
        &self,
        instance_ids: Vec<String>,
    ) -> Result<Vec<StateChange>, AppError> {
        let output = self
            .stop_instances()
            .set_instance_ids(Some(instance_ids))
            .send()
            .await
            .map_err(|e| AppError::provider(PowerAction::Stop, e))?;

        Ok(output
            .stopping_instances()
            .iter()
            .map(StateChange::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ec2::error::{ErrorMetadata, ProvideErrorMetadata};
    use aws_sdk_ec2::operation::start_instances::StartInstancesOutput;
    use aws_sdk_ec2::operation::stop_instances::{StopInstancesError, StopInstancesOutput};
    use aws_sdk_ec2::types::{InstanceState, InstanceStateName};
    use aws_sdk_ec2::Client;
    use aws_smithy_mocks::{mock, mock_client};
    use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
    use aws_smithy_runtime_api::client::result::SdkError;

    const INSTANCE: &str = "i-0123456789abcdef0";

    fn transition(
        previous: InstanceStateName,
        current: InstanceStateName,
    ) -> InstanceStateChange {
        InstanceStateChange::builder()
            .instance_id(INSTANCE)
            .previous_state(InstanceState::builder().name(previous).build())
            .current_state(InstanceState::builder().name(current).build())
            .build()
    }

    #[test]
    fn state_change_from_sdk_output() {
        let change = transition(InstanceStateName::Stopped, InstanceStateName::Pending);

        assert_eq!(
            StateChange::from(&change),
            StateChange {
                instance_id: Some(String::from(INSTANCE)),
                previous_state: Some(String::from("stopped")),
                current_state: Some(String::from("pending")),
            }
        );
    }

    #[test]
    fn state_change_tolerates_empty_output() {
        let change = InstanceStateChange::builder().build();
        assert_eq!(StateChange::from(&change), StateChange::default());
    }

    #[tokio::test]
    async fn request_start_sends_start_instances() {
        let start = mock!(Client::start_instances)
            .match_requests(|req| req.instance_ids().to_vec() == vec![INSTANCE.to_string()])
            .then_output(|| {
                StartInstancesOutput::builder()
                    .starting_instances(transition(
                        InstanceStateName::Stopped,
                        InstanceStateName::Pending,
                    ))
                    .build()
            });
        let client = mock_client!(aws_sdk_ec2, [&start]);

        let changes = client.request_start(vec![INSTANCE.to_string()]).await.unwrap();

        assert_eq!(start.num_calls(), 1);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].current_state.as_deref(), Some("pending"));
    }

    #[tokio::test]
    async fn request_stop_sends_stop_instances() {
        let stop = mock!(Client::stop_instances)
            .match_requests(|req| req.instance_ids().to_vec() == vec![INSTANCE.to_string()])
            .then_output(|| {
                StopInstancesOutput::builder()
                    .stopping_instances(transition(
                        InstanceStateName::Running,
                        InstanceStateName::Stopping,
                    ))
                    .build()
            });
        let client = mock_client!(aws_sdk_ec2, [&stop]);

        let changes = client.request_stop(vec![INSTANCE.to_string()]).await.unwrap();

        assert_eq!(stop.num_calls(), 1);
        assert_eq!(changes[0].previous_state.as_deref(), Some("running"));
        assert_eq!(changes[0].current_state.as_deref(), Some("stopping"));
    }

    #[tokio::test]
    async fn rejected_stop_becomes_provider_error() {
        let stop = mock!(Client::stop_instances).then_error(|| {
            StopInstancesError::generic(
                ErrorMetadata::builder()
                    .code("InvalidInstanceID.NotFound")
                    .message("The instance ID 'i-doesnotexist' does not exist")
                    .build(),
            )
        });
        let client = mock_client!(aws_sdk_ec2, [&stop]);

        let error = client
            .request_stop(vec![String::from("i-doesnotexist")])
            .await
            .expect_err("unknown instance should fail");

        match error {
            AppError::Provider { action, source } => {
                assert_eq!(action, PowerAction::Stop);
                let sdk_error = source
                    .downcast_ref::<SdkError<StopInstancesError, HttpResponse>>()
                    .expect("source should be the SDK error");
                assert_eq!(
                    sdk_error.as_service_error().and_then(|e| e.code()),
                    Some("InvalidInstanceID.NotFound")
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
