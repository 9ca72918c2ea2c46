use serde_json::Value;
use tracing::info;

use crate::ec2::{InstancePower, StateChange};
use crate::error::AppError;
use crate::event::{self, PowerResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    Start,
    Stop,
}

impl PowerAction {
    /// Verb prefix of the EC2 operation (`Start` for `StartInstances`).
    pub fn operation(self) -> &'static str {
        match self {
            PowerAction::Start => "Start",
            PowerAction::Stop => "Stop",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            PowerAction::Start => "Started",
            PowerAction::Stop => "Stopped",
        }
    }
}

pub async fn start_instance(
    ec2: &impl InstancePower,
    payload: Value,
) -> Result<PowerResponse, AppError> {
    power(ec2, PowerAction::Start, payload).await
}

pub async fn stop_instance(
    ec2: &impl InstancePower,
    payload: Value,
) -> Result<PowerResponse, AppError> {
    power(ec2, PowerAction::Stop, payload).await
}

async fn power(
    ec2: &impl InstancePower,
    action: PowerAction,
    payload: Value,
) -> Result<PowerResponse, AppError> {
    let instance_id = event::instance_id(&payload)?;

    let changes = match action {
        PowerAction::Start => ec2.request_start(vec![instance_id.clone()]).await?,
        PowerAction::Stop => ec2.request_stop(vec![instance_id.clone()]).await?,
    };

    // EC2 echoes the id back; fall back to the first entry if it doesn't.
    let change = changes
        .iter()
        .find(|change| change.instance_id.as_deref() == Some(instance_id.as_str()))
        .or_else(|| changes.first());
    let (previous, current) = change.map_or(("-", "-"), reported_states);

    info!(
        instance_id = %instance_id,
        previous,
        current,
        "{} EC2 instance: {}",
        action.past_tense(),
        instance_id
    );

    Ok(PowerResponse::ok(format!(
        "{} EC2 instance {}",
        action.past_tense(),
        instance_id
    )))
}

fn reported_states(change: &StateChange) -> (&str, &str) {
    (
        change.previous_state.as_deref().unwrap_or("-"),
        change.current_state.as_deref().unwrap_or("-"),
    )
}
