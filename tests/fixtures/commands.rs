//! Generated by wire-idl. Do not edit.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuspectId(pub String);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerCommand {
    Connected,
    BecomeSuspect {
        suspect_id: SuspectId,
    },
    BecomeInvestigator {
        suspect_id: SuspectId,
    },
    Echo {
        message: String,
    },
}

pub fn encode_server_command(value: &ServerCommand) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(value)
}

pub fn decode_server_command(value: serde_json::Value) -> serde_json::Result<ServerCommand> {
    serde_json::from_value(value)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientCommand {
    LogInAsSuspect,
    LogInAsInvestigator {
        suspect_id: SuspectId,
    },
    InvestigatorShout {
        message: String,
    },
}

pub fn encode_client_command(value: &ClientCommand) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(value)
}

pub fn decode_client_command(value: serde_json::Value) -> serde_json::Result<ClientCommand> {
    serde_json::from_value(value)
}
