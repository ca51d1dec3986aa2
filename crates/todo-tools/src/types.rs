use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use todo_core::Outcome;

/// Identity of the calling agent, supplied by the host for every call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentContext {
    pub agent_id: String,
}

impl AgentContext {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
        }
    }
}

/// Payload of a finished tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub payload: Value,
}

impl ToolResult {
    pub fn from_outcome<T: Serialize>(outcome: &Outcome<T>) -> Self {
        Self {
            success: outcome.success,
            payload: outcome.to_value(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::from_outcome(&Outcome::<Map<String, Value>>::failure(error))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSchema {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Function-calling schema advertised for a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub function: FunctionSchema,
}
