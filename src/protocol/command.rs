//! Inbound command decoding.
//!
//! [`parse`] never fails: anything that is not a JSON object with a
//! string `type` becomes [`CommandKind::Invalid`], and a well-formed
//! object with an unknown `type` becomes [`CommandKind::Unrecognized`].
//! Deciding what to do with either is the dispatcher's job.

use serde::Deserialize;
use serde_json::Value;

/// Command discriminant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    SetId,
    SetMission,
    GetStatus,
    GetVersion,
    /// Syntactically valid, but the `type` is not one we handle.
    Unrecognized(String),
    /// Not JSON, not an object, or no string `type`.
    Invalid,
}

impl CommandKind {
    fn from_type(kind: String) -> Self {
        match kind.as_str() {
            "SET_ID" => Self::SetId,
            "SET_MISSION" => Self::SetMission,
            "GET_STATUS" => Self::GetStatus,
            "GET_VERSION" => Self::GetVersion,
            _ => Self::Unrecognized(kind),
        }
    }

    /// Wire name, echoed in `ACK` records.
    pub fn as_str(&self) -> &str {
        match self {
            Self::SetId => "SET_ID",
            Self::SetMission => "SET_MISSION",
            Self::GetStatus => "GET_STATUS",
            Self::GetVersion => "GET_VERSION",
            Self::Unrecognized(kind) => kind,
            Self::Invalid => "INVALID",
        }
    }
}

/// One decoded inbound line.  Optional fields are `None` when absent,
/// never defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub user_id: Option<String>,
    pub mission_id: Option<String>,
}

impl Command {
    pub fn invalid() -> Self {
        Self {
            kind: CommandKind::Invalid,
            user_id: None,
            mission_id: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.kind != CommandKind::Invalid
    }
}

#[derive(Deserialize)]
struct WireCommand {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "userId", default)]
    user_id: Option<String>,
    #[serde(rename = "missionId", default)]
    mission_id: Option<String>,
}

/// Decode one line (without its terminator).
pub fn parse(line: &str) -> Command {
    // Checked up front: serde would happily build a struct from an array.
    let object = match serde_json::from_str::<Value>(line) {
        Ok(v @ Value::Object(_)) => v,
        _ => return Command::invalid(),
    };

    match serde_json::from_value::<WireCommand>(object) {
        Ok(wire) => Command {
            kind: CommandKind::from_type(wire.kind),
            user_id: wire.user_id,
            mission_id: wire.mission_id,
        },
        Err(_) => Command::invalid(),
    }
}
