use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Event names the bridge reacts to. Everything else is ignored.
pub const KEY_DOWN: &str = "keyDown";
pub const WILL_APPEAR: &str = "willAppear";
pub const DID_RECEIVE_SETTINGS: &str = "didReceiveSettings";

/// Command identifier as configured on a button: some property inspectors
/// send a string, others a number.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CommandId {
    Int(i32),
    Text(String),
}

impl CommandId {
    pub fn is_zero(&self) -> bool {
        match self {
            CommandId::Int(v) => *v == 0,
            CommandId::Text(s) => s.is_empty(),
        }
    }
}

impl Default for CommandId {
    fn default() -> Self {
        CommandId::Text(String::new())
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandId::Int(v) => write!(f, "{}", v),
            CommandId::Text(s) => f.write_str(s),
        }
    }
}

/// Destination and command for one button instance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstanceSettings {
    pub destination_address: String,
    pub destination_port: u16,
    pub command: CommandId,
}

impl fmt::Display for InstanceSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IP: {:?}, Port: {}, Command ID: {}",
            self.destination_address, self.destination_port, self.command
        )
    }
}

/// Settings object exactly as the host sends it; any field may be missing.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawSettings {
    #[serde(default, alias = "ipAddress")]
    pub ip: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default, alias = "commandID")]
    pub command_id: Option<CommandId>,
}

impl RawSettings {
    /// Settings with every missing field at its zero value.
    pub fn into_settings_or_zero(self) -> InstanceSettings {
        InstanceSettings {
            destination_address: self.ip.unwrap_or_default(),
            destination_port: self.port.unwrap_or_default(),
            command: self.command_id.unwrap_or_default(),
        }
    }

    /// `None` when every field is missing or zero-valued, otherwise the
    /// settings verbatim (missing fields zeroed).
    pub fn into_settings(self) -> Option<InstanceSettings> {
        let settings = self.into_settings_or_zero();
        let present = !settings.destination_address.is_empty()
            || settings.destination_port != 0
            || !settings.command.is_zero();
        present.then_some(settings)
    }
}

/// `null` decodes like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: RawSettings,
}

/// One JSON message from the host.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct InboundEvent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub event: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub context: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payload: EventPayload,
}

impl InboundEvent {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// First message sent after connecting.
#[derive(Debug, Serialize)]
pub struct RegistrationMessage<'a> {
    pub event: &'a str,
    pub uuid: &'a str,
}
