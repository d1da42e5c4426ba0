//! Wire types shared with the flow server

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

/// Identifier of a server-defined flow
pub type FlowId = u64;

/// Identity and subscription record of the person talking to the flow
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_subscribed: bool,
    /// Fields the server attaches that we round-trip untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Member {
    /// The member a fresh page starts with
    pub fn guest() -> Self {
        Self {
            name: "guest".to_string(),
            ..Self::default()
        }
    }

    /// Id used in the init path; members without an id map to `0`
    pub fn path_id(&self) -> i64 {
        self.id.unwrap_or(0)
    }
}

/// Type tag of a message. The server may send tags we do not know.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageType {
    Message,
    GetInfo,
    MultipleChoice,
    /// Echo of something the user submitted
    UserReply,
    Other(String),
}

impl MessageType {
    pub fn as_str(&self) -> &str {
        match self {
            MessageType::Message => "message",
            MessageType::GetInfo => "getInfo",
            MessageType::MultipleChoice => "multipleChoice",
            MessageType::UserReply => "userReply",
            MessageType::Other(tag) => tag,
        }
    }
}

impl Default for MessageType {
    fn default() -> Self {
        MessageType::Other(String::new())
    }
}

impl From<String> for MessageType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "message" => MessageType::Message,
            "getInfo" => MessageType::GetInfo,
            "multipleChoice" => MessageType::MultipleChoice,
            "userReply" => MessageType::UserReply,
            _ => MessageType::Other(tag),
        }
    }
}

impl From<MessageType> for String {
    fn from(kind: MessageType) -> Self {
        match kind {
            MessageType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One option of a multiple-choice message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choice {
    Label(String),
    Detailed {
        text: String,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    /// Any other shape, kept as raw JSON so one odd entry doesn't sink the batch
    Other(Value),
}

impl Choice {
    /// Text submitted to the server when this choice is picked
    pub fn label(&self) -> Cow<'_, str> {
        match self {
            Choice::Label(text) | Choice::Detailed { text, .. } => Cow::Borrowed(text),
            Choice::Other(value) => ["label", "title", "value"]
                .iter()
                .find_map(|key| value.get(*key).and_then(Value::as_str))
                .map_or_else(|| Cow::Owned(value.to_string()), Cow::Borrowed),
        }
    }
}

/// One turn of the dialogue
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type", default)]
    pub kind: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub responses: Vec<Choice>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    pub fn new(kind: MessageType, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Local echo of user input, appended to the feed only
    pub fn user_reply(text: impl Into<String>) -> Self {
        Self::new(MessageType::UserReply, text)
    }

    #[allow(dead_code)] // Constructor for API completeness
    pub fn multiple_choice(text: impl Into<String>, responses: Vec<Choice>) -> Self {
        Self {
            responses,
            ..Self::new(MessageType::MultipleChoice, text)
        }
    }

    pub fn display_text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

/// Server response envelope for both init and simulate
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_name: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
    pub stop_index: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
}

/// Parameters of a simulate call
#[derive(Debug, Clone, PartialEq)]
pub struct SimulateParams {
    pub flow_id: FlowId,
    pub member: Member,
    pub start_index: i64,
    pub message: String,
}

/// JSON body of `POST /api/flows/{flowId}/simulate`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SimulateBody<'a> {
    pub member: &'a Member,
    pub start_index: i64,
    pub message: &'a str,
}

impl<'a> From<&'a SimulateParams> for SimulateBody<'a> {
    fn from(params: &'a SimulateParams) -> Self {
        Self {
            member: &params.member,
            start_index: params.start_index,
            message: &params.message,
        }
    }
}
