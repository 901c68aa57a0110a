//! Inbound API Gateway proxy event.
//!
//! Only the fields the adapter reads are modelled; anything else in the
//! payload is ignored during deserialization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEvent {
    pub resource: Option<String>,
    pub path: Option<String>,
    pub http_method: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub path_parameters: Option<HashMap<String, String>>,
    pub query_string_parameters: Option<HashMap<String, String>>,
    pub body: Option<String>,
    pub is_base64_encoded: Option<bool>,
    #[serde(default)]
    pub request_context: RequestContext,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub request_id: Option<String>,
    pub extended_request_id: Option<String>,
    pub authorizer: Option<Authorizer>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Authorizer {
    pub iam: Option<IamAuthorizer>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IamAuthorizer {
    pub cognito_identity: Option<CognitoIdentity>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CognitoIdentity {
    pub identity_id: Option<String>,
}

impl ProxyEvent {
    /// The gateway's request id, empty if the event carries none.
    pub fn request_id(&self) -> &str {
        self.request_context.request_id.as_deref().unwrap_or("")
    }

    /// The id used to tag log lines: the extended id when the gateway
    /// provides one, the plain request id otherwise.
    pub fn trace_id(&self) -> &str {
        self.request_context
            .extended_request_id
            .as_deref()
            .unwrap_or_else(|| self.request_id())
    }

    /// Cognito identity of an IAM-authorized caller.
    pub fn user_id(&self) -> Option<&str> {
        self.request_context
            .authorizer
            .as_ref()?
            .iam
            .as_ref()?
            .cognito_identity
            .as_ref()?
            .identity_id
            .as_deref()
    }
}
