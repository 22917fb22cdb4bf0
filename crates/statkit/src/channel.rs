//! Method-call dispatch between an embedding layer and the [`Provider`].
//!
//! A caller sends a [`MethodCall`] (method name plus optional arguments) and
//! gets back exactly one [`Response`]:
//!
//! ```text
//! {"method":"getStorageInfo"}
//!   -> {"status":"success","result":{"total":..,"free":..,"used":..}}
//! {"method":"getStorageInfo","arguments":{"path":"/nonexistent/mount"}}
//!   -> {"status":"error","code":"STORAGE_ERROR","message":".."}
//! {"method":"reboot"}
//!   -> {"status":"not_implemented","method":"reboot"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::types::StorageStats;
use crate::Provider;

/// The one method this channel answers.
pub const GET_STORAGE_INFO: &str = "getStorageInfo";

/// A method invocation from the caller layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Method name, e.g. `getStorageInfo`
    pub method: String,
    /// Optional arguments object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Value>,
}

impl MethodCall {
    /// Create a call with no arguments
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: None,
        }
    }

    /// Attach a `path` argument
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.arguments = Some(serde_json::json!({ "path": path.into() }));
        self
    }
}

/// Outcome of a method call, as seen by the caller layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    /// Query succeeded
    Success {
        /// `{total, free, used}` in bytes
        result: StorageStats,
    },
    /// Query failed; no details payload beyond the message
    Error {
        /// Error code, e.g. `STORAGE_ERROR`
        code: String,
        /// Human-readable message
        message: String,
    },
    /// The method name is not recognized
    NotImplemented {
        /// The method that was requested
        method: String,
    },
}

impl Response {
    /// Returns true if the call succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<Result<StorageStats>> for Response {
    fn from(result: Result<StorageStats>) -> Self {
        match result {
            Ok(stats) => Self::Success { result: stats },
            Err(Error::UnsupportedOperation(method)) => Self::NotImplemented { method },
            Err(e) => Self::Error {
                code: e.code().to_string(),
                message: e.message().to_string(),
            },
        }
    }
}

/// Hook applied to a `path` argument before it reaches the provider.
pub type PathExpander = fn(&str) -> PathBuf;

/// Dispatcher that answers method calls with storage statistics.
pub struct Channel {
    provider: Provider,
    default_root: PathBuf,
    expand: Option<PathExpander>,
}

impl Channel {
    /// Create a channel querying `default_root` when a call carries no path.
    pub fn new(provider: Provider, default_root: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            default_root: default_root.into(),
            expand: None,
        }
    }

    /// Expand `path` arguments with `expand` instead of taking them verbatim.
    ///
    /// Without an expander only a leading `~/` is expanded (by the provider).
    pub fn with_path_expander(mut self, expand: PathExpander) -> Self {
        self.expand = Some(expand);
        self
    }

    /// Root queried by calls without a `path` argument.
    pub fn default_root(&self) -> &std::path::Path {
        &self.default_root
    }

    /// Dispatch a call, returning the typed result.
    ///
    /// # Errors
    ///
    /// - `UnsupportedOperation`: unknown method name
    /// - `StorageQuery`: bad `path` argument or unreadable volume
    pub fn invoke(&self, call: &MethodCall) -> Result<StorageStats> {
        match call.method.as_str() {
            GET_STORAGE_INFO => {
                let path = self.requested_path(call.arguments.as_ref())?;
                self.provider.stats(path)
            }
            other => Err(Error::UnsupportedOperation(other.to_string())),
        }
    }

    /// Dispatch a call and map the outcome to a [`Response`].
    pub fn handle(&self, call: &MethodCall) -> Response {
        self.invoke(call).into()
    }

    /// Decode a JSON call, dispatch it, and encode the response.
    ///
    /// Only a malformed envelope is an error here; query failures are
    /// reported inside the encoded response.
    pub fn handle_json(&self, request: &str) -> serde_json::Result<String> {
        let call: MethodCall = serde_json::from_str(request)?;
        serde_json::to_string(&self.handle(&call))
    }

    fn requested_path(&self, arguments: Option<&Value>) -> Result<PathBuf> {
        let path = match arguments {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => map.get("path").filter(|v| !v.is_null()),
            Some(other) => {
                return Err(Error::query(
                    &self.default_root,
                    format!("arguments must be an object, got {other}"),
                ));
            }
        };

        match path {
            None => Ok(self.default_root.clone()),
            Some(Value::String(s)) => Ok(match self.expand {
                Some(expand) => expand(s.as_str()),
                None => PathBuf::from(s),
            }),
            Some(other) => Err(Error::query(
                &self.default_root,
                format!("path argument must be a string, got {other}"),
            )),
        }
    }
}
