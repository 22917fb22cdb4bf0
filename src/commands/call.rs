//! `storinfo call` - dispatch one method call through the storage channel

use anyhow::Result;
use std::path::PathBuf;

use statkit::Provider;
use statkit::channel::{Channel, MethodCall, Response};

use crate::Context;
use crate::cli::CallArgs;
use crate::config::{StorinfoConfig, resolve_root};
use crate::paths;

/// Exit code for a `STORAGE_ERROR` response
pub const EXIT_STORAGE_ERROR: i32 = 1;

/// Exit code for a not-implemented response
pub const EXIT_NOT_IMPLEMENTED: i32 = 2;

/// Build the channel used by `call` and `serve`.
pub fn channel() -> Result<Channel> {
    let config = StorinfoConfig::load()?;
    let root = resolve_root(None, paths::root_from_env(), &config);
    log::debug!("Channel default root: {}", root.display());
    Ok(channel_for(Provider::new(), root))
}

/// Channel whose `path` arguments expand like every other storinfo path.
pub fn channel_for(provider: Provider, root: PathBuf) -> Channel {
    Channel::new(provider, root).with_path_expander(paths::expand)
}

/// Dispatch the call, print the JSON response, and return the exit code.
pub fn run(_ctx: &Context, args: CallArgs) -> Result<i32> {
    let channel = channel()?;

    let mut call = MethodCall::new(args.method);
    if let Some(path) = args.path {
        call = call.with_path(path);
    }

    let response = channel.handle(&call);
    println!("{}", serde_json::to_string(&response)?);

    Ok(exit_code(&response))
}

/// Map a response to a process exit code
pub fn exit_code(response: &Response) -> i32 {
    match response {
        Response::Success { .. } => 0,
        Response::Error { .. } => EXIT_STORAGE_ERROR,
        Response::NotImplemented { .. } => EXIT_NOT_IMPLEMENTED,
    }
}
