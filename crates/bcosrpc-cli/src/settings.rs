// Copyright 2025 bcosrpc Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::Duration;

use anyhow::{Context, Result};
use bcosrpc_client::ClientConfig;

/// Layers command-line flags over `base`.
///
/// Priority: CLI flag > env var > default. `base` is normally
/// [`ClientConfig::from_env`], which already folds the environment over the
/// defaults.
///
/// # Errors
///
/// Returns an error if the resulting endpoint is not an `http://` URL or a
/// timeout is zero.
pub fn resolve_config(
    endpoint: Option<String>,
    timeout_ms: Option<u64>,
    call_timeout_ms: Option<u64>,
    base: ClientConfig,
) -> Result<ClientConfig> {
    let mut config = base;

    if let Some(endpoint) = endpoint {
        config = config.with_endpoint(endpoint);
    }
    if let Some(ms) = timeout_ms {
        config = config.with_request_timeout(Duration::from_millis(ms));
    }
    if let Some(ms) = call_timeout_ms {
        config = config.with_call_timeout(Duration::from_millis(ms));
    }

    config
        .validate()
        .with_context(|| format!("Invalid configuration for endpoint '{}'", config.endpoint))?;

    Ok(config)
}
