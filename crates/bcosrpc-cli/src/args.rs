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

//! Conversion of `call` arguments from JSON text to [`RpcArg`]s.

use anyhow::{anyhow, bail, Result};
use bcosrpc_common::RpcArg;
use serde_json::Value;

/// Parses a JSON array of positional arguments.
///
/// Accepted elements are strings, integers, arrays of strings and objects
/// whose values are themselves accepted elements. Object keys keep the order
/// they were written in.
///
/// # Errors
///
/// Returns an error if `raw` is not valid JSON, not an array, or contains a
/// value with no argument form (booleans, nulls, floats, mixed arrays).
pub fn parse_call_args(raw: &str) -> Result<Vec<RpcArg>> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| anyhow!("Invalid JSON in args: {}", e))?;

    let Value::Array(items) = value else {
        bail!("Invalid args: expected a JSON array of positional arguments");
    };

    items.into_iter().map(to_arg).collect()
}

fn to_arg(value: Value) -> Result<RpcArg> {
    match value {
        Value::String(s) => Ok(RpcArg::Str(s)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(RpcArg::Int(i))
            } else if let Some(u) = n.as_u64() {
                Ok(RpcArg::Uint(u))
            } else {
                bail!("Invalid args: {} is not an integer", n)
            }
        }
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(anyhow!("Invalid args: list element {} is not a string", other)),
            })
            .collect::<Result<Vec<_>>>()
            .map(RpcArg::StrList),
        Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| Ok((key, to_arg(value)?)))
            .collect::<Result<Vec<_>>>()
            .map(RpcArg::Map),
        other => bail!("Invalid args: unsupported value {}", other),
    }
}
