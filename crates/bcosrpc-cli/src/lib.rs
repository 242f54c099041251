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

//! # bcosrpc CLI
//!
//! Command-line interface for managing groups and peers on a FISCO BCOS node.
//!
//! The binary parses arguments with `argh`, builds a
//! [`GroupClient`](bcosrpc_client::GroupClient) from flags and environment,
//! and prints the outcome of one operation:
//!
//! - `bcosrpc start-group 1`: start a group
//! - `bcosrpc query-group-status 1`: print the raw status label
//! - `bcosrpc add-peers 127.0.0.1:30300`: add p2p connection entries
//! - `bcosrpc call getGroupList -a '[]'`: invoke any procedure that answers
//!   with a group envelope
//!
//! This library holds the pieces the binary needs that are worth testing on
//! their own.

pub mod args;
pub mod settings;
