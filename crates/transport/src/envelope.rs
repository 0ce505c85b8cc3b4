// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The cluster RPC envelope: one `Request`/`Response` pair per gossip or
//! remote-executor operation, tagged with an explicit `type` discriminant.

use serde::{Deserialize, Serialize};
use wren_core::{NodeId, WorkflowId};
use wren_membership::NodeInfo;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Request {
    Ping {
        from_node: NodeId,
        incarnation: u64,
        piggyback: Vec<NodeInfo>,
    },
    PingReq {
        from_node: NodeId,
        target_node: NodeId,
    },
    Join {
        node_info: NodeInfo,
    },
    SubmitWorkflow {
        workflow_id: WorkflowId,
        workflow_name: String,
        input_json: String,
    },
    GetStatus {
        workflow_id: WorkflowId,
    },
    CancelWorkflow {
        workflow_id: WorkflowId,
    },
    CallFunction {
        function_name: String,
        request_json: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Response {
    Ping {
        piggyback: Vec<NodeInfo>,
    },
    PingReq {
        ack: bool,
        piggyback: Vec<NodeInfo>,
    },
    Join {
        members: Vec<NodeInfo>,
    },
    SubmitWorkflow {
        success: bool,
        error_message: Option<String>,
    },
    GetStatus {
        found: bool,
        status: Option<String>,
    },
    CancelWorkflow {
        success: bool,
    },
    CallFunction {
        response_json: Option<String>,
        error: Option<String>,
    },
}
