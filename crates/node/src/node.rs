// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Node`: the operator-facing facade (spec §6.3) wiring together node
//! storage, the workflow runtime, membership, the hash ring, gossip, and an
//! abstract `ClusterTransport` into one addressable cluster member.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use wren_core::{Clock, NodeId, WorkflowId};
use wren_gossip::{GossipConfig, Swim};
use wren_kv::KvStore;
use wren_membership::{Membership, NodeInfo};
use wren_ring::RingHandle;
use wren_runtime::{Context, RuntimeError, WorkflowRuntime};
use wren_storage::{JournalStore, StateStore, TimerStore, WorkflowStatus, WorkflowStore};
use wren_transport::{ClusterTransport, Request, Response, TransportError};

use crate::config::NodeConfig;
use crate::error::NodeError;
use crate::stats::{RuntimeStats, StatCounters};
use crate::timer_worker::TimerWorker;

/// The result of a `get_status` call, local or proxied to the owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowStatusView {
    pub found: bool,
    pub status: Option<String>,
}

enum Route {
    Local,
    Remote(String),
}

pub struct Node<T: ClusterTransport, C: Clock> {
    config: NodeConfig,
    local_id: NodeId,
    runtime: Arc<WorkflowRuntime<C>>,
    membership: Arc<Membership>,
    ring: Arc<RingHandle>,
    swim: Arc<Swim<T, C>>,
    transport: Arc<T>,
    journal: JournalStore,
    workflows: WorkflowStore,
    timers: TimerStore,
    timer_worker: Arc<TimerWorker<C>>,
    counters: Arc<StatCounters>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl<T: ClusterTransport + 'static, C: Clock + 'static> Node<T, C> {
    pub fn new(config: NodeConfig, kv: Arc<dyn KvStore>, transport: Arc<T>, clock: C) -> Self {
        let local_id = match &config.node_id {
            Some(id) => NodeId::from(id.as_str()),
            None => NodeId::new(),
        };
        let local_info = NodeInfo::new(local_id, config.bind_addr.clone());
        let membership = Arc::new(Membership::new(local_info));
        let ring = Arc::new(RingHandle::new(config.virtual_nodes_per_node));
        ring.resync(&membership);

        let gossip_config = GossipConfig {
            gossip_period_ms: config.gossip_period_ms,
            probe_timeout_ms: config.probe_timeout_ms,
            suspect_timeout_ms: config.suspect_timeout_ms,
            ..GossipConfig::default()
        };
        let swim = Arc::new(Swim::new(
            membership.clone(),
            ring.clone(),
            transport.clone(),
            clock.clone(),
            gossip_config,
        ));

        let journal = JournalStore::new(kv.clone());
        let state = StateStore::new(kv.clone());
        let workflows = WorkflowStore::new(kv.clone());
        let timers = TimerStore::new(kv.clone());
        let runtime = Arc::new(WorkflowRuntime::new(
            journal.clone(),
            state,
            workflows.clone(),
            timers.clone(),
            clock.clone(),
        ));

        let counters = Arc::new(StatCounters::new());
        let timer_worker = Arc::new(TimerWorker::new(
            timers.clone(),
            journal.clone(),
            runtime.clone(),
            clock,
            config.timer_poll_interval_ms,
            config.timer_batch_limit,
            counters.clone(),
        ));

        Self {
            config,
            local_id,
            runtime,
            membership,
            ring,
            swim,
            transport,
            journal,
            workflows,
            timers,
            timer_worker,
            counters,
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn local_id(&self) -> NodeId {
        self.local_id
    }

    pub fn register_function<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&[u8]) -> Result<Vec<u8>, String> + Send + Sync + 'static,
    {
        self.runtime.register_function(name, handler);
    }

    pub fn register_workflow<F>(&self, name: impl Into<String>, body: F)
    where
        F: for<'a> Fn(&mut Context<'a>, &[u8]) -> Result<Vec<u8>, RuntimeError> + Send + Sync + 'static,
    {
        self.runtime.register_workflow(name, body);
    }

    /// Installs this node's request handler, joins via the configured seeds,
    /// and spawns the gossip and timer-firing background loops.
    pub async fn start(self: &Arc<Self>) -> Result<(), NodeError> {
        let node = self.clone();
        self.transport
            .serve(Arc::new(move |req| {
                let node = node.clone();
                Box::pin(async move { node.handle_request(req).await })
            }))
            .await?;

        if !self.config.seeds.is_empty() {
            if let Err(err) = self.swim.join(&self.config.seeds).await {
                tracing::warn!(error = %err, "failed to join via configured seeds, listening standalone");
            }
        }

        let gossip_period = Duration::from_millis(self.config.gossip_period_ms);
        let swim = self.swim.clone();
        let counters = self.counters.clone();
        let gossip_task = tokio::spawn(async move {
            loop {
                tokio::time::sleep(gossip_period).await;
                swim.tick().await;
                counters.record_gossip_round();
            }
        });

        let timer_worker = self.timer_worker.clone();
        let timer_task = tokio::spawn(timer_worker.run());

        self.tasks.lock().extend([gossip_task, timer_task]);
        tracing::info!(node_id = %self.local_id, bind_addr = %self.config.bind_addr, "node started");
        Ok(())
    }

    /// Aborts the background gossip and timer tasks. Idempotent.
    pub fn stop(&self) {
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
        tracing::info!(node_id = %self.local_id, "node stopped");
    }

    /// Submits a new workflow, running it locally if this node owns its id
    /// on the hash ring, or forwarding `SubmitWorkflow` to the owner.
    pub async fn submit(
        &self,
        workflow_type: &str,
        input: Vec<u8>,
        workflow_id: WorkflowId,
    ) -> Result<Vec<u8>, NodeError> {
        match self.route(workflow_id.as_str()) {
            Route::Local => Ok(self.runtime.submit(workflow_type, input, workflow_id)?),
            Route::Remote(address) => {
                let input_json = String::from_utf8(input).map_err(|_| {
                    NodeError::RemoteRejected(address.clone(), "input is not valid UTF-8".into())
                })?;
                let req = Request::SubmitWorkflow {
                    workflow_id,
                    workflow_name: workflow_type.to_string(),
                    input_json,
                };
                match self.call_remote(&address, req).await? {
                    Response::SubmitWorkflow { success: true, .. } => Ok(Vec::new()),
                    Response::SubmitWorkflow { success: false, error_message } => Err(
                        NodeError::RemoteRejected(address, error_message.unwrap_or_default()),
                    ),
                    _ => Err(NodeError::RemoteRejected(address, "unexpected response".into())),
                }
            }
        }
    }

    pub async fn get_status(&self, workflow_id: WorkflowId) -> Result<WorkflowStatusView, NodeError> {
        match self.route(workflow_id.as_str()) {
            Route::Local => match self.runtime.get_meta(&workflow_id)? {
                Some(meta) => Ok(WorkflowStatusView {
                    found: true,
                    status: Some(meta.status.as_str().to_string()),
                }),
                None => Ok(WorkflowStatusView { found: false, status: None }),
            },
            Route::Remote(address) => {
                let req = Request::GetStatus { workflow_id };
                match self.call_remote(&address, req).await? {
                    Response::GetStatus { found, status } => Ok(WorkflowStatusView { found, status }),
                    _ => Err(NodeError::RemoteRejected(address, "unexpected response".into())),
                }
            }
        }
    }

    pub async fn cancel(&self, workflow_id: WorkflowId) -> Result<bool, NodeError> {
        match self.route(workflow_id.as_str()) {
            Route::Local => Ok(self.runtime.cancel(workflow_id)?),
            Route::Remote(address) => {
                let req = Request::CancelWorkflow { workflow_id };
                match self.call_remote(&address, req).await? {
                    Response::CancelWorkflow { success } => Ok(success),
                    _ => Err(NodeError::RemoteRejected(address, "unexpected response".into())),
                }
            }
        }
    }

    pub fn cluster_members(&self) -> Vec<NodeInfo> {
        self.membership.all()
    }

    pub fn stats(&self) -> RuntimeStats {
        let count = |status: WorkflowStatus| {
            self.workflows.find_by_status(status.as_str(), 0).map(|v| v.len()).unwrap_or(0) as u64
        };
        let timers_pending = self.timers.find_ready(u64::MAX, 0).map(|v| v.len()).unwrap_or(0) as u64;
        RuntimeStats {
            workflows_running: count(WorkflowStatus::Running),
            workflows_completed: count(WorkflowStatus::Completed),
            workflows_failed: count(WorkflowStatus::Failed),
            workflows_cancelled: count(WorkflowStatus::Cancelled),
            journal_entries_appended: self.journal.appended_count(),
            timers_pending,
            gossip_rounds: self.counters.gossip_rounds(),
            known_nodes: self.membership.all().len() as u64,
        }
    }

    async fn handle_request(&self, request: Request) -> Response {
        if let Some(response) = self.swim.handle_request(request.clone()).await {
            return response;
        }
        match request {
            Request::SubmitWorkflow { workflow_id, workflow_name, input_json } => {
                match self.runtime.submit(&workflow_name, input_json.into_bytes(), workflow_id) {
                    Ok(_) => Response::SubmitWorkflow { success: true, error_message: None },
                    Err(err) => {
                        Response::SubmitWorkflow { success: false, error_message: Some(err.to_string()) }
                    }
                }
            }
            Request::GetStatus { workflow_id } => match self.runtime.get_meta(&workflow_id) {
                Ok(Some(meta)) => {
                    Response::GetStatus { found: true, status: Some(meta.status.as_str().to_string()) }
                }
                _ => Response::GetStatus { found: false, status: None },
            },
            Request::CancelWorkflow { workflow_id } => {
                let success = self.runtime.cancel(workflow_id).unwrap_or(false);
                Response::CancelWorkflow { success }
            }
            Request::CallFunction { function_name, request_json } => {
                match self.runtime.call_function(&function_name, request_json.as_bytes()) {
                    Ok(out) => Response::CallFunction {
                        response_json: Some(String::from_utf8_lossy(&out).into_owned()),
                        error: None,
                    },
                    Err(err) => Response::CallFunction { response_json: None, error: Some(err.to_string()) },
                }
            }
            // Ping/PingReq/Join are gossip's own concern, already handled above.
            _ => Response::GetStatus { found: false, status: None },
        }
    }

    async fn call_remote(&self, address: &str, request: Request) -> Result<Response, NodeError> {
        let timeout = Duration::from_millis(self.config.rpc_timeout_ms);
        match tokio::time::timeout(timeout, self.transport.send(address, request)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => Err(NodeError::Transport(err)),
            Err(_) => Err(NodeError::Transport(TransportError::Timeout(address.to_string()))),
        }
    }

    fn route(&self, key: &str) -> Route {
        match self.ring.get_node(key) {
            Some(owner) if owner != self.local_id => match self.membership.get(&owner) {
                Some(info) => Route::Remote(info.address),
                None => Route::Local,
            },
            _ => Route::Local,
        }
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
