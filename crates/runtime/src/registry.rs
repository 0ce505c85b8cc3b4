// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `register(name, handler)` / `register_workflow(name, body)` (spec §4.4).
//!
//! Both registries collapse to the same shape the design notes call for:
//! a single homogeneous value (`name`, `bytes -> bytes`) in a concurrent map,
//! rather than dynamic type erasure over arbitrary `Req`/`Res` types.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::context::Context;
use crate::error::RuntimeError;

pub type FunctionHandler = Arc<dyn Fn(&[u8]) -> Result<Vec<u8>, String> + Send + Sync>;
pub type WorkflowBody = Arc<dyn for<'a> Fn(&mut Context<'a>, &[u8]) -> Result<Vec<u8>, RuntimeError> + Send + Sync>;

/// `call(name, req)` handlers, keyed by name.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    handlers: Arc<RwLock<HashMap<String, FunctionHandler>>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&[u8]) -> Result<Vec<u8>, String> + Send + Sync + 'static,
    {
        self.handlers.write().insert(name.into(), Arc::new(handler));
    }

    pub fn get(&self, name: &str) -> Option<FunctionHandler> {
        self.handlers.read().get(name).cloned()
    }
}

/// Workflow bodies, keyed by `workflow_type`.
#[derive(Clone, Default)]
pub struct WorkflowRegistry {
    bodies: Arc<RwLock<HashMap<String, WorkflowBody>>>,
}

impl WorkflowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&self, name: impl Into<String>, body: F)
    where
        F: for<'a> Fn(&mut Context<'a>, &[u8]) -> Result<Vec<u8>, RuntimeError> + Send + Sync + 'static,
    {
        self.bodies.write().insert(name.into(), Arc::new(body));
    }

    pub fn get(&self, name: &str) -> Option<WorkflowBody> {
        self.bodies.read().get(name).cloned()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
