//! Scripted gateway for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use vmrc_core::{RemoteFault, Value};

use crate::RpcGateway;

/// Replays a queue of canned replies and records every call it sees.
///
/// Replies are consumed in call order; running past the script yields a
/// distinctive fault so a test failure points at the missing entry.
pub(crate) struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<Value, RemoteFault>>>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl ScriptedGateway {
    pub(crate) fn new(replies: Vec<Result<Value, RemoteFault>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every `(method, args)` pair seen so far, in order.
    pub(crate) fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().expect("call log lock poisoned").clone()
    }

    /// Method names seen so far, in order.
    pub(crate) fn methods_called(&self) -> Vec<String> {
        self.calls().into_iter().map(|(method, _)| method).collect()
    }

    /// Number of calls to the given method.
    pub(crate) fn count(&self, method: &str) -> usize {
        self.calls().iter().filter(|(m, _)| m == method).count()
    }
}

#[async_trait]
impl RpcGateway for ScriptedGateway {
    async fn call(&self, method: &str, args: &[Value]) -> Result<Value, RemoteFault> {
        self.calls
            .lock()
            .expect("call log lock poisoned")
            .push((method.to_owned(), args.to_vec()));
        self.replies
            .lock()
            .expect("reply queue lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(RemoteFault::new(-99, format!("no scripted reply for {method}")))
            })
    }
}
