//! Test-only oracle fakes and fixtures.

use std::cell::RefCell;
use std::collections::VecDeque;

use anyhow::{Result, anyhow};

use crate::io::oracle::{Oracle, OracleRequest};

/// Oracle that replays a fixed sequence of responses and records every
/// request it receives.
pub struct ScriptedOracle {
    responses: RefCell<VecDeque<String>>,
    requests: RefCell<Vec<OracleRequest>>,
}

impl ScriptedOracle {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: RefCell::new(responses.into_iter().map(Into::into).collect()),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Number of completions issued so far.
    pub fn call_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Requests received, in order.
    pub fn requests(&self) -> Vec<OracleRequest> {
        self.requests.borrow().clone()
    }
}

impl Oracle for ScriptedOracle {
    fn complete(&self, request: &OracleRequest) -> Result<String> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("scripted oracle exhausted"))
    }
}

/// Oracle whose every call fails, for exercising fatal paths.
pub struct FailingOracle;

impl Oracle for FailingOracle {
    fn complete(&self, _request: &OracleRequest) -> Result<String> {
        Err(anyhow!("oracle backend unavailable"))
    }
}
