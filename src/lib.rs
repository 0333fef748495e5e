//! Policy-gated natural-language agent for cluster inspection.
//!
//! One operator request flows through a fixed five-stage pipeline: a
//! generator turns the request into a candidate `kubectl` command, a critic
//! vets it against a plain-text safety policy, a router decides once whether
//! it may run, an executor invokes it as an argument vector (never a shell),
//! and a summarizer renders the result for the operator. The architecture
//! enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (state types, verdict parsing,
//!   routing, word splitting). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config, policy file, process
//!   execution, the oracle backend). Isolated to enable mocking in tests.
//! - **[`stages`]**: The stage contracts, generic over the oracle seam.
//!
//! [`pipeline`] coordinates core logic with I/O for one request; [`session`]
//! wraps it in the interactive loop.

pub mod core;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod session;
pub mod stages;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
