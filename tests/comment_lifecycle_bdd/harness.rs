//! Mock GitHub endpoint and the runtime that drives it across BDD steps.

use std::io;
use std::rc::Rc;

use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// A wiremock GraphQL endpoint paired with the runtime it was started on.
///
/// Steps run synchronously, so every async call made against the server goes
/// through [`GitHubHarness::block_on`] on the same runtime.
#[derive(Clone)]
pub struct GitHubHarness {
    runtime: Rc<Runtime>,
    server: Rc<MockServer>,
}

impl GitHubHarness {
    fn start() -> Result<Self, io::Error> {
        let runtime = Runtime::new()?;
        let server = runtime.block_on(MockServer::start());
        Ok(Self {
            runtime: Rc::new(runtime),
            server: Rc::new(server),
        })
    }

    /// The mock GitHub server.
    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Runs `future` to completion on the harness runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// Returns the scenario's harness, starting one on first use.
///
/// # Errors
///
/// Returns an error if the Tokio runtime cannot be built.
pub fn harness(slot: &Slot<GitHubHarness>) -> Result<GitHubHarness, io::Error> {
    if let Some(existing) = slot.get() {
        return Ok(existing);
    }
    let started = GitHubHarness::start()?;
    slot.set(started.clone());
    Ok(started)
}
