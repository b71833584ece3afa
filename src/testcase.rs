// autopts-pbp Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Test case descriptors and the deferred steps they run before PTS takes over.

use async_trait::async_trait;
use futures::future::BoxFuture;
use log::{debug, info};
use static_assertions::assert_impl_all;
use std::fmt::{self, Debug, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::btp::Btp;
use crate::common::flag::ResultWithFlag;
use crate::pts::{self, PtsClient};
use crate::stack::Stack;
use crate::Result;

/// Future returned by a [`TestFunc`] while it runs against a [`Session`].
pub type StepFuture<'a> = BoxFuture<'a, Result<()>>;

type StepFn = dyn for<'a> Fn(&'a Session) -> StepFuture<'a> + Send + Sync;

/// One deferred precondition step.
///
/// Nothing happens when the step is built; the closure only runs when the test runner calls it,
/// so values such as the IUT address are read at that moment.
pub struct TestFunc {
    name: &'static str,
    func: Box<StepFn>,
}

impl TestFunc {
    pub fn new<F>(name: &'static str, func: F) -> Self
    where
        F: for<'a> Fn(&'a Session) -> StepFuture<'a> + Send + Sync + 'static,
    {
        TestFunc {
            name,
            func: Box::new(func),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn call(&self, session: &Session) -> Result<()> {
        (self.func)(session).await
    }
}

impl Debug for TestFunc {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_tuple("TestFunc").field(&self.name).finish()
    }
}

/// Everything a running test case works with: the IUT transport, the PTS instances and the
/// host-side stack state.
pub struct Session {
    btp: Arc<dyn Btp>,
    ptses: Vec<Arc<dyn PtsClient>>,
    stack: Mutex<Stack>,
    iut_addr: Arc<ResultWithFlag<String>>,
}

impl Session {
    pub fn new(btp: Arc<dyn Btp>, ptses: Vec<Arc<dyn PtsClient>>) -> Self {
        Session {
            btp,
            ptses,
            stack: Mutex::new(Stack::new()),
            iut_addr: Arc::new(ResultWithFlag::new()),
        }
    }

    pub fn btp(&self) -> &dyn Btp {
        self.btp.as_ref()
    }

    /// The PTS instance the profile is configured on.
    pub fn pts(&self) -> Result<&dyn PtsClient> {
        pts::first(&self.ptses).map(|pts| pts.as_ref())
    }

    /// Locks the stack state. The guard must not be held across an `.await`.
    pub fn stack(&self) -> MutexGuard<'_, Stack> {
        self.stack.lock().unwrap()
    }

    /// IUT address published once the IUT advertises. Lower testers wait on this.
    pub fn iut_addr(&self) -> &Arc<ResultWithFlag<String>> {
        &self.iut_addr
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Session")
            .field("ptses", &self.ptses.len())
            .field("stack", &self.stack)
            .field("iut_addr", &self.iut_addr)
            .finish()
    }
}

/// Answers the WID (wait-for-user-input) prompts PTS raises while a test case runs.
#[async_trait]
pub trait WidHandler: Send + Sync {
    /// Returns whether the prompt was handled; `Ok(false)` leaves the answer to PTS' default.
    async fn handle_wid(
        &self,
        session: &Session,
        wid: u32,
        description: &str,
        test_case_name: &str,
    ) -> Result<bool>;
}

/// A test case as handed to the test runner.
///
/// All test cases of a profile share one precondition list; it is reference counted, never
/// copied.
#[derive(Clone)]
pub struct TestCase {
    project_name: String,
    name: String,
    cmds: Arc<Vec<TestFunc>>,
    generic_wid_hdl: Arc<dyn WidHandler>,
}

impl TestCase {
    pub fn new(
        project_name: &str,
        name: &str,
        cmds: Arc<Vec<TestFunc>>,
        generic_wid_hdl: Arc<dyn WidHandler>,
    ) -> Self {
        TestCase {
            project_name: project_name.to_owned(),
            name: name.to_owned(),
            cmds,
            generic_wid_hdl,
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cmds(&self) -> &Arc<Vec<TestFunc>> {
        &self.cmds
    }

    pub fn generic_wid_hdl(&self) -> &Arc<dyn WidHandler> {
        &self.generic_wid_hdl
    }

    /// Runs the precondition steps in order, stopping at the first failure.
    pub async fn run_preconditions(&self, session: &Session) -> Result<()> {
        info!("{}: running {} preconditions", self.name, self.cmds.len());
        for (i, cmd) in self.cmds.iter().enumerate() {
            debug!("{}: step {} {}", self.name, i, cmd.name());
            cmd.call(session).await?;
        }
        Ok(())
    }

    pub async fn handle_wid(&self, session: &Session, wid: u32, description: &str) -> Result<bool> {
        self.generic_wid_hdl
            .handle_wid(session, wid, description, &self.name)
            .await
    }
}

impl Debug for TestCase {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("project_name", &self.project_name)
            .field("name", &self.name)
            .field("cmds", &self.cmds.len())
            .finish()
    }
}

assert_impl_all!(TestFunc: Debug, Send, Sync);
assert_impl_all!(Session: Debug, Send, Sync);
assert_impl_all!(TestCase: Clone, Debug, Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::testing::{MockBtp, MockPts};
    use crate::Error;
    use futures::FutureExt;

    struct Ignore;

    #[async_trait]
    impl WidHandler for Ignore {
        async fn handle_wid(
            &self,
            _session: &Session,
            _wid: u32,
            _description: &str,
            _test_case_name: &str,
        ) -> Result<bool> {
            Ok(false)
        }
    }

    fn session() -> Session {
        let ptses: Vec<Arc<dyn PtsClient>> = vec![Arc::new(MockPts::with_test_cases(vec![]))];
        Session::new(Arc::new(MockBtp::new()), ptses)
    }

    #[tokio::test]
    async fn steps_run_lazily_and_in_order() {
        let cmds = Arc::new(vec![
            TestFunc::new("init", |s| {
                s.stack().gap_init("iut");
                async { Ok(()) }.boxed()
            }),
            TestFunc::new("gatt", |s| {
                let res = s.stack().gatt_init();
                async move { res }.boxed()
            }),
        ]);
        let session = session();
        let tc = TestCase::new("PBP", "PBP/SRC/CONN/BV-01-C", cmds, Arc::new(Ignore));

        // Building the test case touched nothing.
        assert!(session.stack().gap().is_err());

        tc.run_preconditions(&session).await.unwrap();
        assert!(session.stack().gap().is_ok());
    }

    #[tokio::test]
    async fn first_failure_stops_the_sequence() {
        let cmds = Arc::new(vec![
            TestFunc::new("gatt", |s| {
                let res = s.stack().gatt_init();
                async move { res }.boxed()
            }),
            TestFunc::new("gap", |s| {
                s.stack().gap_init("iut");
                async { Ok(()) }.boxed()
            }),
        ]);
        let session = session();
        let tc = TestCase::new("PBP", "PBP/SRC/CONN/BV-01-C", cmds, Arc::new(Ignore));

        let err = tc.run_preconditions(&session).await.unwrap_err();
        assert!(matches!(err, Error::NotInitialized("gap")));
        assert!(session.stack().gap().is_err());
    }

    #[tokio::test]
    async fn wid_goes_to_generic_handler() {
        let tc = TestCase::new("PBP", "PBP/SRC/CONN/BV-01-C", Arc::new(vec![]), Arc::new(Ignore));
        assert!(!tc.handle_wid(&session(), 20100, "connect").await.unwrap());
        assert_eq!(format!("{:?}", tc.cmds()), "[]");
    }
}
