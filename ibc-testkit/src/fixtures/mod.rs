pub mod applications;
pub mod core;

use std::fmt::Debug;

use ibc_app_precision::types::error::PrecisionError;

use crate::testapp::ibc::applications::precision::types::MockPrecisionContext;

/// Expected outcome of a middleware step under test. `Failure(None)` accepts
/// any error.
pub enum Expect {
    Success,
    Failure(Option<PrecisionError>),
}

/// A mock host together with the input handed to a middleware step, e.g. a
/// `Packet` or a `MsgUpdateSettings`.
#[derive(Debug)]
pub struct Fixture<M: Debug> {
    pub ctx: MockPrecisionContext,
    pub msg: M,
}

impl<M: Debug> Fixture<M> {
    /// Builds the assertion message for a step that did not end as
    /// `expect`ed. It names the step and shows the result, the input, the
    /// recorded total and the stored settings. Balances are left out.
    pub fn generate_error_msg(
        &self,
        expect: &Expect,
        process: &str,
        res: &Result<(), PrecisionError>,
    ) -> String {
        let base_error = match expect {
            Expect::Success => "step failed!",
            Expect::Failure(None) => "step passed but was supposed to fail!",
            Expect::Failure(Some(err)) => {
                return format!(
                    "{process} was supposed to fail with `{err}` but returned {res:?}\n input: {:?}\n total transferred out: {}\n settings: {:?}",
                    self.msg, self.ctx.total_transferred_out, self.ctx.settings
                )
            }
        };
        format!(
            "{process} {base_error}\n result: {res:?}\n input: {:?}\n total transferred out: {}\n settings: {:?}",
            self.msg, self.ctx.total_transferred_out, self.ctx.settings
        )
    }
}
