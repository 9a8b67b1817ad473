//! The message loop folio's list views run on.
//!
//! State lives in a [`Model`]. It only changes inside `update`, which returns
//! a [`Command`] describing any async work. Long-lived sources such as
//! debounce timers are declared as [`Subscription`]s.
//!
//! | Item | Role |
//! |------|------|
//! | [`Model`] | Root state with init, update and subscriptions |
//! | [`Component`] | State nested inside a model |
//! | [`Command`] | Work for the runtime: fetches, follow-up messages, quit |
//! | [`Subscription`] | Timers and stdin lines, kept running while declared |
//! | [`Program`] | The tokio event loop driving one model |
//! | [`testing::TestProgram`] | Manual stepping for tests |
//!
//! `update` runs one message at a time on the task awaiting
//! [`Program::run`]. Fetches and timers run on other tasks and come back as
//! messages, so a model never needs a lock.

pub mod command;
pub mod component;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod subscriptions;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use model::Model;
pub use runtime::{Program, ProgramError, ProgramHandle, ProgramOptions};
pub use subscription::{subscribe, Subscription, SubscriptionId, SubscriptionSource};
pub use subscriptions::{input_lines, After, InputLines};

/// [`Program::new`] then [`Program::run`].
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags).run().await
}

pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options).run().await
}
