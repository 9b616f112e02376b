use clap::ValueEnum;
use measure_core::Schedule;

/// Build scheduling policy
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum ScheduleArg {
    /// Fixed batches of --concurrency builds
    ///
    /// A batch must finish completely before the next one starts, so one
    /// slow build delays the following batch.
    #[value(name = "batched")]
    Batched,

    /// Continuously refilled pool
    ///
    /// Keeps --concurrency builds running, starting the next as soon as
    /// any build finishes.
    #[value(name = "streaming")]
    Streaming,
}

impl From<ScheduleArg> for Schedule {
    fn from(arg: ScheduleArg) -> Self {
        match arg {
            ScheduleArg::Batched => Schedule::Batched,
            ScheduleArg::Streaming => Schedule::Streaming,
        }
    }
}
