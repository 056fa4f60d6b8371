use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Stats manager is not running")]
    ChannelClosed,

    #[error("Stats manager dropped the reply for {0}")]
    NoReply(&'static str),
}
