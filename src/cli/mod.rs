pub mod args;
pub mod meeting;
pub mod replay;

pub use args::{Cli, CliCommand, MeetingCliArgs, MeetingCommand, ReplayCliArgs, ServeCliArgs};
pub use meeting::handle_meeting_command;
pub use replay::handle_replay_command;
