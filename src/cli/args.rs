use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "facilitator")]
#[command(about = "Live meeting transcript analysis", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Run the HTTP service (default when no command is given)
    Serve(ServeCliArgs),
    /// Print version information
    Version,
    /// Drive the meeting hosted by a running service
    Meeting(MeetingCliArgs),
    /// Run a transcript file through the analyzers offline
    Replay(ReplayCliArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ServeCliArgs {
    /// Override the configured port
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(ClapArgs, Debug)]
pub struct MeetingCliArgs {
    /// Base URL of the running service
    #[arg(long, global = true, default_value = "http://127.0.0.1:3978")]
    pub url: String,

    #[command(subcommand)]
    pub command: MeetingCommand,
}

#[derive(Subcommand, Debug)]
pub enum MeetingCommand {
    /// Start a meeting
    Start {
        /// Meeting title
        title: String,
        /// Attendee name (repeatable)
        #[arg(short, long = "attendee")]
        attendees: Vec<String>,
        /// Agenda item title (repeatable, in order)
        #[arg(long = "agenda")]
        agenda: Vec<String>,
        /// Planned length in minutes
        #[arg(short, long)]
        duration: Option<u32>,
    },
    /// Show the current meeting state
    State,
    /// Add a transcript entry and print the suggestions it produced
    Say {
        /// Who is speaking
        speaker: String,
        /// What was said
        text: String,
    },
    /// Acknowledge a suggestion
    Ack {
        /// Suggestion id
        id: String,
    },
    /// End the meeting
    End,
    /// Print the meeting summary
    Summary {
        /// Print the plain-text export instead of JSON
        #[arg(long)]
        text: bool,
    },
}

#[derive(ClapArgs, Debug)]
pub struct ReplayCliArgs {
    /// JSON array of transcript entries (`speaker`, `text`, optional `timestamp`)
    pub transcript: PathBuf,
    /// JSON meeting setup (`title`, `attendees`, `agenda`, `durationMinutes`)
    #[arg(short, long)]
    pub meeting: Option<PathBuf>,
    /// Skip AI insights and summaries even when configured
    #[arg(long)]
    pub no_insight: bool,
}
