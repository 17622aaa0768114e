use std::io::{self, Write};

use anyhow::Result;
use tokio::runtime::Runtime;

use crate::usecases::{
    contracts::AssistantTransport,
    outcome::{FlowOutcome, RejectReason},
    session::SessionController,
};

use super::transcript;

const PROMPT: &str = "> ";

const HELP_LINES: [&str; 5] = [
    "Type a message and press Enter to ask the assistant.",
    "/analyze    analyze your transactions",
    "/breakdown  show spending by category",
    "/history    print the whole conversation",
    "/quit       leave the session",
];

pub trait ShellTerminal {
    fn print_line(&mut self, line: &str) -> io::Result<()>;
    /// Returns `None` at end of input.
    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

pub struct StdTerminal;

impl ShellTerminal for StdTerminal {
    fn print_line(&mut self, line: &str) -> io::Result<()> {
        println!("{line}");
        Ok(())
    }

    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        let bytes = io::stdin().read_line(&mut line)?;
        if bytes == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Analyze,
    Breakdown,
    History,
    Help,
    Quit,
    Chat(String),
    Empty,
}

pub fn parse_command(line: &str) -> ShellCommand {
    let trimmed = line.trim();

    match trimmed {
        "" => ShellCommand::Empty,
        "/analyze" => ShellCommand::Analyze,
        "/breakdown" => ShellCommand::Breakdown,
        "/history" => ShellCommand::History,
        "/quit" | "/exit" => ShellCommand::Quit,
        command if command.starts_with('/') => ShellCommand::Help,
        _ => ShellCommand::Chat(line.to_owned()),
    }
}

/// Runs the interactive session until `/quit` or end of input.
pub fn start<T>(
    runtime: &Runtime,
    terminal: &mut dyn ShellTerminal,
    controller: &mut SessionController<T>,
) -> Result<()>
where
    T: AssistantTransport,
{
    tracing::info!(
        session_id = controller.session_id(),
        analyze_policy = ?controller.analyze_policy(),
        "starting assistant shell"
    );

    terminal.print_line("Zaman financial assistant. Type /help for commands.")?;

    while let Some(line) = terminal.prompt_line(PROMPT)? {
        match parse_command(&line) {
            ShellCommand::Empty => {}
            ShellCommand::Quit => break,
            ShellCommand::Help => print_lines(terminal, HELP_LINES)?,
            ShellCommand::History => {
                print_lines(terminal, transcript::render_messages(controller.messages(), None))?
            }
            ShellCommand::Breakdown => print_breakdown(terminal, controller)?,
            ShellCommand::Analyze => {
                let shown = controller.messages().len();
                let outcome = runtime.block_on(controller.submit_analyze());
                report(terminal, controller, shown, &outcome)?;
            }
            ShellCommand::Chat(text) => {
                let shown = controller.messages().len();
                controller.set_draft(text);
                let outcome = runtime.block_on(controller.submit_chat());
                report(terminal, controller, shown, &outcome)?;
            }
        }
    }

    tracing::info!(
        messages = controller.messages().len(),
        "assistant shell finished"
    );
    Ok(())
}

/// Prints the messages appended since `shown`, or why the trigger was refused.
pub fn report<T>(
    terminal: &mut dyn ShellTerminal,
    controller: &SessionController<T>,
    shown: usize,
    outcome: &FlowOutcome,
) -> Result<()>
where
    T: AssistantTransport,
{
    if let FlowOutcome::Rejected(reason) = outcome {
        terminal.print_line(rejection_text(*reason))?;
        return Ok(());
    }

    let log = controller.state().messages();
    let previous_role = shown
        .checked_sub(1)
        .and_then(|index| log.messages().get(index))
        .map(|message| message.role);
    let fresh = log.since(shown);

    print_lines(terminal, transcript::render_messages(fresh, previous_role))
}

pub fn print_breakdown<T>(
    terminal: &mut dyn ShellTerminal,
    controller: &SessionController<T>,
) -> Result<()>
where
    T: AssistantTransport,
{
    match controller.category_breakdown() {
        Some(shares) => print_lines(
            terminal,
            transcript::render_breakdown(&shares, controller.currency()),
        ),
        None => {
            terminal.print_line("No analysis yet. Run /analyze first.")?;
            Ok(())
        }
    }
}

fn rejection_text(reason: RejectReason) -> &'static str {
    match reason {
        RejectReason::Busy => "Still waiting for the previous reply.",
        RejectReason::EmptyDraft => "Nothing to send.",
        RejectReason::AlreadyAnalyzed => {
            "Your transactions are already analyzed. Use /breakdown to see them."
        }
    }
}

fn print_lines<I, S>(terminal: &mut dyn ShellTerminal, lines: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        terminal.print_line(line.as_ref())?;
    }

    Ok(())
}
