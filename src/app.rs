use anyhow::{bail, Context, Result};
use tokio::runtime::Runtime;

use crate::{
    assistant,
    cli::{Cli, Command},
    domain, infra,
    ui::{
        self,
        shell::{self, ShellTerminal, StdTerminal},
    },
    usecases::{
        self, bootstrap, contracts::AssistantTransport, outcome::FlowOutcome,
        session::SessionController,
    },
};

const SESSION_COMMAND_FAILED: &str = "SESSION_COMMAND_FAILED";

pub fn run(cli: Cli) -> Result<()> {
    let context = bootstrap::bootstrap(cli.config.as_deref(), cli.session_id.as_deref())?;

    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        assistant = assistant::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    let runtime = build_runtime()?;
    let mut controller = SessionController::new(&context.assistant, context.session_settings());
    let mut terminal = StdTerminal;

    match cli.command_or_default() {
        Command::Run => shell::start(&runtime, &mut terminal, &mut controller)?,
        Command::Analyze => {
            let outcome = runtime.block_on(controller.submit_analyze());
            shell::report(&mut terminal, &controller, 0, &outcome)?;
            ensure_completed(&outcome)?;
            shell::print_breakdown(&mut terminal, &controller)?;
        }
        Command::Ask { text } => {
            run_single_question(&runtime, &mut terminal, &mut controller, text.join(" "))?
        }
    }

    Ok(())
}

fn build_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}

fn run_single_question<T>(
    runtime: &Runtime,
    terminal: &mut dyn ShellTerminal,
    controller: &mut SessionController<T>,
    text: String,
) -> Result<()>
where
    T: AssistantTransport,
{
    controller.set_draft(text);
    let outcome = runtime.block_on(controller.submit_chat());
    shell::report(terminal, controller, 0, &outcome)?;
    ensure_completed(&outcome)
}

fn ensure_completed(outcome: &FlowOutcome) -> Result<()> {
    match outcome {
        FlowOutcome::Completed => Ok(()),
        FlowOutcome::Failed(error) => {
            tracing::error!(
                code = SESSION_COMMAND_FAILED,
                source_code = error.code(),
                "assistant command failed"
            );
            bail!("assistant request failed: {error}")
        }
        FlowOutcome::Rejected(reason) => bail!("request not sent: {reason}"),
    }
}
