//! Command implementations. Each prints its result as pretty JSON on stdout.

use std::io::Write;

use anyhow::{bail, Context};
use easypanel::{
    CancellationToken, Client, CloseReason, DeployToken, ProjectName, ProjectQuery, SelectService,
    ServiceName, StreamLogsParams,
};
use futures::StreamExt;
use serde::Serialize;

use crate::args::{Command, ProjectsAction, ServiceTarget, ServicesAction};

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("render output")?;
    println!("{rendered}");
    Ok(())
}

fn selector(target: &ServiceTarget) -> SelectService {
    SelectService::new(&target.project, &target.service)
}

pub async fn run(client: &Client, command: Command, cancel: CancellationToken) -> anyhow::Result<()> {
    match command {
        Command::User => print_json(&client.get_user().await?),

        Command::Projects { action } => match action {
            ProjectsAction::List => print_json(&client.projects().list().await?),
            ProjectsAction::Inspect { project } => {
                let inspected = client.projects().inspect(&ProjectQuery::new(project)).await?;
                print_json(&inspected)
            }
        },

        Command::Services { action } => match action {
            ServicesAction::Inspect { target } => {
                let service = client.services().inspect(target.kind, &selector(&target)).await?;
                print_json(&service)
            }
            ServicesAction::Deploy { target } => {
                client.services().deploy(target.kind, &selector(&target)).await?;
                tracing::info!(project = %target.project, service = %target.service, "deployment triggered");
                Ok(())
            }
            ServicesAction::Restart { target } => {
                client.services().restart(target.kind, &selector(&target)).await?;
                tracing::info!(project = %target.project, service = %target.service, "restart requested");
                Ok(())
            }
        },

        Command::Stats => print_json(&client.monitor().system_stats().await?),

        Command::Logs {
            target,
            deploy_token,
            compose,
        } => follow_logs(client, target, deploy_token, compose, cancel).await,
    }
}

async fn follow_logs(
    client: &Client,
    target: ServiceTarget,
    deploy_token: Option<String>,
    compose: bool,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let token = match deploy_token.and_then(DeployToken::new) {
        Some(token) => token,
        None => client
            .services()
            .inspect(target.kind, &selector(&target))
            .await
            .context("look up deploy token")?
            .deploy_token()
            .context("the panel returned no deploy token for this service")?,
    };

    let params = StreamLogsParams {
        project_name: ProjectName::new(target.project).context("project name is empty")?,
        service_name: ServiceName::new(target.service).context("service name is empty")?,
        token,
        compose,
    };

    let mut stream = client.services().stream_logs(&params, cancel).await?;
    let mut stdout = std::io::stdout();
    while let Some(message) = stream.next().await {
        stdout.write_all(message.output.as_bytes())?;
        stdout.flush()?;
    }

    match stream.finish().await {
        CloseReason::Cancelled | CloseReason::PeerClosed => Ok(()),
        CloseReason::ConsumerDropped => Ok(()),
        CloseReason::ReadFailed { error } => bail!("log stream broke: {error}"),
        CloseReason::BadFrame { error } => bail!("log stream sent an unreadable frame: {error}"),
        CloseReason::Aborted => bail!("log stream task aborted"),
    }
}
