//! /treino command - Start or finish a training session (poise implementation)

use tracing::info;

use mw_monitor::{Baseline, StartReport, StopReport};

use crate::commands::Context;
use crate::error::Result;

/// Action chosen for `/treino`
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum TrainingAction {
    #[name = "iniciar"]
    Start,
    #[name = "finalizar"]
    Finish,
}

/// Reply shown to the user who started a session
pub fn start_reply(report: &StartReport) -> String {
    let mut reply = if report.restarted {
        "Treino reiniciado! 🎯 O monitoramento anterior foi substituído.".to_string()
    } else {
        "Treino iniciado com sucesso! 🎯".to_string()
    };

    if report.baseline == Baseline::Deferred {
        reply.push_str(
            "\n⚠️ Não foi possível consultar a última partida agora; ela será registrada no próximo ciclo.",
        );
    }
    if !report.announced {
        reply.push_str("\n⚠️ Não consegui enviar o aviso no canal de treino.");
    }

    reply
}

/// Reply shown to the user who finished a session
pub fn stop_reply(report: &StopReport) -> &'static str {
    match (report.was_active, report.announced) {
        (false, _) => "Nenhum treino em andamento.",
        (true, true) => "Treino encerrado!",
        (true, false) => "Treino encerrado! ⚠️ Não consegui enviar o aviso no canal de treino.",
    }
}

/// Gerencia os treinos do time
#[poise::command(slash_command, guild_only)]
pub async fn treino(
    ctx: Context<'_>,
    #[description = "Escolha iniciar ou finalizar o treino"] acao: TrainingAction,
) -> Result<()> {
    // Upstream lookups during start can outlast the interaction deadline
    ctx.defer_ephemeral().await?;

    info!("/treino {:?} from {}", acao, ctx.author().name);

    let coordinator = &ctx.data().coordinator;
    let reply = match acao {
        TrainingAction::Start => start_reply(&coordinator.start().await),
        TrainingAction::Finish => stop_reply(&coordinator.stop().await).to_string(),
    };

    ctx.send(poise::CreateReply::default().content(reply).ephemeral(true))
        .await?;

    Ok(())
}
