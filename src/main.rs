//! Interactive triage session on stdin.
//!
//! Reads one feedback comment, then employee replies one per line, until the
//! agent closes the conversation. Prints the resulting insight as JSON.
//!
//! Usage: `bienestar-triage [departamento] [equipo]`

use std::error::Error;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bienestar_triage::adapters::{InMemoryConversationStore, KeywordFeedbackAnalyzer};
use bienestar_triage::application::{
    ProcessReplyCommand, ProcessReplyHandler, StartTriageCommand, StartTriageHandler,
};
use bienestar_triage::config::{AppConfig, LoggingConfig};
use bienestar_triage::domain::insight::InsightGenerator;
use bienestar_triage::domain::triage::{ConversationAgent, StartContext};
use bienestar_triage::ports::ConversationStore;

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bienestar_triage={}", logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging);

    let agent = Arc::new(ConversationAgent::with_keyword_detector(config.triage_rules()?)?);
    let generator = Arc::new(InsightGenerator::new(config.insight_templates()?)?);
    let store: Arc<dyn ConversationStore> = Arc::new(InMemoryConversationStore::new());

    let start = StartTriageHandler::new(
        Arc::new(KeywordFeedbackAnalyzer::new()),
        store.clone(),
        agent.clone(),
    );
    let reply = ProcessReplyHandler::new(store, agent, generator);

    let mut args = std::env::args().skip(1);
    let context = StartContext::new(
        args.next().unwrap_or_default(),
        args.next().unwrap_or_default(),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    eprintln!("Comentario:");
    let Some(comment) = lines.next_line().await? else {
        return Ok(());
    };

    let started = start.handle(StartTriageCommand::new(comment, context)).await?;
    println!("{}", serde_json::to_string_pretty(&started.decision)?);

    let (Some(conversation_id), Some(question)) =
        (started.conversation_id, started.decision.question)
    else {
        info!("No follow-up needed");
        return Ok(());
    };
    println!("> {}", question);

    while let Some(line) = lines.next_line().await? {
        let result = reply
            .handle(ProcessReplyCommand::new(conversation_id, line))
            .await?;

        if let Some(question) = &result.decision.question {
            println!("> {}", question);
        }
        if result.decision.is_close() {
            if let Some(reason) = result.decision.close_reason {
                info!(conversation_id = %conversation_id, reason = %reason, "Conversation closed");
            }
            if let Some(insight) = &result.insight {
                println!("{}", serde_json::to_string_pretty(insight)?);
            }
            break;
        }
    }

    Ok(())
}
