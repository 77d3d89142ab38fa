use crate::chess::RatingsDataSource;
use crate::config::CurationConfig;
use crate::error::{PortfolioError, Result};
use crate::github::ProfileDataSource;
use crate::models::{PortfolioSnapshot, ProfileData, RatingsRecord};
use ractor::{ Actor, ActorProcessingErr, ActorRef, RpcReplyPort, SpawnErr };
use std::sync::Arc;
use std::time::Duration;
use tracing::{ debug, error, info, warn };

/// Owns the portfolio view state and drives the two data sources
pub struct PortfolioActor;

/// State for the portfolio actor
pub struct PortfolioState {
    profile_source: Arc<ProfileDataSource>,
    ratings_source: Arc<RatingsDataSource>,
    github_user: String,
    chess_user: String,
    curation: CurationConfig,
    snapshot: PortfolioSnapshot,
}

/// Messages the portfolio actor can handle
#[derive(Debug)]
pub enum PortfolioMessage {
    /// Start a new load generation, discarding whatever is in flight
    Reload,
    /// Profile and repositories finished loading
    ProfileSettled {
        generation: u64,
        result: std::result::Result<ProfileData, String>,
    },
    /// Ratings finished loading
    RatingsSettled {
        generation: u64,
        result: std::result::Result<RatingsRecord, String>,
    },
    /// Current view state
    GetSnapshot(RpcReplyPort<PortfolioSnapshot>),
}

/// Arguments for starting the portfolio actor
pub struct PortfolioArgs {
    pub profile_source: Arc<ProfileDataSource>,
    pub ratings_source: Arc<RatingsDataSource>,
    pub github_user: String,
    pub chess_user: String,
    pub curation: CurationConfig,
    /// Kick off the first load as soon as the actor starts
    pub load_on_start: bool,
}

impl PortfolioActor {
    pub async fn spawn_with_sources(
        args: PortfolioArgs
    ) -> std::result::Result<ActorRef<PortfolioMessage>, SpawnErr> {
        let (actor_ref, _handle) = Actor::spawn(None, PortfolioActor, args).await?;
        info!("Portfolio actor started");
        Ok(actor_ref)
    }

    fn start_load(myself: &ActorRef<PortfolioMessage>, state: &mut PortfolioState) {
        let generation = state.snapshot.generation + 1;
        state.snapshot = PortfolioSnapshot::begin(generation);
        info!(generation, "Starting portfolio load");

        let profile_source = state.profile_source.clone();
        let username = state.github_user.clone();
        let actor = myself.clone();
        tokio::spawn(async move {
            let result = profile_source.load(&username).await.map_err(|e| {
                error!(generation, error = %e, "GitHub load failed");
                e.to_string()
            });
            if let Err(e) = actor.send_message(PortfolioMessage::ProfileSettled { generation, result }) {
                debug!("Portfolio actor gone, dropping profile result: {}", e);
            }
        });

        let ratings_source = state.ratings_source.clone();
        let username = state.chess_user.clone();
        let actor = myself.clone();
        tokio::spawn(async move {
            let result = ratings_source.load(&username).await.map_err(|e| {
                error!(generation, error = %e, "Chess.com load failed");
                e.to_string()
            });
            if let Err(e) = actor.send_message(PortfolioMessage::RatingsSettled { generation, result }) {
                debug!("Portfolio actor gone, dropping ratings result: {}", e);
            }
        });
    }
}

#[ractor::async_trait]
impl Actor for PortfolioActor {
    type Msg = PortfolioMessage;
    type State = PortfolioState;
    type Arguments = PortfolioArgs;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments
    ) -> std::result::Result<Self::State, ActorProcessingErr> {
        if args.load_on_start {
            myself.send_message(PortfolioMessage::Reload).map_err(|e| {
                ActorProcessingErr::from(format!("Failed to schedule initial load: {}", e))
            })?;
        }

        Ok(PortfolioState {
            profile_source: args.profile_source,
            ratings_source: args.ratings_source,
            github_user: args.github_user,
            chess_user: args.chess_user,
            curation: args.curation,
            snapshot: PortfolioSnapshot::begin(0),
        })
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State
    ) -> std::result::Result<(), ActorProcessingErr> {
        match message {
            PortfolioMessage::Reload => {
                PortfolioActor::start_load(&myself, state);
            }

            PortfolioMessage::ProfileSettled { generation, result } => {
                if generation != state.snapshot.generation {
                    warn!(generation, current = state.snapshot.generation, "Discarding stale profile result");
                    return Ok(());
                }
                state.snapshot.apply_profile(result, &state.curation);
                info!(
                    generation,
                    curated = state.snapshot.projects.curated.len(),
                    "Profile applied"
                );
            }

            PortfolioMessage::RatingsSettled { generation, result } => {
                if generation != state.snapshot.generation {
                    warn!(generation, current = state.snapshot.generation, "Discarding stale ratings result");
                    return Ok(());
                }
                state.snapshot.apply_ratings(result);
                info!(generation, "Ratings applied");
            }

            PortfolioMessage::GetSnapshot(reply) => {
                if let Err(e) = reply.send(state.snapshot.clone()) {
                    error!("Failed to reply with snapshot: {}", e);
                }
            }
        }

        Ok(())
    }
}

/// Ask the actor for its current snapshot
pub async fn fetch_snapshot(
    actor: &ActorRef<PortfolioMessage>,
    timeout: Duration
) -> Result<PortfolioSnapshot> {
    match actor.call(|reply| PortfolioMessage::GetSnapshot(reply), Some(timeout)).await {
        Ok(ractor::rpc::CallResult::Success(snapshot)) => Ok(snapshot),
        Ok(ractor::rpc::CallResult::Timeout) => {
            Err(PortfolioError::ActorError("Timeout getting portfolio snapshot".to_string()))
        }
        Ok(ractor::rpc::CallResult::SenderError) => {
            Err(PortfolioError::ActorError("Sender error getting portfolio snapshot".to_string()))
        }
        Err(e) => Err(PortfolioError::ActorError(format!("Failed to contact portfolio actor: {}", e))),
    }
}

/// Start a new load generation
pub fn request_reload(actor: &ActorRef<PortfolioMessage>) -> Result<()> {
    actor
        .send_message(PortfolioMessage::Reload)
        .map_err(|e| PortfolioError::ActorError(format!("Failed to request reload: {}", e)))
}
