pub mod portfolio;

pub use portfolio::{fetch_snapshot, request_reload, PortfolioActor, PortfolioArgs, PortfolioMessage};
