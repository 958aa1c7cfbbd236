//! Process entry logic shared by the producer and consumer binaries.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use crate::config::{self, BuzzConfig, Role};
use crate::core::generator::EventGenerator;
use crate::core::pipeline::{
    run_paced, ConsumerHandler, EventHandler, PipelineError, ProducerHandler, TracingSink,
};
use crate::logging;
use crate::schema::catalog::Catalog;
use crate::shutdown::ShutdownSignal;

/// The built-in catalog a role renders from.
pub fn default_catalog(role: Role) -> Result<Catalog, PipelineError> {
    let catalog = match role {
        Role::Producer => Catalog::travel_buzz()?,
        Role::Consumer => Catalog::buzz_responses()?,
    };
    Ok(catalog)
}

/// Build the generator for `config`, preferring its catalog override.
pub fn build_generator(config: &BuzzConfig) -> Result<EventGenerator, PipelineError> {
    let catalog = match config.catalog_path {
        Some(ref path) => Catalog::load_from_ron(path)?,
        None => default_catalog(config.role)?,
    };
    Ok(EventGenerator::from_catalog(&catalog)?)
}

fn handler_for(role: Role) -> Box<dyn EventHandler> {
    match role {
        Role::Producer => Box::new(ProducerHandler),
        Role::Consumer => Box::new(ConsumerHandler::new()),
    }
}

fn describe(role: Role) -> &'static str {
    match role {
        Role::Producer => "Generating travel buzz messages...",
        Role::Consumer => "Consuming and processing buzz messages...",
    }
}

/// Load `.env`, set up logging, resolve configuration and run `role`'s loop
/// until Ctrl+C or SIGTERM.
///
/// Configuration and catalog problems are returned before the loop starts.
pub async fn run(role: Role) -> Result<(), PipelineError> {
    dotenvy::dotenv().ok();

    let log_path = logging::init(&config::log_dir())?;

    info!("START {}...", role.label());
    info!("{}", describe(role));
    info!("Hit CTRL c (or CMD c) to close.");

    let config = BuzzConfig::from_env(role).map_err(|err| {
        error!(error = %err, "Invalid configuration");
        err
    })?;
    config.announce();

    let generator = build_generator(&config).map_err(|err| {
        error!(error = %err, "Failed to build event generator");
        err
    })?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let shutdown = ShutdownSignal::new();
    let mut listener = shutdown.subscribe();
    tokio::spawn(shutdown.clone().listen_for_os_signals());

    let mut handler = handler_for(role);
    let mut sink = TracingSink;
    let emitted = run_paced(
        &generator,
        handler.as_mut(),
        &mut sink,
        &mut rng,
        config.interval.as_duration(),
        &mut listener,
    )
    .await;

    info!(emitted, "NOTE: See {} to learn more.", log_path.display());
    info!("END {}.....", role.label());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Interval;
    use std::path::PathBuf;

    fn config_for(role: Role) -> BuzzConfig {
        BuzzConfig {
            role,
            interval: Interval::from_secs(0),
            seed: Some(1),
            catalog_path: None,
            log_dir: PathBuf::from("logs"),
        }
    }

    #[test]
    fn producer_uses_travel_catalog() {
        let generator = build_generator(&config_for(Role::Producer)).unwrap();
        assert_eq!(generator.templates().len(), 8);
        assert!(generator.vocabulary().contains("destination"));
    }

    #[test]
    fn consumer_uses_response_catalog() {
        let generator = build_generator(&config_for(Role::Consumer)).unwrap();
        assert_eq!(generator.templates().len(), 5);
        assert!(generator.vocabulary().contains("message"));
    }

    #[test]
    fn missing_catalog_override_is_fatal() {
        let mut config = config_for(Role::Producer);
        config.catalog_path = Some(PathBuf::from("catalog_data/missing.ron"));
        assert!(matches!(
            build_generator(&config),
            Err(PipelineError::Catalog(_))
        ));
    }

    #[test]
    fn catalog_override_is_used() {
        let mut config = config_for(Role::Consumer);
        config.catalog_path = Some(PathBuf::from("catalog_data/travel_buzz.ron"));
        let generator = build_generator(&config).unwrap();
        assert!(generator.vocabulary().contains("adjective"));
    }
}
