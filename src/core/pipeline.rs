/// The paced pipeline: Event → Handler → Sink, once per interval.
///
/// Wires the event generator to a role-specific handler and a logging
/// sink, and owns the single suspension point where cancellation is honored.

use rand::Rng;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::ConfigError;
use crate::core::extract::extract_quoted;
use crate::core::generator::{EventGenerator, GeneratorError};
use crate::core::metadata::derive_metadata;
use crate::logging::LoggingError;
use crate::schema::catalog::CatalogError;
use crate::schema::event::EventMetadata;
use crate::shutdown::ShutdownListener;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("generator error: {0}")]
    Generator(#[from] GeneratorError),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
}

/// One line handed to the sink.
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    /// A rendered event, with its 1-based sequence number when the role
    /// numbers its messages.
    Event { sequence: Option<u64>, text: String },
    /// Metadata derived from the message embedded in the last event.
    Metadata(EventMetadata),
}

/// Destination for emissions. Must append each emission as one whole line.
pub trait Sink {
    fn emit(&mut self, emission: Emission);
}

/// Writes emissions through `tracing` at INFO.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn emit(&mut self, emission: Emission) {
        match emission {
            Emission::Event {
                sequence: None,
                text,
            } => info!("{}", text),
            Emission::Event {
                sequence: Some(n),
                text,
            } => info!(sequence = n, "[Message #{}] {}", n, text),
            Emission::Metadata(metadata) => info!(
                word_count = metadata.word_count,
                char_count = metadata.char_count,
                sentiment = %metadata.sentiment,
                "Message metadata: {}",
                metadata
            ),
        }
    }
}

/// Collects emissions in memory.
impl Sink for Vec<Emission> {
    fn emit(&mut self, emission: Emission) {
        self.push(emission);
    }
}

/// Role-specific processing applied to each rendered event.
pub trait EventHandler {
    fn handle(&mut self, event: String, sink: &mut dyn Sink);
}

/// Emits each event as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProducerHandler;

impl EventHandler for ProducerHandler {
    fn handle(&mut self, event: String, sink: &mut dyn Sink) {
        sink.emit(Emission::Event {
            sequence: None,
            text: event,
        });
    }
}

/// Numbers each event, then emits metadata for the quoted message inside
/// it. Events without a usable quoted region get no metadata.
#[derive(Debug, Clone, Default)]
pub struct ConsumerHandler {
    message_count: u64,
}

impl ConsumerHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message_count(&self) -> u64 {
        self.message_count
    }
}

impl EventHandler for ConsumerHandler {
    fn handle(&mut self, event: String, sink: &mut dyn Sink) {
        self.message_count += 1;
        let metadata = extract_quoted(&event).map(derive_metadata);
        sink.emit(Emission::Event {
            sequence: Some(self.message_count),
            text: event,
        });
        if let Some(metadata) = metadata {
            sink.emit(Emission::Metadata(metadata));
        }
    }
}

/// Drive `generator` until `shutdown` fires. Returns the number of events
/// emitted.
///
/// The first event goes out immediately; each later one follows a pause of
/// `interval`. Cancellation is checked before rendering and raced against
/// the pause, so no event is rendered after shutdown is observed.
pub async fn run_paced<H, S, R>(
    generator: &EventGenerator,
    handler: &mut H,
    sink: &mut S,
    rng: &mut R,
    interval: Duration,
    shutdown: &mut ShutdownListener,
) -> u64
where
    H: EventHandler + ?Sized,
    S: Sink,
    R: Rng + ?Sized,
{
    let mut emitted = 0u64;

    loop {
        if shutdown.is_shutdown() {
            break;
        }

        let event = generator.next_event(rng);
        handler.handle(event, sink);
        emitted += 1;

        tokio::select! {
            biased;
            _ = shutdown.recv() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    emitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::event::Sentiment;

    #[test]
    fn producer_emits_untagged() {
        let mut sink: Vec<Emission> = Vec::new();
        ProducerHandler.handle("Just hiked.".to_string(), &mut sink);
        assert_eq!(
            sink,
            vec![Emission::Event {
                sequence: None,
                text: "Just hiked.".to_string()
            }]
        );
    }

    #[test]
    fn consumer_numbers_and_derives_metadata() {
        let mut sink: Vec<Emission> = Vec::new();
        let mut handler = ConsumerHandler::new();

        handler.handle(
            "Consumed: 'Amazing day! I hiked a mountain peak.' - Action: Logged".to_string(),
            &mut sink,
        );
        handler.handle("no quotes at all".to_string(), &mut sink);

        assert_eq!(handler.message_count(), 2);
        assert_eq!(sink.len(), 3);
        assert!(matches!(sink[0], Emission::Event { sequence: Some(1), .. }));
        match &sink[1] {
            Emission::Metadata(metadata) => {
                assert_eq!(metadata.word_count, 7);
                assert_eq!(metadata.char_count, 37);
                assert_eq!(metadata.sentiment, Sentiment::Positive);
            }
            other => panic!("expected metadata, got {:?}", other),
        }
        assert_eq!(
            sink[2],
            Emission::Event {
                sequence: Some(2),
                text: "no quotes at all".to_string()
            }
        );
    }

    #[test]
    fn tracing_sink_accepts_every_emission() {
        let mut sink = TracingSink;
        sink.emit(Emission::Event {
            sequence: None,
            text: "plain".to_string(),
        });
        sink.emit(Emission::Event {
            sequence: Some(3),
            text: "numbered".to_string(),
        });
        sink.emit(Emission::Metadata(derive_metadata("ok")));
    }
}
