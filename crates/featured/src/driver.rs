//! Runs a [`Carousel`] on tokio.
//!
//! One task owns the engine and serializes user commands with timer firings,
//! so transitions never interleave.

use std::collections::HashMap;
use std::time::Duration;

use storefront_catalog::ImageProxy;
use storefront_core::FeaturedSet;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::carousel::{
    Carousel, CarouselError, CarouselPhase, CarouselSettings, CarouselSnapshot, Renderer,
};
use crate::timer::{Timer, TimerId};

/// Timer backed by tokio tasks; firings arrive on the paired receiver.
pub struct TokioTimer {
    fired: mpsc::UnboundedSender<TimerId>,
    next_id: u64,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioTimer {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerId>) {
        let (fired, rx) = mpsc::unbounded_channel();
        let timer = Self {
            fired,
            next_id: 0,
            tasks: HashMap::new(),
        };
        (timer, rx)
    }

    fn next_id(&mut self) -> TimerId {
        self.tasks.retain(|_, task| !task.is_finished());
        self.next_id += 1;
        TimerId::new(self.next_id)
    }
}

impl Timer for TokioTimer {
    fn every(&mut self, period: Duration) -> TimerId {
        let id = self.next_id();
        let fired = self.fired.clone();

        let task = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if fired.send(id).is_err() {
                    break;
                }
            }
        });

        self.tasks.insert(id, task);
        id
    }

    fn after(&mut self, delay: Duration) -> TimerId {
        let id = self.next_id();
        let fired = self.fired.clone();

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = fired.send(id);
        });

        self.tasks.insert(id, task);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.abort();
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[derive(Debug)]
enum Command {
    Start,
    Next,
    Prev,
    TogglePause(oneshot::Sender<CarouselPhase>),
    Snapshot(oneshot::Sender<CarouselSnapshot>),
    Shutdown(oneshot::Sender<CarouselSnapshot>),
}

/// Control surface of a running carousel.
#[derive(Debug)]
pub struct CarouselHandle {
    commands: mpsc::Sender<Command>,
    task: JoinHandle<()>,
}

/// Start `featured` rotating on a background task.
///
/// The carousel starts immediately. Fails with [`CarouselError::Empty`] for an
/// empty set, leaving the renderer untouched.
pub fn spawn_carousel<R>(
    featured: FeaturedSet,
    proxy: ImageProxy,
    settings: CarouselSettings,
    renderer: R,
) -> Result<CarouselHandle, CarouselError>
where
    R: Renderer + Send + 'static,
{
    let (timer, mut fired) = TokioTimer::new();
    let mut carousel = Carousel::new(featured, proxy, settings, timer, renderer)?;
    let (commands, mut inbox) = mpsc::channel(32);

    let task = tokio::spawn(async move {
        tracing::info!("carousel driver started with {} products", carousel.len());
        carousel.start();

        loop {
            tokio::select! {
                command = inbox.recv() => match command {
                    Some(Command::Start) => carousel.start(),
                    Some(Command::Next) => carousel.next(),
                    Some(Command::Prev) => carousel.prev(),
                    Some(Command::TogglePause(reply)) => {
                        let _ = reply.send(carousel.toggle_pause());
                    }
                    Some(Command::Snapshot(reply)) => {
                        let _ = reply.send(carousel.snapshot());
                    }
                    Some(Command::Shutdown(reply)) => {
                        carousel.stop();
                        let _ = reply.send(carousel.snapshot());
                        break;
                    }
                    None => {
                        tracing::debug!("all carousel handles dropped");
                        carousel.stop();
                        break;
                    }
                },
                Some(id) = fired.recv() => carousel.fire(id),
            }
        }

        tracing::info!("carousel driver stopped");
    });

    Ok(CarouselHandle { commands, task })
}

impl CarouselHandle {
    /// Restart auto-advance from the current product.
    pub async fn start(&self) -> Result<(), CarouselError> {
        self.send(Command::Start).await
    }

    pub async fn next(&self) -> Result<(), CarouselError> {
        self.send(Command::Next).await
    }

    pub async fn prev(&self) -> Result<(), CarouselError> {
        self.send(Command::Prev).await
    }

    /// Returns the phase after toggling.
    pub async fn toggle_pause(&self) -> Result<CarouselPhase, CarouselError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::TogglePause(reply)).await?;
        rx.await.map_err(|_| CarouselError::Stopped)
    }

    pub async fn snapshot(&self) -> Result<CarouselSnapshot, CarouselError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot(reply)).await?;
        rx.await.map_err(|_| CarouselError::Stopped)
    }

    /// Poll until the carousel leaves `Playing` (auto-stop or pause).
    pub async fn wait_until_settled(&self, poll: Duration) -> Result<CarouselSnapshot, CarouselError> {
        loop {
            let snapshot = self.snapshot().await?;
            if snapshot.phase != CarouselPhase::Playing {
                return Ok(snapshot);
            }
            tokio::time::sleep(poll).await;
        }
    }

    /// Stop the carousel, cancel its timers and wait for the task to end.
    pub async fn shutdown(self) -> Result<CarouselSnapshot, CarouselError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Shutdown(reply)).await?;
        let snapshot = rx.await.map_err(|_| CarouselError::Stopped)?;

        if let Err(err) = self.task.await {
            tracing::warn!("carousel driver task ended abnormally: {}", err);
        }
        Ok(snapshot)
    }

    async fn send(&self, command: Command) -> Result<(), CarouselError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| CarouselError::Stopped)
    }
}
