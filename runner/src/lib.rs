#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Autonomous timed driver for the Game of Life world.
//!
//! Exactly one driver thread runs the stepping loop for the lifetime of the
//! process. Every pass executes [`Command::Tick`], so neighbour counts are
//! refreshed whether or not the simulation is running. While running, the
//! loop then waits out the configured delay before the next pass; while
//! paused, it parks on a condition variable until a submitted command wakes
//! it. All mutation is serialized through the shared state lock: adapters
//! never touch the world directly, they submit commands through a
//! [`DriverHandle`].

use std::sync::{mpsc, Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use game_of_life_core::{Command, Event};
use game_of_life_world::{self as world, query::BoardSnapshot, World};
use thiserror::Error;

/// Fatal failures of the autonomous driver. None of these are retried; the
/// process is expected to terminate when one surfaces.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The shared state lock was poisoned by a panicked thread.
    #[error("simulation state lock was poisoned by a panicked thread")]
    StatePoisoned,
    /// The driver thread itself panicked before finishing cleanly.
    #[error("simulation driver thread panicked")]
    DriverPanicked,
}

#[derive(Debug)]
struct Shared {
    state: Mutex<DriverState>,
    wake: Condvar,
}

#[derive(Debug)]
struct DriverState {
    world: World,
    subscribers: Vec<mpsc::Sender<Event>>,
    woken: bool,
    shutdown: bool,
}

impl DriverState {
    fn broadcast(&mut self, events: &[Event]) {
        // Subscribers whose receiver has been dropped are pruned here.
        self.subscribers.retain(|subscriber| {
            events
                .iter()
                .all(|event| subscriber.send(event.clone()).is_ok())
        });
    }
}

/// Cloneable handle used to submit commands and observe the simulation.
#[derive(Clone, Debug)]
pub struct DriverHandle {
    shared: Arc<Shared>,
}

impl DriverHandle {
    /// Applies a command to the world, broadcasts the resulting events, and
    /// wakes the driver so its next pass reflects the mutation.
    pub fn submit(&self, command: Command) -> Result<(), DriverError> {
        let mut state = self
            .shared
            .state
            .lock()
            .map_err(|_| DriverError::StatePoisoned)?;
        let mut events = Vec::new();
        world::apply(&mut state.world, command, &mut events);
        state.broadcast(&events);
        state.woken = true;
        drop(state);
        self.shared.wake.notify_all();
        Ok(())
    }

    /// Registers a new subscriber for the events the world broadcasts.
    pub fn subscribe(&self) -> Result<mpsc::Receiver<Event>, DriverError> {
        let (sender, receiver) = mpsc::channel();
        let mut state = self
            .shared
            .state
            .lock()
            .map_err(|_| DriverError::StatePoisoned)?;
        state.subscribers.push(sender);
        Ok(receiver)
    }

    /// Captures an owned snapshot of the committed board and run state.
    pub fn snapshot(&self) -> Result<BoardSnapshot, DriverError> {
        let state = self
            .shared
            .state
            .lock()
            .map_err(|_| DriverError::StatePoisoned)?;
        Ok(world::query::board_snapshot(&state.world))
    }
}

/// Owns the thread that runs the stepping loop.
#[derive(Debug)]
pub struct Driver {
    shared: Arc<Shared>,
    thread: JoinHandle<Result<(), DriverError>>,
}

impl Driver {
    /// Spawns the driver thread around the provided world.
    #[must_use]
    pub fn spawn(world: World) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(DriverState {
                world,
                subscribers: Vec::new(),
                woken: false,
                shutdown: false,
            }),
            wake: Condvar::new(),
        });
        let loop_shared = Arc::clone(&shared);
        let thread = thread::spawn(move || drive(&loop_shared));
        Self { shared, thread }
    }

    /// Creates a cloneable handle for submitting commands and reading state.
    #[must_use]
    pub fn handle(&self) -> DriverHandle {
        DriverHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Requests shutdown and joins the driver thread.
    pub fn stop(self) -> Result<(), DriverError> {
        {
            let mut state = self
                .shared
                .state
                .lock()
                .map_err(|_| DriverError::StatePoisoned)?;
            state.shutdown = true;
        }
        self.shared.wake.notify_all();
        self.thread.join().map_err(|_| DriverError::DriverPanicked)?
    }
}

fn drive(shared: &Shared) -> Result<(), DriverError> {
    loop {
        let mut state = shared
            .state
            .lock()
            .map_err(|_| DriverError::StatePoisoned)?;
        if state.shutdown {
            return Ok(());
        }

        let mut events = Vec::new();
        world::apply(&mut state.world, Command::Tick, &mut events);
        state.broadcast(&events);
        state.woken = false;

        if world::query::is_paused(&state.world) {
            // Park until a submitted command or shutdown wakes the loop.
            while !state.woken && !state.shutdown {
                state = shared
                    .wake
                    .wait(state)
                    .map_err(|_| DriverError::StatePoisoned)?;
            }
        } else {
            // The interval captured here stays in force for this pass even
            // if a delay change lands mid-wait; the new value applies from
            // the next pass. Pause and shutdown cut the wait short.
            let delay = world::query::delay(&state.world);
            let start = Instant::now();
            loop {
                let elapsed = start.elapsed();
                if elapsed >= delay {
                    break;
                }
                let (guard, _) = shared
                    .wake
                    .wait_timeout(state, delay - elapsed)
                    .map_err(|_| DriverError::StatePoisoned)?;
                state = guard;
                if state.shutdown || world::query::is_paused(&state.world) {
                    break;
                }
            }
        }
    }
}
