//! In-process worker group backed by a barrier.
//!
//! Each [`GroupMember`] is handed to one thread. Workers exchange their
//! offspring through shared slots; two barrier waits per merge keep a slow
//! reader from seeing the next generation's writes.

use std::sync::{Arc, Barrier, Mutex, MutexGuard};
use std::thread;

use super::coordinator::Coordinator;
use crate::error::{ConfigError, EvolveError, Result};

struct Shared<C> {
    barrier: Barrier,
    slots: Mutex<Vec<Vec<C>>>,
}

/// One worker's handle on a local group.
pub struct GroupMember<C> {
    rank: usize,
    size: usize,
    shared: Arc<Shared<C>>,
}

impl<C> GroupMember<C> {
    fn slots(&self) -> Result<MutexGuard<'_, Vec<Vec<C>>>> {
        self.shared
            .slots
            .lock()
            .map_err(|_| EvolveError::Coordinator("worker group state poisoned".into()))
    }
}

impl<C> std::fmt::Debug for GroupMember<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupMember")
            .field("rank", &self.rank)
            .field("size", &self.size)
            .finish()
    }
}

/// Creates the members of a group of `workers`, in rank order.
pub fn local_group<C>(workers: usize) -> std::result::Result<Vec<GroupMember<C>>, ConfigError> {
    if workers == 0 {
        return Err(ConfigError::InvalidWorkerCount);
    }
    let shared = Arc::new(Shared {
        barrier: Barrier::new(workers),
        slots: Mutex::new((0..workers).map(|_| Vec::new()).collect()),
    });
    Ok((0..workers)
        .map(|rank| GroupMember {
            rank,
            size: workers,
            shared: Arc::clone(&shared),
        })
        .collect())
}

/// Runs `worker` once per member of a new group, each on its own thread.
///
/// Results come back in rank order. Every worker must call `merge` the same
/// number of times; a worker that stops early leaves the others blocked.
pub fn run_local_group<C, T, F>(workers: usize, worker: F) -> Result<Vec<T>>
where
    C: Send,
    T: Send,
    F: Fn(GroupMember<C>) -> Result<T> + Sync,
{
    let members = local_group::<C>(workers)?;
    thread::scope(|scope| {
        let handles: Vec<_> = members
            .into_iter()
            .map(|member| {
                let worker = &worker;
                scope.spawn(move || worker(member))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(_) => Err(EvolveError::Coordinator("worker thread panicked".into())),
            })
            .collect()
    })
}

impl<C: Clone + Send> Coordinator<C> for GroupMember<C> {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn merge(&self, local: Vec<C>) -> Result<Vec<C>> {
        // Errors are held until both barriers are passed so no peer is stranded.
        let stored = self.slots().map(|mut slots| slots[self.rank] = local);
        self.shared.barrier.wait();
        let merged = self
            .slots()
            .map(|slots| slots.iter().flat_map(|s| s.iter().cloned()).collect());
        self.shared.barrier.wait();
        stored?;
        merged
    }
}
