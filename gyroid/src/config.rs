//! Types used in configuration structures

/// Thread pool to use for multithreaded generation
///
/// Most users will use the global Rayon pool, but it's possible to provide your
/// own as well.
pub enum ThreadPool {
    /// User-provided pool
    Custom(rayon::ThreadPool),
    /// Global Rayon pool
    Global,
}

impl ThreadPool {
    /// Runs a function across the thread pool
    pub fn run<F: FnOnce() -> V + Send, V: Send>(&self, f: F) -> V {
        match self {
            ThreadPool::Custom(p) => p.install(f),
            ThreadPool::Global => f(),
        }
    }

    /// Returns the number of threads in the pool
    pub fn thread_count(&self) -> usize {
        match self {
            ThreadPool::Custom(p) => p.current_num_threads(),
            ThreadPool::Global => rayon::current_num_threads(),
        }
    }
}

/// Settings for a generation request, separate from the shape parameters
#[derive(Default)]
pub struct Settings<'a> {
    /// Thread pool to use for sampling and extraction
    ///
    /// If this is `None`, then everything runs in the calling thread;
    /// otherwise, the provided pool is used.
    pub threads: Option<&'a ThreadPool>,
}

impl<'a> Settings<'a> {
    /// Builds settings which run on the given pool
    pub fn with_threads(pool: &'a ThreadPool) -> Self {
        Self {
            threads: Some(pool),
        }
    }
}
