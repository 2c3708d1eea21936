// This module provides a relatively simple thread-safe pool of reusable
// objects. It's implemented by a stack represented by a Mutex<Vec<Box<T>>>.
// Boxing the values keeps pushing and popping cheap, since the things we put
// in a pool here (NFA simulation caches) are a good deal bigger than a
// pointer.
//
// The pool exists because an NFA simulation needs scratch space (two state
// lists and a generation counter) that must never be shared between two
// searches running at the same time. Creating that scratch space for every
// line of a large file is wasteful, and a single cache behind a lock would
// serialize every search. The pool scales with the number of threads that
// *simultaneously* search with the same regex.

use std::sync::Mutex;

/// A thread safe pool for reusing values.
///
/// Getting a value from the pool returns a guard. The caller has exclusive
/// access to the value while the guard is alive. When the guard is dropped,
/// the value is put back into the pool.
pub(crate) struct Pool<T, F = fn() -> T> {
    /// A stack of T values to hand out.
    stack: Mutex<Vec<Box<T>>>,
    /// A function to create more T values when stack is empty and a caller
    /// has requested a T.
    create: F,
}

impl<T, F> Pool<T, F> {
    /// Create a new pool. The given closure is used to create values in
    /// the pool when necessary.
    pub(crate) fn new(create: F) -> Pool<T, F> {
        Pool { stack: Mutex::new(vec![]), create }
    }
}

impl<T: Send, F: Fn() -> T> Pool<T, F> {
    /// Get a value from the pool. This may block if another thread is also
    /// attempting to retrieve a value from the pool.
    ///
    /// There is no guarantee about which value in the pool is returned.
    pub(crate) fn get(&self) -> PoolGuard<'_, T, F> {
        let value = match self.lock().pop() {
            None => Box::new((self.create)()),
            Some(value) => value,
        };
        PoolGuard { pool: self, value: Some(value) }
    }

    /// Puts a value back into the pool. Callers don't need to call this.
    /// Once the guard that's returned by 'get' is dropped, it is put back
    /// into the pool automatically.
    fn put(&self, value: Box<T>) {
        self.lock().push(value);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Box<T>>> {
        // A panic while the lock is held can only interrupt a push or a pop,
        // neither of which can leave the stack itself in a broken state.
        self.stack.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl<T: core::fmt::Debug, F> core::fmt::Debug for Pool<T, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pool").field("stack", &self.stack).finish()
    }
}

/// A guard that is returned when a caller requests a value from the pool.
///
/// The purpose of the guard is to use RAII to automatically put the value
/// back in the pool once it's dropped.
pub(crate) struct PoolGuard<'a, T: Send, F: Fn() -> T> {
    /// The pool that this guard is attached to.
    pool: &'a Pool<T, F>,
    /// This is only None after the guard has been dropped.
    value: Option<Box<T>>,
}

impl<'a, T: Send, F: Fn() -> T> core::ops::Deref for PoolGuard<'a, T, F> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value.as_deref().expect("pool guard used after drop")
    }
}

impl<'a, T: Send, F: Fn() -> T> core::ops::DerefMut for PoolGuard<'a, T, F> {
    fn deref_mut(&mut self) -> &mut T {
        self.value.as_deref_mut().expect("pool guard used after drop")
    }
}

impl<'a, T: Send, F: Fn() -> T> Drop for PoolGuard<'a, T, F> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.pool.put(value);
        }
    }
}
